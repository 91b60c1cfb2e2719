use anyhow::{bail, Context};
use leaflet_codec::prelude::*;

const USAGE: &str = "usage: leaflet-codec-app [--pretty] render | decode <payload-json>";

/// Command-line front end: renders a demo map or decodes an event payload
fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut args: Vec<String> = std::env::args().skip(1).collect();
    let profile = match args.iter().position(|arg| arg == "--pretty") {
        Some(index) => {
            args.remove(index);
            RenderProfile::Pretty
        }
        None => RenderProfile::Compact,
    };
    let renderer = JsonRenderer::with_profile(&profile);

    match args.first().map(String::as_str) {
        Some("render") => render(&renderer),
        Some("decode") => {
            let payload = args.get(1).context(USAGE)?;
            decode(&renderer, payload)
        }
        _ => bail!(USAGE),
    }
}

fn render(renderer: &JsonRenderer) -> anyhow::Result<()> {
    let center = LatLng::new(51.505, -0.09)?;
    let options = MapOptions {
        zoom: Some(13),
        ..MapOptions::default()
    };
    let mut map = Map::new("map")?.with_center(center).with_options(options)?;
    map.add_layer(TileLayer::openstreetmap()).add_layer(Marker::with_options(
        center,
        MarkerOptions {
            title: "London".to_string(),
            ..MarkerOptions::default()
        },
    )?);

    let click = MouseEventBehavior::new(EventKind::Click)?;
    let located = LocationEventBehavior::new();

    let mut head = HeadContributions::new();
    map.render_head(&mut head, renderer)
        .context("failed to render map")?;
    click.render_head(&mut head, renderer.options(), &map.var_name(), "");
    located.render_head(&mut head, renderer.options(), &map.var_name(), "");

    log::info!("Rendered {} head scripts", head.on_load().len());

    for script in head.scripts() {
        println!("<script>\n{}</script>", script);
    }
    println!("<script>");
    for script in head.on_load() {
        print!("{}", script);
    }
    println!("</script>");
    Ok(())
}

fn decode(renderer: &JsonRenderer, payload: &str) -> anyhow::Result<()> {
    let codec = EventCodec::new(renderer);
    match codec.decode_any(payload)? {
        Some(event) => {
            println!("{:?} event [{}]", event.shape(), event.kind());
            println!("{}", renderer.to_json(&event)?);
        }
        None => println!("no event"),
    }
    Ok(())
}
