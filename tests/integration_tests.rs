use leaflet_codec::prelude::*;
use serde_json::Value;
use std::sync::{Arc, Mutex};

/// Integration tests for the full render and decode paths
/// These tests drive the crate the way a host web framework would
#[cfg(test)]
mod integration_tests {
    use super::*;

    fn request(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect()
    }

    /// Splits `L.tileLayer("<url>", {..})` into its url and options arguments
    fn tile_layer_arguments(script: &str) -> (String, Value) {
        let arguments = script
            .strip_prefix("L.tileLayer(")
            .and_then(|rest| rest.strip_suffix(')'))
            .expect("tile layer constructor call");
        let (url, options) = arguments.split_once(", ").expect("two arguments");
        (
            serde_json::from_str(url).unwrap(),
            serde_json::from_str(options).unwrap(),
        )
    }

    #[test]
    fn test_tile_layer_end_to_end() {
        let options = TileLayerOptions {
            attribution: Some("Map data".to_string()),
            ..TileLayerOptions::default()
        };
        let layer = TileLayer::new("https://x/{z}/{x}/{y}.png", options).unwrap();
        let script = layer.to_javascript(renderer()).unwrap();

        assert!(script.starts_with(r#"L.tileLayer("https://x/{z}/{x}/{y}.png", {"minZoom":0,"maxZoom":18,"#));
        let (url, options) = tile_layer_arguments(&script);
        assert_eq!(url, "https://x/{z}/{x}/{y}.png");
        assert_eq!(options["minZoom"], 0);
        assert_eq!(options["maxZoom"], 18);
        assert_eq!(options["tileSize"], 256);
        assert_eq!(options["attribution"], "Map data");
        assert!(options.get("zIndex").is_none());
        assert!(options.as_object().unwrap().values().all(|v| !v.is_null()));
    }

    #[test]
    fn test_bounds_end_to_end() {
        let bounds = LatLngBounds::new(
            LatLng::new(67.0, 78.9).unwrap(),
            LatLng::new(43.12, 23.43).unwrap(),
        )
        .unwrap();
        assert_eq!(
            renderer().to_json(&bounds).unwrap(),
            "[[67.0,78.9],[43.12,23.43]]"
        );
    }

    #[test]
    fn test_invariants_are_enforced() {
        assert!(matches!(LatLng::new(91.0, 0.0), Err(MapError::InvalidArgument(_))));
        assert!(matches!(LatLng::new(0.0, 181.0), Err(MapError::InvalidArgument(_))));
        assert!(matches!(
            LatLngBounds::new(LatLng::new(10.0, 10.0).unwrap(), LatLng::new(20.0, 20.0).unwrap()),
            Err(MapError::InvalidArgument(_))
        ));
        assert!(matches!(
            Bounds::new(Point::new(5.0, 5.0), Point::new(1.0, 1.0)),
            Err(MapError::InvalidArgument(_))
        ));
        assert!(matches!(
            Bounds::new(Point::new(f64::NAN, 0.0), Point::new(1.0, 1.0)),
            Err(MapError::InvalidArgument(_))
        ));

        let options = TileLayerOptions {
            z_index: Some(f64::NAN),
            ..TileLayerOptions::default()
        };
        assert!(TileLayer::new("https://tiles/{z}/{x}/{y}.png", options).is_err());

        let options = MarkerOptions {
            opacity: f64::INFINITY,
            ..MarkerOptions::default()
        };
        let lat_lng = LatLng::new(48.15, 17.11).unwrap();
        assert!(Marker::with_options(lat_lng, options).is_err());
        assert!(matches!(
            renderer().to_json(&Point::new(f64::NAN, 0.0)),
            Err(MapError::Serialization { .. })
        ));
    }

    #[test]
    fn test_catalogue_closure() {
        assert_eq!(find_kind("dblclick"), Some(EventKind::DoubleClick));
        assert_eq!(find_kind("not-a-real-event"), None);
    }

    #[test]
    fn test_kind_gated_construction() {
        assert!(matches!(
            MouseEventBehavior::new(EventKind::LocationFound),
            Err(MapError::InvalidArgument(_))
        ));
        assert!(MouseEventBehavior::new(EventKind::Click).is_ok());
    }

    #[test]
    fn test_mouse_event_without_lat_lng() {
        let behavior = MouseEventBehavior::new(EventKind::Click).unwrap();
        let event = behavior
            .respond(&request(&[("click", r#"{"type":"click","layerPoint":{"x":1,"y":2}}"#)]))
            .unwrap()
            .unwrap();
        assert_eq!(event.lat_lng(), None);
        assert_eq!(event.layer_point(), Some(Point::new(1.0, 2.0)));
    }

    #[test]
    fn test_missing_heading_propagates_nan() {
        let outcome = LocationEventBehavior::new()
            .respond(&request(&[(
                "locationfound",
                r#"{"type":"locationfound","latLng":{"lat":48.15,"lng":17.11},"speed":4.5}"#,
            )]))
            .unwrap();
        let event = match outcome {
            Some(LocationOutcome::Found(event)) => event,
            other => panic!("unexpected outcome: {other:?}"),
        };
        assert!(event.heading().is_nan());
        assert!((event.heading() * 2.0 + event.speed()).is_nan());
        assert_eq!(event.speed(), 4.5);

        let copy = event;
        assert_eq!(copy, event);
        let json = renderer().to_json(&event).unwrap();
        assert!(!json.contains("heading"));
        assert!(!json.contains("null"));
    }

    #[test]
    fn test_location_channels_fire_exclusively() {
        let fired = Arc::new(Mutex::new(Vec::new()));
        let (found_log, error_log) = (fired.clone(), fired.clone());
        let behavior = LocationEventBehavior::new()
            .on_found(move |_| found_log.lock().unwrap().push("found"))
            .on_error(move |_| error_log.lock().unwrap().push("error"));

        behavior
            .respond(&request(&[("locationfound", r#"{"accuracy":12.0}"#), ("locationerror", "")]))
            .unwrap();
        behavior
            .respond(&request(&[("locationfound", ""), ("locationerror", r#"{"message":"denied","code":1}"#)]))
            .unwrap();
        let none = behavior
            .respond(&request(&[("locationfound", ""), ("locationerror", "")]))
            .unwrap();

        assert_eq!(none, None);
        assert_eq!(*fired.lock().unwrap(), vec!["found", "error"]);
    }

    #[test]
    fn test_map_page_setup() {
        let options = RenderOptions::default();
        let mut map = Map::new("map")
            .unwrap()
            .with_center(LatLng::new(51.505, -0.09).unwrap());
        map.add_layer(TileLayer::openstreetmap());

        let click = MouseEventBehavior::new(EventKind::Click).unwrap();
        let located = LocationEventBehavior::new();
        let callback = format!(
            r#"post({{"click":"{}"}});"#,
            click.callback_parameters(&options)[0].1
        );

        let mut head = HeadContributions::new();
        map.render_head(&mut head, renderer()).unwrap();
        click.render_head(&mut head, &options, &map.var_name(), &callback);
        located.render_head(&mut head, &options, &map.var_name(), "post({});");

        assert_eq!(head.scripts().count(), 1);
        assert_eq!(head.on_load().len(), 3);
        assert!(head.on_load()[0].starts_with("window.mapMap = L.map('map', "));
        assert_eq!(
            head.on_load()[1],
            "mapMap.on('click', function(event) { post({\"click\":LeafletCodec.MouseEvent.getMouseEvent(event)}); });\n"
        );
        assert!(head.on_load()[2].contains("mapMap.on('locationerror'"));
    }

    #[test]
    fn test_decode_any_round_trips_payloads() {
        let codec = EventCodec::default();
        for payload in [
            r#"{"type":"resize","oldSize":{"x":10.0,"y":20.0},"newSize":{"x":30.0,"y":40.0}}"#,
            r#"{"type":"dragend","distance":12.5}"#,
            r#"{"type":"popupopen","layer":"17"}"#,
            r#"{"type":"locationerror","message":"Timeout expired","code":3}"#,
        ] {
            let event = codec.decode_any(payload).unwrap().unwrap();
            let expected: Value = serde_json::from_str(payload).unwrap();
            assert_eq!(serde_json::to_value(&event).unwrap(), expected);
        }
    }

    #[test]
    fn test_pretty_profile_renders_readable_scripts() {
        let renderer = JsonRenderer::with_profile(&RenderProfile::Pretty);
        let map = Map::new("map").unwrap();
        let script = map.initialization_script(&renderer).unwrap();
        assert!(script.contains("{\n  \"dragging\": true,"));
    }
}
