use crate::{
    core::{
        constants::{
            INERTIA_DECELERATION, INERTIA_MAX_SPEED, KEYBOARD_PAN_OFFSET, KEYBOARD_ZOOM_OFFSET,
            TAP_TOLERANCE, ZOOM_ANIMATION_THRESHOLD,
        },
        geo::{LatLng, LatLngBounds},
    },
    data::json::JsonRenderer,
    input::handler::HeaderResponse,
    layers::base::ScriptLayer,
    MapError, Result,
};
use serde::{Deserialize, Serialize};

/// Options passed to `L.map`
///
/// Options Leaflet documents a default for are always rendered; the rest are
/// left to the client unless set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MapOptions {
    pub dragging: bool,
    pub touch_zoom: bool,
    pub scroll_wheel_zoom: bool,
    pub double_click_zoom: bool,
    pub box_zoom: bool,
    pub tap: bool,
    pub tap_tolerance: i32,
    pub track_resize: bool,
    pub world_copy_jump: bool,
    pub close_popup_on_click: bool,
    pub bounce_at_zoom_limit: bool,
    pub keyboard: bool,
    pub keyboard_pan_offset: i32,
    pub keyboard_zoom_offset: i32,
    pub inertia: bool,
    pub inertia_deceleration: i32,
    pub inertia_max_speed: i32,
    pub zoom_control: bool,
    pub attribution_control: bool,
    pub zoom_animation_threshold: i32,
    /// Initial zoom level
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zoom: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_zoom: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_zoom: Option<i32>,
    /// Restricts the view to these bounds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_bounds: Option<LatLngBounds>,
    /// Milliseconds between drag stop and mouse release under which inertia applies
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inertia_threshold: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fade_animation: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zoom_animation: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker_zoom_animation: Option<bool>,
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            dragging: true,
            touch_zoom: true,
            scroll_wheel_zoom: true,
            double_click_zoom: true,
            box_zoom: true,
            tap: true,
            tap_tolerance: TAP_TOLERANCE,
            track_resize: true,
            world_copy_jump: false,
            close_popup_on_click: true,
            bounce_at_zoom_limit: true,
            keyboard: true,
            keyboard_pan_offset: KEYBOARD_PAN_OFFSET,
            keyboard_zoom_offset: KEYBOARD_ZOOM_OFFSET,
            inertia: true,
            inertia_deceleration: INERTIA_DECELERATION,
            inertia_max_speed: INERTIA_MAX_SPEED,
            zoom_control: true,
            attribution_control: true,
            zoom_animation_threshold: ZOOM_ANIMATION_THRESHOLD,
            zoom: None,
            min_zoom: None,
            max_zoom: None,
            max_bounds: None,
            inertia_threshold: None,
            fade_animation: None,
            zoom_animation: None,
            marker_zoom_animation: None,
        }
    }
}

impl MapOptions {
    pub fn validate(&self) -> Result<()> {
        if let (Some(min), Some(max)) = (self.min_zoom, self.max_zoom) {
            if min > max {
                return Err(MapError::InvalidArgument(format!(
                    "minZoom ({}) must not exceed maxZoom ({})",
                    min, max
                )));
            }
        }
        if let Some(zoom) = self.zoom {
            let below = self.min_zoom.is_some_and(|min| zoom < min);
            let above = self.max_zoom.is_some_and(|max| zoom > max);
            if below || above {
                return Err(MapError::InvalidArgument(format!(
                    "zoom ({}) lies outside the allowed zoom range",
                    zoom
                )));
            }
        }
        Ok(())
    }
}

/// Options object as handed to `L.map`, with the center folded in
#[derive(Serialize)]
struct MapSettings<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    center: Option<LatLng>,
    #[serde(flatten)]
    options: &'a MapOptions,
}

/// A map placed in a page element, with the layers it starts with
#[derive(Debug)]
pub struct Map {
    markup_id: String,
    center: Option<LatLng>,
    options: MapOptions,
    layers: Vec<Box<dyn ScriptLayer>>,
}

impl Map {
    /// Creates a map rendered into the element with id `markup_id`
    ///
    /// The id also names the client variable, so it must be a valid
    /// JavaScript identifier.
    pub fn new(markup_id: impl Into<String>) -> Result<Self> {
        let markup_id = markup_id.into();
        let mut chars = markup_id.chars();
        let valid = chars
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
            && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$');
        if !valid {
            return Err(MapError::InvalidArgument(format!(
                "markup id [{}] is not a valid JavaScript identifier",
                markup_id
            )));
        }

        Ok(Self {
            markup_id,
            center: None,
            options: MapOptions::default(),
            layers: Vec::new(),
        })
    }

    pub fn with_center(mut self, center: LatLng) -> Self {
        self.center = Some(center);
        self
    }

    pub fn with_options(mut self, options: MapOptions) -> Result<Self> {
        options.validate()?;
        self.options = options;
        Ok(self)
    }

    pub fn add_layer<L: ScriptLayer + 'static>(&mut self, layer: L) -> &mut Self {
        self.layers.push(Box::new(layer));
        self
    }

    pub fn markup_id(&self) -> &str {
        &self.markup_id
    }

    /// Client variable holding the Leaflet map instance
    pub fn var_name(&self) -> String {
        format!("{}Map", self.markup_id)
    }

    pub fn center(&self) -> Option<LatLng> {
        self.center
    }

    pub fn options(&self) -> &MapOptions {
        &self.options
    }

    pub fn layers(&self) -> impl Iterator<Item = &dyn ScriptLayer> {
        self.layers.iter().map(|layer| layer.as_ref())
    }

    /// Script creating the map and attaching its layers
    pub fn initialization_script(&self, renderer: &JsonRenderer) -> Result<String> {
        let var_name = self.var_name();
        let settings = MapSettings {
            center: self.center,
            options: &self.options,
        };

        let mut script = format!(
            "window.{} = {}('{}', {});\n",
            var_name,
            renderer.options().factory("map"),
            self.markup_id,
            renderer.to_json(&settings)?
        );
        for layer in self.layers() {
            #[cfg(feature = "debug")]
            log::debug!("Attaching {} layer to {}", layer.layer_type(), var_name);

            script.push_str(&layer.add_to_script(renderer, &var_name)?);
            script.push('\n');
        }

        Ok(script)
    }

    /// Emits the initialization script as an on-load script
    pub fn render_head<H>(&self, response: &mut H, renderer: &JsonRenderer) -> Result<()>
    where
        H: HeaderResponse + ?Sized,
    {
        let script = self.initialization_script(renderer)?;
        response.render_on_load(&script);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        input::handler::HeadContributions,
        layers::{base::LayerType, marker::Marker, tile::TileLayer},
    };
    use serde_json::Value;

    #[test]
    fn test_default_options_are_rendered() {
        let json: Value = serde_json::to_value(MapOptions::default()).unwrap();
        assert_eq!(json["dragging"], true);
        assert_eq!(json["tapTolerance"], 15);
        assert_eq!(json["inertiaDeceleration"], 3000);
        assert_eq!(json["worldCopyJump"], false);
        assert!(json.get("zoom").is_none());
        assert!(json.get("maxBounds").is_none());
    }

    #[test]
    fn test_zoom_range_validation() {
        let options = MapOptions {
            min_zoom: Some(10),
            max_zoom: Some(3),
            ..MapOptions::default()
        };
        assert!(matches!(options.validate(), Err(MapError::InvalidArgument(_))));

        let options = MapOptions {
            zoom: Some(2),
            min_zoom: Some(5),
            ..MapOptions::default()
        };
        assert!(Map::new("map").unwrap().with_options(options).is_err());
    }

    #[test]
    fn test_markup_id_must_be_identifier() {
        assert!(Map::new("map").is_ok());
        assert!(Map::new("").is_err());
        assert!(Map::new("1map").is_err());
        assert!(Map::new("my-map").is_err());
    }

    #[test]
    fn test_initialization_script() {
        let options = MapOptions {
            zoom: Some(13),
            ..MapOptions::default()
        };
        let mut map = Map::new("map")
            .unwrap()
            .with_center(LatLng::new(51.505, -0.09).unwrap())
            .with_options(options)
            .unwrap();
        map.add_layer(TileLayer::openstreetmap())
            .add_layer(Marker::new(LatLng::new(51.5, -0.09).unwrap()));

        let script = map.initialization_script(&JsonRenderer::default()).unwrap();
        let lines: Vec<_> = script.lines().collect();

        assert_eq!(map.var_name(), "mapMap");
        let layer_types: Vec<_> = map.layers().map(|layer| layer.layer_type()).collect();
        assert_eq!(layer_types, vec![LayerType::Tile, LayerType::Marker]);
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("window.mapMap = L.map('map', {\"center\":[51.505,-0.09],"));
        assert!(lines[0].contains("\"zoom\":13"));
        assert!(lines[1].starts_with("L.tileLayer(\"https://{s}.tile.openstreetmap.org/"));
        assert!(lines[1].ends_with(".addTo(mapMap);"));
        assert_eq!(lines[2], "L.marker([51.5,-0.09]).addTo(mapMap);");
    }

    #[test]
    fn test_render_head() {
        let map = Map::new("map").unwrap();
        let mut head = HeadContributions::new();
        map.render_head(&mut head, &JsonRenderer::default()).unwrap();

        assert_eq!(head.on_load().len(), 1);
        assert!(!head.on_load()[0].contains("center"));
    }
}
