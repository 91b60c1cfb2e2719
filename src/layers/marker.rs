use crate::{
    core::{constants::MARKER_RISE_OFFSET, geo::LatLng},
    data::json::JsonRenderer,
    layers::base::{LayerType, ScriptLayer},
    MapError, Result,
};
use serde::{Deserialize, Serialize};

fn is_empty(value: &str) -> bool {
    value.is_empty()
}

/// Marker appearance and interactivity, defaults mirror Leaflet's
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MarkerOptions {
    /// If false, the marker emits no mouse events and acts as part of the map
    pub clickable: bool,
    pub draggable: bool,
    /// Whether the marker can be tabbed to and clicked with enter
    pub keyboard: bool,
    /// Browser tooltip shown on hover
    #[serde(skip_serializing_if = "is_empty")]
    pub title: String,
    /// Alt text of the marker image
    #[serde(skip_serializing_if = "is_empty")]
    pub alt: String,
    pub z_index_offset: i32,
    pub opacity: f64,
    pub rise_on_hover: bool,
    /// z-index offset applied while hovered when `rise_on_hover` is set
    pub rise_offset: i32,
}

impl Default for MarkerOptions {
    fn default() -> Self {
        Self {
            clickable: true,
            draggable: false,
            keyboard: true,
            title: String::new(),
            alt: String::new(),
            z_index_offset: 0,
            opacity: 1.0,
            rise_on_hover: false,
            rise_offset: MARKER_RISE_OFFSET,
        }
    }
}

impl MarkerOptions {
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.opacity) {
            return Err(MapError::InvalidArgument(format!(
                "marker opacity must be within [0, 1], got {}",
                self.opacity
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    lat_lng: LatLng,
    options: MarkerOptions,
}

impl Marker {
    pub fn new(lat_lng: LatLng) -> Self {
        Self {
            lat_lng,
            options: MarkerOptions::default(),
        }
    }

    pub fn with_options(lat_lng: LatLng, options: MarkerOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self { lat_lng, options })
    }

    pub fn lat_lng(&self) -> LatLng {
        self.lat_lng
    }

    pub fn options(&self) -> &MarkerOptions {
        &self.options
    }
}

impl ScriptLayer for Marker {
    fn layer_type(&self) -> LayerType {
        LayerType::Marker
    }

    fn to_javascript(&self, renderer: &JsonRenderer) -> Result<String> {
        let factory = renderer.options().factory("marker");
        let lat_lng = renderer.to_json(&self.lat_lng)?;
        if self.options == MarkerOptions::default() {
            return Ok(format!("{}({})", factory, lat_lng));
        }
        Ok(format!(
            "{}({}, {})",
            factory,
            lat_lng,
            renderer.to_json(&self.options)?
        ))
    }
}
