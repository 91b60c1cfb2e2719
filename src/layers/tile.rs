use crate::{
    core::{
        constants::{TILE_MAX_ZOOM, TILE_MIN_ZOOM, TILE_SIZE, TILE_SUBDOMAINS},
        geo::LatLngBounds,
    },
    data::json::JsonRenderer,
    layers::base::{LayerType, ScriptLayer},
    MapError, Result,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Wire names of the fixed tile layer options. Extra parameters may not reuse them.
const OPTION_NAMES: [&str; 19] = [
    "minZoom",
    "maxZoom",
    "maxNativeZoom",
    "tileSize",
    "subdomains",
    "errorTileUrl",
    "attribution",
    "tms",
    "continuousWorld",
    "noWrap",
    "zoomOffset",
    "zoomReverse",
    "opacity",
    "zIndex",
    "unloadInvisibleTiles",
    "updateWhenIdle",
    "detectRetina",
    "reuseTiles",
    "bounds",
];

/// Configuration for a tile layer
///
/// Fields with a Leaflet default are always rendered; `Option` fields are
/// rendered only when set. Provider template variables (API keys, map ids)
/// travel in `extra_parameters` and are flattened into the same object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TileLayerOptions {
    pub min_zoom: i32,
    pub max_zoom: i32,
    /// Highest zoom the provider serves tiles for; larger zooms upscale.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_native_zoom: Option<i32>,
    /// Tile size in pixels
    pub tile_size: u32,
    /// Available subdomains for `{s}` in the URL template
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub subdomains: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_tile_url: Option<String>,
    /// Attribution text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribution: Option<String>,
    /// Inverse Y axis numbering (TMS services)
    pub tms: bool,
    pub continuous_world: bool,
    pub no_wrap: bool,
    pub zoom_offset: i32,
    pub zoom_reverse: bool,
    pub opacity: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z_index: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unload_invisible_tiles: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update_when_idle: Option<bool>,
    pub detect_retina: bool,
    pub reuse_tiles: bool,
    /// Tiles are only loaded inside these bounds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bounds: Option<LatLngBounds>,
    /// Provider parameters; keys must not reuse a fixed option name
    #[serde(flatten)]
    pub extra_parameters: BTreeMap<String, String>,
}

impl TileLayerOptions {
    /// Adds a provider-specific parameter rendered next to the fixed options
    pub fn with_extra_parameter(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<Self> {
        let key = key.into();
        if OPTION_NAMES.contains(&key.as_str()) {
            return Err(MapError::InvalidArgument(format!(
                "extra parameter [{}] collides with a tile layer option",
                key
            )));
        }
        self.extra_parameters.insert(key, value.into());
        Ok(self)
    }

    pub fn extra_parameters(&self) -> &BTreeMap<String, String> {
        &self.extra_parameters
    }

    /// Checks option combinations Leaflet cannot honour
    pub fn validate(&self) -> Result<()> {
        if let Some(key) = self
            .extra_parameters
            .keys()
            .find(|key| OPTION_NAMES.contains(&key.as_str()))
        {
            return Err(MapError::InvalidArgument(format!(
                "extra parameter [{}] collides with a tile layer option",
                key
            )));
        }
        if self.subdomains.is_empty() {
            return Err(MapError::InvalidArgument(
                "at least one subdomain is required for {s}".to_string(),
            ));
        }
        if let Some(z_index) = self.z_index.filter(|z| !z.is_finite()) {
            return Err(MapError::InvalidArgument(format!(
                "zIndex must be a finite number, got {}",
                z_index
            )));
        }
        if self.min_zoom > self.max_zoom {
            return Err(MapError::InvalidArgument(format!(
                "minZoom ({}) must not exceed maxZoom ({})",
                self.min_zoom, self.max_zoom
            )));
        }
        if !(0.0..=1.0).contains(&self.opacity) {
            return Err(MapError::InvalidArgument(format!(
                "opacity must be within [0, 1], got {}",
                self.opacity
            )));
        }
        Ok(())
    }
}

impl Default for TileLayerOptions {
    fn default() -> Self {
        Self {
            min_zoom: TILE_MIN_ZOOM,
            max_zoom: TILE_MAX_ZOOM,
            max_native_zoom: None,
            tile_size: TILE_SIZE,
            subdomains: TILE_SUBDOMAINS.iter().map(|s| s.to_string()).collect(),
            error_tile_url: None,
            attribution: None,
            tms: false,
            continuous_world: false,
            no_wrap: false,
            zoom_offset: 0,
            zoom_reverse: false,
            opacity: 1.0,
            z_index: None,
            unload_invisible_tiles: None,
            update_when_idle: None,
            detect_retina: false,
            reuse_tiles: false,
            bounds: None,
            extra_parameters: BTreeMap::new(),
        }
    }
}

/// A layer of map tiles served by a tile provider
///
/// Rendered as `L.tileLayer("<urlTemplate>", <options>)`.
#[derive(Debug, Clone, PartialEq)]
pub struct TileLayer {
    url_template: String,
    options: TileLayerOptions,
}

impl TileLayer {
    pub fn new(url_template: impl Into<String>, options: TileLayerOptions) -> Result<Self> {
        let url_template = url_template.into();
        if url_template.trim().is_empty() {
            return Err(MapError::InvalidArgument(
                "tile layer url template must not be empty".to_string(),
            ));
        }
        options.validate()?;
        Ok(Self {
            url_template,
            options,
        })
    }

    /// Create a tile layer for OpenStreetMap
    pub fn openstreetmap() -> Self {
        let options = TileLayerOptions {
            attribution: Some(
                "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors"
                    .to_string(),
            ),
            max_zoom: 19,
            ..TileLayerOptions::default()
        };
        Self {
            url_template: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
            options,
        }
    }

    pub fn url_template(&self) -> &str {
        &self.url_template
    }

    pub fn options(&self) -> &TileLayerOptions {
        &self.options
    }
}

impl ScriptLayer for TileLayer {
    fn layer_type(&self) -> LayerType {
        LayerType::Tile
    }

    fn to_javascript(&self, renderer: &JsonRenderer) -> Result<String> {
        Ok(format!(
            "{}({}, {})",
            renderer.options().factory("tileLayer"),
            renderer.to_json(&self.url_template)?,
            renderer.to_json(&self.options)?
        ))
    }
}
