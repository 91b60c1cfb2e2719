use crate::{data::json::JsonRenderer, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerType {
    Tile,
    Marker,
}

impl std::fmt::Display for LayerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LayerType::Tile => write!(f, "tile"),
            LayerType::Marker => write!(f, "marker"),
        }
    }
}

/// A layer the client creates through a Leaflet factory call rather than from
/// a plain data literal.
pub trait ScriptLayer: std::fmt::Debug + Send + Sync {
    /// Kind of Leaflet layer the constructor call creates
    fn layer_type(&self) -> LayerType;

    /// Renders the constructor call, e.g. `L.tileLayer("<url>", {..})`.
    fn to_javascript(&self, renderer: &JsonRenderer) -> Result<String>;

    /// Renders the constructor call chained onto `addTo(<map_var>)`.
    fn add_to_script(&self, renderer: &JsonRenderer, map_var: &str) -> Result<String> {
        Ok(format!("{}.addTo({});", self.to_javascript(renderer)?, map_var))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{core::geo::LatLng, layers::marker::Marker};

    #[test]
    fn test_layer_type_names() {
        assert_eq!(LayerType::Tile.to_string(), "tile");
        assert_eq!(LayerType::Marker.to_string(), "marker");
    }

    #[test]
    fn test_add_to_script_chains_constructor() {
        let marker = Marker::new(LatLng::new(48.15, 17.11).unwrap());
        assert_eq!(marker.layer_type(), LayerType::Marker);
        assert_eq!(
            marker.add_to_script(&JsonRenderer::default(), "mapMap").unwrap(),
            "L.marker([48.15,17.11]).addTo(mapMap);"
        );
    }
}
