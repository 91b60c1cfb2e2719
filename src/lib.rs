//! # leaflet-codec
//!
//! Server-side model of Leaflet.js maps.
//!
//! This library renders typed option bags (map, tile layer, marker options)
//! into the JavaScript and JSON forms Leaflet expects, and decodes the JSON
//! payloads posted back by client-side map events into typed event values.
//! The host web framework stays outside: it hands in request parameters and
//! receives scripts to place in the page head.

pub mod core;
pub mod data;
pub mod input;
pub mod layers;
pub mod prelude;
pub use crate::core::constants;

// Re-export public API
pub use crate::core::{
    bounds::Bounds,
    config::{RenderOptions, RenderProfile},
    geo::{LatLng, LatLngBounds, Point},
    map::{Map, MapOptions},
};

pub use crate::layers::{
    base::ScriptLayer,
    marker::{Marker, MarkerOptions},
    tile::{TileLayer, TileLayerOptions},
};

pub use crate::input::{
    events::{find_kind, EventKind, EventShape},
    handler::{
        client_script, unquote_expressions, DragEndEventBehavior, EventBehavior, EventCallback,
        HeadContributions, HeaderResponse, LayerEventBehavior, LocationEventBehavior,
        LocationOutcome, MouseEventBehavior, PlainEventBehavior, RequestParameters,
        ResizeEventBehavior, CLIENT_SCRIPT, CLIENT_SCRIPT_ID,
    },
    types::{
        DragEndEvent, ErrorEvent, LayerEvent, LayerRef, LocationEvent, LocationTelemetry,
        MapEvent, MouseEvent, PlainEvent, ResizeEvent,
    },
};

pub use crate::data::{
    codec::{DecodedEvent, EventCodec},
    json::{renderer, JsonRenderer},
};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, MapError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Error while writing object [{type_name}] to JSON: {source}")]
    Serialization {
        type_name: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Error while reading object [{type_name}] from JSON string [{payload}]: {source}")]
    Deserialization {
        type_name: &'static str,
        payload: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unknown event type: {0}")]
    UnknownEvent(String),
}

/// Error type alias for convenience
pub type Error = MapError;

/// Installs `env_logger` as the `log` backend, honouring `RUST_LOG`.
///
/// Safe to call more than once; later calls are no-ops.
#[cfg(feature = "debug")]
pub fn init_logging() {
    let _ = env_logger::Builder::from_default_env().try_init();
}
