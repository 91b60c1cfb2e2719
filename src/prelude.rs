//! Prelude module for common leaflet-codec types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use leaflet_codec::prelude::*;`

pub use crate::core::{
    bounds::Bounds,
    config::{RenderOptions, RenderProfile},
    geo::{LatLng, LatLngBounds, Point},
    map::{Map, MapOptions},
};

pub use crate::layers::{
    base::{LayerType, ScriptLayer},
    marker::{Marker, MarkerOptions},
    tile::{TileLayer, TileLayerOptions},
};

pub use crate::input::{
    events::{find_kind, EventKind, EventShape},
    handler::{
        EventBehavior, HeadContributions, HeaderResponse, LocationEventBehavior, LocationOutcome,
        MouseEventBehavior, PlainEventBehavior, RequestParameters,
    },
    types::{
        DragEndEvent, ErrorEvent, LayerEvent, LocationEvent, MapEvent, MouseEvent, PlainEvent,
        ResizeEvent,
    },
};

pub use crate::data::{
    codec::{DecodedEvent, EventCodec},
    json::{renderer, JsonRenderer},
};

pub use crate::{MapError, Result};

// Re-export commonly used external types
pub use fxhash::FxHashMap as HashMap;
