pub mod base;
pub mod marker;
pub mod tile;

pub use base::{LayerType, ScriptLayer};
pub use marker::{Marker, MarkerOptions};
pub use tile::{TileLayer, TileLayerOptions};
