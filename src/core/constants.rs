//! Core constants derived from Leaflet defaults.
//! Keeping them in a single place makes it easier to track upstream option changes.

/// Global the Leaflet script installs on `window`.
pub const LEAFLET_NAMESPACE: &str = "L";

/// Global hosting the client-side event payload extractors.
pub const HELPER_NAMESPACE: &str = "LeafletCodec";

/// Default square tile size in pixels.
pub const TILE_SIZE: u32 = 256;

/// Tile layer zoom range.
pub const TILE_MIN_ZOOM: i32 = 0;
pub const TILE_MAX_ZOOM: i32 = 18;

/// Subdomains substituted for `{s}` in tile URL templates.
pub const TILE_SUBDOMAINS: [&str; 3] = ["a", "b", "c"];

/// Max pixels a finger may shift during a touch and still count as a tap.
pub const TAP_TOLERANCE: i32 = 15;

/// Pixels panned per arrow key press.
pub const KEYBOARD_PAN_OFFSET: i32 = 80;

/// Zoom levels changed per +/- key press.
pub const KEYBOARD_ZOOM_OFFSET: i32 = 1;

/// Rate at which inertial movement slows down, in pixels/second².
pub const INERTIA_DECELERATION: i32 = 3000;

/// Max speed of inertial movement, in pixels/second.
pub const INERTIA_MAX_SPEED: i32 = 1500;

/// Do not animate a zoom if the delta exceeds this threshold.
pub const ZOOM_ANIMATION_THRESHOLD: i32 = 4;

/// z-index boost applied to a marker while hovered with `riseOnHover`.
pub const MARKER_RISE_OFFSET: i32 = 250;
