//! Typed values of decoded map events
//!
//! Every value type is bound to one [`EventShape`] through [`MapEvent`]. The
//! JSON payload layouts are the ones produced by the client extractors in
//! `leaflet_events.js`.

use crate::{
    core::geo::{LatLng, LatLngBounds, Point},
    data::json::JsonRenderer,
    input::events::{find_kind, EventKind, EventShape},
    Result,
};
use serde::{Deserialize, Serialize};

/// A typed event value decodable from a client payload
pub trait MapEvent: Sized + std::fmt::Debug {
    /// Payload layout this type decodes
    const SHAPE: EventShape;

    /// Client-side extractor, relative to the helper namespace, that turns the
    /// native Leaflet event into this type's JSON payload
    const EXTRACTOR: &'static str;

    fn kind(&self) -> EventKind;

    /// Decodes `payload`; `expected` is used when the payload has no `type`
    fn decode(renderer: &JsonRenderer, expected: EventKind, payload: &str) -> Result<Self>;

    fn supports(kind: EventKind) -> bool {
        kind.shape() == Self::SHAPE
    }
}

/// Picks the kind of a decoded payload: its own `type` when present, `expected` otherwise
fn resolve_kind<E: MapEvent>(
    declared: Option<&str>,
    expected: EventKind,
    payload: &str,
) -> Result<EventKind> {
    let kind = match declared.filter(|name| !name.is_empty()) {
        None => expected,
        Some(name) => find_kind(name).ok_or_else(|| {
            JsonRenderer::decode_error::<E>(payload, format!("unknown event type [{}]", name))
        })?,
    };
    if !E::supports(kind) {
        return Err(JsonRenderer::decode_error::<E>(
            payload,
            format!("event type [{}] does not carry a {:?} payload", kind, E::SHAPE),
        ));
    }
    Ok(kind)
}

fn or_nan(value: Option<f64>) -> f64 {
    value.unwrap_or(f64::NAN)
}

fn is_nan(value: &f64) -> bool {
    value.is_nan()
}

/// Equality under which a missing (NaN) reading equals another missing one
fn same_reading(a: f64, b: f64) -> bool {
    a == b || (a.is_nan() && b.is_nan())
}

/// Event without payload
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlainEvent {
    #[serde(rename = "type")]
    kind: EventKind,
}

impl PlainEvent {
    pub fn new(kind: EventKind) -> Self {
        Self { kind }
    }
}

#[derive(Deserialize)]
struct PlainEventWire {
    #[serde(rename = "type")]
    kind: Option<String>,
}

impl MapEvent for PlainEvent {
    const SHAPE: EventShape = EventShape::Plain;
    const EXTRACTOR: &'static str = "Event.getEvent";

    fn kind(&self) -> EventKind {
        self.kind
    }

    fn decode(renderer: &JsonRenderer, expected: EventKind, payload: &str) -> Result<Self> {
        let wire: PlainEventWire = renderer.from_json(payload)?;
        let kind = resolve_kind::<Self>(wire.kind.as_deref(), expected, payload)?;
        Ok(Self { kind })
    }
}

/// Mouse interaction with the map
///
/// Positions the browser did not report stay `None`; they are never
/// replaced with the origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MouseEvent {
    #[serde(rename = "type")]
    kind: EventKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    lat_lng: Option<LatLng>,
    #[serde(skip_serializing_if = "Option::is_none")]
    layer_point: Option<Point>,
    #[serde(skip_serializing_if = "Option::is_none")]
    container_point: Option<Point>,
}

impl MouseEvent {
    pub fn new(
        kind: EventKind,
        lat_lng: Option<LatLng>,
        layer_point: Option<Point>,
        container_point: Option<Point>,
    ) -> Self {
        Self {
            kind,
            lat_lng,
            layer_point,
            container_point,
        }
    }

    /// Geographical position of the cursor
    pub fn lat_lng(&self) -> Option<LatLng> {
        self.lat_lng
    }

    /// Cursor position relative to the map layer
    pub fn layer_point(&self) -> Option<Point> {
        self.layer_point
    }

    /// Cursor position relative to the map container
    pub fn container_point(&self) -> Option<Point> {
        self.container_point
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct MouseEventWire {
    #[serde(rename = "type")]
    kind: Option<String>,
    lat_lng: Option<LatLng>,
    layer_point: Option<Point>,
    container_point: Option<Point>,
}

impl MapEvent for MouseEvent {
    const SHAPE: EventShape = EventShape::Mouse;
    const EXTRACTOR: &'static str = "MouseEvent.getMouseEvent";

    fn kind(&self) -> EventKind {
        self.kind
    }

    fn decode(renderer: &JsonRenderer, expected: EventKind, payload: &str) -> Result<Self> {
        let wire: MouseEventWire = renderer.from_json(payload)?;
        let kind = resolve_kind::<Self>(wire.kind.as_deref(), expected, payload)?;
        Ok(Self::new(
            kind,
            wire.lat_lng,
            wire.layer_point,
            wire.container_point,
        ))
    }
}

/// End of a map drag
#[derive(Debug, Clone, Copy, Serialize)]
pub struct DragEndEvent {
    #[serde(rename = "type")]
    kind: EventKind,
    #[serde(skip_serializing_if = "is_nan")]
    distance: f64,
}

impl PartialEq for DragEndEvent {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && same_reading(self.distance, other.distance)
    }
}

impl DragEndEvent {
    pub fn new(kind: EventKind, distance: f64) -> Self {
        Self { kind, distance }
    }

    /// Pixels travelled during the drag, NaN when not reported
    pub fn distance(&self) -> f64 {
        self.distance
    }
}

#[derive(Deserialize)]
struct DragEndEventWire {
    #[serde(rename = "type")]
    kind: Option<String>,
    distance: Option<f64>,
}

impl MapEvent for DragEndEvent {
    const SHAPE: EventShape = EventShape::DragEnd;
    const EXTRACTOR: &'static str = "DragEndEvent.getDragEndEvent";

    fn kind(&self) -> EventKind {
        self.kind
    }

    fn decode(renderer: &JsonRenderer, expected: EventKind, payload: &str) -> Result<Self> {
        let wire: DragEndEventWire = renderer.from_json(payload)?;
        let kind = resolve_kind::<Self>(wire.kind.as_deref(), expected, payload)?;
        Ok(Self::new(kind, or_nan(wire.distance)))
    }
}

/// Map container resized
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResizeEvent {
    #[serde(rename = "type")]
    kind: EventKind,
    old_size: Point,
    new_size: Point,
}

impl ResizeEvent {
    pub fn new(kind: EventKind, old_size: Point, new_size: Point) -> Self {
        Self {
            kind,
            old_size,
            new_size,
        }
    }

    pub fn old_size(&self) -> Point {
        self.old_size
    }

    pub fn new_size(&self) -> Point {
        self.new_size
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResizeEventWire {
    #[serde(rename = "type")]
    kind: Option<String>,
    old_size: Point,
    new_size: Point,
}

impl MapEvent for ResizeEvent {
    const SHAPE: EventShape = EventShape::Resize;
    const EXTRACTOR: &'static str = "ResizeEvent.getResizeEvent";

    fn kind(&self) -> EventKind {
        self.kind
    }

    fn decode(renderer: &JsonRenderer, expected: EventKind, payload: &str) -> Result<Self> {
        let wire: ResizeEventWire = renderer.from_json(payload)?;
        let kind = resolve_kind::<Self>(wire.kind.as_deref(), expected, payload)?;
        Ok(Self::new(kind, wire.old_size, wire.new_size))
    }
}

/// Successful geolocation
///
/// Telemetry the browser did not supply is NaN, so arithmetic on a missing
/// reading stays NaN instead of silently becoming zero. Two missing readings
/// compare equal, and missing readings are left out when serialized.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationEvent {
    #[serde(rename = "type")]
    kind: EventKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    lat_lng: Option<LatLng>,
    #[serde(skip_serializing_if = "Option::is_none")]
    lat_lng_bounds: Option<LatLngBounds>,
    #[serde(skip_serializing_if = "is_nan")]
    accuracy: f64,
    #[serde(skip_serializing_if = "is_nan")]
    altitude: f64,
    #[serde(skip_serializing_if = "is_nan")]
    altitude_accuracy: f64,
    #[serde(skip_serializing_if = "is_nan")]
    heading: f64,
    #[serde(skip_serializing_if = "is_nan")]
    speed: f64,
    #[serde(skip_serializing_if = "is_nan")]
    timestamp: f64,
}

impl PartialEq for LocationEvent {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
            && self.lat_lng == other.lat_lng
            && self.lat_lng_bounds == other.lat_lng_bounds
            && same_reading(self.accuracy, other.accuracy)
            && same_reading(self.altitude, other.altitude)
            && same_reading(self.altitude_accuracy, other.altitude_accuracy)
            && same_reading(self.heading, other.heading)
            && same_reading(self.speed, other.speed)
            && same_reading(self.timestamp, other.timestamp)
    }
}

/// Numeric readings of a [`LocationEvent`]; `None` becomes NaN
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LocationTelemetry {
    pub accuracy: Option<f64>,
    pub altitude: Option<f64>,
    pub altitude_accuracy: Option<f64>,
    pub heading: Option<f64>,
    pub speed: Option<f64>,
    pub timestamp: Option<f64>,
}

impl LocationEvent {
    pub fn new(
        kind: EventKind,
        lat_lng: Option<LatLng>,
        lat_lng_bounds: Option<LatLngBounds>,
        telemetry: LocationTelemetry,
    ) -> Self {
        Self {
            kind,
            lat_lng,
            lat_lng_bounds,
            accuracy: or_nan(telemetry.accuracy),
            altitude: or_nan(telemetry.altitude),
            altitude_accuracy: or_nan(telemetry.altitude_accuracy),
            heading: or_nan(telemetry.heading),
            speed: or_nan(telemetry.speed),
            timestamp: or_nan(telemetry.timestamp),
        }
    }

    pub fn lat_lng(&self) -> Option<LatLng> {
        self.lat_lng
    }

    pub fn lat_lng_bounds(&self) -> Option<LatLngBounds> {
        self.lat_lng_bounds
    }

    /// Accuracy of the position in meters
    pub fn accuracy(&self) -> f64 {
        self.accuracy
    }

    /// Height above the WGS84 ellipsoid in meters
    pub fn altitude(&self) -> f64 {
        self.altitude
    }

    pub fn altitude_accuracy(&self) -> f64 {
        self.altitude_accuracy
    }

    /// Direction of travel in degrees clockwise from true north
    pub fn heading(&self) -> f64 {
        self.heading
    }

    /// Velocity in meters per second
    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Milliseconds since the epoch when the position was acquired
    pub fn timestamp(&self) -> f64 {
        self.timestamp
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LocationEventWire {
    #[serde(rename = "type")]
    kind: Option<String>,
    lat_lng: Option<LatLng>,
    #[serde(alias = "bounds")]
    lat_lng_bounds: Option<LatLngBounds>,
    accuracy: Option<f64>,
    altitude: Option<f64>,
    altitude_accuracy: Option<f64>,
    heading: Option<f64>,
    speed: Option<f64>,
    timestamp: Option<f64>,
}

impl MapEvent for LocationEvent {
    const SHAPE: EventShape = EventShape::Location;
    const EXTRACTOR: &'static str = "LocationEvent.getLocationEvent";

    fn kind(&self) -> EventKind {
        self.kind
    }

    fn decode(renderer: &JsonRenderer, expected: EventKind, payload: &str) -> Result<Self> {
        let wire: LocationEventWire = renderer.from_json(payload)?;
        let kind = resolve_kind::<Self>(wire.kind.as_deref(), expected, payload)?;
        let telemetry = LocationTelemetry {
            accuracy: wire.accuracy,
            altitude: wire.altitude,
            altitude_accuracy: wire.altitude_accuracy,
            heading: wire.heading,
            speed: wire.speed,
            timestamp: wire.timestamp,
        };
        Ok(Self::new(kind, wire.lat_lng, wire.lat_lng_bounds, telemetry))
    }
}

/// Failure reported by the client, e.g. geolocation denied
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorEvent {
    #[serde(rename = "type")]
    kind: EventKind,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<i32>,
}

impl ErrorEvent {
    pub fn new(kind: EventKind, message: impl Into<String>, code: Option<i32>) -> Self {
        Self {
            kind,
            message: message.into(),
            code,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn code(&self) -> Option<i32> {
        self.code
    }
}

#[derive(Deserialize)]
struct ErrorEventWire {
    #[serde(rename = "type")]
    kind: Option<String>,
    #[serde(default)]
    message: String,
    code: Option<i32>,
}

impl MapEvent for ErrorEvent {
    const SHAPE: EventShape = EventShape::Error;
    const EXTRACTOR: &'static str = "LocationEvent.getLocationError";

    fn kind(&self) -> EventKind {
        self.kind
    }

    fn decode(renderer: &JsonRenderer, expected: EventKind, payload: &str) -> Result<Self> {
        let wire: ErrorEventWire = renderer.from_json(payload)?;
        let kind = resolve_kind::<Self>(wire.kind.as_deref(), expected, payload)?;
        Ok(Self::new(kind, wire.message, wire.code))
    }
}

/// Reference to a layer the client added, removed or switched
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct LayerRef {
    #[serde(rename = "layer")]
    id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
}

impl LayerRef {
    pub fn new(id: impl Into<String>, name: Option<String>) -> Self {
        Self {
            id: id.into(),
            name,
        }
    }

    /// Client-side layer identifier
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Display name, as given to the layers control
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

/// Layer lifecycle event
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayerEvent {
    #[serde(rename = "type")]
    kind: EventKind,
    #[serde(flatten)]
    layer: LayerRef,
}

impl LayerEvent {
    pub fn new(kind: EventKind, layer: LayerRef) -> Self {
        Self { kind, layer }
    }

    pub fn layer(&self) -> &LayerRef {
        &self.layer
    }
}

// Leaflet stamps layers with numeric ids; named layers use strings.
#[derive(Deserialize)]
#[serde(untagged)]
enum LayerIdWire {
    Text(String),
    Number(u64),
}

#[derive(Deserialize)]
struct LayerEventWire {
    #[serde(rename = "type")]
    kind: Option<String>,
    layer: LayerIdWire,
    name: Option<String>,
}

impl MapEvent for LayerEvent {
    const SHAPE: EventShape = EventShape::Layer;
    const EXTRACTOR: &'static str = "LayerEvent.getLayerEvent";

    fn kind(&self) -> EventKind {
        self.kind
    }

    fn decode(renderer: &JsonRenderer, expected: EventKind, payload: &str) -> Result<Self> {
        let wire: LayerEventWire = renderer.from_json(payload)?;
        let kind = resolve_kind::<Self>(wire.kind.as_deref(), expected, payload)?;
        let id = match wire.layer {
            LayerIdWire::Text(id) => id,
            LayerIdWire::Number(id) => id.to_string(),
        };
        Ok(Self::new(kind, LayerRef::new(id, wire.name)))
    }
}
