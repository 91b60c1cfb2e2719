//! Catalogue of the map events Leaflet fires
//!
//! Each [`EventKind`] has one wire name, used both as the native event name
//! passed to `map.on(..)` and as the `type` discriminator of posted payloads,
//! and one [`EventShape`] describing the payload it carries.

use fxhash::FxHashMap;
use once_cell::sync::Lazy;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// Map event types that can be emitted by the map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// User clicks (or taps) the map
    Click,
    /// User double-clicks (or double-taps) the map
    DoubleClick,
    MouseDown,
    MouseUp,
    /// Cursor enters the map
    MouseOver,
    /// Cursor leaves the map
    MouseOut,
    MouseMove,
    /// Right button pressed; suppresses the browser menu while listened to
    ContextMenu,
    Focus,
    Blur,
    /// Fired before the click on the map
    PreClick,
    /// Map initialized
    Load,
    /// Map destroyed
    Unload,
    /// Map needs to redraw its content
    ViewReset,
    MoveStart,
    Move,
    MoveEnd,
    DragStart,
    Drag,
    DragEnd,
    ZoomStart,
    ZoomEnd,
    ZoomLevelsChange,
    Resize,
    /// Map starts auto-panning to fit an opened popup
    AutoPanStart,
    LayerAdd,
    LayerRemove,
    BaseLayerChange,
    OverlayAdd,
    OverlayRemove,
    /// Geolocation succeeded
    LocationFound,
    /// Geolocation failed
    LocationError,
    PopupOpen,
    PopupClose,
}

/// Payload layout carried by an event kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventShape {
    Plain,
    Mouse,
    DragEnd,
    Resize,
    Location,
    Error,
    Layer,
}

impl EventKind {
    pub const ALL: [EventKind; 34] = [
        EventKind::Click,
        EventKind::DoubleClick,
        EventKind::MouseDown,
        EventKind::MouseUp,
        EventKind::MouseOver,
        EventKind::MouseOut,
        EventKind::MouseMove,
        EventKind::ContextMenu,
        EventKind::Focus,
        EventKind::Blur,
        EventKind::PreClick,
        EventKind::Load,
        EventKind::Unload,
        EventKind::ViewReset,
        EventKind::MoveStart,
        EventKind::Move,
        EventKind::MoveEnd,
        EventKind::DragStart,
        EventKind::Drag,
        EventKind::DragEnd,
        EventKind::ZoomStart,
        EventKind::ZoomEnd,
        EventKind::ZoomLevelsChange,
        EventKind::Resize,
        EventKind::AutoPanStart,
        EventKind::LayerAdd,
        EventKind::LayerRemove,
        EventKind::BaseLayerChange,
        EventKind::OverlayAdd,
        EventKind::OverlayRemove,
        EventKind::LocationFound,
        EventKind::LocationError,
        EventKind::PopupOpen,
        EventKind::PopupClose,
    ];

    /// Name Leaflet uses for this event
    pub fn wire_name(&self) -> &'static str {
        match self {
            EventKind::Click => "click",
            EventKind::DoubleClick => "dblclick",
            EventKind::MouseDown => "mousedown",
            EventKind::MouseUp => "mouseup",
            EventKind::MouseOver => "mouseover",
            EventKind::MouseOut => "mouseout",
            EventKind::MouseMove => "mousemove",
            EventKind::ContextMenu => "contextmenu",
            EventKind::Focus => "focus",
            EventKind::Blur => "blur",
            EventKind::PreClick => "preclick",
            EventKind::Load => "load",
            EventKind::Unload => "unload",
            EventKind::ViewReset => "viewreset",
            EventKind::MoveStart => "movestart",
            EventKind::Move => "move",
            EventKind::MoveEnd => "moveend",
            EventKind::DragStart => "dragstart",
            EventKind::Drag => "drag",
            EventKind::DragEnd => "dragend",
            EventKind::ZoomStart => "zoomstart",
            EventKind::ZoomEnd => "zoomend",
            EventKind::ZoomLevelsChange => "zoomlevelschange",
            EventKind::Resize => "resize",
            EventKind::AutoPanStart => "autopanstart",
            EventKind::LayerAdd => "layeradd",
            EventKind::LayerRemove => "layerremove",
            EventKind::BaseLayerChange => "baselayerchange",
            EventKind::OverlayAdd => "overlayadd",
            EventKind::OverlayRemove => "overlayremove",
            EventKind::LocationFound => "locationfound",
            EventKind::LocationError => "locationerror",
            EventKind::PopupOpen => "popupopen",
            EventKind::PopupClose => "popupclose",
        }
    }

    /// Payload layout this kind is decoded with
    pub fn shape(&self) -> EventShape {
        match self {
            EventKind::Click
            | EventKind::DoubleClick
            | EventKind::MouseDown
            | EventKind::MouseUp
            | EventKind::MouseOver
            | EventKind::MouseOut
            | EventKind::MouseMove
            | EventKind::ContextMenu
            | EventKind::PreClick => EventShape::Mouse,
            EventKind::Focus
            | EventKind::Blur
            | EventKind::Load
            | EventKind::Unload
            | EventKind::ViewReset
            | EventKind::MoveStart
            | EventKind::Move
            | EventKind::MoveEnd
            | EventKind::DragStart
            | EventKind::Drag
            | EventKind::ZoomStart
            | EventKind::ZoomEnd
            | EventKind::ZoomLevelsChange
            | EventKind::AutoPanStart => EventShape::Plain,
            EventKind::DragEnd => EventShape::DragEnd,
            EventKind::Resize => EventShape::Resize,
            EventKind::LocationFound => EventShape::Location,
            EventKind::LocationError => EventShape::Error,
            EventKind::LayerAdd
            | EventKind::LayerRemove
            | EventKind::BaseLayerChange
            | EventKind::OverlayAdd
            | EventKind::OverlayRemove
            | EventKind::PopupOpen
            | EventKind::PopupClose => EventShape::Layer,
        }
    }

    /// All kinds decoded with `shape`
    pub fn with_shape(shape: EventShape) -> impl Iterator<Item = EventKind> {
        Self::ALL.into_iter().filter(move |kind| kind.shape() == shape)
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.wire_name())
    }
}

static CATALOGUE: Lazy<FxHashMap<&'static str, EventKind>> = Lazy::new(|| {
    EventKind::ALL
        .iter()
        .map(|kind| (kind.wire_name(), *kind))
        .collect()
});

/// Looks up an event kind by its wire name; `None` for names outside the catalogue
pub fn find_kind(wire_name: &str) -> Option<EventKind> {
    CATALOGUE.get(wire_name).copied()
}

impl Serialize for EventKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.wire_name())
    }
}

impl<'de> Deserialize<'de> for EventKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        find_kind(&name)
            .ok_or_else(|| de::Error::custom(format!("unknown event type [{}]", name)))
    }
}
