pub mod events;
pub mod handler;
pub mod types;

// Re-export the essential types
pub use events::{find_kind, EventKind, EventShape};
pub use handler::{
    client_script, unquote_expressions, DragEndEventBehavior, EventBehavior, EventCallback,
    HeadContributions, HeaderResponse, LayerEventBehavior, LocationEventBehavior, LocationOutcome,
    MouseEventBehavior, PlainEventBehavior, RequestParameters, ResizeEventBehavior,
    CLIENT_SCRIPT, CLIENT_SCRIPT_ID,
};
pub use types::{
    DragEndEvent, ErrorEvent, LayerEvent, LayerRef, LocationEvent, LocationTelemetry, MapEvent,
    MouseEvent, PlainEvent, ResizeEvent,
};
