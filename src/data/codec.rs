//! Type-sniffing event decoder
//!
//! Behaviors know the shape they expect; [`EventCodec::decode_any`] serves
//! callers that only have a payload and must read its `type` first.

use crate::{
    data::json::{renderer, JsonRenderer},
    input::{
        events::{find_kind, EventKind, EventShape},
        types::{
            DragEndEvent, ErrorEvent, LayerEvent, LocationEvent, MapEvent, MouseEvent, PlainEvent,
            ResizeEvent,
        },
    },
    MapError, Result,
};
use serde::{Deserialize, Serialize};

/// Any decoded map event
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DecodedEvent {
    Plain(PlainEvent),
    Mouse(MouseEvent),
    DragEnd(DragEndEvent),
    Resize(ResizeEvent),
    Location(LocationEvent),
    Error(ErrorEvent),
    Layer(LayerEvent),
}

impl DecodedEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            DecodedEvent::Plain(event) => event.kind(),
            DecodedEvent::Mouse(event) => event.kind(),
            DecodedEvent::DragEnd(event) => event.kind(),
            DecodedEvent::Resize(event) => event.kind(),
            DecodedEvent::Location(event) => event.kind(),
            DecodedEvent::Error(event) => event.kind(),
            DecodedEvent::Layer(event) => event.kind(),
        }
    }

    pub fn shape(&self) -> EventShape {
        self.kind().shape()
    }
}

#[derive(Deserialize)]
struct TypeProbe {
    #[serde(rename = "type")]
    kind: Option<String>,
}

#[derive(Debug, Clone, Copy)]
pub struct EventCodec<'a> {
    renderer: &'a JsonRenderer,
}

impl Default for EventCodec<'static> {
    fn default() -> Self {
        Self::new(renderer())
    }
}

impl<'a> EventCodec<'a> {
    pub fn new(renderer: &'a JsonRenderer) -> Self {
        Self { renderer }
    }

    /// Decodes a payload of a known kind into its event value
    pub fn decode<E: MapEvent>(&self, kind: EventKind, payload: &str) -> Result<E> {
        if !E::supports(kind) {
            return Err(MapError::InvalidArgument(format!(
                "event type [{}] is not a {:?} event",
                kind,
                E::SHAPE
            )));
        }
        E::decode(self.renderer, kind, payload)
    }

    /// Reads the payload's `type` and decodes it with the matching shape
    ///
    /// Returns `Ok(None)` when the payload carries no `type` or an empty one.
    pub fn decode_any(&self, payload: &str) -> Result<Option<DecodedEvent>> {
        let probe: TypeProbe = self.renderer.from_json(payload)?;
        let name = match probe.kind.as_deref() {
            None | Some("") => {
                #[cfg(feature = "debug")]
                log::debug!("Payload without event type, nothing to decode");
                return Ok(None);
            }
            Some(name) => name,
        };
        let kind = match find_kind(name) {
            Some(kind) => kind,
            None => {
                #[cfg(feature = "debug")]
                log::warn!("Unknown event type in payload: {}", name);
                return Err(MapError::UnknownEvent(name.to_string()));
            }
        };

        let event = match kind.shape() {
            EventShape::Plain => DecodedEvent::Plain(self.decode(kind, payload)?),
            EventShape::Mouse => DecodedEvent::Mouse(self.decode(kind, payload)?),
            EventShape::DragEnd => DecodedEvent::DragEnd(self.decode(kind, payload)?),
            EventShape::Resize => DecodedEvent::Resize(self.decode(kind, payload)?),
            EventShape::Location => DecodedEvent::Location(self.decode(kind, payload)?),
            EventShape::Error => DecodedEvent::Error(self.decode(kind, payload)?),
            EventShape::Layer => DecodedEvent::Layer(self.decode(kind, payload)?),
        };

        #[cfg(feature = "debug")]
        log::debug!("Decoded {} event as {:?}", kind, event.shape());

        Ok(Some(event))
    }
}
