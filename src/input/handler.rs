//! Server-side halves of client map event listeners
//!
//! A behavior attaches a listener to the client map, names the request
//! parameters its callback posts, and decodes those parameters back into
//! typed events. The host framework is reached only through the
//! [`RequestParameters`] and [`HeaderResponse`] traits.

use crate::{
    core::config::RenderOptions,
    data::json::renderer,
    input::{
        events::EventKind,
        types::{
            DragEndEvent, ErrorEvent, LayerEvent, LocationEvent, MapEvent, MouseEvent, PlainEvent,
            ResizeEvent,
        },
    },
    MapError, Result,
};
use std::{
    collections::{BTreeMap, HashMap},
    hash::BuildHasher,
};

/// Client extractors turning native Leaflet events into JSON payloads
pub const CLIENT_SCRIPT: &str = include_str!("leaflet_events.js");

/// Identifier the extractor script is rendered under, so it lands in the page once
pub const CLIENT_SCRIPT_ID: &str = "leaflet-codec-events";

/// [`CLIENT_SCRIPT`] bound to the globals named in `options`
pub fn client_script(options: &RenderOptions) -> String {
    CLIENT_SCRIPT
        .replace("__NAMESPACE__", &options.helper_namespace)
        .replace("__LEAFLET__", &options.namespace)
}

/// Parameters of one inbound callback request
pub trait RequestParameters {
    fn parameter(&self, name: &str) -> Option<&str>;
}

impl<S: BuildHasher> RequestParameters for HashMap<String, String, S> {
    fn parameter(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

impl RequestParameters for BTreeMap<String, String> {
    fn parameter(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

/// Sink for scripts the page head must carry
pub trait HeaderResponse {
    /// Adds a script block; implementations render each `id` at most once
    fn render_javascript(&mut self, id: &str, script: &str);

    /// Adds a script run once the page has loaded
    fn render_on_load(&mut self, script: &str);
}

/// In-memory [`HeaderResponse`], for hosts that assemble the head themselves
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeadContributions {
    scripts: Vec<(String, String)>,
    on_load: Vec<String>,
}

impl HeadContributions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scripts(&self) -> impl Iterator<Item = &str> {
        self.scripts.iter().map(|(_, script)| script.as_str())
    }

    pub fn on_load(&self) -> &[String] {
        &self.on_load
    }
}

impl HeaderResponse for HeadContributions {
    fn render_javascript(&mut self, id: &str, script: &str) {
        if self.scripts.iter().any(|(existing, _)| existing == id) {
            return;
        }
        self.scripts.push((id.to_string(), script.to_string()));
    }

    fn render_on_load(&mut self, script: &str) {
        self.on_load.push(script.to_string());
    }
}

/// Rewrites `"<expression>"` string literals in `script` into raw expressions
///
/// Hosts pass callback parameters as quoted values; the extractor calls must
/// run on the client instead of being posted as text.
pub fn unquote_expressions(script: &str, parameters: &[(String, String)]) -> String {
    parameters
        .iter()
        .fold(script.to_string(), |script, (_, expression)| {
            script.replace(&format!("\"{}\"", expression), expression)
        })
}

fn listener_script(map_var: &str, kind: EventKind, callback_script: &str) -> String {
    format!(
        "{}.on('{}', function(event) {{ {} }});\n",
        map_var,
        kind.wire_name(),
        callback_script
    )
}

fn read_parameter<'p, P>(params: &'p P, kind: EventKind) -> Option<&'p str>
where
    P: RequestParameters + ?Sized,
{
    params
        .parameter(kind.wire_name())
        .filter(|value| !value.is_empty())
}

/// Event listener callback type
pub type EventCallback<E> = Box<dyn Fn(&E) + Send + Sync>;

/// Listener for one event kind, decoding its payload as `E`
pub struct EventBehavior<E: MapEvent> {
    kind: EventKind,
    callback: Option<EventCallback<E>>,
}

pub type MouseEventBehavior = EventBehavior<MouseEvent>;
pub type PlainEventBehavior = EventBehavior<PlainEvent>;
pub type DragEndEventBehavior = EventBehavior<DragEndEvent>;
pub type ResizeEventBehavior = EventBehavior<ResizeEvent>;
pub type LayerEventBehavior = EventBehavior<LayerEvent>;

impl<E: MapEvent> std::fmt::Debug for EventBehavior<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBehavior")
            .field("kind", &self.kind)
            .field("shape", &E::SHAPE)
            .field("callback", &self.callback.is_some())
            .finish()
    }
}

impl<E: MapEvent> EventBehavior<E> {
    /// Binds a behavior to `kind`, which must carry `E`'s payload
    pub fn new(kind: EventKind) -> Result<Self> {
        if !E::supports(kind) {
            return Err(MapError::InvalidArgument(format!(
                "event type [{}] is not supported by {:?} event behaviors",
                kind,
                E::SHAPE
            )));
        }
        Ok(Self {
            kind,
            callback: None,
        })
    }

    /// Sets the callback run for every decoded event
    pub fn on_event<F>(mut self, callback: F) -> Self
    where
        F: Fn(&E) + Send + Sync + 'static,
    {
        self.callback = Some(Box::new(callback));
        self
    }

    pub fn kind(&self) -> EventKind {
        self.kind
    }

    /// Request parameters the client callback must post, as (name, JS expression)
    pub fn callback_parameters(&self, options: &RenderOptions) -> Vec<(String, String)> {
        vec![extractor_parameter::<E>(self.kind, options)]
    }

    /// Script attaching the listener to the client map
    pub fn initialization_script(&self, map_var: &str, callback_script: &str) -> String {
        listener_script(map_var, self.kind, callback_script)
    }

    /// Emits the extractor script and the listener into the page head
    pub fn render_head<H>(
        &self,
        response: &mut H,
        options: &RenderOptions,
        map_var: &str,
        callback_script: &str,
    ) where
        H: HeaderResponse + ?Sized,
    {
        let callback = unquote_expressions(callback_script, &self.callback_parameters(options));
        response.render_javascript(CLIENT_SCRIPT_ID, &client_script(options));
        response.render_on_load(&self.initialization_script(map_var, &callback));
    }

    /// Decodes the event posted with `params`, if any, and runs the callback
    pub fn respond<P>(&self, params: &P) -> Result<Option<E>>
    where
        P: RequestParameters + ?Sized,
    {
        let Some(payload) = read_parameter(params, self.kind) else {
            #[cfg(feature = "debug")]
            log::debug!("No {} payload in request", self.kind);
            return Ok(None);
        };

        let event = E::decode(renderer(), self.kind, payload)?;
        #[cfg(feature = "debug")]
        log::debug!("Received {} event: {:?}", self.kind, event);

        if let Some(callback) = &self.callback {
            callback(&event);
        }
        Ok(Some(event))
    }
}

fn extractor_parameter<E: MapEvent>(kind: EventKind, options: &RenderOptions) -> (String, String) {
    (
        kind.wire_name().to_string(),
        format!("{}.{}(event)", options.helper_namespace, E::EXTRACTOR),
    )
}

/// Result of a geolocation request
#[derive(Debug, Clone, PartialEq)]
pub enum LocationOutcome {
    Found(LocationEvent),
    Error(ErrorEvent),
}

/// Listens for `locationfound` and its `locationerror` counterpart
///
/// Both listeners share one callback; the request carries exactly one of the
/// two parameters.
pub struct LocationEventBehavior {
    found: EventBehavior<LocationEvent>,
    error_callback: Option<EventCallback<ErrorEvent>>,
}

impl Default for LocationEventBehavior {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for LocationEventBehavior {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocationEventBehavior")
            .field("found", &self.found)
            .field("error_callback", &self.error_callback.is_some())
            .finish()
    }
}

impl LocationEventBehavior {
    pub fn new() -> Self {
        Self {
            found: EventBehavior {
                kind: EventKind::LocationFound,
                callback: None,
            },
            error_callback: None,
        }
    }

    pub fn on_found<F>(mut self, callback: F) -> Self
    where
        F: Fn(&LocationEvent) + Send + Sync + 'static,
    {
        self.found = self.found.on_event(callback);
        self
    }

    pub fn on_error<F>(mut self, callback: F) -> Self
    where
        F: Fn(&ErrorEvent) + Send + Sync + 'static,
    {
        self.error_callback = Some(Box::new(callback));
        self
    }

    pub fn callback_parameters(&self, options: &RenderOptions) -> Vec<(String, String)> {
        let mut parameters = self.found.callback_parameters(options);
        parameters.push(extractor_parameter::<ErrorEvent>(
            EventKind::LocationError,
            options,
        ));
        parameters
    }

    pub fn initialization_script(&self, map_var: &str, callback_script: &str) -> String {
        let mut script = self.found.initialization_script(map_var, callback_script);
        script.push_str(&listener_script(
            map_var,
            EventKind::LocationError,
            callback_script,
        ));
        script
    }

    pub fn render_head<H>(
        &self,
        response: &mut H,
        options: &RenderOptions,
        map_var: &str,
        callback_script: &str,
    ) where
        H: HeaderResponse + ?Sized,
    {
        let callback = unquote_expressions(callback_script, &self.callback_parameters(options));
        response.render_javascript(CLIENT_SCRIPT_ID, &client_script(options));
        response.render_on_load(&self.initialization_script(map_var, &callback));
    }

    /// Decodes whichever channel fired; the found channel wins if both are set
    pub fn respond<P>(&self, params: &P) -> Result<Option<LocationOutcome>>
    where
        P: RequestParameters + ?Sized,
    {
        if let Some(event) = self.found.respond(params)? {
            return Ok(Some(LocationOutcome::Found(event)));
        }

        let Some(payload) = read_parameter(params, EventKind::LocationError) else {
            return Ok(None);
        };
        let event = ErrorEvent::decode(renderer(), EventKind::LocationError, payload)?;
        #[cfg(feature = "debug")]
        log::debug!("Location error: {:?}", event);

        if let Some(callback) = &self.error_callback {
            callback(&event);
        }
        Ok(Some(LocationOutcome::Error(event)))
    }
}
