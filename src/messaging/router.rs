use super::{EventType, Handler};
use crate::client::{ClientState, lock_state};
use crate::transport::SseEvent;
use crate::types::InboundEvent;
use serde_json::Value;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::{Arc, Mutex};

/// Routes incoming events to registered handlers
pub struct EventRouter {
    state: Arc<Mutex<ClientState>>,
}

impl EventRouter {
    pub fn new_with_state(state: Arc<Mutex<ClientState>>) -> Self {
        Self { state }
    }

    /// Decodes a wire event and routes it.
    ///
    /// A payload that fails to decode is logged and dropped; nothing else is
    /// affected.
    pub fn route_raw(&self, raw: &SseEvent) {
        match InboundEvent::decode(raw) {
            Ok(event) => self.route(event),
            Err(e) => {
                tracing::warn!(
                    "Dropping undecodable '{}' event: {} - Raw: {}",
                    raw.event.as_deref().unwrap_or("message"),
                    e,
                    raw.data
                );
            }
        }
    }

    /// Routes a decoded event to every handler registered for its type
    pub fn route(&self, event: InboundEvent) {
        // Handlers may subscribe or unsubscribe while we iterate, so dispatch
        // over a copy taken before the first call.
        let handlers = lock_state(&self.state).registry.snapshot(&event.event);

        if handlers.is_empty() {
            tracing::debug!("No handlers for event {}", event.event);
            return;
        }

        tracing::debug!(
            "Dispatching event {} to {} handler(s)",
            event.event,
            handlers.len()
        );
        for handler in handlers.iter() {
            invoke(&event.event, handler, event.payload.clone());
        }
    }
}

/// Calls one handler, containing a panic to that handler
fn invoke(event: &EventType, handler: &Handler, payload: Value) {
    if catch_unwind(AssertUnwindSafe(|| handler(payload))).is_err() {
        tracing::error!(
            "Handler for event {} panicked; continuing with remaining handlers",
            event
        );
    }
}
