//! Named-topic publish/subscribe.
//!
//! The bus delivers type-erased payloads to handlers subscribed under a
//! string event name. Handlers run synchronously in subscription order;
//! anything long-running belongs in a task the handler spawns.

use std::any::Any;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

/// Event name for an inbound chat message. Payload: `Message`.
pub const MESSAGE: &str = "message";

/// Event name emitted once a platform adapter is connected. No payload.
pub const READY: &str = "ready";

/// A type-erased event payload.
pub type EventPayload = Arc<dyn Any + Send + Sync>;

type Handler = Arc<dyn Fn(&EventPayload) + Send + Sync>;

/// A named-topic publish/subscribe bus.
///
/// Subscription is expected at startup; emission may happen concurrently
/// from any thread afterwards. Emission snapshots the subscriber list, so
/// a handler may itself publish further events.
#[derive(Default)]
pub struct EventBus {
    subscribers: RwLock<HashMap<String, Vec<Handler>>>,
}

impl EventBus {
    /// Creates an empty bus.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribes a handler to the given event name.
    pub fn on<F>(&self, event: impl Into<String>, handler: F)
    where
        F: Fn(&EventPayload) + Send + Sync + 'static,
    {
        self.subscribers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(event.into())
            .or_default()
            .push(Arc::new(handler));
    }

    /// Publishes a payload to every handler subscribed to `event`.
    ///
    /// Returns `true` if at least one handler received the payload.
    pub fn emit(&self, event: &str, payload: EventPayload) -> bool {
        let handlers: Vec<Handler> = {
            let subscribers = self
                .subscribers
                .read()
                .unwrap_or_else(PoisonError::into_inner);
            match subscribers.get(event) {
                Some(handlers) => handlers.clone(),
                None => return false,
            }
        };

        for handler in &handlers {
            handler(&payload);
        }

        !handlers.is_empty()
    }

    /// Returns the number of handlers subscribed to `event`.
    #[must_use]
    pub fn subscriber_count(&self, event: &str) -> usize {
        self.subscribers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(event)
            .map_or(0, Vec::len)
    }
}
