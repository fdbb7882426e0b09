//! The bot core: a platform plus an event bus.

use std::sync::Arc;

use quill_foundation::Result;

use crate::bus::{EventBus, EventPayload};
use crate::platform::Platform;
use crate::plugin::Plugin;

/// A chat bot: one platform adapter wired to one event bus.
///
/// Construction is infallible and does not connect anywhere; plugins
/// register first, then [`login`](Bot::login) starts the event flow.
pub struct Bot {
    platform: Arc<dyn Platform>,
    bus: Arc<EventBus>,
}

impl Bot {
    /// Creates a bot for the given platform.
    pub fn new(platform: impl Platform + 'static) -> Self {
        Self::from_arc(Arc::new(platform))
    }

    /// Creates a bot for an already-shared platform.
    #[must_use]
    pub fn from_arc(platform: Arc<dyn Platform>) -> Self {
        Self {
            platform,
            bus: Arc::new(EventBus::new()),
        }
    }

    /// Returns the event bus.
    #[must_use]
    pub fn bus(&self) -> &Arc<EventBus> {
        &self.bus
    }

    /// Returns the platform adapter.
    #[must_use]
    pub fn platform(&self) -> &Arc<dyn Platform> {
        &self.platform
    }

    /// Registers a plugin on this bot.
    ///
    /// # Errors
    ///
    /// Returns an error if the plugin fails to register.
    pub fn register(&self, plugin: &dyn Plugin) -> Result<()> {
        plugin.register(self)
    }

    /// Subscribes a handler to an event on the bus.
    pub fn on<F>(&self, event: impl Into<String>, handler: F)
    where
        F: Fn(&EventPayload) + Send + Sync + 'static,
    {
        self.bus.on(event, handler);
    }

    /// Publishes a payload on the bus.
    ///
    /// Returns `true` if at least one handler received it.
    pub fn emit(&self, event: &str, payload: EventPayload) -> bool {
        self.bus.emit(event, payload)
    }

    /// Connects the platform and starts the event flow.
    ///
    /// # Errors
    ///
    /// Returns an error if the platform fails to connect.
    pub async fn login(&self) -> Result<()> {
        self.platform.login(Arc::clone(&self.bus)).await
    }

    /// Tears down the platform connection.
    ///
    /// # Errors
    ///
    /// Returns an error if shutdown fails.
    pub async fn destroy(&self) -> Result<()> {
        self.platform.destroy().await
    }
}
