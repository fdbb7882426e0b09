//! The platform adapter seam.

use std::sync::Arc;

use async_trait::async_trait;

use quill_foundation::{Message, OutgoingMessage, Result, User};

use crate::bus::EventBus;

/// A connection to a chat medium (a service, a terminal, a test harness).
///
/// Adapters publish [`MESSAGE`](crate::bus::MESSAGE) and
/// [`READY`](crate::bus::READY) events into the bus handed to [`login`],
/// and deliver outbound messages through [`send`].
///
/// [`login`]: Platform::login
/// [`send`]: Platform::send
#[async_trait]
pub trait Platform: Send + Sync {
    /// Returns the bot's own user information, if known yet.
    fn info(&self) -> Option<User>;

    /// Connects to the platform and begins publishing events into `bus`.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be established.
    async fn login(&self, bus: Arc<EventBus>) -> Result<()>;

    /// Sends a message to the given channel.
    ///
    /// # Errors
    ///
    /// Returns an error if delivery fails.
    async fn send(&self, channel_id: &str, message: OutgoingMessage) -> Result<Message>;

    /// Tears down the platform connection.
    ///
    /// # Errors
    ///
    /// Returns an error if shutdown fails.
    async fn destroy(&self) -> Result<()>;
}
