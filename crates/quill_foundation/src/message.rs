//! Inbound messages and the reply capability.
//!
//! A [`Message`] is produced by a platform adapter for every inbound chat
//! line. It carries a [`Replier`], a cloneable capability that routes a
//! reply back through whatever connection produced the message.

use std::fmt;
use std::sync::Arc;

use futures::future::BoxFuture;

use crate::error::Result;
use crate::outgoing::OutgoingMessage;

/// The identity of a message author or bot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct User {
    /// Stable identifier within the platform.
    pub id: String,
    /// Display name.
    pub username: String,
}

impl User {
    /// Creates a user whose id and username are the same string.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: name.clone(),
            username: name,
        }
    }
}

type ReplyFn = dyn Fn(OutgoingMessage) -> BoxFuture<'static, Result<Message>> + Send + Sync;

/// A cloneable capability for replying to a message.
#[derive(Clone)]
pub struct Replier {
    inner: Arc<ReplyFn>,
}

impl Replier {
    /// Creates a replier from a reply function.
    pub fn new<F>(reply: F) -> Self
    where
        F: Fn(OutgoingMessage) -> BoxFuture<'static, Result<Message>> + Send + Sync + 'static,
    {
        Self {
            inner: Arc::new(reply),
        }
    }

    /// Creates a replier that swallows replies.
    ///
    /// Useful for synthetic messages in tests and tooling. The returned
    /// message echoes the rendered content under a `discard` author.
    #[must_use]
    pub fn discard() -> Self {
        Self::new(|outgoing| {
            Box::pin(async move {
                Ok(Message {
                    author: User::named("discard"),
                    content: outgoing.content.unwrap_or_default(),
                    replier: Replier::discard(),
                })
            })
        })
    }

    /// Sends a reply through this capability.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying platform fails to deliver.
    pub async fn send(&self, message: impl Into<OutgoingMessage>) -> Result<Message> {
        (self.inner)(message.into()).await
    }
}

impl fmt::Debug for Replier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Replier")
    }
}

/// An inbound chat message.
#[derive(Clone, Debug)]
pub struct Message {
    /// The author of the message.
    pub author: User,
    /// The raw message content.
    pub content: String,
    /// Capability for replying to this message.
    pub replier: Replier,
}

impl Message {
    /// Creates a message with a discarding replier.
    ///
    /// Intended for tests and synthetic events; platform adapters construct
    /// messages with a real [`Replier`].
    #[must_use]
    pub fn synthetic(author: User, content: impl Into<String>) -> Self {
        Self {
            author,
            content: content.into(),
            replier: Replier::discard(),
        }
    }

    /// Replies to this message.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying platform fails to deliver.
    pub async fn reply(&self, message: impl Into<OutgoingMessage>) -> Result<Message> {
        self.replier.send(message).await
    }
}
