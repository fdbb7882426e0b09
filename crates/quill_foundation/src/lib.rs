//! Core types, messages, and errors for Quill.
//!
//! This crate provides:
//! - [`User`] - Identity of a message author or bot
//! - [`Message`] - An inbound chat message with a reply capability
//! - [`OutgoingMessage`] - Content and optional embed for an outbound message
//! - [`Error`] - Rich error types shared across the workspace

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod message;
pub mod outgoing;

pub use error::{Error, ErrorKind, PatternDefect, Result};
pub use message::{Message, Replier, User};
pub use outgoing::{Embed, EmbedField, EmbedFooter, EmbedTitle, OutgoingMessage};
