//! Event bus, platform trait, and bot core for Quill.
//!
//! This crate is the platform-agnostic heart of the toolkit:
//! - [`EventBus`] - Named-topic publish/subscribe with type-erased payloads
//! - [`Platform`] - The seam that chat adapters implement
//! - [`Plugin`] - Registration hook for capabilities like command dispatch
//! - [`Bot`] - A platform plus a bus, wired together
//!
//! Plugins never mutate the bot's shape at runtime; a capability that needs
//! its own surface (such as command registration) composes around [`Bot`]
//! in its own crate.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod bot;
pub mod bus;
pub mod platform;
pub mod plugin;

pub use bot::Bot;
pub use bus::{EventBus, EventPayload, MESSAGE, READY};
pub use platform::Platform;
pub use plugin::Plugin;
