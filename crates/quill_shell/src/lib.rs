//! Terminal platform adapter for Quill.
//!
//! Turns a terminal session into a chat platform: lines typed at the
//! prompt become `message` events, and outbound messages are written back
//! as `<name>: line` output. A line of the form `<who>: text` simulates a
//! message from another speaker.
//!
//! # Modules
//!
//! - [`editor`] - Line editor abstraction over rustyline
//! - [`render`] - Outgoing message to terminal text rendering
//! - [`shell`] - The platform adapter itself

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod editor;
pub mod render;
pub mod shell;

pub use editor::{LineEditor, ReadResult, RustylineEditor};
pub use shell::{ShellPlatform, ShellPlatformOptions};
