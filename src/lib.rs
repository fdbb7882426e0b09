//! Quill - Platform-agnostic chat-bot toolkit
//!
//! This crate re-exports all layers of the Quill system for convenient
//! access. For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 3: quill_shell      — Terminal platform adapter, demo bot
//! Layer 2: quill_command    — Pattern compiler, argument decomposer,
//!                             command registry and dispatcher
//! Layer 1: quill_core       — Event bus, platform trait, bot core
//! Layer 0: quill_foundation — Core types (Message, OutgoingMessage, Error)
//! ```

pub use quill_command as command;
pub use quill_core as core;
pub use quill_foundation as foundation;
pub use quill_shell as shell;
