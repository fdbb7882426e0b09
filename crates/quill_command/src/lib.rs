//! Command pattern compiler, argument decomposer, and dispatcher for Quill.
//!
//! This crate turns free-text chat messages into typed command invocations:
//!
//! ```text
//! "!welcome Bob the Builder --loud"
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ PREFIX CHECK    │  → strip "!", or bail silently
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ PATTERN MATCH   │  → first registered command whose pattern matches
//! └─────────────────┘     ("welcome <...name>")
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ DECOMPOSE       │  → CommandArgs { name: "Bob the Builder --loud" }
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ EXECUTE         │  → before → listener → after | error notifications
//! └─────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`pattern`] - Compile pattern strings into matchers and slot lists
//! - [`args`] - Decompose matched text into named arguments and options
//! - [`command`] - One compiled pattern bound to one async listener
//! - [`plugin`] - Registry, prefix resolution, and the dispatch pipeline

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod args;
pub mod command;
pub mod pattern;
pub mod plugin;

pub use args::{ArgValue, CommandArgs, decompose};
pub use command::{Command, CommandDetails, CommandFailure, CommandListener};
pub use pattern::{Pattern, PatternSlot, PatternToken};
pub use plugin::{AFTER, BEFORE, CommandBot, CommandPlugin, CommandRouter, Dispatch, ERROR, Prefix};
