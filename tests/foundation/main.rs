//! Integration tests for the quill_foundation crate.
//!
//! Tests for core types:
//! - Errors and their display
//! - Messages and the reply capability
//! - Outgoing message construction
