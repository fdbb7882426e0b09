//! Error types for the Quill system.
//!
//! Uses `thiserror` for ergonomic error definition.

use std::fmt;

use thiserror::Error as ThisError;

/// Result alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for Quill operations.
#[derive(Debug, ThisError)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind }
    }

    /// Creates a malformed-pattern error.
    #[must_use]
    pub fn malformed_pattern(pattern: impl Into<String>, defect: PatternDefect) -> Self {
        Self::new(ErrorKind::MalformedPattern {
            pattern: pattern.into(),
            defect,
        })
    }

    /// Creates a prefix-resolution error.
    #[must_use]
    pub fn prefix_resolution(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::PrefixResolution(message.into()))
    }

    /// Creates a command-listener error.
    #[must_use]
    pub fn listener(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Listener(message.into()))
    }

    /// Creates a platform error.
    #[must_use]
    pub fn platform(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Platform(message.into()))
    }

    /// Creates a terminal error.
    #[must_use]
    pub fn terminal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Terminal(message.into()))
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal(message.into()))
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, ThisError)]
pub enum ErrorKind {
    /// A command pattern string was rejected at compile time.
    #[error("malformed pattern `{pattern}`: {defect}")]
    MalformedPattern {
        /// The offending pattern source string.
        pattern: String,
        /// What was wrong with the pattern.
        defect: PatternDefect,
    },

    /// A dynamic prefix resolver failed.
    #[error("prefix resolution failed: {0}")]
    PrefixResolution(String),

    /// A command listener failed during execution.
    #[error("command listener failed: {0}")]
    Listener(String),

    /// A platform adapter failed (login, send, shutdown).
    #[error("platform error: {0}")]
    Platform(String),

    /// The terminal line editor failed.
    #[error("terminal error: {0}")]
    Terminal(String),

    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}

/// Ways a command pattern string can be malformed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternDefect {
    /// The pattern contained no tokens.
    Empty,
    /// A slot declaration had no name (`<>` or `<...>`).
    EmptySlotName,
    /// Two slots declared the same name.
    DuplicateSlotName(String),
    /// A rest slot was followed by further tokens.
    RestNotLast,
    /// More than one rest slot was declared.
    MultipleRestSlots,
}

impl fmt::Display for PatternDefect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "pattern is empty"),
            Self::EmptySlotName => write!(f, "slot declared without a name"),
            Self::DuplicateSlotName(name) => {
                write!(f, "slot name `{name}` declared more than once")
            }
            Self::RestNotLast => write!(f, "rest slot must be the final token"),
            Self::MultipleRestSlots => write!(f, "at most one rest slot is allowed"),
        }
    }
}
