//! A compiled pattern bound to an async listener.

use std::fmt;
use std::sync::Arc;

use futures::FutureExt;
use futures::future::BoxFuture;

use quill_foundation::{Error, Message, Result};

use crate::args::{CommandArgs, decompose};
use crate::pattern::Pattern;

/// The boxed async listener invoked when a command's pattern matches.
pub type CommandListener =
    Arc<dyn Fn(CommandDetails) -> BoxFuture<'static, Result<()>> + Send + Sync>;

/// What a command listener receives on dispatch.
///
/// Constructed fresh per dispatched message, never reused.
#[derive(Clone, Debug)]
pub struct CommandDetails {
    /// The inbound message that triggered the command.
    pub message: Message,
    /// The decomposed arguments.
    pub args: CommandArgs,
}

/// Payload of the `error` notification: the details plus the failure.
#[derive(Clone, Debug)]
pub struct CommandFailure {
    /// The inbound message that triggered the command.
    pub message: Message,
    /// The decomposed arguments.
    pub args: CommandArgs,
    /// The failure raised by the listener.
    pub error: Arc<Error>,
}

/// One registered command: a compiled pattern plus a listener.
pub struct Command {
    pattern: Pattern,
    listener: CommandListener,
}

impl Command {
    /// Compiles `pattern` and binds it to `listener`.
    ///
    /// # Errors
    ///
    /// Returns a malformed-pattern error, so bad patterns surface at
    /// registration time rather than at match time.
    pub fn new<L, F>(pattern: &str, listener: L) -> Result<Self>
    where
        L: Fn(CommandDetails) -> F + Send + Sync + 'static,
        F: Future<Output = Result<()>> + Send + 'static,
    {
        let pattern = Pattern::compile(pattern)?;
        let listener: CommandListener = Arc::new(move |details| listener(details).boxed());
        Ok(Self { pattern, listener })
    }

    /// Returns the compiled pattern.
    #[must_use]
    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    /// Parses `text` against this command's pattern.
    ///
    /// Returns `None` when the pattern rejects the text; this is the
    /// no-match sentinel, distinct from an empty argument bag. On a match,
    /// the literal positions are stripped and the remainder is decomposed
    /// against the declared slots.
    #[must_use]
    pub fn parse(&self, text: &str) -> Option<CommandArgs> {
        let payload = self.pattern.payload(text)?;
        Some(decompose(&payload, self.pattern.slots()))
    }

    /// Invokes the listener and awaits its completion.
    ///
    /// # Errors
    ///
    /// Propagates any failure raised by the listener; the dispatcher is
    /// responsible for catching it.
    pub async fn exec(&self, details: CommandDetails) -> Result<()> {
        (self.listener)(details).await
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("pattern", &self.pattern.source())
            .finish_non_exhaustive()
    }
}
