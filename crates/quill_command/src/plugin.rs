//! Command registry, prefix resolution, and the dispatch pipeline.
//!
//! For each inbound message the dispatcher resolves the prefix, strips it,
//! selects the first registered command whose pattern matches, and runs it
//! inside a before/after/error notification envelope on the event bus.

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use futures::FutureExt;
use futures::future::BoxFuture;
use tracing::{debug, warn};

use quill_core::{Bot, EventBus, EventPayload, MESSAGE, Plugin};
use quill_foundation::{Message, Result};

use crate::command::{Command, CommandDetails, CommandFailure};

/// Event name for the notification emitted before a command executes.
/// Payload: [`CommandDetails`].
pub const BEFORE: &str = "command-plugin:before";

/// Event name for the notification emitted after a command completes.
/// Payload: [`CommandDetails`].
pub const AFTER: &str = "command-plugin:after";

/// Event name for the notification emitted when a command listener fails.
/// Payload: [`CommandFailure`].
pub const ERROR: &str = "command-plugin:error";

/// An async per-message prefix resolver.
pub type PrefixResolver = Arc<dyn Fn(&Message) -> BoxFuture<'static, Result<String>> + Send + Sync>;

/// The command prefix: a fixed string or a per-message resolver.
#[derive(Clone)]
pub enum Prefix {
    /// A fixed prefix, stripped verbatim from the start of the content.
    Literal(String),
    /// A resolver invoked once per inbound message.
    Resolver(PrefixResolver),
}

impl Prefix {
    /// Creates a dynamic prefix from an async resolver function.
    pub fn resolver<F, Fut>(resolve: F) -> Self
    where
        F: Fn(&Message) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<String>> + Send + 'static,
    {
        Self::Resolver(Arc::new(move |message| resolve(message).boxed()))
    }

    /// Resolves the effective prefix for `message`.
    ///
    /// A resolver is invoked exactly once per call, with the message as its
    /// sole argument.
    ///
    /// # Errors
    ///
    /// Propagates a resolver failure.
    pub async fn resolve(&self, message: &Message) -> Result<String> {
        match self {
            Self::Literal(prefix) => Ok(prefix.clone()),
            Self::Resolver(resolve) => resolve(message).await,
        }
    }
}

impl From<&str> for Prefix {
    fn from(prefix: &str) -> Self {
        Self::Literal(prefix.to_string())
    }
}

impl From<String> for Prefix {
    fn from(prefix: String) -> Self {
        Self::Literal(prefix)
    }
}

impl fmt::Debug for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(prefix) => f.debug_tuple("Literal").field(prefix).finish(),
            Self::Resolver(_) => f.write_str("Resolver"),
        }
    }
}

/// How a single message moved through the dispatch pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dispatch {
    /// The content did not start with the resolved prefix; nothing fired.
    Ignored,
    /// No registered command matched the stripped content; nothing fired.
    Unmatched,
    /// A command matched and its listener completed.
    Completed,
    /// A command matched, its listener failed, and an `error` notification
    /// was emitted. The failure is considered handled.
    Failed,
}

/// The command plugin: an ordered, append-only command registry plus the
/// dispatch routine.
///
/// Registration order is lookup priority. Registration is expected at
/// startup; dispatch iterates over a snapshot, so overlapping in-flight
/// dispatches share the registry without coordination.
pub struct CommandPlugin {
    prefix: Prefix,
    commands: RwLock<Vec<Arc<Command>>>,
}

impl CommandPlugin {
    /// Creates a plugin with the given prefix configuration.
    pub fn new(prefix: impl Into<Prefix>) -> Self {
        Self {
            prefix: prefix.into(),
            commands: RwLock::new(Vec::new()),
        }
    }

    /// Compiles a pattern, registers a command for it, and returns it.
    ///
    /// # Errors
    ///
    /// Returns a malformed-pattern error; nothing is registered in that
    /// case.
    pub fn command<L, F>(&self, pattern: &str, listener: L) -> Result<Arc<Command>>
    where
        L: Fn(CommandDetails) -> F + Send + Sync + 'static,
        F: Future<Output = Result<()>> + Send + 'static,
    {
        let command = Arc::new(Command::new(pattern, listener)?);
        self.commands
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Arc::clone(&command));
        Ok(command)
    }

    /// Returns a snapshot of the registered commands in registration order.
    #[must_use]
    pub fn commands(&self) -> Vec<Arc<Command>> {
        self.commands
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Dispatches one inbound message.
    ///
    /// Resolves the prefix, strips exactly one leading occurrence, selects
    /// the first matching command, and runs it inside the notification
    /// envelope: `before` fires ahead of execution, then exactly one of
    /// `after` or `error`. A listener failure is converted into the `error`
    /// notification and not re-raised.
    ///
    /// # Errors
    ///
    /// Propagates a dynamic prefix resolver failure; no notification fires
    /// for that message.
    pub async fn dispatch(&self, bus: &EventBus, message: Message) -> Result<Dispatch> {
        let prefix = self.prefix.resolve(&message).await?;

        let Some(content) = message.content.strip_prefix(&prefix) else {
            return Ok(Dispatch::Ignored);
        };
        let content = content.to_string();

        let selected = self
            .commands()
            .into_iter()
            .find_map(|command| command.parse(&content).map(|args| (command, args)));

        let Some((command, args)) = selected else {
            return Ok(Dispatch::Unmatched);
        };

        debug!(pattern = command.pattern().source(), "dispatching command");

        let details = CommandDetails { message, args };
        bus.emit(BEFORE, Arc::new(details.clone()));

        match command.exec(details.clone()).await {
            Ok(()) => {
                bus.emit(AFTER, Arc::new(details));
                Ok(Dispatch::Completed)
            }
            Err(error) => {
                warn!(
                    pattern = command.pattern().source(),
                    %error,
                    "command listener failed",
                );
                bus.emit(
                    ERROR,
                    Arc::new(CommandFailure {
                        message: details.message,
                        args: details.args,
                        error: Arc::new(error),
                    }),
                );
                Ok(Dispatch::Failed)
            }
        }
    }
}

/// Wires a shared [`CommandPlugin`] onto a bot as its message handler.
pub struct CommandRouter(Arc<CommandPlugin>);

impl CommandRouter {
    /// Creates a router for the given plugin.
    #[must_use]
    pub fn new(plugin: Arc<CommandPlugin>) -> Self {
        Self(plugin)
    }
}

impl Plugin for CommandRouter {
    /// Subscribes the dispatch routine to the bot's `message` events.
    ///
    /// Each message is dispatched on its own task; in-flight dispatches may
    /// overlap and are never serialized. A prefix resolver failure is
    /// logged and fatal to that message only.
    fn register(&self, bot: &Bot) -> Result<()> {
        let plugin = Arc::clone(&self.0);
        let bus = Arc::clone(bot.bus());

        bot.on(MESSAGE, move |payload: &EventPayload| {
            let Some(message) = payload.downcast_ref::<Message>() else {
                return;
            };
            let message = message.clone();
            let plugin = Arc::clone(&plugin);
            let bus = Arc::clone(&bus);

            tokio::spawn(async move {
                if let Err(error) = plugin.dispatch(&bus, message).await {
                    warn!(%error, "message dropped");
                }
            });
        });

        Ok(())
    }
}

/// A command-capable bot: a [`Bot`] composed with a [`CommandPlugin`].
///
/// This is the typed replacement for extending a bot object with new
/// methods at runtime: the command surface lives on the composed type.
pub struct CommandBot {
    bot: Bot,
    plugin: Arc<CommandPlugin>,
}

impl CommandBot {
    /// Wraps `bot` with command dispatch under the given prefix.
    ///
    /// # Errors
    ///
    /// Returns an error if plugin registration fails.
    pub fn new(bot: Bot, prefix: impl Into<Prefix>) -> Result<Self> {
        let plugin = Arc::new(CommandPlugin::new(prefix));
        bot.register(&CommandRouter::new(Arc::clone(&plugin)))?;
        Ok(Self { bot, plugin })
    }

    /// Registers a command. See [`CommandPlugin::command`].
    ///
    /// # Errors
    ///
    /// Returns a malformed-pattern error.
    pub fn command<L, F>(&self, pattern: &str, listener: L) -> Result<Arc<Command>>
    where
        L: Fn(CommandDetails) -> F + Send + Sync + 'static,
        F: Future<Output = Result<()>> + Send + 'static,
    {
        self.plugin.command(pattern, listener)
    }

    /// Returns a snapshot of the registered commands.
    #[must_use]
    pub fn commands(&self) -> Vec<Arc<Command>> {
        self.plugin.commands()
    }

    /// Returns the underlying bot.
    #[must_use]
    pub fn bot(&self) -> &Bot {
        &self.bot
    }

    /// Returns the command plugin.
    #[must_use]
    pub fn plugin(&self) -> &Arc<CommandPlugin> {
        &self.plugin
    }

    /// Unwraps the underlying bot.
    #[must_use]
    pub fn into_inner(self) -> Bot {
        self.bot
    }

    /// Subscribes a handler on the bot's bus.
    pub fn on<F>(&self, event: impl Into<String>, handler: F)
    where
        F: Fn(&EventPayload) + Send + Sync + 'static,
    {
        self.bot.on(event, handler);
    }

    /// Publishes a payload on the bot's bus.
    pub fn emit(&self, event: &str, payload: EventPayload) -> bool {
        self.bot.emit(event, payload)
    }

    /// Connects the platform and starts the event flow.
    ///
    /// # Errors
    ///
    /// Returns an error if the platform fails to connect.
    pub async fn login(&self) -> Result<()> {
        self.bot.login().await
    }

    /// Tears down the platform connection.
    ///
    /// # Errors
    ///
    /// Returns an error if shutdown fails.
    pub async fn destroy(&self) -> Result<()> {
        self.bot.destroy().await
    }
}
