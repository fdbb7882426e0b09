//! The terminal platform adapter.
//!
//! Reads lines from a [`LineEditor`] on a blocking task and publishes them
//! as `message` events. A line may be prefixed `<who>: ` to simulate a
//! message from another speaker; unprefixed lines come from the configured
//! local user. Lines tagged with the bot's own name (its echoes) are
//! dropped.

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tracing::{info, warn};

use quill_core::{EventBus, MESSAGE, Platform, READY};
use quill_foundation::{Error, Message, OutgoingMessage, Replier, Result, User};

use crate::editor::{LineEditor, ReadResult, RustylineEditor};
use crate::render::render;

/// Options for the shell platform.
#[derive(Clone, Debug)]
pub struct ShellPlatformOptions {
    /// The bot's username.
    pub name: String,
    /// The local user's username.
    pub whoami: String,
}

impl ShellPlatformOptions {
    /// Creates options for a bot named `name`, with the local user defaulting
    /// to `User`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            whoami: "User".to_string(),
        }
    }

    /// Sets the local user's name.
    #[must_use]
    pub fn with_whoami(mut self, whoami: impl Into<String>) -> Self {
        self.whoami = whoami.into();
        self
    }
}

/// A chat platform backed by the local terminal.
pub struct ShellPlatform<E: LineEditor = RustylineEditor> {
    options: ShellPlatformOptions,
    editor: Mutex<Option<E>>,
    closed: Arc<AtomicBool>,
}

impl ShellPlatform<RustylineEditor> {
    /// Creates a shell platform with the default rustyline editor.
    ///
    /// # Errors
    ///
    /// Returns an error if the editor fails to initialize.
    pub fn new(options: ShellPlatformOptions) -> Result<Self> {
        Ok(Self::with_editor(options, RustylineEditor::new()?))
    }
}

impl<E: LineEditor + 'static> ShellPlatform<E> {
    /// Creates a shell platform with the given editor.
    pub fn with_editor(options: ShellPlatformOptions, editor: E) -> Self {
        Self {
            options,
            editor: Mutex::new(Some(editor)),
            closed: Arc::new(AtomicBool::new(false)),
        }
    }
}

#[async_trait]
impl<E: LineEditor + 'static> Platform for ShellPlatform<E> {
    fn info(&self) -> Option<User> {
        Some(User::named(self.options.name.clone()))
    }

    async fn login(&self, bus: Arc<EventBus>) -> Result<()> {
        let editor = self
            .editor
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .take()
            .ok_or_else(|| Error::platform("shell platform already logged in"))?;

        let options = self.options.clone();
        let closed = Arc::clone(&self.closed);
        let loop_bus = Arc::clone(&bus);
        tokio::task::spawn_blocking(move || read_loop(editor, &options, &loop_bus, &closed));

        bus.emit(READY, Arc::new(()));
        Ok(())
    }

    async fn send(&self, _channel_id: &str, message: OutgoingMessage) -> Result<Message> {
        Ok(write_outgoing(&self.options.name, &message))
    }

    async fn destroy(&self) -> Result<()> {
        // Takes effect once the current read returns.
        self.closed.store(true, Ordering::SeqCst);
        Ok(())
    }
}

/// The blocking read loop: lines in, `message` events out.
fn read_loop<E: LineEditor>(
    mut editor: E,
    options: &ShellPlatformOptions,
    bus: &EventBus,
    closed: &AtomicBool,
) {
    let prompt = format!("<{}>: ", options.whoami);

    loop {
        if closed.load(Ordering::SeqCst) {
            break;
        }

        match editor.read_line(&prompt) {
            Ok(ReadResult::Line(line)) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                editor.add_history(line);

                let (who, content) = split_speaker(line);

                // Drop echoes of the bot or explicit self-tags.
                if who == Some(options.name.as_str()) || who == Some(options.whoami.as_str()) {
                    continue;
                }

                let author = User::named(who.unwrap_or(&options.whoami));
                let message = Message {
                    author,
                    content: content.trim().to_string(),
                    replier: shell_replier(options.name.clone()),
                };

                bus.emit(MESSAGE, Arc::new(message));
            }
            Ok(ReadResult::Interrupted | ReadResult::Eof) => {
                info!("shell input closed");
                break;
            }
            Err(error) => {
                warn!(%error, "line editor failed");
                break;
            }
        }
    }
}

/// Splits an optional `<who>: ` speaker tag off a line.
fn split_speaker(line: &str) -> (Option<&str>, &str) {
    let Some(tagged) = line.strip_prefix('<') else {
        return (None, line);
    };
    match tagged.split_once(">:") {
        Some((who, content)) if !who.is_empty() => (Some(who), content),
        _ => (None, line),
    }
}

/// A replier that writes back to the terminal under the bot's name.
fn shell_replier(name: String) -> Replier {
    Replier::new(move |outgoing| {
        let name = name.clone();
        Box::pin(async move { Ok(write_outgoing(&name, &outgoing)) })
    })
}

/// Renders and writes an outgoing message, returning the echo message.
fn write_outgoing(name: &str, outgoing: &OutgoingMessage) -> Message {
    let content = render(outgoing);

    for line in content.split('\n') {
        println!("<{name}>: {line}");
    }

    Message {
        author: User::named(name),
        content,
        replier: shell_replier(name.to_string()),
    }
}
