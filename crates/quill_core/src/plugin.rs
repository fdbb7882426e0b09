//! Plugin registration hook.

use quill_foundation::Result;

use crate::bot::Bot;

/// A capability that wires itself onto a bot at startup.
///
/// `register` is called once per bot instance, before login, and must not
/// assume any other plugin is already registered.
pub trait Plugin {
    /// Registers this plugin's subscriptions on the bot.
    ///
    /// # Errors
    ///
    /// Returns an error if registration cannot complete.
    fn register(&self, bot: &Bot) -> Result<()>;
}
