//! Quill demo bot.
//!
//! Runs a bot against the local terminal with a `!` prefix and two
//! commands:
//!
//! ```text
//! <User>: !hello
//! <Quill>: It's nice to meet you, User!
//! <User>: !welcome Bob the Builder
//! ```

use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use quill_command::{CommandBot, CommandDetails};
use quill_core::Bot;
use quill_foundation::{Embed, Result};
use quill_shell::{ShellPlatform, ShellPlatformOptions};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\x1b[31mError: {e}\x1b[0m");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<()> {
    let platform = ShellPlatform::new(ShellPlatformOptions::new("Quill"))?;
    let bot = CommandBot::new(Bot::new(platform), "!")?;

    bot.command("hello", |details: CommandDetails| async move {
        details
            .message
            .reply(format!(
                "It's nice to meet you, {}!",
                details.message.author.username
            ))
            .await?;
        Ok(())
    })?;

    bot.command("welcome <...name>", |details: CommandDetails| async move {
        let name = details.args.text("name").unwrap_or_default().to_string();
        details
            .message
            .reply(
                Embed::new()
                    .with_title("Hello World!")
                    .with_color("1ABC9C")
                    .with_field("Hello", name),
            )
            .await?;
        Ok(())
    })?;

    bot.on(quill_core::READY, |_| {
        println!("Kweh! Quill is up and running. Try !hello or !welcome <name>.");
    });

    bot.login().await?;

    tokio::signal::ctrl_c()
        .await
        .map_err(|e| quill_foundation::Error::platform(e.to_string()))?;

    bot.destroy().await?;
    println!("\nGoodbye!");
    Ok(())
}
