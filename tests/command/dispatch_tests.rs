//! End-to-end dispatch tests: platform → bus → command plugin → listener.

use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use quill_command::{AFTER, BEFORE, CommandBot, CommandPlugin, CommandRouter, ERROR, Prefix};
use quill_core::{Bot, EventBus, MESSAGE, Platform, READY};
use quill_foundation::{Error, Message, OutgoingMessage, Result, User};

/// A platform that hands its bus back out so tests can inject messages.
#[derive(Default)]
struct InjectablePlatform {
    bus: Mutex<Option<Arc<EventBus>>>,
}

impl InjectablePlatform {
    fn inject(&self, content: &str) {
        let bus = self.bus.lock().unwrap();
        let bus = bus.as_ref().expect("not logged in");
        bus.emit(
            MESSAGE,
            Arc::new(Message::synthetic(User::named("alice"), content)),
        );
    }
}

#[async_trait]
impl Platform for InjectablePlatform {
    fn info(&self) -> Option<User> {
        None
    }

    async fn login(&self, bus: Arc<EventBus>) -> Result<()> {
        bus.emit(READY, Arc::new(()));
        *self.bus.lock().unwrap() = Some(bus);
        Ok(())
    }

    async fn send(&self, _channel_id: &str, _message: OutgoingMessage) -> Result<Message> {
        Err(Error::platform("not supported"))
    }

    async fn destroy(&self) -> Result<()> {
        Ok(())
    }
}

/// Dispatch runs on a spawned task; give it a moment to land.
async fn settle() {
    tokio::time::sleep(Duration::from_millis(50)).await;
}

fn counting_bot(
    platform: Arc<InjectablePlatform>,
    prefix: impl Into<Prefix>,
) -> (CommandBot, Arc<AtomicUsize>) {
    let bot = CommandBot::new(
        Bot::from_arc(platform as Arc<dyn Platform>),
        prefix,
    )
    .unwrap();

    let calls = Arc::new(AtomicUsize::new(0));
    let hits = Arc::clone(&calls);
    bot.command("ping", move |_| {
        let hits = Arc::clone(&hits);
        async move {
            hits.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    })
    .unwrap();

    (bot, calls)
}

#[tokio::test]
async fn prefixed_message_executes_the_command() {
    let platform = Arc::new(InjectablePlatform::default());
    let (bot, calls) = counting_bot(Arc::clone(&platform), "!");

    bot.login().await.unwrap();
    platform.inject("!ping");
    settle().await;

    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn unprefixed_message_is_ignored() {
    let platform = Arc::new(InjectablePlatform::default());
    let (bot, calls) = counting_bot(Arc::clone(&platform), "!");

    bot.login().await.unwrap();
    platform.inject("ping");
    settle().await;

    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn earlier_registration_wins_over_later_patterns() {
    let platform = Arc::new(InjectablePlatform::default());
    let bot = CommandBot::new(
        Bot::from_arc(Arc::clone(&platform) as Arc<dyn Platform>),
        "!",
    )
    .unwrap();

    let order = Arc::new(Mutex::new(Vec::new()));

    let log = Arc::clone(&order);
    bot.command("ping", move |_| {
        let log = Arc::clone(&log);
        async move {
            log.lock().unwrap().push("ping");
            Ok(())
        }
    })
    .unwrap();

    let log = Arc::clone(&order);
    bot.command("pi <x>", move |_| {
        let log = Arc::clone(&log);
        async move {
            log.lock().unwrap().push("pi <x>");
            Ok(())
        }
    })
    .unwrap();

    bot.login().await.unwrap();
    platform.inject("!ping");
    settle().await;

    assert_eq!(*order.lock().unwrap(), vec!["ping"]);
}

#[tokio::test]
async fn notifications_wrap_execution_in_order() {
    let platform = Arc::new(InjectablePlatform::default());
    let bot = CommandBot::new(
        Bot::from_arc(Arc::clone(&platform) as Arc<dyn Platform>),
        "!",
    )
    .unwrap();

    let trace = Arc::new(Mutex::new(Vec::new()));

    for event in [BEFORE, AFTER, ERROR] {
        let log = Arc::clone(&trace);
        bot.on(event, move |_| log.lock().unwrap().push(event));
    }

    let log = Arc::clone(&trace);
    bot.command("ping", move |_| {
        let log = Arc::clone(&log);
        async move {
            log.lock().unwrap().push("exec");
            Ok(())
        }
    })
    .unwrap();

    bot.login().await.unwrap();
    platform.inject("!ping");
    settle().await;

    assert_eq!(*trace.lock().unwrap(), vec![BEFORE, "exec", AFTER]);
}

#[tokio::test]
async fn listener_failure_emits_error_and_spares_the_bus() {
    let platform = Arc::new(InjectablePlatform::default());
    let bot = CommandBot::new(
        Bot::from_arc(Arc::clone(&platform) as Arc<dyn Platform>),
        "!",
    )
    .unwrap();

    let trace = Arc::new(Mutex::new(Vec::new()));
    for event in [AFTER, ERROR] {
        let log = Arc::clone(&trace);
        bot.on(event, move |_| log.lock().unwrap().push(event));
    }

    bot.command("boom", |_| async { Err(Error::listener("kaboom")) })
        .unwrap();

    bot.login().await.unwrap();
    platform.inject("!boom");
    settle().await;

    // One error, no after; and a failing command does not stop later ones.
    assert_eq!(*trace.lock().unwrap(), vec![ERROR]);

    platform.inject("!boom");
    settle().await;

    assert_eq!(*trace.lock().unwrap(), vec![ERROR, ERROR]);
}

#[tokio::test]
async fn dynamic_prefix_sees_each_message_once() {
    let platform = Arc::new(InjectablePlatform::default());
    let resolutions = Arc::new(AtomicUsize::new(0));

    let hits = Arc::clone(&resolutions);
    let prefix = Prefix::resolver(move |message: &Message| {
        hits.fetch_add(1, Ordering::SeqCst);
        let content = message.content.clone();
        async move {
            assert!(!content.is_empty());
            Ok("?".to_string())
        }
    });

    let (bot, calls) = counting_bot(Arc::clone(&platform), prefix);

    bot.login().await.unwrap();
    platform.inject("?ping");
    settle().await;

    assert_eq!(resolutions.load(Ordering::SeqCst), 1);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn router_registers_a_shared_plugin_on_a_plain_bot() {
    let platform = Arc::new(InjectablePlatform::default());
    let bot = Bot::from_arc(Arc::clone(&platform) as Arc<dyn Platform>);

    let plugin = Arc::new(CommandPlugin::new("!"));
    let calls = Arc::new(AtomicUsize::new(0));

    let hits = Arc::clone(&calls);
    plugin
        .command("ping", move |_| {
            let hits = Arc::clone(&hits);
            async move {
                hits.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }
        })
        .unwrap();

    bot.register(&CommandRouter::new(Arc::clone(&plugin))).unwrap();
    bot.login().await.unwrap();
    platform.inject("!ping");
    settle().await;

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(plugin.commands().len(), 1);
}

#[tokio::test]
async fn command_surface_lives_on_the_composed_bot() {
    let platform = Arc::new(InjectablePlatform::default());
    let (bot, _calls) = counting_bot(platform, "!");

    let commands = bot.commands();
    assert_eq!(commands.len(), 1);
    assert_eq!(commands[0].pattern().source(), "ping");

    let registered = bot.command("welcome <...name>", |_| async { Ok(()) }).unwrap();
    assert_eq!(registered.pattern().source(), "welcome <...name>");
    assert_eq!(bot.commands().len(), 2);
}
