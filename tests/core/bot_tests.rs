//! Bot wiring tests with a mock platform.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use quill_core::{Bot, EventBus, MESSAGE, Platform, Plugin, READY};
use quill_foundation::{Error, Message, OutgoingMessage, Result, User};

/// A platform that records calls and can inject messages into its bus.
#[derive(Default)]
struct MockPlatform {
    logins: AtomicUsize,
    bus: std::sync::Mutex<Option<Arc<EventBus>>>,
}

impl MockPlatform {
    fn inject(&self, message: Message) {
        let bus = self.bus.lock().unwrap();
        let bus = bus.as_ref().expect("not logged in");
        bus.emit(MESSAGE, Arc::new(message));
    }
}

#[async_trait]
impl Platform for MockPlatform {
    fn info(&self) -> Option<User> {
        Some(User::named("mock"))
    }

    async fn login(&self, bus: Arc<EventBus>) -> Result<()> {
        self.logins.fetch_add(1, Ordering::SeqCst);
        bus.emit(READY, Arc::new(()));
        *self.bus.lock().unwrap() = Some(bus);
        Ok(())
    }

    async fn send(&self, _channel_id: &str, _message: OutgoingMessage) -> Result<Message> {
        Err(Error::platform("mock cannot send"))
    }

    async fn destroy(&self) -> Result<()> {
        Ok(())
    }
}

#[tokio::test]
async fn login_is_forwarded_to_the_platform_once() {
    let platform = Arc::new(MockPlatform::default());
    let bot = Bot::from_arc(Arc::clone(&platform) as Arc<dyn Platform>);

    bot.login().await.unwrap();

    assert_eq!(platform.logins.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn platform_messages_reach_bot_subscribers() {
    let platform = Arc::new(MockPlatform::default());
    let bot = Bot::from_arc(Arc::clone(&platform) as Arc<dyn Platform>);

    let count = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&count);
    bot.on(MESSAGE, move |_| {
        seen.fetch_add(1, Ordering::SeqCst);
    });

    bot.login().await.unwrap();
    platform.inject(Message::synthetic(User::named("alice"), "!ping"));

    assert_eq!(count.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn plugins_subscribe_before_login() {
    struct ReadyCounter(Arc<AtomicUsize>);

    impl Plugin for ReadyCounter {
        fn register(&self, bot: &Bot) -> Result<()> {
            let count = Arc::clone(&self.0);
            bot.on(READY, move |_| {
                count.fetch_add(1, Ordering::SeqCst);
            });
            Ok(())
        }
    }

    let bot = Bot::new(MockPlatform::default());
    let count = Arc::new(AtomicUsize::new(0));

    bot.register(&ReadyCounter(Arc::clone(&count))).unwrap();
    bot.login().await.unwrap();

    assert_eq!(count.load(Ordering::SeqCst), 1);
}
