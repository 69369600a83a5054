// Tests for command dispatch authorization

use std::sync::{Arc, Mutex as StdMutex};
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use tempfile::TempDir;

use juleswatch::bot::{Bot, Outbound};
use juleswatch::jules::{AuditLog, JulesClient, Session};
use juleswatch::monitor::{MonitorController, MonitorSettings, Notifier, SessionSource};
use juleswatch::telegram::TelegramClient;

const ADMIN: i64 = 123_456;
const STRANGER: i64 = 999_999;

/// Outbound recorder standing in for the Telegram client.
#[derive(Default)]
struct RecordingOutbound {
    messages: StdMutex<Vec<(i64, String)>>,
}

impl RecordingOutbound {
    fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn messages(&self) -> Vec<(i64, String)> {
        self.messages.lock().unwrap().clone()
    }
}

#[async_trait]
impl Outbound for RecordingOutbound {
    async fn send(&self, chat_id: i64, text: &str, _html: bool) -> Result<()> {
        self.messages.lock().unwrap().push((chat_id, text.to_string()));
        Ok(())
    }
}

struct IdleSource;

#[async_trait]
impl SessionSource for IdleSource {
    async fn fetch_sessions(&self, _page_size: u32) -> Result<Vec<Session>> {
        Ok(Vec::new())
    }
}

struct NullNotifier;

#[async_trait]
impl Notifier for NullNotifier {
    async fn notify(&self, _chat_id: i64, _text: &str) -> Result<()> {
        Ok(())
    }
}

/// Bot wired to an in-memory outbound and a controller on fakes. The real
/// clients are constructed but never reached by the paths under test.
fn test_bot(outbound: Arc<RecordingOutbound>) -> (Bot, Arc<MonitorController>, TempDir) {
    let temp_dir = TempDir::new().unwrap();

    let telegram = Arc::new(TelegramClient::with_base_url("http://127.0.0.1:1/bot-test").unwrap());
    let jules = Arc::new(
        JulesClient::with_base_url(
            "test-key",
            "http://127.0.0.1:1",
            AuditLog::new(temp_dir.path().join("jules_api.log")),
        )
        .unwrap(),
    );

    let controller = Arc::new(MonitorController::new(
        Arc::new(IdleSource) as Arc<dyn SessionSource>,
        Arc::new(NullNotifier) as Arc<dyn Notifier>,
        MonitorSettings {
            chat_id: ADMIN,
            page_size: 10,
            poll_interval: Duration::from_secs(60),
            budget: Duration::from_secs(3600),
        },
    ));

    let bot = Bot::with_parts(
        telegram,
        outbound,
        jules,
        Arc::clone(&controller),
        ADMIN,
        10,
    );

    (bot, controller, temp_dir)
}

#[tokio::test]
async fn non_admin_monitor_is_unauthorized_and_does_not_toggle() {
    let outbound = RecordingOutbound::new();
    let (bot, controller, _temp) = test_bot(Arc::clone(&outbound));

    bot.dispatch(STRANGER, "/monitor").await.unwrap();

    assert_eq!(
        outbound.messages(),
        vec![(STRANGER, "Unauthorized.".to_string())]
    );
    assert!(
        !controller.is_active().await,
        "a stranger must not start the monitoring loop"
    );
}

#[tokio::test]
async fn non_admin_malformed_create_gets_unauthorized_not_usage() {
    let outbound = RecordingOutbound::new();
    let (bot, controller, _temp) = test_bot(Arc::clone(&outbound));

    bot.dispatch(STRANGER, "/create").await.unwrap();

    // Authorization comes first; the usage hint must not leak to strangers.
    assert_eq!(
        outbound.messages(),
        vec![(STRANGER, "Unauthorized.".to_string())]
    );
    assert!(!controller.is_active().await);
}

#[tokio::test]
async fn admin_malformed_create_gets_the_usage_hint() {
    let outbound = RecordingOutbound::new();
    let (bot, _controller, _temp) = test_bot(Arc::clone(&outbound));

    bot.dispatch(ADMIN, "/create").await.unwrap();

    assert_eq!(
        outbound.messages(),
        vec![(ADMIN, "Usage: /create <owner/repo> <prompt>".to_string())]
    );
}

#[tokio::test]
async fn start_is_open_to_everyone() {
    let outbound = RecordingOutbound::new();
    let (bot, _controller, _temp) = test_bot(Arc::clone(&outbound));

    bot.dispatch(STRANGER, "/start").await.unwrap();

    let messages = outbound.messages();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].0, STRANGER);
    assert!(messages[0].1.contains("Jules Monitoring Bot"));
}

#[tokio::test]
async fn admin_monitor_toggles_the_loop_both_ways() {
    let outbound = RecordingOutbound::new();
    let (bot, controller, _temp) = test_bot(Arc::clone(&outbound));

    bot.dispatch(ADMIN, "/monitor").await.unwrap();
    assert!(controller.is_active().await);
    assert!(outbound.messages()[0].1.contains("Monitoring started"));

    bot.dispatch(ADMIN, "/monitor").await.unwrap();
    assert!(!controller.is_active().await);
    assert!(outbound.messages()[1].1.contains("Monitoring stopped"));
}

#[tokio::test]
async fn chatter_from_anyone_is_ignored() {
    let outbound = RecordingOutbound::new();
    let (bot, _controller, _temp) = test_bot(Arc::clone(&outbound));

    bot.dispatch(STRANGER, "hello there").await.unwrap();
    bot.dispatch(ADMIN, "hello there").await.unwrap();

    assert!(outbound.messages().is_empty());
}
