//! Message service integration tests
//! Run with: cargo test --test message_service_test

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

use rilow_bot::application::errors::BotError;
use rilow_bot::application::messaging::{Action, CommandRouter};
use rilow_bot::application::permissions::OWNER_ID;
use rilow_bot::application::services::{Flow, MessageService};
use rilow_bot::application::state::BotState;
use rilow_bot::domain::entities::{Message, User};
use rilow_bot::domain::traits::{Bot, BotInfo};
use rilow_bot::extensions::builtin_host;
use rilow_bot::infrastructure::lang::Translator;
use rilow_bot::infrastructure::storage::JsonStore;

/// Records every call as a line of text
#[derive(Clone, Default)]
struct RecordingBot {
    log: Arc<Mutex<Vec<String>>>,
    fail_sends: bool,
}

impl RecordingBot {
    fn failing() -> Self {
        Self {
            fail_sends: true,
            ..Self::default()
        }
    }

    fn calls(&self) -> Vec<String> {
        self.log.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.log.lock().unwrap().push(call);
    }
}

#[async_trait]
impl Bot for RecordingBot {
    async fn start(&self) -> Result<(), BotError> {
        Ok(())
    }

    async fn send_message(&self, channel_id: &str, text: &str) -> Result<String, BotError> {
        if self.fail_sends {
            return Err(BotError::Transport("offline".to_string()));
        }
        self.record(format!("send {} {}", channel_id, text));
        Ok("sent".to_string())
    }

    async fn delete_message(&self, channel_id: &str, message_id: &str) -> Result<(), BotError> {
        self.record(format!("delete {} {}", channel_id, message_id));
        Ok(())
    }

    async fn close(&self) -> Result<(), BotError> {
        self.record("close".to_string());
        Ok(())
    }

    fn bot_info(&self) -> BotInfo {
        BotInfo {
            id: 1,
            name: "recorder".to_string(),
        }
    }
}

fn router(dir: &TempDir) -> CommandRouter {
    let mut translations = std::collections::HashMap::new();
    translations.insert("#pong".to_string(), "Pong!".to_string());

    let state = BotState::new(
        JsonStore::new(dir.path().join("config.json")),
        JsonStore::new(dir.path().join("data.json")),
        Translator::from_pairs("en_US", translations),
    );
    let mut router = CommandRouter::new(state, builtin_host());
    router.load_extension("system").unwrap();
    router
}

fn message(author: u64, content: &str) -> Message {
    Message::new("general", User::new(author), content).with_id("m1")
}

#[tokio::test]
async fn test_reply_is_sent_to_invoking_channel() {
    let dir = tempfile::tempdir().unwrap();
    let bot = RecordingBot::default();
    let mut service = MessageService::new(bot.clone(), router(&dir));

    let flow = service.process(message(5, ".ping")).await;

    assert_eq!(flow, Flow::Continue);
    assert_eq!(bot.calls(), vec!["send general Pong!"]);
}

#[tokio::test]
async fn test_exit_deletes_then_stops() {
    let dir = tempfile::tempdir().unwrap();
    let bot = RecordingBot::default();
    let mut service = MessageService::new(bot.clone(), router(&dir));

    let flow = service.process(message(OWNER_ID, ".exit")).await;
    assert_eq!(flow, Flow::Shutdown);

    service.shutdown().await.unwrap();
    assert_eq!(bot.calls(), vec!["delete general m1", "close"]);
}

#[tokio::test]
async fn test_shutdown_applies_after_remaining_actions() {
    let dir = tempfile::tempdir().unwrap();
    let bot = RecordingBot::default();
    let service = MessageService::new(bot.clone(), router(&dir));

    let flow = service
        .perform(vec![
            Action::Send {
                channel_id: "general".to_string(),
                text: "a".to_string(),
            },
            Action::Shutdown,
            Action::Send {
                channel_id: "general".to_string(),
                text: "b".to_string(),
            },
        ])
        .await;

    assert_eq!(flow, Flow::Shutdown);
    assert_eq!(bot.calls(), vec!["send general a", "send general b"]);
}

#[tokio::test]
async fn test_failed_send_does_not_stop_the_batch() {
    let dir = tempfile::tempdir().unwrap();
    let bot = RecordingBot::failing();
    let service = MessageService::new(bot.clone(), router(&dir));

    let flow = service
        .perform(vec![
            Action::Send {
                channel_id: "general".to_string(),
                text: "lost".to_string(),
            },
            Action::Delete {
                channel_id: "general".to_string(),
                message_id: "m1".to_string(),
            },
        ])
        .await;

    assert_eq!(flow, Flow::Continue);
    assert_eq!(bot.calls(), vec!["delete general m1"]);
}

#[tokio::test]
async fn test_ignored_message_performs_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let bot = RecordingBot::default();
    let mut service = MessageService::new(bot.clone(), router(&dir));

    let flow = service.process(message(5, "just chatting")).await;

    assert_eq!(flow, Flow::Continue);
    assert!(bot.calls().is_empty());
}
