//! Console adapter for development/testing

use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::application::errors::BotError;
use crate::domain::entities::{Message, User};
use crate::domain::traits::{Bot, BotInfo};
use crate::infrastructure::config::ConsoleConfig;

/// Platform tag set on console messages
pub const PLATFORM: &str = "console";

/// Console bot adapter for local development
///
/// Each stdin line becomes a message from the configured identity; sends and
/// deletes are printed to stdout.
pub struct ConsoleAdapter {
    info: BotInfo,
    identity: ConsoleConfig,
    next_id: AtomicU64,
}

impl ConsoleAdapter {
    pub fn new(name: impl Into<String>, identity: ConsoleConfig) -> Self {
        Self {
            info: BotInfo {
                id: 0,
                name: name.into(),
            },
            identity,
            next_id: AtomicU64::new(1),
        }
    }

    pub fn identity(&self) -> &ConsoleConfig {
        &self.identity
    }

    /// Wrap one line of input as a message from the console identity
    pub fn message_from_line(&self, line: &str) -> Message {
        let author = User::new(self.identity.author_id).with_username(self.identity.author_name.clone());
        Message::new(self.identity.channel_id.clone(), author, line.trim_end_matches(['\r', '\n']))
            .with_guild_opt(self.identity.guild_id)
            .with_id(format!("in-{}", self.next_id()))
            .with_platform(PLATFORM)
    }

    fn next_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }
}

#[async_trait]
impl Bot for ConsoleAdapter {
    async fn start(&self) -> Result<(), BotError> {
        tracing::info!(
            "Starting console bot as {} ({}) in #{}",
            self.identity.author_name,
            self.identity.author_id,
            self.identity.channel_id
        );
        Ok(())
    }

    async fn send_message(&self, channel_id: &str, text: &str) -> Result<String, BotError> {
        println!("[BOT #{}] {}", channel_id, text);
        Ok(format!("out-{}", self.next_id()))
    }

    async fn delete_message(&self, channel_id: &str, message_id: &str) -> Result<(), BotError> {
        println!("[BOT #{}] (deleted {})", channel_id, message_id);
        Ok(())
    }

    async fn close(&self) -> Result<(), BotError> {
        println!("[BOT] Bye.");
        Ok(())
    }

    fn bot_info(&self) -> BotInfo {
        self.info.clone()
    }
}
