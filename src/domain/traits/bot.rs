use async_trait::async_trait;
use crate::application::errors::BotError;

/// Bot trait - abstraction for messaging platform adapters
#[async_trait]
pub trait Bot: Send + Sync {
    /// Connect and get ready to exchange messages
    async fn start(&self) -> Result<(), BotError>;

    /// Send a message to a channel, returning the new message id
    async fn send_message(&self, channel_id: &str, text: &str) -> Result<String, BotError>;

    /// Delete a message from a channel
    async fn delete_message(&self, channel_id: &str, message_id: &str) -> Result<(), BotError>;

    /// Disconnect. Called once, after the last send.
    async fn close(&self) -> Result<(), BotError>;

    /// Get bot info
    fn bot_info(&self) -> BotInfo;
}

/// Bot information
#[derive(Debug, Clone)]
pub struct BotInfo {
    pub id: u64,
    pub name: String,
}
