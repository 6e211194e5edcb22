use crate::application::errors::BotError;
use crate::application::messaging::{Action, CommandRouter};
use crate::domain::entities::Message;
use crate::domain::traits::Bot;

/// Whether the event loop should keep going
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Shutdown,
}

/// Service for processing messages
///
/// The async edge of the bot: routes each message synchronously, then
/// performs the resulting actions on the platform adapter in order.
pub struct MessageService<B: Bot> {
    bot: B,
    router: CommandRouter,
}

impl<B: Bot> MessageService<B> {
    pub fn new(bot: B, router: CommandRouter) -> Self {
        Self { bot, router }
    }

    pub fn bot(&self) -> &B {
        &self.bot
    }

    pub fn router(&self) -> &CommandRouter {
        &self.router
    }

    pub fn router_mut(&mut self) -> &mut CommandRouter {
        &mut self.router
    }

    /// Process an incoming message and perform what it asks for
    pub async fn process(&mut self, message: Message) -> Flow {
        let dispatch = self.router.dispatch(&message);
        tracing::debug!(
            "[{}] {:?} -> {:?} ({} actions)",
            message.channel_id,
            dispatch.command,
            dispatch.status,
            dispatch.actions.len()
        );
        self.perform(dispatch.actions).await
    }

    /// Run actions in order. A failed send or delete is logged and skipped;
    /// a shutdown takes effect after every other action has run.
    pub async fn perform(&self, actions: Vec<Action>) -> Flow {
        let mut flow = Flow::Continue;

        for action in actions {
            match action {
                Action::Send { channel_id, text } => {
                    if let Err(e) = self.respond(&channel_id, &text).await {
                        tracing::error!("Failed to send message: {}", e);
                    }
                }
                Action::Delete { channel_id, message_id } => {
                    if let Err(e) = self.bot.delete_message(&channel_id, &message_id).await {
                        tracing::warn!("Failed to delete message {}: {}", message_id, e);
                    }
                }
                Action::Shutdown => flow = Flow::Shutdown,
            }
        }

        flow
    }

    /// Send a response message
    pub async fn respond(&self, channel_id: &str, text: &str) -> Result<String, BotError> {
        self.bot.send_message(channel_id, text).await
    }

    /// Close the adapter.
    pub async fn shutdown(&self) -> Result<(), BotError> {
        tracing::info!("Starting shutdown...");
        self.bot.close().await?;
        tracing::info!("Done shutdown.");
        Ok(())
    }
}
