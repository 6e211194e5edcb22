//! What a command handler gets to work with

use crate::application::errors::CommandError;
use crate::application::state::BotState;
use crate::domain::entities::{Message, User};
use crate::extensions::ExtensionHost;

/// Grouped context for command execution.
pub struct CommandContext<'a> {
    pub message: &'a Message,
    /// Raw text after the command name
    pub args: &'a str,
    pub state: &'a mut BotState,
    pub extensions: &'a mut ExtensionHost,
}

impl<'a> CommandContext<'a> {
    pub fn author(&self) -> &'a User {
        &self.message.author
    }

    /// Owner or admin.
    pub fn is_authorized(&self) -> bool {
        self.state.gate().is_authorized(self.message.author.id)
    }

    /// First whitespace-separated argument.
    pub fn arg(&self) -> Option<&'a str> {
        self.args.split_whitespace().next()
    }

    /// The whole argument string, if any.
    pub fn rest(&self) -> Option<&'a str> {
        Some(self.args).filter(|args| !args.is_empty())
    }

    /// First argument, or a usage error carrying `usage`.
    pub fn require_arg(&self, usage: &str) -> Result<&'a str, CommandError> {
        self.arg().ok_or_else(|| CommandError::Usage(usage.to_string()))
    }
}
