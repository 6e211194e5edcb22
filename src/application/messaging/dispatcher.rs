//! Command router - Turns an inbound message into transport actions
//!
//! Resolves the guild's prefix, parses the invocation, runs the check chain
//! and the handler, and maps the outcome to [`Action`]s. Handler logic is
//! synchronous; performing the actions is the caller's job.

use std::error::Error as _;

use super::context::CommandContext;
use super::middleware::{Check, CheckChain, CheckContext, Denial};
use super::parser::MessageParser;
use crate::application::errors::{CommandError, ExtensionError};
use crate::application::state::BotState;
use crate::domain::entities::{Message, Reply, ReportLevel};
use crate::extensions::ExtensionHost;

/// The only thing a user ever sees of a failing handler
pub const GENERIC_FAILURE: &str = "An unknown exception occurred.";

/// Something for the transport to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Send { channel_id: String, text: String },
    Delete { channel_id: String, message_id: String },
    Shutdown,
}

/// How a dispatch ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    /// Not addressed to the bot
    Ignored,
    /// Handler ran and returned normally
    Executed,
    /// No command by that name
    UnknownCommand(String),
    /// A check failed; the handler did not run
    Denied(Denial),
    /// Handler returned an error
    Failed,
}

/// Outcome of routing one message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatch {
    pub command: Option<String>,
    pub status: Status,
    pub actions: Vec<Action>,
}

impl Dispatch {
    fn ignored() -> Self {
        Self {
            command: None,
            status: Status::Ignored,
            actions: Vec::new(),
        }
    }

    /// Texts of every `Send` action, in order.
    pub fn sent(&self) -> Vec<&str> {
        self.actions
            .iter()
            .filter_map(|action| match action {
                Action::Send { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn is_shutdown(&self) -> bool {
        self.actions.contains(&Action::Shutdown)
    }
}

/// Routes messages to commands of the loaded extensions
pub struct CommandRouter {
    state: BotState,
    extensions: ExtensionHost,
    checks: CheckChain,
}

impl CommandRouter {
    pub fn new(state: BotState, extensions: ExtensionHost) -> Self {
        Self {
            state,
            extensions,
            checks: CheckChain::standard(),
        }
    }

    /// Append a check after the standard ones
    pub fn with_check<C: Check + 'static>(mut self, check: C) -> Self {
        self.checks = self.checks.add(check);
        self
    }

    pub fn state(&self) -> &BotState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut BotState {
        &mut self.state
    }

    pub fn extensions(&self) -> &ExtensionHost {
        &self.extensions
    }

    pub fn extensions_mut(&mut self) -> &mut ExtensionHost {
        &mut self.extensions
    }

    pub fn prefix_for(&self, guild_id: Option<u64>) -> &str {
        self.state.prefix_for(guild_id)
    }

    pub fn load_extension(&mut self, name: &str) -> Result<(), ExtensionError> {
        self.extensions.load(name)
    }

    pub fn unload_extension(&mut self, name: &str) -> Result<(), ExtensionError> {
        self.extensions.unload(name)
    }

    pub fn reload_extension(&mut self, name: &str) -> Result<(), ExtensionError> {
        self.extensions.reload(name)
    }

    /// Route one message.
    pub fn dispatch(&mut self, message: &Message) -> Dispatch {
        if message.author.is_bot {
            return Dispatch::ignored();
        }

        let prefix = self.state.prefix_for(message.guild_id);
        let Some(invocation) = MessageParser::parse(&message.content, prefix) else {
            return Dispatch::ignored();
        };
        let name = invocation.name;

        let Some(command) = self.extensions.find_command(&name).cloned() else {
            tracing::debug!("[{}] Unknown command '{}' from {}", message.channel_id, name, message.author);
            return Dispatch {
                command: None,
                status: Status::UnknownCommand(name.clone()),
                actions: vec![send(message, format!("`Command \"{}\" is not found`", name))],
            };
        };

        let check_ctx = CheckContext {
            message,
            command: &command,
            gate: self.state.gate(),
        };
        if let Err(denial) = self.checks.run(&check_ctx) {
            tracing::info!(
                "[{}] Denied '{}' to {} ({})",
                message.channel_id, command.name, message.author, denial
            );
            return Dispatch {
                command: Some(command.name),
                status: Status::Denied(denial),
                actions: Vec::new(),
            };
        }

        let mut actions = Vec::new();
        if command.delete_invocation {
            actions.push(Action::Delete {
                channel_id: message.channel_id.clone(),
                message_id: message.id.clone(),
            });
        }

        let Some(handler) = command.handler.clone() else {
            tracing::warn!("Command {} has no handler", command.name);
            actions.push(send(message, format!("Command {} not implemented", command.name)));
            return Dispatch {
                command: Some(command.name),
                status: Status::Executed,
                actions,
            };
        };

        tracing::debug!("[{}] {} invoked '{}'", message.channel_id, message.author, command.name);
        let result = {
            let mut ctx = CommandContext {
                message,
                args: &invocation.args,
                state: &mut self.state,
                extensions: &mut self.extensions,
            };
            handler(&mut ctx)
        };

        let status = match result {
            Ok(reply) => {
                actions.extend(self.render(message, reply));
                Status::Executed
            }
            Err(CommandError::Usage(usage)) => {
                actions.push(send(message, format!("Usage: {}", usage)));
                Status::Failed
            }
            Err(e) => {
                tracing::error!(
                    command = %command.name,
                    author = message.author.id,
                    guild = ?message.guild_id,
                    channel = %message.channel_id,
                    "Unhandled exception: {}",
                    error_chain(&e)
                );
                actions.push(send(message, GENERIC_FAILURE));
                Status::Failed
            }
        };

        Dispatch {
            command: Some(command.name),
            status,
            actions,
        }
    }

    fn render(&self, message: &Message, reply: Reply) -> Vec<Action> {
        match reply {
            Reply::Text(text) => vec![send(message, text)],
            Reply::Silent => Vec::new(),
            Reply::Shutdown => vec![Action::Shutdown],
            Reply::Report { text, .. } if self.state.restricted_mode() => {
                vec![send(message, format!("```{}```", text))]
            }
            Reply::Report { text, level } => {
                match level {
                    ReportLevel::Print => println!("{}", text),
                    ReportLevel::Info => tracing::info!("{}", text),
                    ReportLevel::Warn => tracing::warn!("{}", text),
                }
                Vec::new()
            }
        }
    }
}

fn send(message: &Message, text: impl Into<String>) -> Action {
    Action::Send {
        channel_id: message.channel_id.clone(),
        text: text.into(),
    }
}

/// `error: cause: cause ...`
fn error_chain(error: &CommandError) -> String {
    let mut out = format!("{:?}", error);
    let mut source = error.source();
    while let Some(cause) = source {
        out.push_str(&format!("\n  caused by: {}", cause));
        source = cause.source();
    }
    out
}
