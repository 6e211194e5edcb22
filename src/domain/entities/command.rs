use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::application::errors::CommandError;
use crate::application::messaging::CommandContext;

/// What a handler wants done once it returns
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Send to the invoking channel
    Text(String),
    /// Admin-facing output. Sent to the channel in restricted mode, written
    /// to the local console or log otherwise.
    Report { text: String, level: ReportLevel },
    /// Nothing to say
    Silent,
    /// Stop the bot
    Shutdown,
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Reply::Text(text.into())
    }

    pub fn print(text: impl Into<String>) -> Self {
        Reply::Report { text: text.into(), level: ReportLevel::Print }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Reply::Report { text: text.into(), level: ReportLevel::Info }
    }

    pub fn warn(text: impl Into<String>) -> Self {
        Reply::Report { text: text.into(), level: ReportLevel::Warn }
    }
}

/// Where a [`Reply::Report`] goes outside restricted mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportLevel {
    /// stdout
    Print,
    Info,
    Warn,
}

/// Command handler function type
pub type CommandHandler = Arc<dyn Fn(&mut CommandContext<'_>) -> Result<Reply, CommandError> + Send + Sync>;

/// Represents a bot command
#[derive(Clone)]
pub struct Command {
    pub name: String,
    pub description: Option<String>,
    pub aliases: Vec<String>,
    pub usage: Option<String>,
    pub handler: Option<CommandHandler>,
    /// Requires the invoker to be the owner or a listed admin
    pub admin_only: bool,
    /// Left out of `help`
    pub hidden: bool,
    /// Delete the invoking message before running
    pub delete_invocation: bool,
}

impl Command {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            aliases: Vec::new(),
            usage: None,
            handler: None,
            admin_only: false,
            hidden: false,
            delete_invocation: false,
        }
    }

    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    pub fn with_aliases(mut self, aliases: Vec<String>) -> Self {
        self.aliases = aliases;
        self
    }

    pub fn with_usage(mut self, usage: impl Into<String>) -> Self {
        self.usage = Some(usage.into());
        self
    }

    pub fn admin_only(mut self) -> Self {
        self.admin_only = true;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    pub fn delete_invocation(mut self) -> Self {
        self.delete_invocation = true;
        self
    }

    pub fn with_handler<F>(mut self, handler: F) -> Self
    where
        F: Fn(&mut CommandContext<'_>) -> Result<Reply, CommandError> + Send + Sync + 'static,
    {
        self.handler = Some(Arc::new(handler));
        self
    }

    /// Exact, case-sensitive match on name or alias
    pub fn matches(&self, input: &str) -> bool {
        self.name == input || self.aliases.iter().any(|a| a == input)
    }

    /// Name and aliases
    pub fn invokers(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str()).chain(self.aliases.iter().map(String::as_str))
    }

    /// Usage line, falling back to the bare name
    pub fn usage_line(&self) -> String {
        self.usage.clone().unwrap_or_else(|| self.name.clone())
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("aliases", &self.aliases)
            .field("admin_only", &self.admin_only)
            .field("hidden", &self.hidden)
            .finish()
    }
}

/// Command registry for managing available commands
#[derive(Default, Clone, Debug)]
pub struct CommandRegistry {
    commands: BTreeMap<String, Command>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, command: Command) {
        self.commands.insert(command.name.clone(), command);
    }

    pub fn find(&self, input: &str) -> Option<&Command> {
        self.commands
            .get(input)
            .or_else(|| self.commands.values().find(|c| c.matches(input)))
    }

    /// First name or alias of `command` already taken here
    pub fn conflict_with(&self, command: &Command) -> Option<String> {
        command
            .invokers()
            .find(|invoker| self.find(invoker).is_some())
            .map(str::to_string)
    }

    pub fn all(&self) -> impl Iterator<Item = &Command> {
        self.commands.values()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
