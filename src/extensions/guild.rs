//! `guild` extension - per-guild settings

use tracing::info;

use super::trait_def::Extension;
use crate::application::errors::CommandError;
use crate::application::messaging::CommandContext;
use crate::domain::entities::{Command, Reply};

/// Name the extension is registered under
pub const NAME: &str = "guild";

/// Longest prefix a guild may set, in characters
pub const MAX_PREFIX_LEN: usize = 5;

const PREFIX_USAGE: &str = "prefix [new prefix, 1 to 5 characters]";

pub struct GuildExtension;

impl Extension for GuildExtension {
    fn description(&self) -> &str {
        "Guild settings"
    }

    fn commands(&self) -> Vec<Command> {
        vec![Command::new("prefix")
            .with_description("Show or change this guild's command prefix")
            .with_usage("prefix [new]")
            .with_handler(prefix)]
    }
}

fn prefix(ctx: &mut CommandContext<'_>) -> Result<Reply, CommandError> {
    let Some(new_prefix) = ctx.rest() else {
        let current = ctx.state.prefix_for(ctx.message.guild_id);
        return Ok(Reply::text(format!("Prefix is `{}`", current)));
    };

    if !ctx.is_authorized() {
        return Ok(Reply::text("Only admins can change the prefix."));
    }
    let Some(guild_id) = ctx.message.guild_id else {
        return Ok(Reply::text("The prefix can only be changed in a guild."));
    };
    if new_prefix.chars().count() > MAX_PREFIX_LEN || new_prefix.contains(char::is_whitespace) {
        return Err(CommandError::Usage(PREFIX_USAGE.to_string()));
    }

    ctx.state.set_guild_prefix(guild_id, new_prefix)?;
    info!("{} set prefix of guild {} to {}", ctx.author(), guild_id, new_prefix);
    Ok(Reply::text(format!("Prefix set to `{}`", new_prefix)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::permissions::OWNER_ID;
    use crate::application::state::BotState;
    use crate::domain::entities::{Message, User};
    use crate::extensions::ExtensionHost;
    use crate::infrastructure::lang::Translator;
    use crate::infrastructure::storage::JsonStore;
    use serde_json::json;
    use tempfile::TempDir;

    fn state(dir: &TempDir) -> BotState {
        BotState::new(
            JsonStore::new(dir.path().join("config.json")),
            JsonStore::new(dir.path().join("data.json")),
            Translator::from_pairs("en_US", Default::default()),
        )
    }

    fn run(state: &mut BotState, message: &Message, args: &str) -> Result<Reply, CommandError> {
        let mut host = ExtensionHost::new();
        let mut ctx = CommandContext {
            message,
            args,
            state,
            extensions: &mut host,
        };
        prefix(&mut ctx)
    }

    #[test]
    fn test_show_prefix() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state(&dir);
        let message = Message::new("c", User::new(7), ".prefix").in_guild(1);

        assert_eq!(run(&mut state, &message, "").unwrap(), Reply::text("Prefix is `.`"));
    }

    #[test]
    fn test_owner_sets_prefix_and_saves() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state(&dir);
        let message = Message::new("c", User::new(OWNER_ID), ".prefix !").in_guild(1);

        assert_eq!(run(&mut state, &message, "!").unwrap(), Reply::text("Prefix set to `!`"));
        assert_eq!(state.prefix_for(Some(1)), "!");

        let saved = JsonStore::open(dir.path().join("data.json")).unwrap();
        assert_eq!(saved.get("1"), Some(&json!({ "prefix": "!" })));
    }

    #[test]
    fn test_non_admin_cannot_set_prefix() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state(&dir);
        let message = Message::new("c", User::new(7), ".prefix !").in_guild(1);

        assert_eq!(
            run(&mut state, &message, "!").unwrap(),
            Reply::text("Only admins can change the prefix.")
        );
        assert_eq!(state.prefix_for(Some(1)), ".");
    }

    #[test]
    fn test_prefix_needs_guild() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state(&dir);
        let message = Message::new("dm", User::new(OWNER_ID), ".prefix !");

        assert_eq!(
            run(&mut state, &message, "!").unwrap(),
            Reply::text("The prefix can only be changed in a guild.")
        );
    }

    #[test]
    fn test_prefix_length_and_whitespace_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state(&dir);
        let message = Message::new("c", User::new(OWNER_ID), ".prefix").in_guild(1);

        assert!(matches!(run(&mut state, &message, "toolong"), Err(CommandError::Usage(_))));
        assert!(matches!(run(&mut state, &message, "a b"), Err(CommandError::Usage(_))));
        assert_eq!(state.prefix_for(Some(1)), ".");
    }
}
