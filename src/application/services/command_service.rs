//! Built-in commands that live outside any extension

use crate::domain::entities::{Command, Reply};
use crate::extensions::ExtensionHost;

/// Commands registered with the extension host itself
pub fn core_commands() -> Vec<Command> {
    vec![help_command()]
}

/// The `help` command
pub fn help_command() -> Command {
    Command::new("help")
        .with_description("Show available commands")
        .with_usage("help [command]")
        .with_handler(|ctx| {
            let prefix = ctx.state.prefix_for(ctx.message.guild_id).to_string();
            Ok(Reply::text(get_help(ctx.extensions, &prefix, ctx.arg())))
        })
}

/// Listing of visible commands, or the details of one.
pub fn get_help(extensions: &ExtensionHost, prefix: &str, command: Option<&str>) -> String {
    if let Some(name) = command {
        return match extensions.find_command(name) {
            Some(cmd) if !cmd.hidden => {
                let mut help = format!(
                    "{}{} - {}",
                    prefix,
                    cmd.name,
                    cmd.description.as_deref().unwrap_or("No description")
                );
                help.push_str(&format!("\nUsage: {}{}", prefix, cmd.usage_line()));
                if !cmd.aliases.is_empty() {
                    help.push_str(&format!("\nAliases: {}", cmd.aliases.join(", ")));
                }
                help
            }
            _ => format!("`Command \"{}\" is not found`", name),
        };
    }

    let mut visible: Vec<&Command> = extensions.commands().filter(|c| !c.hidden).collect();
    visible.sort_by(|a, b| a.name.cmp(&b.name));

    let mut help = "Available commands:\n".to_string();
    for cmd in visible {
        help.push_str(&format!(
            "  {}{} - {}\n",
            prefix,
            cmd.name,
            cmd.description.as_deref().unwrap_or("")
        ));
    }
    help
}

#[cfg(test)]
mod tests {
    use super::*;

    fn host() -> ExtensionHost {
        let mut host = ExtensionHost::new();
        for command in core_commands() {
            host.register_core(command);
        }
        host.register_core(Command::new("secret").hidden());
        host.register_core(
            Command::new("roll")
                .with_description("Roll a die")
                .with_usage("roll [sides]")
                .with_aliases(vec!["dice".to_string()]),
        );
        host
    }

    #[test]
    fn test_listing_skips_hidden() {
        let help = get_help(&host(), "!", None);

        assert!(help.contains("!help - Show available commands"));
        assert!(help.contains("!roll - Roll a die"));
        assert!(!help.contains("secret"));
    }

    #[test]
    fn test_single_command_details() {
        let help = get_help(&host(), ".", Some("dice"));

        assert_eq!(help, ".roll - Roll a die\nUsage: .roll [sides]\nAliases: dice");
    }

    #[test]
    fn test_hidden_or_unknown_command_not_found() {
        assert_eq!(get_help(&host(), ".", Some("secret")), "`Command \"secret\" is not found`");
        assert_eq!(get_help(&host(), ".", Some("nope")), "`Command \"nope\" is not found`");
    }
}
