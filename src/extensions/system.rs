//! `system` extension - owner and admin tools
//!
//! Every command here is hidden from `help`. All but `ping` are admin-only
//! and delete the invoking message first.

use serde_json::Value;
use tracing::info;

use super::manager::ExtensionHost;
use super::trait_def::Extension;
use crate::application::errors::{CommandError, ExtensionError};
use crate::application::messaging::CommandContext;
use crate::application::permissions::RESTRICTED_MODE_KEY;
use crate::domain::entities::{Command, Reply};

/// Name the extension is registered under
pub const NAME: &str = "system";

/// Translation key of the `ping` reply
pub const PONG_KEY: &str = "#pong";

pub struct SystemExtension;

impl Extension for SystemExtension {
    fn description(&self) -> &str {
        "Owner and admin tools"
    }

    fn commands(&self) -> Vec<Command> {
        vec![
            Command::new("ping")
                .with_description("Check that the bot is alive")
                .hidden()
                .with_handler(ping),
            admin(Command::new("exit").with_description("Shut the bot down"))
                .with_handler(exit),
            admin(Command::new("indev").with_description("Toggle restricted mode"))
                .with_handler(indev),
            admin(Command::new("config").with_description("Show or reload the config store"))
                .with_usage("config [key|reload]")
                .with_handler(config),
            admin(Command::new("load").with_description("Load an extension"))
                .with_usage("load <extension>")
                .with_handler(|ctx| lifecycle(ctx, "load <extension>", "loaded", ExtensionHost::load)),
            admin(Command::new("unload").with_description("Unload an extension"))
                .with_usage("unload <extension>")
                .with_handler(|ctx| lifecycle(ctx, "unload <extension>", "unloaded", ExtensionHost::unload)),
            admin(Command::new("reload").with_description("Reload an extension"))
                .with_usage("reload <extension>")
                .with_handler(|ctx| lifecycle(ctx, "reload <extension>", "reloaded", ExtensionHost::reload)),
            admin(Command::new("lang").with_description("Show or switch the language"))
                .with_usage("lang [code|auto]")
                .with_handler(lang),
            admin(Command::new("diag").with_description("Inspect bot state"))
                .with_usage("diag [summary|data|extensions]")
                .with_handler(diag),
        ]
    }
}

fn admin(command: Command) -> Command {
    command.admin_only().hidden().delete_invocation()
}

fn ping(ctx: &mut CommandContext<'_>) -> Result<Reply, CommandError> {
    let pong = ctx.state.lang.translate_key(PONG_KEY);
    // Untranslated keys come back as-is
    let text = if pong == PONG_KEY { "Pong!" } else { pong };
    Ok(Reply::text(text))
}

fn exit(ctx: &mut CommandContext<'_>) -> Result<Reply, CommandError> {
    info!("{} requested shutdown", ctx.author());
    Ok(Reply::Shutdown)
}

/// Flip the restricted-mode flag. An absent flag becomes `true`.
fn indev(ctx: &mut CommandContext<'_>) -> Result<Reply, CommandError> {
    let enabled = !ctx.state.restricted_mode();
    ctx.state.config.set(RESTRICTED_MODE_KEY, enabled);
    ctx.state.config.save()?;

    info!("{} toggled indev to {}", ctx.author(), enabled);
    Ok(Reply::Silent)
}

fn config(ctx: &mut CommandContext<'_>) -> Result<Reply, CommandError> {
    match ctx.arg() {
        None => {
            let dump = ctx.state.config.to_pretty_json()?;
            Ok(Reply::print(format!("json\n{}", dump.replace(",\n", ",\n\n"))))
        }
        Some("reload") => {
            ctx.state.config.load()?;
            Ok(Reply::info("Config reloaded."))
        }
        Some(key) => Ok(match ctx.state.config.get(key) {
            Some(Value::String(text)) => Reply::print(text.clone()),
            Some(value) => Reply::print(value.to_string()),
            None => Reply::warn(format!("Config key {} not found.", key)),
        }),
    }
}

fn lifecycle(
    ctx: &mut CommandContext<'_>,
    usage: &str,
    done: &str,
    op: fn(&mut ExtensionHost, &str) -> Result<(), ExtensionError>,
) -> Result<Reply, CommandError> {
    let name = ctx.require_arg(usage)?;

    Ok(match op(ctx.extensions, name) {
        Ok(()) => Reply::info(format!("Extension {} {}.", name, done)),
        Err(e) => Reply::warn(format!("{}.", e)),
    })
}

fn lang(ctx: &mut CommandContext<'_>) -> Result<Reply, CommandError> {
    let code = match ctx.arg() {
        None => {
            let lang = &ctx.state.lang;
            return Ok(Reply::info(format!(
                "Language: {} ({} entries)",
                lang.language(),
                lang.len()
            )));
        }
        Some("auto") => None,
        Some(code) if is_language_code(code) => Some(code),
        Some(code) => return Ok(Reply::warn(format!("Invalid language code {}.", code))),
    };

    Ok(match ctx.state.lang.set_language(code) {
        Ok(()) => {
            let lang = &ctx.state.lang;
            info!("{} switched language to {}", ctx.author(), lang.language());
            Reply::info(format!("Language set to {} ({} entries).", lang.language(), lang.len()))
        }
        Err(e) => Reply::warn(format!("{}.", e)),
    })
}

/// Letters, digits, `_` and `-` only. Keeps the code from naming a path
/// outside the language directory.
fn is_language_code(code: &str) -> bool {
    !code.is_empty()
        && code
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

fn diag(ctx: &mut CommandContext<'_>) -> Result<Reply, CommandError> {
    match ctx.arg().unwrap_or("summary") {
        "summary" => {
            let state = &ctx.state;
            let guilds = state.data.entries().values().filter(|v| v.is_object()).count();
            let summary = format!(
                "Restricted mode: {}\nAdmins: {}\nLanguage: {} ({} entries)\nExtensions: {}\nGuilds with settings: {}",
                if state.restricted_mode() { "on" } else { "off" },
                state.gate().admin_ids().count(),
                state.lang.language(),
                state.lang.len(),
                ctx.extensions.loaded_names().join(", "),
                guilds
            );
            Ok(Reply::print(summary))
        }
        "data" => {
            let dump = ctx.state.data.to_pretty_json()?;
            Ok(Reply::print(format!("json\n{}", dump)))
        }
        "extensions" => {
            let mut text = format!("Available: {}\nLoaded:", ctx.extensions.available_names().join(", "));
            for name in ctx.extensions.loaded_names() {
                let description = ctx.extensions.description(&name).unwrap_or_default();
                text.push_str(&format!("\n  {} - {}", name, description));
            }
            Ok(Reply::print(text))
        }
        _ => Err(CommandError::Usage("diag [summary|data|extensions]".to_string())),
    }
}
