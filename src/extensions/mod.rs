//! Extensions - Bundles of commands that can be loaded at runtime
//!
//! Extensions are registered by name with an [`ExtensionHost`]; loading one
//! builds a fresh instance and makes its commands reachable.

pub mod trait_def;
pub mod manager;
pub mod system;
pub mod guild;

pub use trait_def::{Extension, ExtensionFactory};
pub use manager::ExtensionHost;
pub use system::SystemExtension;
pub use guild::GuildExtension;

use crate::application::services::core_commands;

/// Host knowing every built-in extension, with the core commands
/// registered. Nothing is loaded yet.
pub fn builtin_host() -> ExtensionHost {
    let mut host = ExtensionHost::new();
    for command in core_commands() {
        host.register_core(command);
    }
    host.register(system::NAME, || -> Box<dyn Extension> { Box::new(SystemExtension) });
    host.register(guild::NAME, || -> Box<dyn Extension> { Box::new(GuildExtension) });
    host
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_extensions_load_side_by_side() {
        let mut host = builtin_host();

        assert_eq!(host.available_names(), vec!["guild", "system"]);
        host.load(system::NAME).unwrap();
        host.load(guild::NAME).unwrap();

        for name in ["help", "ping", "exit", "config", "prefix"] {
            assert!(host.find_command(name).is_some(), "{} missing", name);
        }
    }
}
