//! Extension host - registry of known extensions and the loaded ones

use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::info;

use super::trait_def::{Extension, ExtensionFactory};
use crate::application::errors::ExtensionError;
use crate::domain::entities::{Command, CommandRegistry};

struct LoadedExtension {
    instance: Box<dyn Extension>,
    commands: CommandRegistry,
}

/// Known extensions, keyed by name, and the subset currently loaded
///
/// Core commands are always present and cannot be shadowed by an extension.
#[derive(Default)]
pub struct ExtensionHost {
    factories: BTreeMap<String, ExtensionFactory>,
    loaded: BTreeMap<String, LoadedExtension>,
    core: CommandRegistry,
}

impl ExtensionHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make an extension loadable under `name`. Replaces any previous
    /// factory; an already loaded instance keeps running until reloaded.
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn() -> Box<dyn Extension> + Send + Sync + 'static,
    {
        self.factories.insert(name.into(), Arc::new(factory));
    }

    /// Add a command that does not belong to any extension
    pub fn register_core(&mut self, command: Command) {
        self.core.register(command);
    }

    pub fn load(&mut self, name: &str) -> Result<(), ExtensionError> {
        if self.loaded.contains_key(name) {
            return Err(ExtensionError::AlreadyLoaded(name.to_string()));
        }
        let factory = self
            .factories
            .get(name)
            .ok_or_else(|| ExtensionError::NotFound(name.to_string()))?;

        let instance = factory();
        let mut commands = CommandRegistry::new();
        for command in instance.commands() {
            let taken = self
                .conflict_with(&command)
                .or_else(|| commands.conflict_with(&command));
            if let Some(command) = taken {
                return Err(ExtensionError::CommandConflict {
                    extension: name.to_string(),
                    command,
                });
            }
            commands.register(command);
        }

        info!("Loaded extension {} ({} commands)", name, commands.len());
        self.loaded
            .insert(name.to_string(), LoadedExtension { instance, commands });
        Ok(())
    }

    pub fn unload(&mut self, name: &str) -> Result<(), ExtensionError> {
        let extension = self
            .loaded
            .remove(name)
            .ok_or_else(|| ExtensionError::NotLoaded(name.to_string()))?;

        extension.instance.teardown();
        info!("Unloaded extension {}", name);
        Ok(())
    }

    /// Unload then load. The extension must be loaded already.
    pub fn reload(&mut self, name: &str) -> Result<(), ExtensionError> {
        if !self.loaded.contains_key(name) {
            return Err(ExtensionError::NotLoaded(name.to_string()));
        }
        self.unload(name)?;
        self.load(name)
    }

    pub fn is_loaded(&self, name: &str) -> bool {
        self.loaded.contains_key(name)
    }

    pub fn loaded_names(&self) -> Vec<String> {
        self.loaded.keys().cloned().collect()
    }

    pub fn available_names(&self) -> Vec<String> {
        self.factories.keys().cloned().collect()
    }

    /// Description of a loaded extension
    pub fn description(&self, name: &str) -> Option<&str> {
        self.loaded.get(name).map(|ext| ext.instance.description())
    }

    /// Core commands first, then loaded extensions in name order.
    pub fn find_command(&self, input: &str) -> Option<&Command> {
        self.core
            .find(input)
            .or_else(|| self.loaded.values().find_map(|ext| ext.commands.find(input)))
    }

    /// Every reachable command
    pub fn commands(&self) -> impl Iterator<Item = &Command> {
        self.core
            .all()
            .chain(self.loaded.values().flat_map(|ext| ext.commands.all()))
    }

    fn conflict_with(&self, command: &Command) -> Option<String> {
        self.core.conflict_with(command).or_else(|| {
            self.loaded
                .values()
                .find_map(|ext| ext.commands.conflict_with(command))
        })
    }
}
