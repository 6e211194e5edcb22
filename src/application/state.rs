//! Shared bot state handed to every command

use serde_json::{Map, Value};

use crate::application::errors::StorageError;
use crate::application::permissions::{self, PermissionGate, OWNER_ID};
use crate::infrastructure::lang::Translator;
use crate::infrastructure::storage::JsonStore;

/// Prefix used wherever no guild override exists
pub const DEFAULT_PREFIX: &str = ".";

/// Field of a guild's settings object holding its prefix
pub const PREFIX_KEY: &str = "prefix";

/// Config store, data store and translator
///
/// Owned by the router and lent to one handler at a time; there is no
/// locking.
#[derive(Debug)]
pub struct BotState {
    pub config: JsonStore,
    pub data: JsonStore,
    pub lang: Translator,
    owner_id: u64,
}

impl BotState {
    pub fn new(config: JsonStore, data: JsonStore, lang: Translator) -> Self {
        Self {
            config,
            data,
            lang,
            owner_id: OWNER_ID,
        }
    }

    /// Replace the hardcoded owner.
    pub fn with_owner(mut self, owner_id: u64) -> Self {
        self.owner_id = owner_id;
        self
    }

    pub fn owner_id(&self) -> u64 {
        self.owner_id
    }

    pub fn gate(&self) -> PermissionGate<'_> {
        PermissionGate::new(self.owner_id, &self.config)
    }

    pub fn restricted_mode(&self) -> bool {
        permissions::restricted_mode(&self.config)
    }

    /// Settings object stored for `guild_id`, if any.
    pub fn guild_settings(&self, guild_id: u64) -> Option<&Map<String, Value>> {
        self.data.get(&guild_id.to_string()).and_then(Value::as_object)
    }

    /// Active prefix for a guild. Never fails: anything missing or unusable
    /// resolves to [`DEFAULT_PREFIX`].
    pub fn prefix_for(&self, guild_id: Option<u64>) -> &str {
        guild_id
            .and_then(|id| self.guild_settings(id))
            .and_then(|settings| settings.get(PREFIX_KEY))
            .and_then(Value::as_str)
            .filter(|prefix| !prefix.is_empty())
            .unwrap_or(DEFAULT_PREFIX)
    }

    /// Store a guild's prefix, keeping its other settings, and save the data
    /// store.
    pub fn set_guild_prefix(&mut self, guild_id: u64, prefix: &str) -> Result<(), StorageError> {
        let key = guild_id.to_string();
        let mut settings = self.guild_settings(guild_id).cloned().unwrap_or_default();
        settings.insert(PREFIX_KEY.to_string(), Value::String(prefix.to_string()));
        self.data.set(key, Value::Object(settings));
        self.data.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn state_with_data(data: Value) -> BotState {
        let Value::Object(map) = data else {
            panic!("test data must be an object");
        };
        BotState::new(
            JsonStore::new("config.json"),
            JsonStore::with_entries("data.json", map),
            Translator::from_pairs("test", Default::default()),
        )
    }

    #[test]
    fn test_default_prefix_without_override() {
        let state = state_with_data(json!({}));

        assert_eq!(state.prefix_for(Some(1)), ".");
        assert_eq!(state.prefix_for(None), ".");
    }

    #[test]
    fn test_guild_prefix_override() {
        let state = state_with_data(json!({ "123": { "prefix": "!" } }));

        assert_eq!(state.prefix_for(Some(123)), "!");
        assert_eq!(state.prefix_for(Some(456)), ".");
    }

    #[test]
    fn test_unusable_prefix_falls_back() {
        let state = state_with_data(json!({
            "1": { "prefix": 5 },
            "2": { "prefix": "" },
            "3": "not an object",
            "4": {}
        }));

        for guild in 1..=4 {
            assert_eq!(state.prefix_for(Some(guild)), ".");
        }
    }

    #[test]
    fn test_set_guild_prefix_keeps_other_settings_and_saves() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        let mut data = Map::new();
        data.insert("9".to_string(), json!({ "prefix": "?", "welcome": "hi" }));

        let mut state = BotState::new(
            JsonStore::new("config.json"),
            JsonStore::with_entries(&path, data),
            Translator::from_pairs("test", Default::default()),
        );
        state.set_guild_prefix(9, "$").unwrap();

        assert_eq!(state.prefix_for(Some(9)), "$");
        let saved = JsonStore::open(&path).unwrap();
        assert_eq!(saved.get("9"), Some(&json!({ "prefix": "$", "welcome": "hi" })));
    }
}
