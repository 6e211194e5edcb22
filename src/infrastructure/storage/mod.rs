//! File-backed JSON key-value store
//!
//! Backs both `config.json` and `data.json`. The in-memory map is the source
//! of truth; the file is only touched by [`JsonStore::load`] and
//! [`JsonStore::save`].

use serde::Serialize;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

use crate::application::errors::StorageError;

/// JSON object persisted to a single file
#[derive(Debug, Clone)]
pub struct JsonStore {
    path: PathBuf,
    entries: Map<String, Value>,
}

impl JsonStore {
    /// Empty store bound to `path`, nothing read from disk.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            entries: Map::new(),
        }
    }

    /// Store bound to `path` holding `entries`, nothing read from disk.
    pub fn with_entries(path: impl Into<PathBuf>, entries: Map<String, Value>) -> Self {
        Self {
            path: path.into(),
            entries,
        }
    }

    /// Create the store and load it from disk.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let mut store = Self::new(path);
        store.load()?;
        Ok(store)
    }

    /// Re-read the backing file.
    ///
    /// A missing file only logs a warning. On any error the current entries
    /// are kept.
    pub fn load(&mut self) -> Result<(), StorageError> {
        if !self.path.exists() {
            tracing::warn!("File '{}' does not exist", self.path.display());
            return Ok(());
        }

        let content = std::fs::read_to_string(&self.path)?;
        let value: Value = serde_json::from_str(&content).map_err(|source| StorageError::Parse {
            path: self.path.clone(),
            source,
        })?;

        match value {
            Value::Object(entries) => {
                tracing::debug!("Loaded {} keys from {}", entries.len(), self.path.display());
                self.entries = entries;
                Ok(())
            }
            _ => Err(StorageError::NotAnObject {
                path: self.path.clone(),
            }),
        }
    }

    /// Write every entry to the backing file, keys sorted, four-space indent.
    pub fn save(&self) -> Result<(), StorageError> {
        let content = self.to_pretty_json()?;
        std::fs::write(&self.path, content)?;
        tracing::debug!("Saved {} keys to {}", self.entries.len(), self.path.display());
        Ok(())
    }

    /// Sorted, four-space indented rendering of the whole store.
    pub fn to_pretty_json(&self) -> Result<String, StorageError> {
        // serde_json's Map is ordered by key unless `preserve_order` is on
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut buf = Vec::new();
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.entries.serialize(&mut ser)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Value for `key`, or `default` when absent.
    pub fn get_or(&self, key: &str, default: Value) -> Value {
        self.entries.get(key).cloned().unwrap_or(default)
    }

    /// Value for `key`, or [`StorageError::MissingKey`].
    pub fn require(&self, key: &str) -> Result<&Value, StorageError> {
        self.entries
            .get(key)
            .ok_or_else(|| StorageError::MissingKey(key.to_string()))
    }

    /// Insert or replace, returning the previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.entries.insert(key.into(), value.into())
    }

    /// Remove `key`, or [`StorageError::MissingKey`] if it was never there.
    pub fn delete(&mut self, key: &str) -> Result<Value, StorageError> {
        self.entries
            .remove(key)
            .ok_or_else(|| StorageError::MissingKey(key.to_string()))
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn entries(&self) -> &Map<String, Value> {
        &self.entries
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_key_defaults_and_errors() {
        let store = JsonStore::new("unused.json");

        assert_eq!(store.get_or("nope", json!(42)), json!(42));
        assert!(store.get("nope").is_none());
        assert!(matches!(store.require("nope"), Err(StorageError::MissingKey(k)) if k == "nope"));
    }

    #[test]
    fn test_delete_missing_key_errors() {
        let mut store = JsonStore::new("unused.json");
        store.set("present", true);

        assert_eq!(store.delete("present").unwrap(), json!(true));
        assert!(matches!(store.delete("present"), Err(StorageError::MissingKey(_))));
    }

    #[test]
    fn test_open_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::open(dir.path().join("config.json")).unwrap();

        assert!(store.is_empty());
    }

    #[test]
    fn test_save_then_open_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");

        let mut store = JsonStore::new(&path);
        store.set("zeta", json!({"prefix": "!"}));
        store.set("alpha", json!([1, 2, 3]));
        store.set("indev", false);
        store.save().unwrap();

        let reopened = JsonStore::open(&path).unwrap();
        assert_eq!(reopened.entries(), store.entries());
    }

    #[test]
    fn test_save_sorts_keys_with_four_space_indent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut store = JsonStore::new(&path);
        store.set("b", 1);
        store.set("a", 2);
        store.save().unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, "{\n    \"a\": 2,\n    \"b\": 1\n}");
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{\"indev\": tru").unwrap();

        assert!(matches!(JsonStore::open(&path), Err(StorageError::Parse { .. })));
    }

    #[test]
    fn test_non_object_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "[1, 2]").unwrap();

        assert!(matches!(JsonStore::open(&path), Err(StorageError::NotAnObject { .. })));
    }

    #[test]
    fn test_failed_reload_keeps_entries() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"admin_ids": [1]}"#).unwrap();

        let mut store = JsonStore::open(&path).unwrap();
        std::fs::write(&path, "not json").unwrap();

        assert!(store.load().is_err());
        assert_eq!(store.get("admin_ids"), Some(&json!([1])));
    }

    #[test]
    fn test_reload_discards_unsaved_changes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"indev": false}"#).unwrap();

        let mut store = JsonStore::open(&path).unwrap();
        store.set("indev", true);
        store.load().unwrap();

        assert_eq!(store.get("indev"), Some(&json!(false)));
    }
}
