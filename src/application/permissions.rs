//! Who may run what

use serde_json::Value;
use crate::infrastructure::storage::JsonStore;

/// Always privileged, whatever the admin list says.
pub const OWNER_ID: u64 = 254077906152718340;

/// Config key of the restricted-mode flag
pub const RESTRICTED_MODE_KEY: &str = "indev";

/// Config key of the admin allow-list
pub const ADMIN_IDS_KEY: &str = "admin_ids";

/// Permission checks against a borrowed config store
#[derive(Debug, Clone, Copy)]
pub struct PermissionGate<'a> {
    owner_id: u64,
    config: &'a JsonStore,
}

impl<'a> PermissionGate<'a> {
    pub fn new(owner_id: u64, config: &'a JsonStore) -> Self {
        Self { owner_id, config }
    }

    /// Owner or listed in `admin_ids`.
    pub fn is_authorized(&self, actor_id: u64) -> bool {
        actor_id == self.owner_id || self.admin_ids().any(|id| id == actor_id)
    }

    /// Runs before every command: in restricted mode only authorized actors
    /// get through.
    pub fn global_check(&self, actor_id: u64) -> bool {
        !self.restricted_mode() || self.is_authorized(actor_id)
    }

    pub fn restricted_mode(&self) -> bool {
        restricted_mode(self.config)
    }

    /// Integer entries of `admin_ids`; anything else in the list is skipped.
    pub fn admin_ids(&self) -> impl Iterator<Item = u64> + 'a {
        let config: &'a JsonStore = self.config;
        config
            .get(ADMIN_IDS_KEY)
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .filter_map(Value::as_u64)
    }
}

/// Absent or non-boolean flag reads as off.
pub fn restricted_mode(config: &JsonStore) -> bool {
    config
        .get(RESTRICTED_MODE_KEY)
        .and_then(Value::as_bool)
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn config(entries: Value) -> JsonStore {
        let Value::Object(map) = entries else {
            panic!("test config must be an object");
        };
        JsonStore::with_entries("config.json", map)
    }

    #[test]
    fn test_owner_always_authorized() {
        let store = config(json!({}));
        let gate = PermissionGate::new(OWNER_ID, &store);

        assert!(gate.is_authorized(OWNER_ID));
        assert!(!gate.is_authorized(1));
    }

    #[test]
    fn test_admin_list_membership() {
        let store = config(json!({ "admin_ids": [10, "20", 30] }));
        let gate = PermissionGate::new(OWNER_ID, &store);

        assert!(gate.is_authorized(10));
        assert!(gate.is_authorized(30));
        assert!(!gate.is_authorized(20));
        assert_eq!(gate.admin_ids().collect::<Vec<_>>(), vec![10, 30]);
    }

    #[test]
    fn test_global_check_open_when_not_restricted() {
        let store = config(json!({ "indev": false }));
        let gate = PermissionGate::new(OWNER_ID, &store);

        assert!(gate.global_check(1));
        assert!(gate.global_check(987654321));
    }

    #[test]
    fn test_global_check_missing_flag_is_open() {
        let store = config(json!({}));
        let gate = PermissionGate::new(OWNER_ID, &store);

        assert!(!gate.restricted_mode());
        assert!(gate.global_check(5));
    }

    #[test]
    fn test_global_check_restricted() {
        let store = config(json!({ "indev": true, "admin_ids": [10] }));
        let gate = PermissionGate::new(OWNER_ID, &store);

        assert!(gate.global_check(OWNER_ID));
        assert!(gate.global_check(10));
        assert!(!gate.global_check(11));
    }

    #[test]
    fn test_injected_owner() {
        let store = config(json!({ "indev": true }));
        let gate = PermissionGate::new(77, &store);

        assert!(gate.global_check(77));
        assert!(!gate.global_check(OWNER_ID));
    }
}
