//! Extension trait definitions

use std::sync::Arc;
use crate::domain::entities::Command;

/// A named bundle of commands that can be loaded and unloaded at runtime
pub trait Extension: Send + Sync {
    /// Human-readable description
    fn description(&self) -> &str;

    /// Commands this extension contributes
    fn commands(&self) -> Vec<Command>;

    /// Optional: Release resources when the extension is unloaded
    fn teardown(&self) {}
}

/// Builds a fresh instance of an extension; called on every load
pub type ExtensionFactory = Arc<dyn Fn() -> Box<dyn Extension> + Send + Sync>;
