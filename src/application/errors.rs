//! Application layer errors

use std::path::PathBuf;
use thiserror::Error;

/// General bot errors
#[derive(Error, Debug)]
pub enum BotError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Language error: {0}")]
    Lang(#[from] LangError),

    #[error("Command error: {0}")]
    Command(#[from] CommandError),

    #[error("Extension error: {0}")]
    Extension(#[from] ExtensionError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Command execution errors
#[derive(Error, Debug)]
pub enum CommandError {
    /// Bad or missing arguments; the text is shown to the user as-is.
    #[error("Usage: {0}")]
    Usage(String),

    #[error("Execution failed: {0}")]
    ExecutionFailed(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Extension error: {0}")]
    Extension(#[from] ExtensionError),

    #[error("Language error: {0}")]
    Lang(#[from] LangError),
}

/// Key-value store errors
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{} does not contain a JSON object", .path.display())]
    NotAnObject { path: PathBuf },

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Missing key: {0}")]
    MissingKey(String),
}

/// Language file errors
#[derive(Error, Debug)]
pub enum LangError {
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Extension lifecycle errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtensionError {
    #[error("Extension {0} already loaded")]
    AlreadyLoaded(String),

    #[error("Extension {0} is not loaded")]
    NotLoaded(String),

    #[error("Extension {0} not found")]
    NotFound(String),

    #[error("Extension {extension} defines command {command} which is already registered")]
    CommandConflict { extension: String, command: String },
}

/// Launcher configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Parse error: {0}")]
    Parse(String),
}
