//! Launcher configuration
//!
//! Where the bot keeps its files and who the console speaks as. The runtime
//! bot settings (`indev`, `admin_ids`, ...) live in the JSON config store,
//! not here.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use crate::application::errors::ConfigError;
use crate::application::permissions::OWNER_ID;

/// Launcher configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Config {
    pub bot: BotConfig,
    pub storage: StorageConfig,
    pub lang: LangConfig,
    pub logging: LoggingConfig,
    pub extensions: ExtensionsConfig,
    pub console: ConsoleConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct BotConfig {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct StorageConfig {
    pub config_file: PathBuf,
    pub data_file: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct LangConfig {
    pub directory: PathBuf,
    /// `None` follows the host's language
    pub language: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct LoggingConfig {
    pub directory: PathBuf,
}

/// Extensions loaded at startup, in order
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct ExtensionsConfig {
    pub initial: Vec<String>,
}

/// Identity used for messages typed into the console adapter
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct ConsoleConfig {
    pub author_id: u64,
    pub author_name: String,
    pub guild_id: Option<u64>,
    pub channel_id: String,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            name: "rilow-bot".to_string(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            config_file: PathBuf::from("config.json"),
            data_file: PathBuf::from("data.json"),
        }
    }
}

impl Default for LangConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("lang"),
            language: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("logs"),
        }
    }
}

impl Default for ExtensionsConfig {
    fn default() -> Self {
        Self {
            initial: vec!["system".to_string(), "guild".to_string()],
        }
    }
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            author_id: OWNER_ID,
            author_name: "console".to_string(),
            guild_id: None,
            channel_id: "console".to_string(),
        }
    }
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Parse(format!("Failed to read config {}: {}", path.display(), e)))?;

        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(content)
            .map_err(|e| ConfigError::Parse(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load `path` if it exists, otherwise start from defaults; then apply
    /// environment overrides.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let config = if path.exists() {
            Self::load(path)?
        } else {
            tracing::debug!("No launcher config at {}, using defaults", path.display());
            Self::default()
        };
        Ok(config.with_env())
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let content = serde_yaml::to_string(self)
            .map_err(|e| ConfigError::Parse(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path.as_ref(), content)
            .map_err(|e| ConfigError::InvalidValue(format!("Failed to write config: {}", e)))
    }

    fn with_env(mut self) -> Self {
        if let Ok(language) = std::env::var("RILOW_LANG") {
            self.lang.language = Some(language);
        }
        if let Ok(path) = std::env::var("RILOW_LANG_DIR") {
            self.lang.directory = PathBuf::from(path);
        }
        if let Ok(path) = std::env::var("RILOW_CONFIG_FILE") {
            self.storage.config_file = PathBuf::from(path);
        }
        if let Ok(path) = std::env::var("RILOW_DATA_FILE") {
            self.storage.data_file = PathBuf::from(path);
        }
        if let Ok(path) = std::env::var("RILOW_LOG_DIR") {
            self.logging.directory = PathBuf::from(path);
        }
        self
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.storage.config_file == self.storage.data_file {
            return Err(ConfigError::InvalidValue(
                "storage.config-file and storage.data-file must differ".to_string(),
            ));
        }
        if self.console.channel_id.is_empty() {
            return Err(ConfigError::InvalidValue("console.channel-id must not be empty".to_string()));
        }
        Ok(())
    }
}
