use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

use littlewins_domain::feedback::MessagePool;
use littlewins_domain::shared::DomainError;

/// How long a feedback message stays on screen
pub const DEFAULT_MESSAGE_VISIBLE_MS: u64 = 4000;

const APP_DIR: &str = "littlewins";
const CONFIG_FILE: &str = "app_config.json";
const DB_FILE: &str = "littlewins.db";

/// Log level configuration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

/// Where the effective configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// No file yet
    Defaults,
    File,
    /// The file could not be parsed; defaults are used instead
    Malformed(String),
}

#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: AppConfig,
    pub source: ConfigSource,
}

impl LoadedConfig {
    pub fn log(&self, path: &Path) {
        match &self.source {
            ConfigSource::Defaults => info!("📁 No config at {:?}, using defaults", path),
            ConfigSource::File => info!("📁 Config loaded from: {:?}", path),
            ConfigSource::Malformed(reason) => {
                warn!("Ignoring malformed config {:?}: {}", path, reason)
            }
        }
    }
}

/// Persistent configuration, stored as JSON
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub log_level: LogLevel,
    /// SQLite file; defaults to the platform data directory
    pub database_path: Option<PathBuf>,
    /// Signed-in user; `None` runs an anonymous session
    pub user_id: Option<String>,
    pub message_visible_ms: u64,
    /// Replaces the built-in feedback messages when set
    pub messages: Option<Vec<String>>,
    /// Fixed seed for reproducible message picks
    pub message_seed: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Info,
            database_path: None,
            user_id: None,
            message_visible_ms: DEFAULT_MESSAGE_VISIBLE_MS,
            messages: None,
            message_seed: None,
        }
    }
}

impl AppConfig {
    /// `<config dir>/littlewins/app_config.json`
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
            .join(CONFIG_FILE)
    }

    pub fn data_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
    }

    pub fn log_dir() -> PathBuf {
        Self::data_dir().join("logs")
    }

    /// Load from `path`. A missing file yields defaults; so does a
    /// malformed one, reported through [`ConfigSource::Malformed`].
    ///
    /// Nothing is logged here since this runs before the logger exists;
    /// call [`LoadedConfig::log`] once it does.
    pub fn load(path: &Path) -> Result<LoadedConfig> {
        if !path.exists() {
            return Ok(LoadedConfig {
                config: Self::default(),
                source: ConfigSource::Defaults,
            });
        }

        let content = std::fs::read_to_string(path)?;
        let loaded = match serde_json::from_str::<AppConfig>(&content) {
            Ok(config) => LoadedConfig {
                config,
                source: ConfigSource::File,
            },
            Err(e) => LoadedConfig {
                config: Self::default(),
                source: ConfigSource::Malformed(e.to_string()),
            },
        };
        Ok(loaded)
    }

    pub fn database_path(&self) -> PathBuf {
        self.database_path
            .clone()
            .unwrap_or_else(|| Self::data_dir().join(DB_FILE))
    }

    pub fn message_duration(&self) -> Duration {
        Duration::from_millis(self.message_visible_ms)
    }

    pub fn message_pool(&self) -> Result<MessagePool, DomainError> {
        match &self.messages {
            Some(messages) => MessagePool::new(messages.clone()),
            None => Ok(MessagePool::default()),
        }
    }
}
