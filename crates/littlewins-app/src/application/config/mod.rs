mod app_config;

pub use app_config::{AppConfig, ConfigSource, LoadedConfig, LogLevel, DEFAULT_MESSAGE_VISIBLE_MS};
