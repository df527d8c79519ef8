//! Application Settings
//!
//! Loads the YAML configuration shared by the data processing job and the
//! prediction server, and sets up structured logging.

mod app_config;
mod logging;

pub use app_config::{
    read_config, read_config_with_env, AppConfig, DataIngestionConfig, DataProcessingConfig,
    LoggingConfig, WebConfig,
};
pub use logging::init_logging;

use std::path::PathBuf;
use thiserror::Error;

/// Errors while loading settings
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Config file does not exist
    #[error("Config file not found at {0}")]
    NotFound(PathBuf),

    /// Config file could not be parsed or deserialized
    #[error("Error parsing config: {0}")]
    Parse(String),

    /// Values parsed but are unusable
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl From<::config::ConfigError> for SettingsError {
    fn from(err: ::config::ConfigError) -> Self {
        SettingsError::Parse(err.to_string())
    }
}
