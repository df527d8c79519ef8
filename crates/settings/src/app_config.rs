//! Configuration document

use crate::SettingsError;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, error};

/// Prefix for `TAXI__SECTION__KEY` environment overrides
const ENV_PREFIX: &str = "TAXI";

/// Full application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub data_ingestion: DataIngestionConfig,
    pub data_processing: DataProcessingConfig,
    #[serde(default)]
    pub web: WebConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where ingested artifacts live
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataIngestionConfig {
    /// Root of the artifact tree (`raw/` and `processed/` live below it)
    pub artifact_dir: PathBuf,
}

/// Feature engineering parameters
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DataProcessingConfig {
    /// Offset in hours added to every raw `time` before decomposition
    pub shift: i64,
}

/// Prediction server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WebConfig {
    pub host: String,
    pub port: u16,
    /// Directory holding the trained model artifact
    pub model_output_dir: PathBuf,
    /// File name of the model artifact inside `model_output_dir`
    pub model_name: String,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            model_output_dir: PathBuf::from("artifacts/models"),
            model_name: "model.json".to_string(),
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// One of trace, debug, info, warn, error
    pub level: String,
    /// Emit JSON lines instead of human readable output
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl AppConfig {
    /// Directory with the raw train/validation/test splits
    pub fn raw_dir(&self) -> PathBuf {
        self.data_ingestion.artifact_dir.join("raw")
    }

    /// Directory the processed splits are written to
    pub fn processed_dir(&self) -> PathBuf {
        self.data_ingestion.artifact_dir.join("processed")
    }

    /// Full path of the model artifact
    pub fn model_path(&self) -> PathBuf {
        self.web.model_output_dir.join(&self.web.model_name)
    }

    /// Address the prediction server binds to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.web.host, self.web.port)
    }

    fn validate(&self) -> Result<(), SettingsError> {
        if self.data_ingestion.artifact_dir.as_os_str().is_empty() {
            return Err(SettingsError::Invalid(
                "data_ingestion.artifact_dir must not be empty".to_string(),
            ));
        }
        if self.web.model_name.trim().is_empty() {
            return Err(SettingsError::Invalid(
                "web.model_name must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Read the configuration file, applying overrides from the process environment
pub fn read_config(path: impl AsRef<Path>) -> Result<AppConfig, SettingsError> {
    read_config_with_env(path, std::env::vars().collect())
}

/// Read the configuration file with an explicit set of environment variables.
///
/// `WEB_HOST` and `WEB_PORT` override the server address; any
/// `TAXI__<SECTION>__<KEY>` variable overrides the matching key.
pub fn read_config_with_env(
    path: impl AsRef<Path>,
    env: HashMap<String, String>,
) -> Result<AppConfig, SettingsError> {
    let path = path.as_ref();
    if !path.exists() {
        error!("Config file not found at {}", path.display());
        return Err(SettingsError::NotFound(path.to_path_buf()));
    }

    let web_host = env.get("WEB_HOST").cloned();
    let web_port = env.get("WEB_PORT").cloned();

    let built = Config::builder()
        .add_source(File::from(path).format(FileFormat::Yaml).required(true))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .source(Some(env)),
        )
        .set_override_option("web.host", web_host)?
        .set_override_option("web.port", web_port)?
        .build()
        .map_err(|e| {
            error!("Error parsing YAML file {}: {}", path.display(), e);
            SettingsError::from(e)
        })?;

    let config: AppConfig = built.try_deserialize()?;
    config.validate()?;

    debug!("Loaded configuration from {}: {:?}", path.display(), config);
    Ok(config)
}
