//! Tracing subscriber setup

use crate::{LoggingConfig, SettingsError};
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

/// Install the global tracing subscriber.
///
/// Calling this twice is harmless: the second subscriber is dropped and the
/// first one stays active.
pub fn init_logging(config: &LoggingConfig) -> Result<(), SettingsError> {
    let level: Level = config
        .level
        .parse()
        .map_err(|_| SettingsError::Invalid(format!("unknown log level '{}'", config.level)))?;

    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true);

    let installed = if config.json {
        tracing::subscriber::set_global_default(builder.json().finish())
    } else {
        tracing::subscriber::set_global_default(builder.finish())
    };

    if installed.is_err() {
        debug!("Tracing subscriber already installed");
    }
    Ok(())
}
