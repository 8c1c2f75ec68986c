//! Tracing subscriber setup

use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::LoggingSection;
use crate::error::{Result, ScopingError};

/// Install a global fmt subscriber
///
/// `RUST_LOG` takes precedence over the configured level. Fails instead of
/// panicking when a global subscriber is already installed, so embedding
/// applications that set up their own tracing can ignore the error.
pub fn init_tracing(config: &LoggingSection) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| ScopingError::Logging(format!("Invalid log filter: {}", e)))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(config.with_target)
        .with_line_number(true)
        .try_init()
        .map_err(|e| ScopingError::Logging(e.to_string()))?;

    info!(level = %config.level, "Logging initialized");
    Ok(())
}
