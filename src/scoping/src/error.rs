//! Error types for the scoping crate
//!
//! Scoping a dataset never fails. These errors cover configuration and
//! logging setup, and snapshot loading delegated to the core crate.

use thiserror::Error;

/// Scoping crate errors
#[derive(Debug, Error)]
pub enum ScopingError {
    /// Invalid or unreadable configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Snapshot decoding or loading error
    #[error("Core error: {0}")]
    Core(#[from] tenantscope_core::CoreError),

    /// Logging subscriber setup error
    #[error("Logging error: {0}")]
    Logging(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for scoping crate operations
pub type Result<T> = std::result::Result<T, ScopingError>;
