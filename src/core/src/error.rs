//! Error types for the TenantScope core crate
//!
//! Scoping itself never fails; these errors only surface while loading or
//! decoding dataset snapshots.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CoreError>;

/// Core error type
#[derive(Debug, Error)]
pub enum CoreError {
    /// Serialization/Deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Invalid input/state
    #[error("Invalid: {0}")]
    Invalid(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CoreError {
    /// Create a serialization error
    pub fn serialization<S: Into<String>>(msg: S) -> Self {
        CoreError::Serialization(msg.into())
    }

    /// Create an invalid error
    pub fn invalid<S: Into<String>>(msg: S) -> Self {
        CoreError::Invalid(msg.into())
    }

    /// Create a not found error
    pub fn not_found<S: Into<String>>(msg: S) -> Self {
        CoreError::NotFound(msg.into())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        CoreError::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let err = CoreError::serialization("bad json");
        assert!(matches!(err, CoreError::Serialization(_)));

        let err = CoreError::not_found("snapshot.json");
        assert!(matches!(err, CoreError::NotFound(_)));
    }

    #[test]
    fn test_error_display() {
        let err = CoreError::invalid("duplicate job id");
        assert_eq!(err.to_string(), "Invalid: duplicate job id");

        let err: CoreError = serde_json::from_str::<u64>("not a number").unwrap_err().into();
        assert!(err.to_string().starts_with("Serialization error:"));
    }
}
