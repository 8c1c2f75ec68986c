//! Engine configuration loading and validation

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::error::{Result, ScopingError};

/// Complete engine configuration
///
/// Every section is optional in the TOML source and falls back to defaults.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub cache: CacheSection,

    #[serde(default)]
    pub logging: LoggingSection,

    #[serde(default)]
    pub diagnostics: DiagnosticsSection,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CacheSection {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_cache_capacity")]
    pub capacity: usize,
    #[serde(default = "default_cache_ttl")]
    pub ttl_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LoggingSection {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_true")]
    pub with_target: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct DiagnosticsSection {
    /// Log integrity violations of each new snapshot version
    #[serde(default)]
    pub check_integrity: bool,
}

impl Default for CacheSection {
    fn default() -> Self {
        Self {
            enabled: true,
            capacity: default_cache_capacity(),
            ttl_secs: default_cache_ttl(),
        }
    }
}

impl CacheSection {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            with_target: true,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_cache_capacity() -> usize {
    1024
}

fn default_cache_ttl() -> u64 {
    60
}

fn default_log_level() -> String {
    "info".to_string()
}

impl EngineConfig {
    /// Parse and validate a configuration from TOML text
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: EngineConfig = toml::from_str(source)
            .map_err(|e| ScopingError::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| {
            ScopingError::Config(format!("Failed to read config file {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&source)
    }

    /// Check cross-field constraints
    pub fn validate(&self) -> Result<()> {
        if self.cache.enabled {
            if self.cache.capacity == 0 {
                return Err(ScopingError::Config(
                    "cache.capacity must be greater than zero when the cache is enabled".to_string(),
                ));
            }
            if self.cache.ttl_secs == 0 {
                return Err(ScopingError::Config(
                    "cache.ttl_secs must be greater than zero when the cache is enabled".to_string(),
                ));
            }
        }

        let level = self.logging.level.trim();
        if level.contains('=') || level.contains(',') {
            EnvFilter::try_new(level).map_err(|e| {
                ScopingError::Config(format!("Invalid logging.level '{}': {}", level, e))
            })?;
        } else {
            // A bare word would otherwise be read as a target and silence everything
            level.parse::<LevelFilter>().map_err(|e| {
                ScopingError::Config(format!("Invalid logging.level '{}': {}", level, e))
            })?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert!(config.cache.enabled);
        assert_eq!(config.cache.capacity, 1024);
        assert_eq!(config.cache.ttl(), Duration::from_secs(60));
        assert_eq!(config.logging.level, "info");
        assert!(!config.diagnostics.check_integrity);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_source_uses_defaults() {
        let config = EngineConfig::from_toml_str("").unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_partial_sections() {
        let config = EngineConfig::from_toml_str(
            r#"
            [cache]
            capacity = 16

            [diagnostics]
            check_integrity = true
            "#,
        )
        .unwrap();

        assert!(config.cache.enabled);
        assert_eq!(config.cache.capacity, 16);
        assert_eq!(config.cache.ttl_secs, 60);
        assert!(config.diagnostics.check_integrity);
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let err = EngineConfig::from_toml_str("[cache]\ncapacity = 0").unwrap_err();
        assert!(matches!(err, ScopingError::Config(_)));
    }

    #[test]
    fn test_zero_capacity_allowed_when_disabled() {
        let config = EngineConfig::from_toml_str("[cache]\nenabled = false\ncapacity = 0").unwrap();
        assert!(!config.cache.enabled);
    }

    #[test]
    fn test_invalid_log_level_rejected() {
        let err = EngineConfig::from_toml_str("[logging]\nlevel = \"tenantscope=loud\"").unwrap_err();
        assert!(err.to_string().contains("logging.level"));
    }

    #[test]
    fn test_bare_unknown_level_rejected() {
        let err = EngineConfig::from_toml_str("[logging]\nlevel = \"verbose\"").unwrap_err();
        assert!(err.to_string().contains("logging.level"));
    }

    #[test]
    fn test_level_forms_accepted() {
        for level in ["warn", "DEBUG", "off", "info,tenantscope_scoping=trace"] {
            let source = format!("[logging]\nlevel = \"{}\"", level);
            assert!(EngineConfig::from_toml_str(&source).is_ok(), "{}", level);
        }
    }

    #[test]
    fn test_malformed_toml() {
        let err = EngineConfig::from_toml_str("[cache\nenabled = true").unwrap_err();
        assert!(err.to_string().starts_with("Configuration error: Failed to parse config"));
    }
}
