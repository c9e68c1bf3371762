//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct. Values come from an optional TOML
//! file, then `UBCI_*` environment variables, then command-line flags.
//!
//! # Example
//!
//! ```no_run
//! use ubci::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.logging.init()?;
//!     Ok(())
//! }
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use url::Url;

use super::logging::{LoggingConfig, FORMATS};
use crate::adapter::outbound::ubci::ApiConfig;
use crate::error::{ConfigError, Result};

/// Overrides the cache file location.
pub const ENV_CACHE_PATH: &str = "UBCI_CACHE_PATH";
/// Overrides the number of days of snapshots kept.
pub const ENV_RETENTION_DAYS: &str = "UBCI_RETENTION_DAYS";

/// Disk cache settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CacheConfig {
    /// Cache file. Defaults to `~/.ubci/ubci_index_cache.json` when unset.
    #[serde(default)]
    pub path: Option<PathBuf>,
    /// Days of snapshots kept on disk.
    #[serde(default = "default_retention_days")]
    pub retention_days: u32,
}

const fn default_retention_days() -> u32 {
    7
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            path: None,
            retention_days: default_retention_days(),
        }
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// Disk cache location and retention.
    #[serde(default)]
    pub cache: CacheConfig,

    /// UBCI API endpoint and HTTP behaviour.
    #[serde(default)]
    pub api: ApiConfig,

    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Parse and validate configuration from TOML content.
    #[allow(clippy::result_large_err)]
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Load `path` if it exists, otherwise fall back to defaults.
    #[allow(clippy::result_large_err)]
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Apply `UBCI_CACHE_PATH` and `UBCI_RETENTION_DAYS` from the process environment.
    #[allow(clippy::result_large_err)]
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_env_from(|key| std::env::var(key).ok())
    }

    /// Apply environment overrides read through `lookup`.
    ///
    /// Only parsing is checked here. Call [`validate`](Self::validate) once
    /// every layer, including command-line flags, has been applied.
    #[allow(clippy::result_large_err)]
    pub fn apply_env_from<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup(ENV_CACHE_PATH).filter(|value| !value.trim().is_empty()) {
            self.cache.path = Some(PathBuf::from(path));
        }
        if let Some(days) = lookup(ENV_RETENTION_DAYS) {
            self.cache.retention_days =
                days.trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidValue {
                        field: ENV_RETENTION_DAYS,
                        reason: format!("expected a whole number of days, got '{days}'"),
                    })?;
        }
        Ok(())
    }

    /// Validate configuration values.
    #[allow(clippy::result_large_err)]
    pub fn validate(&self) -> Result<()> {
        if self.cache.retention_days == 0 {
            return Err(ConfigError::InvalidValue {
                field: "cache.retention_days",
                reason: "must be at least 1".to_string(),
            }
            .into());
        }

        match Url::parse(&self.api.base_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            Ok(url) => {
                return Err(ConfigError::InvalidValue {
                    field: "api.base_url",
                    reason: format!("unsupported scheme '{}'", url.scheme()),
                }
                .into());
            }
            Err(err) => {
                return Err(ConfigError::InvalidValue {
                    field: "api.base_url",
                    reason: err.to_string(),
                }
                .into());
            }
        }

        if self.api.timeout_ms == 0 || self.api.connect_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "api.timeout_ms",
                reason: "timeouts must be greater than 0".to_string(),
            }
            .into());
        }
        if self.api.retry_max_attempts == 0 {
            return Err(ConfigError::InvalidValue {
                field: "api.retry_max_attempts",
                reason: "must be at least 1".to_string(),
            }
            .into());
        }
        if self.api.concurrency == 0 {
            return Err(ConfigError::InvalidValue {
                field: "api.concurrency",
                reason: "must be at least 1".to_string(),
            }
            .into());
        }
        if self.api.fetch_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "api.fetch_timeout_secs",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }

        if !FORMATS.contains(&self.logging.format.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "logging.format",
                reason: format!("expected one of {FORMATS:?}"),
            }
            .into());
        }

        Ok(())
    }
}
