//! Logging configuration and initialization.
//!
//! Logs go to stderr (or a file) so stdout carries only query output.

use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use serde::Deserialize;
use tracing_subscriber::{fmt, EnvFilter};

use crate::error::ConfigError;

/// Accepted values for `logging.format`.
pub const FORMATS: [&str; 2] = ["pretty", "json"];

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive, e.g. `warn` or `ubci=debug`. `RUST_LOG` wins.
    #[serde(default = "default_level")]
    pub level: String,
    /// `pretty` or `json`.
    #[serde(default = "default_format")]
    pub format: String,
    /// Append logs to this file instead of stderr.
    #[serde(default)]
    pub file: Option<PathBuf>,
}

fn default_level() -> String {
    "warn".into()
}

fn default_format() -> String {
    "pretty".into()
}

impl LoggingConfig {
    /// Initialize the global tracing subscriber.
    ///
    /// A subscriber installed earlier (e.g. by a test harness) is left in place.
    pub fn init(&self) -> Result<(), ConfigError> {
        let filter = match EnvFilter::try_from_default_env() {
            Ok(filter) => filter,
            Err(_) => EnvFilter::try_new(&self.level).map_err(|err| ConfigError::InvalidValue {
                field: "logging.level",
                reason: err.to_string(),
            })?,
        };

        let json = self.format == "json";
        let builder = fmt().with_env_filter(filter).with_target(false);

        match &self.file {
            Some(path) => {
                if let Some(parent) = path.parent() {
                    if !parent.as_os_str().is_empty() {
                        fs::create_dir_all(parent).map_err(ConfigError::LogFile)?;
                    }
                }
                let file = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .map_err(ConfigError::LogFile)?;
                let builder = builder.with_ansi(false).with_writer(Mutex::new(file));
                if json {
                    let _ = builder.json().try_init();
                } else {
                    let _ = builder.try_init();
                }
            }
            None => {
                let builder = builder.with_writer(std::io::stderr);
                if json {
                    let _ = builder.json().try_init();
                } else {
                    let _ = builder.try_init();
                }
            }
        }
        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: default_format(),
            file: None,
        }
    }
}
