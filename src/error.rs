use std::time::Duration;

use thiserror::Error;

use crate::domain::error::DomainError;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),

    #[error("failed to open log file: {0}")]
    LogFile(#[source] std::io::Error),
}

/// Errors from the remote catalog source.
///
/// Recoverable: the catalog falls back to its previous snapshot.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected status {status} from {url}")]
    Status { status: u16, url: String },

    #[error("malformed catalog payload: {0}")]
    Payload(String),

    #[error("catalog fetch timed out after {0:?}")]
    Timeout(Duration),
}

impl From<DomainError> for FetchError {
    fn from(err: DomainError) -> Self {
        Self::Payload(err.to_string())
    }
}

/// Errors from the on-disk cache.
///
/// Recoverable: the catalog keeps serving from memory.
#[derive(Error, Debug)]
pub enum CacheError {
    #[error("cache I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("cache serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("unsupported cache format version {0}")]
    UnsupportedVersion(u32),

    #[error("cache task failed: {0}")]
    Task(String),
}

/// Errors surfaced by catalog queries.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// No snapshot could be obtained from the cache or the network.
    #[error("index data unavailable: {reason}")]
    Unavailable { reason: String },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Cache(#[from] CacheError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
