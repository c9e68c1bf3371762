//! Miette-based error diagnostics for CLI error presentation.

use miette::Diagnostic;
use thiserror::Error;

use crate::application::QueryError;
use crate::error::{CatalogError, ConfigError, Error};

/// Errors reported by the `ubci` binary, each with a code and a hint.
#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    /// Configuration could not be loaded or is invalid.
    #[error("{0}")]
    #[diagnostic(
        code(ubci::config),
        help("check the config file and the UBCI_CACHE_PATH / UBCI_RETENTION_DAYS variables")
    )]
    Config(#[source] Error),

    /// No catalog snapshot could be loaded or fetched.
    #[error("{0}")]
    #[diagnostic(
        code(ubci::unavailable),
        help("data unavailable: check network connectivity or cache path")
    )]
    Unavailable(#[source] CatalogError),

    /// The input did not resolve to a ticker, index or category.
    #[error("{0}")]
    #[diagnostic(code(ubci::query), help("run `ubci --help` for usage examples"))]
    Query(#[source] QueryError),

    /// Output could not be rendered.
    #[error("failed to render output: {0}")]
    #[diagnostic(code(ubci::output))]
    Render(#[from] serde_json::Error),
}

impl From<Error> for CliError {
    fn from(err: Error) -> Self {
        match err {
            Error::Catalog(err) => Self::Unavailable(err),
            other => Self::Config(other),
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err.into())
    }
}

impl From<QueryError> for CliError {
    fn from(err: QueryError) -> Self {
        match err {
            QueryError::Catalog(err) => Self::Unavailable(err),
            other => Self::Query(other),
        }
    }
}

impl From<CatalogError> for CliError {
    fn from(err: CatalogError) -> Self {
        Self::Unavailable(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_failures_map_to_unavailable() {
        let err = CatalogError::Unavailable {
            reason: "offline".into(),
        };
        assert!(matches!(
            CliError::from(QueryError::Catalog(err.clone())),
            CliError::Unavailable(_)
        ));
        assert!(matches!(
            CliError::from(Error::Catalog(err)),
            CliError::Unavailable(_)
        ));
    }

    #[test]
    fn unresolved_input_maps_to_query() {
        let err = QueryError::Unrecognized("NOPE".into());
        assert!(matches!(CliError::from(err), CliError::Query(_)));
    }
}
