//! Remote catalog source port.

use async_trait::async_trait;

use crate::domain::Catalog;
use crate::error::FetchError;

/// Retrieves the complete current catalog from its remote source.
///
/// Implementations own every protocol detail. Connectivity failures,
/// non-success responses and malformed payloads all surface as
/// [`FetchError`].
#[async_trait]
pub trait CatalogFetcher: Send + Sync {
    /// Fetch every index with its constituents.
    async fn fetch_all(&self) -> Result<Catalog, FetchError>;

    /// Get the source name for logging.
    fn source_name(&self) -> &'static str;
}
