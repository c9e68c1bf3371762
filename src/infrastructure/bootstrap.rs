//! Composition root: builds the catalog and its adapters from configuration.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use super::clock::SystemClock;
use super::config::settings::Config;
use crate::adapter::outbound::cache::FileCacheStore;
use crate::adapter::outbound::ubci::UbciClient;
use crate::application::{CatalogSettings, IndexCatalog};
use crate::error::Result;
use crate::port::{CacheStore, CatalogFetcher, Clock};

/// Build the catalog backed by the UBCI API and a cache file at `cache_path`.
#[allow(clippy::result_large_err)]
pub fn build_catalog(config: &Config, cache_path: PathBuf) -> Result<IndexCatalog> {
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    debug!(path = %cache_path.display(), "Using catalog cache");
    let store: Arc<dyn CacheStore> = Arc::new(FileCacheStore::new(cache_path, Arc::clone(&clock)));
    let fetcher: Arc<dyn CatalogFetcher> = Arc::new(UbciClient::from_config(&config.api)?);

    let settings = CatalogSettings {
        retention_days: config.cache.retention_days,
        fetch_timeout: Duration::from_secs(config.api.fetch_timeout_secs),
    };

    Ok(IndexCatalog::new(fetcher, store, clock).with_settings(settings))
}
