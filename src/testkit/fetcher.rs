//! Scripted catalog fetcher.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::domain::Catalog;
use crate::error::FetchError;
use crate::port::CatalogFetcher;

/// A [`CatalogFetcher`] that returns a configured catalog or fails on demand.
///
/// Every call is counted, including failed ones.
#[derive(Debug)]
pub struct FakeFetcher {
    catalog: Mutex<Catalog>,
    failing: AtomicBool,
    calls: AtomicUsize,
    delay: Duration,
}

impl FakeFetcher {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog: Mutex::new(catalog),
            failing: AtomicBool::new(false),
            calls: AtomicUsize::new(0),
            delay: Duration::ZERO,
        }
    }

    /// Sleep this long inside every fetch.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Make subsequent fetches fail (or succeed again).
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Serve a different catalog from now on.
    pub fn set_catalog(&self, catalog: Catalog) {
        *self.catalog.lock() = catalog;
    }

    /// Number of fetches started so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CatalogFetcher for FakeFetcher {
    async fn fetch_all(&self) -> Result<Catalog, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        if self.failing.load(Ordering::SeqCst) {
            return Err(FetchError::Payload("scripted fetch failure".into()));
        }
        Ok(self.catalog.lock().clone())
    }

    fn source_name(&self) -> &'static str {
        "fake"
    }
}
