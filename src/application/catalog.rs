//! The index catalog: cache-backed, refreshed at most once per day.
//!
//! [`IndexCatalog`] owns the current snapshot and coordinates the
//! [`CatalogFetcher`], [`CacheStore`] and [`FreshnessPolicy`]. Every query
//! first calls [`IndexCatalog::ensure_fresh`], then reads from the snapshot.
//!
//! Refreshes are single-flight: callers that arrive while a refresh is in
//! progress wait for it and observe its outcome instead of fetching again.
//! The snapshot is swapped as one `Arc`, so readers never see a partially
//! updated catalog.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use parking_lot::RwLock;
use rust_decimal::Decimal;
use serde::Serialize;
use tokio::sync::Mutex;
use tokio::task;
use tracing::{debug, info, warn};

use super::freshness::{Freshness, FreshnessPolicy};
use crate::domain::{Catalog, Category, IndexCode, Ticker};
use crate::error::{CacheError, CatalogError, FetchError};
use crate::port::{CacheEntry, CacheStore, CatalogFetcher, Clock};

/// `(code, name)` of an index.
pub type IndexSummary = (IndexCode, String);

/// `(ticker, weight)` of a constituent.
pub type Weighting = (Ticker, Decimal);

const DEFAULT_RETENTION_DAYS: u32 = 7;
const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(120);

/// Tunables for refresh and persistence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogSettings {
    /// Days of snapshots kept on disk.
    pub retention_days: u32,
    /// Upper bound for one complete fetch.
    pub fetch_timeout: Duration,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            retention_days: DEFAULT_RETENTION_DAYS,
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }
}

/// Point-in-time description of the catalog for status displays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogStatus {
    pub fetched_at: Option<NaiveDate>,
    pub freshness: Freshness,
    pub index_count: usize,
    pub ticker_count: usize,
}

/// State guarded by the refresh lock.
#[derive(Debug, Default)]
struct RefreshState {
    /// Whether the disk cache has been consulted.
    cache_checked: bool,
    /// Day of the last failed fetch. Unforced refreshes are not retried
    /// on that day while a snapshot is being served.
    failed_on: Option<NaiveDate>,
}

/// Cache-backed catalog of indices and their constituents.
pub struct IndexCatalog {
    fetcher: Arc<dyn CatalogFetcher>,
    store: Arc<dyn CacheStore>,
    clock: Arc<dyn Clock>,
    policy: FreshnessPolicy,
    settings: CatalogSettings,
    current: RwLock<Option<Arc<CacheEntry>>>,
    refresh: Mutex<RefreshState>,
    /// Completed refresh attempts, successful or not.
    attempts: AtomicU64,
}

impl IndexCatalog {
    /// Create an empty catalog. Nothing is loaded until the first query.
    pub fn new(
        fetcher: Arc<dyn CatalogFetcher>,
        store: Arc<dyn CacheStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            fetcher,
            store,
            clock,
            policy: FreshnessPolicy::new(),
            settings: CatalogSettings::default(),
            current: RwLock::new(None),
            refresh: Mutex::new(RefreshState::default()),
            attempts: AtomicU64::new(0),
        }
    }

    /// Replace the default settings.
    #[must_use]
    pub fn with_settings(mut self, settings: CatalogSettings) -> Self {
        self.settings = settings;
        self
    }

    #[must_use]
    pub const fn settings(&self) -> &CatalogSettings {
        &self.settings
    }

    /// Make sure a snapshot is loaded and, unless the policy says it is
    /// current, refreshed from the source.
    ///
    /// Fetch and persistence failures never fail this call while any
    /// snapshot is available; the previous snapshot keeps being served.
    /// After a failed fetch, unforced calls keep serving that snapshot for
    /// the rest of the day without contacting the source again.
    /// Returns [`CatalogError::Unavailable`] only when there is no
    /// snapshot at all.
    pub async fn ensure_fresh(&self, force: bool) -> Result<(), CatalogError> {
        if !force && self.is_current() {
            return Ok(());
        }

        let observed = self.attempts.load(Ordering::Acquire);
        let mut state = self.refresh.lock().await;

        if self.attempts.load(Ordering::Acquire) != observed {
            // Another caller finished a refresh while we waited; share its outcome.
            return self.require_snapshot().map(|_| ());
        }

        let fallback = self.load_if_empty(&mut state, !force).await;

        if !force && self.is_current() {
            return Ok(());
        }

        let today = self.clock.today();
        if !force && state.failed_on == Some(today) && self.snapshot().is_some() {
            debug!(date = %today, "Refresh already failed today, serving previous snapshot");
            return Ok(());
        }

        let result = self.fetch().await;
        self.attempts.fetch_add(1, Ordering::AcqRel);

        match result {
            Ok(catalog) => {
                state.failed_on = None;
                info!(
                    source = self.fetcher.source_name(),
                    indices = catalog.len(),
                    tickers = catalog.ticker_count(),
                    date = %today,
                    "Index catalog refreshed"
                );
                let entry = Arc::new(CacheEntry::new(catalog, today));
                self.install(Arc::clone(&entry));
                self.persist(entry).await;
                Ok(())
            }
            Err(err) => {
                state.failed_on = Some(today);
                if let Some(entry) = fallback {
                    self.install(entry);
                }
                match self.snapshot() {
                    Some(entry) => {
                        warn!(
                            error = %err,
                            fetched_at = %entry.fetched_at,
                            "Catalog refresh failed, serving previous snapshot"
                        );
                        Ok(())
                    }
                    None => Err(CatalogError::Unavailable {
                        reason: err.to_string(),
                    }),
                }
            }
        }
    }

    /// Refresh from the source regardless of freshness.
    pub async fn refresh(&self) -> Result<(), CatalogError> {
        self.ensure_fresh(true).await
    }

    /// Describe the loaded snapshot without contacting the source.
    pub async fn status(&self) -> CatalogStatus {
        {
            let mut state = self.refresh.lock().await;
            self.load_if_empty(&mut state, true).await;
        }

        let snapshot = self.snapshot();
        let fetched_at = snapshot.as_ref().map(|entry| entry.fetched_at);
        CatalogStatus {
            fetched_at,
            freshness: self.policy.evaluate(fetched_at, self.clock.today()),
            index_count: snapshot.as_ref().map_or(0, |entry| entry.catalog.len()),
            ticker_count: snapshot
                .as_ref()
                .map_or(0, |entry| entry.catalog.ticker_count()),
        }
    }

    // ---------------------------------------------------------------------
    // Generic queries
    // ---------------------------------------------------------------------

    /// Indices of `category` that contain `ticker`.
    ///
    /// Tickers without a recognized quote currency match nothing.
    pub async fn indices_by_ticker(
        &self,
        category: Category,
        ticker: &str,
    ) -> Result<Vec<IndexSummary>, CatalogError> {
        let entry = self.read().await?;
        let ticker = Ticker::new(ticker);
        if !ticker.has_known_quote() {
            warn!(ticker = %ticker, "Invalid ticker prefix");
            return Ok(Vec::new());
        }

        Ok(entry
            .catalog
            .memberships(&ticker, category)
            .map(|index| (index.code().clone(), index.name().to_string()))
            .collect())
    }

    /// Every index of `category` in source order.
    pub async fn all_indices(&self, category: Category) -> Result<Vec<IndexSummary>, CatalogError> {
        let entry = self.read().await?;
        Ok(entry
            .catalog
            .indices(category)
            .map(|index| (index.code().clone(), index.name().to_string()))
            .collect())
    }

    /// Constituents of one index in source order; empty for unknown codes.
    pub async fn tickers_by_index(
        &self,
        category: Category,
        code: &str,
    ) -> Result<Vec<Weighting>, CatalogError> {
        let entry = self.read().await?;
        Ok(entry
            .catalog
            .constituents(category, &IndexCode::new(code))
            .iter()
            .map(|member| (member.ticker().clone(), member.weight()))
            .collect())
    }

    /// Display name of one index.
    pub async fn index_name(
        &self,
        category: Category,
        code: &str,
    ) -> Result<Option<String>, CatalogError> {
        let entry = self.read().await?;
        Ok(entry
            .catalog
            .index(category, &IndexCode::new(code))
            .map(|index| index.name().to_string()))
    }

    /// Categories that have an index with this code.
    pub async fn find_categories(&self, code: &str) -> Result<Vec<Category>, CatalogError> {
        let entry = self.read().await?;
        Ok(entry.catalog.categories_of(&IndexCode::new(code)))
    }

    /// Every membership of `ticker`, grouped by category.
    ///
    /// Categories without a membership are omitted.
    pub async fn memberships(
        &self,
        ticker: &str,
    ) -> Result<Vec<(Category, Vec<IndexSummary>)>, CatalogError> {
        let entry = self.read().await?;
        let ticker = Ticker::new(ticker);
        if !ticker.has_known_quote() {
            warn!(ticker = %ticker, "Invalid ticker prefix");
            return Ok(Vec::new());
        }

        Ok(Category::ALL
            .into_iter()
            .map(|category| {
                let indices = entry
                    .catalog
                    .memberships(&ticker, category)
                    .map(|index| (index.code().clone(), index.name().to_string()))
                    .collect::<Vec<_>>();
                (category, indices)
            })
            .filter(|(_, indices)| !indices.is_empty())
            .collect())
    }

    /// Constituents of the index with this code in whichever category
    /// holds it first (market, strategy, theme, sector).
    pub async fn get_tickers_by_index(&self, code: &str) -> Result<Vec<Weighting>, CatalogError> {
        let categories = self.find_categories(code).await?;
        match categories.first() {
            Some(&category) => self.tickers_by_index(category, code).await,
            None => Ok(Vec::new()),
        }
    }

    // ---------------------------------------------------------------------
    // Per-category queries
    // ---------------------------------------------------------------------

    pub async fn get_markets_by_ticker(&self, ticker: &str) -> Result<Vec<IndexSummary>, CatalogError> {
        self.indices_by_ticker(Category::Market, ticker).await
    }

    pub async fn get_strategies_by_ticker(
        &self,
        ticker: &str,
    ) -> Result<Vec<IndexSummary>, CatalogError> {
        self.indices_by_ticker(Category::Strategy, ticker).await
    }

    pub async fn get_themes_by_ticker(&self, ticker: &str) -> Result<Vec<IndexSummary>, CatalogError> {
        self.indices_by_ticker(Category::Theme, ticker).await
    }

    pub async fn get_sectors_by_ticker(&self, ticker: &str) -> Result<Vec<IndexSummary>, CatalogError> {
        self.indices_by_ticker(Category::Sector, ticker).await
    }

    pub async fn get_all_markets(&self) -> Result<Vec<IndexSummary>, CatalogError> {
        self.all_indices(Category::Market).await
    }

    pub async fn get_all_strategies(&self) -> Result<Vec<IndexSummary>, CatalogError> {
        self.all_indices(Category::Strategy).await
    }

    pub async fn get_all_themes(&self) -> Result<Vec<IndexSummary>, CatalogError> {
        self.all_indices(Category::Theme).await
    }

    pub async fn get_all_sectors(&self) -> Result<Vec<IndexSummary>, CatalogError> {
        self.all_indices(Category::Sector).await
    }

    pub async fn get_tickers_by_market(&self, code: &str) -> Result<Vec<Weighting>, CatalogError> {
        self.tickers_by_index(Category::Market, code).await
    }

    pub async fn get_tickers_by_strategy(&self, code: &str) -> Result<Vec<Weighting>, CatalogError> {
        self.tickers_by_index(Category::Strategy, code).await
    }

    pub async fn get_tickers_by_theme(&self, code: &str) -> Result<Vec<Weighting>, CatalogError> {
        self.tickers_by_index(Category::Theme, code).await
    }

    pub async fn get_tickers_by_sector(&self, code: &str) -> Result<Vec<Weighting>, CatalogError> {
        self.tickers_by_index(Category::Sector, code).await
    }

    // ---------------------------------------------------------------------
    // Internals
    // ---------------------------------------------------------------------

    fn snapshot(&self) -> Option<Arc<CacheEntry>> {
        self.current.read().clone()
    }

    fn install(&self, entry: Arc<CacheEntry>) {
        *self.current.write() = Some(entry);
    }

    fn is_current(&self) -> bool {
        let fetched_at = self.snapshot().map(|entry| entry.fetched_at);
        !self.policy.needs_refresh(fetched_at, self.clock.today())
    }

    fn require_snapshot(&self) -> Result<Arc<CacheEntry>, CatalogError> {
        self.snapshot().ok_or_else(|| CatalogError::Unavailable {
            reason: "no catalog snapshot could be loaded or fetched".into(),
        })
    }

    /// The current snapshot after [`ensure_fresh`](Self::ensure_fresh).
    ///
    /// Callers that combine several lookups use one snapshot so the
    /// answers cannot straddle a refresh.
    pub async fn read(&self) -> Result<Arc<CacheEntry>, CatalogError> {
        self.ensure_fresh(false).await?;
        self.require_snapshot()
    }

    /// Consult the disk cache once, while no snapshot is held.
    ///
    /// With `adopt` the loaded entry becomes the current snapshot;
    /// otherwise it is only returned for use as a fallback.
    async fn load_if_empty(
        &self,
        state: &mut RefreshState,
        adopt: bool,
    ) -> Option<Arc<CacheEntry>> {
        if state.cache_checked || self.snapshot().is_some() {
            return None;
        }
        state.cache_checked = true;

        let store = Arc::clone(&self.store);
        let loaded = match task::spawn_blocking(move || store.load()).await {
            Ok(entry) => entry.map(Arc::new),
            Err(err) => {
                warn!(error = %err, "Cache load task failed");
                None
            }
        };

        match &loaded {
            Some(entry) => debug!(fetched_at = %entry.fetched_at, adopt, "Loaded catalog from cache"),
            None => debug!("No usable catalog cache"),
        }

        if adopt {
            if let Some(entry) = loaded {
                self.install(entry);
            }
            return None;
        }
        loaded
    }

    async fn fetch(&self) -> Result<Catalog, FetchError> {
        let limit = self.settings.fetch_timeout;
        debug!(source = self.fetcher.source_name(), timeout = ?limit, "Fetching index catalog");
        match tokio::time::timeout(limit, self.fetcher.fetch_all()).await {
            Ok(result) => result,
            Err(_) => Err(FetchError::Timeout(limit)),
        }
    }

    /// Save and prune on a blocking thread. Failures are logged only; the
    /// in-memory snapshot stays authoritative.
    async fn persist(&self, entry: Arc<CacheEntry>) {
        let store = Arc::clone(&self.store);
        let days = self.settings.retention_days;

        let result = task::spawn_blocking(move || -> Result<usize, CacheError> {
            store.save(&entry)?;
            store.cleanup(days)
        })
        .await
        .map_err(|err| CacheError::Task(err.to_string()))
        .and_then(|result| result);

        match result {
            Ok(removed) => debug!(removed, retention_days = days, "Catalog cache updated"),
            Err(err) => warn!(error = %err, "Failed to persist catalog cache"),
        }
    }
}
