//! End-to-end catalog behaviour against a real cache file.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use chrono::{Days, NaiveDate};
use rust_decimal_macros::dec;
use tempfile::TempDir;
use ubci::adapter::outbound::cache::{CacheEnvelope, FileCacheStore};
use ubci::application::{CatalogSettings, Freshness, IndexCatalog};
use ubci::domain::{IndexCode, Ticker};
use ubci::error::CatalogError;
use ubci::port::{CacheEntry, CacheStore, CatalogFetcher, Clock};
use ubci::testkit::catalog;
use ubci::testkit::clock::FixedClock;
use ubci::testkit::fetcher::FakeFetcher;

struct Harness {
    _dir: TempDir,
    path: std::path::PathBuf,
    fetcher: Arc<FakeFetcher>,
    clock: Arc<FixedClock>,
}

impl Harness {
    fn new(catalog: ubci::domain::Catalog) -> Self {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("ubci_index_cache.json");
        Self {
            _dir: dir,
            path,
            fetcher: Arc::new(FakeFetcher::new(catalog)),
            clock: Arc::new(FixedClock::at(2024, 1, 15)),
        }
    }

    fn store(&self) -> Arc<FileCacheStore> {
        Arc::new(FileCacheStore::new(
            &self.path,
            Arc::clone(&self.clock) as Arc<dyn Clock>,
        ))
    }

    fn catalog(&self) -> IndexCatalog {
        IndexCatalog::new(
            Arc::clone(&self.fetcher) as Arc<dyn CatalogFetcher>,
            self.store() as Arc<dyn CacheStore>,
            Arc::clone(&self.clock) as Arc<dyn Clock>,
        )
    }

    fn seed(&self, days_ago: u64) {
        let date = self.clock.today() - Days::new(days_ago);
        self.store()
            .save(&CacheEntry::new(catalog::single_market(), date))
            .expect("seed cache");
    }
}

fn cached_dates(path: &Path) -> Vec<NaiveDate> {
    let raw = fs::read_to_string(path).expect("cache file");
    let envelope: CacheEnvelope = serde_json::from_str(&raw).expect("envelope");
    envelope
        .entries
        .into_iter()
        .map(|value| {
            serde_json::from_value::<CacheEntry>(value)
                .expect("entry")
                .fetched_at
        })
        .collect()
}

#[tokio::test]
async fn first_run_fetches_and_answers_from_snapshot() {
    let harness = Harness::new(catalog::single_market());
    let index = harness.catalog();

    let tickers = index.get_tickers_by_market("UBMI").await.unwrap();
    let markets = index.get_markets_by_ticker("KRW-BTC").await.unwrap();

    assert_eq!(tickers, vec![(Ticker::new("KRW-BTC"), dec!(0.42))]);
    assert_eq!(
        markets,
        vec![(IndexCode::new("UBMI"), catalog::UBMI_NAME.to_string())]
    );
    assert_eq!(harness.fetcher.calls(), 1);
    assert_eq!(cached_dates(&harness.path), vec![harness.clock.today()]);
}

#[tokio::test]
async fn same_day_restart_is_served_from_disk() {
    let harness = Harness::new(catalog::single_market());
    harness.catalog().ensure_fresh(false).await.unwrap();

    harness.fetcher.set_failing(true);
    let restarted = harness.catalog();
    let tickers = restarted.get_tickers_by_market("ubmi").await.unwrap();

    assert_eq!(tickers.len(), 1);
    assert_eq!(harness.fetcher.calls(), 1);
}

#[tokio::test]
async fn day_two_fetch_failure_serves_yesterdays_cache() {
    let harness = Harness::new(catalog::single_market());
    harness.seed(1);
    harness.fetcher.set_failing(true);
    let index = harness.catalog();

    let tickers = index.get_tickers_by_market("UBMI").await.unwrap();

    assert_eq!(tickers, vec![(Ticker::new("KRW-BTC"), dec!(0.42))]);
    assert_eq!(harness.fetcher.calls(), 1);
    assert_eq!(
        index.status().await.freshness,
        Freshness::Stale { age_days: 1 }
    );
}

#[tokio::test]
async fn offline_day_fetches_once_then_serves_stale_cache() {
    let harness = Harness::new(catalog::single_market());
    harness.seed(1);
    harness.fetcher.set_failing(true);
    let index = harness.catalog();

    assert_eq!(index.get_all_markets().await.unwrap().len(), 1);
    assert!(index.get_all_themes().await.unwrap().is_empty());
    assert_eq!(index.get_markets_by_ticker("KRW-BTC").await.unwrap().len(), 1);

    assert_eq!(harness.fetcher.calls(), 1);
    assert_eq!(
        cached_dates(&harness.path),
        vec![harness.clock.today() - Days::new(1)]
    );
}

#[tokio::test]
async fn no_cache_and_failing_fetch_is_unavailable() {
    let harness = Harness::new(catalog::single_market());
    harness.fetcher.set_failing(true);
    let index = harness.catalog();

    let err = index.get_all_markets().await.unwrap_err();

    assert!(matches!(err, CatalogError::Unavailable { .. }));
    assert!(!harness.path.exists());
}

#[tokio::test]
async fn refreshes_once_per_calendar_day() {
    let harness = Harness::new(catalog::single_market());
    let index = harness.catalog();

    index.get_all_markets().await.unwrap();
    index.get_markets_by_ticker("KRW-BTC").await.unwrap();
    assert_eq!(harness.fetcher.calls(), 1);

    harness.clock.advance_days(1);
    index.get_all_themes().await.unwrap();

    assert_eq!(harness.fetcher.calls(), 2);
    assert_eq!(cached_dates(&harness.path).len(), 2);
}

#[tokio::test]
async fn refreshed_snapshot_replaces_previous_one_whole() {
    let harness = Harness::new(catalog::single_market());
    let index = harness.catalog();
    index.ensure_fresh(false).await.unwrap();

    harness.fetcher.set_catalog(catalog::sample());
    index.refresh().await.unwrap();

    let markets = index.get_all_markets().await.unwrap();
    assert_eq!(markets.len(), 2);
    assert_eq!(index.get_all_sectors().await.unwrap().len(), 1);
}

#[tokio::test]
async fn unknown_lookups_are_empty_not_errors() {
    let harness = Harness::new(catalog::sample());
    let index = harness.catalog();

    assert!(index.get_themes_by_ticker("KRW-DOGE").await.unwrap().is_empty());
    assert!(index.get_sectors_by_ticker("KRW-BTC").await.unwrap().is_empty());
    assert!(index.get_tickers_by_strategy("UBSI999").await.unwrap().is_empty());
    assert!(index.get_tickers_by_index("NOPE").await.unwrap().is_empty());
}

#[tokio::test]
async fn ticker_lookup_normalizes_case_and_exchange_prefix() {
    let harness = Harness::new(catalog::sample());
    let index = harness.catalog();

    let plain = index.get_strategies_by_ticker("KRW-ETH").await.unwrap();
    let prefixed = index
        .get_strategies_by_ticker("crix.upbit.krw-eth")
        .await
        .unwrap();

    assert_eq!(plain, prefixed);
    assert_eq!(plain[0].0.as_str(), "UBSI004");
}

#[tokio::test]
async fn constituents_keep_source_order() {
    let harness = Harness::new(catalog::sample());
    let index = harness.catalog();

    let tickers: Vec<_> = index
        .get_tickers_by_market("UTTI")
        .await
        .unwrap()
        .into_iter()
        .map(|(ticker, _)| ticker.to_string())
        .collect();

    assert_eq!(tickers, vec!["KRW-ETH", "KRW-BTC"]);
}

#[tokio::test]
async fn index_agnostic_lookup_finds_category() {
    let harness = Harness::new(catalog::sample());
    let index = harness.catalog();

    let tickers = index.get_tickers_by_index("THMIDX17").await.unwrap();

    assert_eq!(tickers.len(), 2);
    assert_eq!(
        index.index_name(ubci::domain::Category::Theme, "thmidx17").await.unwrap(),
        Some("BTC Group".to_string())
    );
}

#[tokio::test]
async fn refresh_prunes_history_past_retention() {
    let harness = Harness::new(catalog::single_market());
    for days_ago in [10, 8, 3, 1] {
        harness.seed(days_ago);
    }
    let index = harness.catalog().with_settings(CatalogSettings {
        retention_days: 7,
        ..CatalogSettings::default()
    });

    index.ensure_fresh(false).await.unwrap();

    let today = harness.clock.today();
    assert_eq!(
        cached_dates(&harness.path),
        vec![today - Days::new(3), today - Days::new(1), today]
    );
}
