//! ubci - cached access to the Upbit cryptocurrency index (UBCI) catalog.
//!
//! The catalog lists market, strategy, theme and sector indices together
//! with their weighted constituent tickers. It is fetched from the UBCI
//! API at most once per calendar day and kept in a local JSON cache, so
//! repeated lookups are served from disk and a failed refresh falls back
//! to the last good snapshot.
//!
//! # Architecture
//!
//! The crate is laid out as ports and adapters:
//!
//! - [`domain`] - Catalog snapshot, identifiers and categories
//! - [`port`] - Traits for the catalog source, the cache store and the clock
//! - [`application`] - Freshness policy, the cache-backed [`IndexCatalog`]
//!   and the [`QueryFacade`]
//! - [`adapter`] - UBCI HTTP client, JSON file cache and the CLI
//! - [`infrastructure`] - Configuration, logging, system clock and wiring
//! - [`error`] - Error types for the crate
//!
//! # Example
//!
//! ```no_run
//! use std::path::PathBuf;
//! use ubci::infrastructure::bootstrap;
//! use ubci::infrastructure::config::settings::Config;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::default();
//! let catalog = bootstrap::build_catalog(&config, PathBuf::from("ubci_index_cache.json"))?;
//! for (code, name) in catalog.get_markets_by_ticker("KRW-BTC").await? {
//!     println!("{code}: {name}");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! [`IndexCatalog`]: application::IndexCatalog
//! [`QueryFacade`]: application::QueryFacade

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
