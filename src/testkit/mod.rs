//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`catalog`] - Builders for catalog snapshots used across tests.
//! - [`clock`] - `FixedClock`, a settable [`Clock`](crate::port::Clock).
//! - [`fetcher`] - `FakeFetcher`, a scripted [`CatalogFetcher`](crate::port::CatalogFetcher)
//!   that counts calls.
//! - [`store`] - `MemoryCacheStore`, an in-memory [`CacheStore`](crate::port::CacheStore).

pub mod catalog;
pub mod clock;
pub mod fetcher;
pub mod store;
