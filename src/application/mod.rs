//! Application services (use cases).
//!
//! These services coordinate the catalog source, the on-disk cache and the
//! freshness policy, and translate user queries into catalog lookups.

pub mod catalog;
pub mod freshness;
pub mod query;

pub use catalog::{CatalogSettings, CatalogStatus, IndexCatalog, IndexSummary, Weighting};
pub use freshness::{Freshness, FreshnessPolicy};
pub use query::{Query, QueryError, QueryFacade, QueryOutcome};
