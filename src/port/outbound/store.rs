//! Persistence port for catalog snapshots.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::Catalog;
use crate::error::CacheError;

/// Current version of the persisted catalog payload.
pub const CACHE_FORMAT_VERSION: u32 = 1;

/// One persisted catalog snapshot.
///
/// Entries are created on save and never modified afterwards; retention
/// only drops whole entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    /// Local date the snapshot was fetched.
    pub fetched_at: NaiveDate,
    /// Version of the `catalog` payload layout.
    pub format_version: u32,
    /// The snapshot itself.
    pub catalog: Catalog,
}

impl CacheEntry {
    /// Create an entry in the current format.
    #[must_use]
    pub fn new(catalog: Catalog, fetched_at: NaiveDate) -> Self {
        Self {
            fetched_at,
            format_version: CACHE_FORMAT_VERSION,
            catalog,
        }
    }
}

/// Storage operations for dated catalog snapshots.
///
/// Calls may block on disk I/O; async callers should run them on a
/// blocking thread.
pub trait CacheStore: Send + Sync {
    /// Most recent readable entry, or `None` when the store is missing,
    /// unreadable, or corrupt. Never fails.
    fn load(&self) -> Option<CacheEntry>;

    /// Persist an entry, appending to the retained history. An existing
    /// entry for the same date is superseded.
    fn save(&self, entry: &CacheEntry) -> Result<(), CacheError>;

    /// Drop entries fetched more than `days_to_keep` days ago, always
    /// keeping the newest one. Returns the number of entries removed.
    fn cleanup(&self, days_to_keep: u32) -> Result<usize, CacheError>;
}
