//! On-disk catalog cache.
//!
//! A single JSON file holds a versioned envelope of dated snapshots,
//! oldest first. Writes go to a sibling temp file and are renamed over
//! the canonical path, so an interrupted write leaves the previous file
//! intact.

mod file;
mod retention;

pub use file::{CacheEnvelope, FileCacheStore};
pub use retention::prune_entries;
