//! In-memory cache store.

use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;

use crate::error::CacheError;
use crate::port::{CacheEntry, CacheStore};

/// A [`CacheStore`] keeping entries in memory.
///
/// Records the `days_to_keep` of every cleanup call and can be told to
/// fail saves. Cleanup itself only records; retention is exercised
/// against the file store.
#[derive(Debug, Default)]
pub struct MemoryCacheStore {
    entries: Mutex<Vec<CacheEntry>>,
    cleanups: Mutex<Vec<u32>>,
    fail_saves: AtomicBool,
}

impl MemoryCacheStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate with an entry.
    pub fn seed(&self, entry: CacheEntry) {
        self.entries.lock().push(entry);
    }

    /// Make subsequent saves fail with an I/O error.
    pub fn fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    /// Entries currently held, oldest first.
    pub fn entries(&self) -> Vec<CacheEntry> {
        self.entries.lock().clone()
    }

    /// `days_to_keep` passed to each cleanup call.
    pub fn cleanup_calls(&self) -> Vec<u32> {
        self.cleanups.lock().clone()
    }
}

impl CacheStore for MemoryCacheStore {
    fn load(&self) -> Option<CacheEntry> {
        self.entries.lock().last().cloned()
    }

    fn save(&self, entry: &CacheEntry) -> Result<(), CacheError> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(CacheError::Io(std::io::Error::other("scripted save failure")));
        }
        let mut entries = self.entries.lock();
        entries.retain(|existing| existing.fetched_at != entry.fetched_at);
        entries.push(entry.clone());
        entries.sort_by_key(|existing| existing.fetched_at);
        Ok(())
    }

    fn cleanup(&self, days_to_keep: u32) -> Result<usize, CacheError> {
        self.cleanups.lock().push(days_to_keep);
        Ok(0)
    }
}
