//! JSON file cache store.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use super::retention::prune_entries;
use crate::error::CacheError;
use crate::port::{CacheEntry, CacheStore, Clock, CACHE_FORMAT_VERSION};

/// Top-level cache file structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEnvelope {
    /// Schema version of the envelope.
    pub format_version: u32,
    /// Snapshots, oldest first. Kept raw so one bad entry does not
    /// invalidate the rest.
    #[serde(default)]
    pub entries: Vec<Value>,
}

/// [`CacheStore`] backed by one JSON file.
pub struct FileCacheStore {
    path: PathBuf,
    clock: Arc<dyn Clock>,
}

impl FileCacheStore {
    /// Create a store for `path`. Nothing is touched until first use.
    pub fn new(path: impl Into<PathBuf>, clock: Arc<dyn Clock>) -> Self {
        Self {
            path: path.into(),
            clock,
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All readable entries, oldest first.
    ///
    /// Missing, unreadable or corrupt files yield an empty history. An
    /// envelope of another format version is reported as
    /// [`CacheError::UnsupportedVersion`].
    fn read_entries(&self) -> Result<Vec<CacheEntry>, CacheError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No cache file");
                return Ok(Vec::new());
            }
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "Cache file unreadable");
                return Ok(Vec::new());
            }
        };

        let envelope: CacheEnvelope = match serde_json::from_str(&raw) {
            Ok(envelope) => envelope,
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "Cache file is corrupt, ignoring");
                return Ok(Vec::new());
            }
        };

        if envelope.format_version != CACHE_FORMAT_VERSION {
            warn!(
                path = %self.path.display(),
                found = envelope.format_version,
                expected = CACHE_FORMAT_VERSION,
                "Unsupported cache format, ignoring"
            );
            return Err(CacheError::UnsupportedVersion(envelope.format_version));
        }

        let mut entries: Vec<CacheEntry> = envelope
            .entries
            .into_iter()
            .filter_map(|value| match serde_json::from_value::<CacheEntry>(value) {
                Ok(entry) if entry.format_version == CACHE_FORMAT_VERSION => Some(entry),
                Ok(entry) => {
                    warn!(
                        fetched_at = %entry.fetched_at,
                        found = entry.format_version,
                        "Skipping cache entry with unsupported format"
                    );
                    None
                }
                Err(err) => {
                    warn!(error = %err, "Skipping invalid cache entry");
                    None
                }
            })
            .collect();
        entries.sort_by_key(|entry| entry.fetched_at);
        Ok(entries)
    }

    /// History to rewrite. A file from a newer format is left untouched.
    fn writable_entries(&self) -> Result<Vec<CacheEntry>, CacheError> {
        match self.read_entries() {
            Err(CacheError::UnsupportedVersion(found)) if found < CACHE_FORMAT_VERSION => {
                warn!(
                    path = %self.path.display(),
                    found,
                    "Replacing cache file in an older format"
                );
                Ok(Vec::new())
            }
            result => result,
        }
    }

    /// Write the whole history atomically.
    fn write_entries(&self, entries: &[CacheEntry]) -> Result<(), CacheError> {
        let envelope = CacheEnvelope {
            format_version: CACHE_FORMAT_VERSION,
            entries: entries
                .iter()
                .map(serde_json::to_value)
                .collect::<Result<_, _>>()?,
        };
        let json = serde_json::to_string_pretty(&envelope)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let temp_path = self.path.with_extension("tmp");
        let cleanup_and_err = |e: std::io::Error| {
            let _ = fs::remove_file(&temp_path);
            CacheError::Io(e)
        };

        let mut file = fs::File::create(&temp_path)?;
        file.write_all(json.as_bytes()).map_err(cleanup_and_err)?;
        file.sync_all().map_err(cleanup_and_err)?;
        drop(file);

        fs::rename(&temp_path, &self.path).map_err(cleanup_and_err)?;
        debug!(path = %self.path.display(), entries = entries.len(), "Cache file written");
        Ok(())
    }
}

impl CacheStore for FileCacheStore {
    fn load(&self) -> Option<CacheEntry> {
        self.read_entries().ok()?.pop()
    }

    fn save(&self, entry: &CacheEntry) -> Result<(), CacheError> {
        let mut entries = self.writable_entries()?;
        entries.retain(|existing| existing.fetched_at != entry.fetched_at);
        entries.push(entry.clone());
        entries.sort_by_key(|existing| existing.fetched_at);
        self.write_entries(&entries)
    }

    fn cleanup(&self, days_to_keep: u32) -> Result<usize, CacheError> {
        let mut entries = self.writable_entries()?;
        let removed = prune_entries(&mut entries, self.clock.today(), days_to_keep);
        if removed > 0 {
            self.write_entries(&entries)?;
            debug!(removed, days_to_keep, "Pruned cache history");
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::{catalog, clock::FixedClock};
    use tempfile::TempDir;

    fn store(dir: &TempDir, clock: &Arc<FixedClock>) -> FileCacheStore {
        FileCacheStore::new(
            dir.path().join("nested").join("cache.json"),
            Arc::clone(clock) as Arc<dyn Clock>,
        )
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let clock = Arc::new(FixedClock::at(2024, 1, 15));
        let store = store(&dir, &clock);
        let entry = CacheEntry::new(catalog::sample(), clock.today());

        store.save(&entry).unwrap();

        assert_eq!(store.load(), Some(entry));
        assert!(!store.path().with_extension("tmp").exists());
    }

    #[test]
    fn save_appends_and_replaces_same_day() {
        let dir = TempDir::new().unwrap();
        let clock = Arc::new(FixedClock::at(2024, 1, 15));
        let store = store(&dir, &clock);

        store
            .save(&CacheEntry::new(catalog::single_market(), FixedClock::date(2024, 1, 14)))
            .unwrap();
        store
            .save(&CacheEntry::new(catalog::single_market(), clock.today()))
            .unwrap();
        store
            .save(&CacheEntry::new(catalog::sample(), clock.today()))
            .unwrap();

        let history = store.read_entries().unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[1].catalog, catalog::sample());
    }

    #[test]
    fn missing_file_loads_as_absent() {
        let dir = TempDir::new().unwrap();
        let clock = Arc::new(FixedClock::at(2024, 1, 15));
        assert!(store(&dir, &clock).load().is_none());
    }

    #[test]
    fn corrupt_file_loads_as_absent() {
        let dir = TempDir::new().unwrap();
        let clock = Arc::new(FixedClock::at(2024, 1, 15));
        let store = store(&dir, &clock);
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), "{ not json").unwrap();

        assert!(store.load().is_none());
    }

    #[test]
    fn invalid_entry_is_skipped() {
        let dir = TempDir::new().unwrap();
        let clock = Arc::new(FixedClock::at(2024, 1, 15));
        let store = store(&dir, &clock);
        let good = CacheEntry::new(catalog::single_market(), FixedClock::date(2024, 1, 14));
        let envelope = serde_json::json!({
            "format_version": CACHE_FORMAT_VERSION,
            "entries": [
                serde_json::to_value(&good).unwrap(),
                { "fetched_at": "2024-01-15", "format_version": 1, "catalog": "garbage" },
                { "fetched_at": "2024-01-15", "format_version": 99, "catalog": [] }
            ]
        });
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), envelope.to_string()).unwrap();

        assert_eq!(store.load(), Some(good));
    }

    #[test]
    fn cleanup_rewrites_pruned_history() {
        let dir = TempDir::new().unwrap();
        let clock = Arc::new(FixedClock::at(2024, 1, 20));
        let store = store(&dir, &clock);
        for day in [10, 12, 17, 19] {
            store
                .save(&CacheEntry::new(catalog::single_market(), FixedClock::date(2024, 1, day)))
                .unwrap();
        }

        assert_eq!(store.cleanup(7).unwrap(), 2);

        let dates: Vec<_> = store.read_entries().unwrap().iter().map(|e| e.fetched_at).collect();
        assert_eq!(
            dates,
            vec![FixedClock::date(2024, 1, 17), FixedClock::date(2024, 1, 19)]
        );
    }
}
