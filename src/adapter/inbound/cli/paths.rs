//! Path utilities for ubci.
//!
//! All data lives under `~/.ubci/`:
//! - `~/.ubci/config.toml` - optional configuration
//! - `~/.ubci/ubci_index_cache.json` - catalog cache

use std::path::PathBuf;

/// Returns the ubci home directory (`~/.ubci/`).
pub fn home_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".ubci")
}

/// Returns the default config file path (`~/.ubci/config.toml`).
pub fn default_config() -> PathBuf {
    home_dir().join("config.toml")
}

/// Returns the default cache file path (`~/.ubci/ubci_index_cache.json`).
pub fn default_cache() -> PathBuf {
    home_dir().join("ubci_index_cache.json")
}
