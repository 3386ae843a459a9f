//! Centralized path definitions for docverify
//!
//! All filesystem locations are resolved here.
//!
//! ## Storage Layout
//!
//! ```text
//! $DOCVERIFY_HOME (default: ./.docverify)
//! ├── docverify.toml     # Configuration
//! └── store.json         # Requests and institutions (file backend)
//! ```

use std::path::{Path, PathBuf};

/// Environment variable overriding the data directory
pub const HOME_ENV: &str = "DOCVERIFY_HOME";

/// Default data directory name, relative to the working directory
pub const DATA_DIR: &str = ".docverify";

/// Configuration filename
pub const CONFIG_FILE: &str = "docverify.toml";

/// Default store filename
pub const STORE_FILE: &str = "store.json";

/// Get the data directory
///
/// Uses `DOCVERIFY_HOME` when set and non-empty.
#[must_use]
pub fn data_dir() -> PathBuf {
    std::env::var_os(HOME_ENV)
        .filter(|v| !v.is_empty())
        .map_or_else(|| PathBuf::from(DATA_DIR), PathBuf::from)
}

/// Get path to the configuration file
#[must_use]
pub fn config_file() -> PathBuf {
    data_dir().join(CONFIG_FILE)
}

/// Get the default store path
#[must_use]
pub fn default_store_file() -> PathBuf {
    data_dir().join(STORE_FILE)
}

/// Resolve a configured path against the data directory
///
/// Absolute paths are returned unchanged.
#[must_use]
pub fn resolve(path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        data_dir().join(path)
    }
}
