//! Cache path utilities and constants
//!
//! The cache lives next to the project by default, matching the layout the
//! bundler expects: extracted package trees under `cachedPackages/` and the
//! resolution record in `dependencies.json`.

use std::path::{Path, PathBuf};

/// Default cache directory name in the working directory
const CACHE_DIR: &str = ".duffel_cache";

/// Subdirectory holding extracted package trees
pub const PACKAGES_DIR: &str = "cachedPackages";

/// File name of the resolution record at the cache root
pub const RECORD_FILE: &str = "dependencies.json";

/// Get the cache directory path
///
/// Defaults to `.duffel_cache` in the working directory. Can be overridden
/// with the `DUFFEL_CACHE_DIR` environment variable.
pub fn cache_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("DUFFEL_CACHE_DIR") {
        return PathBuf::from(dir);
    }
    PathBuf::from(CACHE_DIR)
}

/// Directory of extracted package trees inside a cache root
pub fn packages_dir(cache_root: &Path) -> PathBuf {
    cache_root.join(PACKAGES_DIR)
}

/// Path of the resolution record inside a cache root
pub fn record_path(cache_root: &Path) -> PathBuf {
    cache_root.join(RECORD_FILE)
}
