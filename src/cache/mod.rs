//! Dependency cache: extracted package trees plus a resolution record
//!
//! Layout under the cache root (default `.duffel_cache/`, overridable via
//! `DUFFEL_CACHE_DIR`):
//!
//! ```text
//! .duffel_cache/
//! ├── dependencies.json     # package name -> installed version
//! └── cachedPackages/       # flat install target shared by all packages
//! ```
//!
//! The record and the trees are read-then-written without locking; concurrent
//! bundler invocations against one cache are unsupported.

mod paths;
pub mod record;
mod stats;

pub use paths::{PACKAGES_DIR, RECORD_FILE, cache_dir, packages_dir, record_path};
pub use record::{CacheRecord, read_record, write_record};
pub use stats::{CacheStats, CachedPackage, cache_stats, clear_cache, forget_package,
    list_cached_packages};
