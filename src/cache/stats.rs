//! Cache statistics and management
//!
//! Functions for listing, clearing, and sizing the dependency cache.
//! Packages installed with `--target` share one flat tree, so per-package
//! sizes are not tracked; only the record entry is removed when forgetting a
//! single package, and the extracted files remain until a full clear.

use std::fs;
use std::path::Path;

use walkdir::WalkDir;

use crate::error::{DuffelError, Result};

use super::record::{read_record, write_record};

/// A cached package as named by the resolution record
#[derive(Debug, Clone)]
pub struct CachedPackage {
    /// Package name
    pub name: String,
    /// Version recorded at install time
    pub version: String,
}

/// Cache statistics
#[derive(Debug, Default)]
pub struct CacheStats {
    /// Number of packages in the resolution record
    pub packages: usize,
    /// Number of files under the extracted package trees
    pub files: usize,
    /// Total size in bytes
    pub total_size: u64,
}

impl CacheStats {
    /// Format total size as human-readable string
    pub fn formatted_size(&self) -> String {
        let size = self.total_size as f64;
        if size < 1024.0 {
            format!("{} B", self.total_size)
        } else if size < 1024.0 * 1024.0 {
            format!("{:.1} KB", size / 1024.0)
        } else if size < 1024.0 * 1024.0 * 1024.0 {
            format!("{:.1} MB", size / (1024.0 * 1024.0))
        } else {
            format!("{:.1} GB", size / (1024.0 * 1024.0 * 1024.0))
        }
    }
}

/// Compute statistics for a cache root
pub fn cache_stats(cache_root: &Path) -> Result<CacheStats> {
    let record = read_record(cache_root)?;
    let packages_dir = super::packages_dir(cache_root);

    let mut files = 0;
    let mut total_size = 0;

    if packages_dir.exists() {
        for entry in WalkDir::new(&packages_dir).into_iter().filter_map(|e| e.ok()) {
            if entry.file_type().is_file() {
                files += 1;
                total_size += entry.metadata().map(|m| m.len()).unwrap_or(0);
            }
        }
    }

    Ok(CacheStats {
        packages: record.len(),
        files,
        total_size,
    })
}

/// List cached packages from the resolution record
pub fn list_cached_packages(cache_root: &Path) -> Result<Vec<CachedPackage>> {
    let record = read_record(cache_root)?;
    Ok(record
        .into_iter()
        .map(|(name, version)| CachedPackage { name, version })
        .collect())
}

/// Remove the whole cache: extracted trees and the resolution record
pub fn clear_cache(cache_root: &Path) -> Result<()> {
    let packages_dir = super::packages_dir(cache_root);
    if packages_dir.exists() {
        fs::remove_dir_all(&packages_dir).map_err(|e| DuffelError::CacheOperationFailed {
            message: format!(
                "Failed to remove package trees {}: {}",
                packages_dir.display(),
                e
            ),
        })?;
    }

    let record_path = super::record_path(cache_root);
    if record_path.exists() {
        fs::remove_file(&record_path).map_err(|e| DuffelError::CacheOperationFailed {
            message: format!("Failed to remove record {}: {}", record_path.display(), e),
        })?;
    }

    Ok(())
}

/// Forget a single package so the next bundle run reinstalls it
pub fn forget_package(cache_root: &Path, name: &str) -> Result<()> {
    let mut record = read_record(cache_root)?;
    if record.remove(name).is_none() {
        return Err(DuffelError::CachePackageNotFound {
            name: name.to_string(),
        });
    }
    write_record(cache_root, &record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::record::CacheRecord;
    use tempfile::TempDir;

    fn seeded_cache() -> TempDir {
        let temp = TempDir::new().unwrap();
        let mut record = CacheRecord::new();
        record.insert("requests".to_string(), "2.32.0".to_string());
        write_record(temp.path(), &record).unwrap();

        let pkg_dir = crate::cache::packages_dir(temp.path()).join("requests");
        fs::create_dir_all(&pkg_dir).unwrap();
        fs::write(pkg_dir.join("__init__.py"), "name = 'requests'\n").unwrap();
        temp
    }

    #[test]
    fn test_stats_counts_record_and_files() {
        let temp = seeded_cache();
        let stats = cache_stats(temp.path()).unwrap();
        assert_eq!(stats.packages, 1);
        assert_eq!(stats.files, 1);
        assert!(stats.total_size > 0);
    }

    #[test]
    fn test_stats_empty_cache() {
        let temp = TempDir::new().unwrap();
        let stats = cache_stats(temp.path()).unwrap();
        assert_eq!(stats.packages, 0);
        assert_eq!(stats.files, 0);
        assert_eq!(stats.total_size, 0);
    }

    #[test]
    fn test_formatted_size() {
        let stats = CacheStats {
            packages: 0,
            files: 0,
            total_size: 2048,
        };
        assert_eq!(stats.formatted_size(), "2.0 KB");
    }

    #[test]
    fn test_list_cached_packages() {
        let temp = seeded_cache();
        let packages = list_cached_packages(temp.path()).unwrap();
        assert_eq!(packages.len(), 1);
        assert_eq!(packages[0].name, "requests");
        assert_eq!(packages[0].version, "2.32.0");
    }

    #[test]
    fn test_clear_cache() {
        let temp = seeded_cache();
        clear_cache(temp.path()).unwrap();
        assert!(!crate::cache::packages_dir(temp.path()).exists());
        assert!(!crate::cache::record_path(temp.path()).exists());
    }

    #[test]
    fn test_forget_package() {
        let temp = seeded_cache();
        forget_package(temp.path(), "requests").unwrap();
        let record = read_record(temp.path()).unwrap();
        assert!(record.is_empty());
    }

    #[test]
    fn test_forget_unknown_package() {
        let temp = TempDir::new().unwrap();
        let result = forget_package(temp.path(), "nonexistent");
        assert!(matches!(
            result,
            Err(DuffelError::CachePackageNotFound { .. })
        ));
    }
}
