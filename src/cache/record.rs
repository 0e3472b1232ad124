//! Resolution record management
//!
//! The record is a JSON object mapping package names to the version last
//! installed into the cache. A missing record is treated as empty; a malformed
//! record is recoverable and resets to empty rather than aborting resolution.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::error::{DuffelError, Result};

/// Package name -> installed version, in name order
pub type CacheRecord = BTreeMap<String, String>;

/// Read the resolution record from a cache root
pub fn read_record(cache_root: &Path) -> Result<CacheRecord> {
    let record_path = super::record_path(cache_root);

    if !record_path.exists() {
        return Ok(CacheRecord::new());
    }

    let content =
        fs::read_to_string(&record_path).map_err(|e| DuffelError::CacheOperationFailed {
            message: format!("Failed to read record file {}: {}", record_path.display(), e),
        })?;

    // A corrupt record is not fatal; resolution starts over from an empty one
    match serde_json::from_str(&content) {
        Ok(record) => Ok(record),
        Err(_) => Ok(CacheRecord::new()),
    }
}

/// Write the resolution record to a cache root
pub fn write_record(cache_root: &Path, record: &CacheRecord) -> Result<()> {
    fs::create_dir_all(cache_root).map_err(|e| DuffelError::CacheOperationFailed {
        message: format!(
            "Failed to create cache directory {}: {}",
            cache_root.display(),
            e
        ),
    })?;

    let record_path = super::record_path(cache_root);

    let content =
        serde_json::to_string_pretty(record).map_err(|e| DuffelError::CacheOperationFailed {
            message: format!("Failed to serialize record: {}", e),
        })?;

    fs::write(&record_path, content).map_err(|e| DuffelError::CacheOperationFailed {
        message: format!(
            "Failed to write record file {}: {}",
            record_path.display(),
            e
        ),
    })?;

    Ok(())
}
