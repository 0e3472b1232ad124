//! Filesystem operations for staging the bundle
//!
//! The output directory is wiped and recreated at the start of every run, then
//! seeded with a full copy of the source directory. Archived source files are
//! deleted from the staging copy afterwards; anything else copied here stays.

use std::fs;
use std::path::Path;

use crate::error::{DuffelError, Result};

/// Remove a directory tree if present and recreate it empty
pub fn reset_dir(dir: &Path) -> Result<()> {
    if dir.exists() {
        fs::remove_dir_all(dir).map_err(|e| DuffelError::FileWriteFailed {
            path: dir.display().to_string(),
            reason: e.to_string(),
        })?;
    }
    fs::create_dir_all(dir).map_err(|e| DuffelError::FileWriteFailed {
        path: dir.display().to_string(),
        reason: e.to_string(),
    })?;
    Ok(())
}

/// Recursively copy a directory's contents into an existing directory
pub fn copy_dir_recursive(source: &Path, target: &Path) -> Result<()> {
    let entries = fs::read_dir(source).map_err(|e| DuffelError::FileReadFailed {
        path: source.display().to_string(),
        reason: e.to_string(),
    })?;

    for entry in entries {
        let entry = entry.map_err(|e| DuffelError::FileReadFailed {
            path: source.display().to_string(),
            reason: e.to_string(),
        })?;

        let source_path = entry.path();
        let target_path = target.join(entry.file_name());

        if source_path.is_dir() {
            fs::create_dir_all(&target_path).map_err(|e| DuffelError::FileWriteFailed {
                path: target_path.display().to_string(),
                reason: e.to_string(),
            })?;
            copy_dir_recursive(&source_path, &target_path)?;
        } else {
            fs::copy(&source_path, &target_path).map_err(|e| DuffelError::FileWriteFailed {
                path: target_path.display().to_string(),
                reason: e.to_string(),
            })?;
        }
    }

    Ok(())
}
