//! Candidate file collection for the archive
//!
//! Two disjoint sets feed the archive writer: every file under the extracted
//! package trees (minus build artifacts), and the top-level `.py` files of the
//! staged source directory. Both are returned sorted so the archive entry
//! order is deterministic across runs.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{DuffelError, Result};

/// Path components that mark compiled-bytecode caches
const EXCLUDED_DIR_MARKERS: &[&str] = &["__pycache__"];

/// Extensions of compiled artifacts that never belong in a bundle
const EXCLUDED_EXTENSIONS: &[&str] = &["pyc", "pyd"];

/// File names excluded outright: a platform executable shipped by
/// charset-normalizer, and PEP 561 type markers
const EXCLUDED_FILE_NAMES: &[&str] = &["normalizer.exe", "py.typed"];

/// Suffix of distribution-metadata directories
const DIST_INFO_SUFFIX: &str = ".dist-info";

/// Collect every bundleable file under the extracted package trees
pub fn dependency_files(packages_dir: &Path) -> Result<Vec<PathBuf>> {
    if !packages_dir.exists() {
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(packages_dir) {
        let entry = entry.map_err(|e| DuffelError::CacheOperationFailed {
            message: format!(
                "Failed to walk package directory {}: {}",
                packages_dir.display(),
                e
            ),
        })?;

        if !entry.file_type().is_file() {
            continue;
        }
        if is_excluded(entry.path()) {
            continue;
        }
        files.push(entry.into_path());
    }

    files.sort();
    Ok(files)
}

/// Collect the top-level `.py` files of the staged source directory
pub fn source_files(staging_dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(staging_dir).map_err(|e| DuffelError::FileReadFailed {
        path: staging_dir.display().to_string(),
        reason: e.to_string(),
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| DuffelError::FileReadFailed {
            path: staging_dir.display().to_string(),
            reason: e.to_string(),
        })?;

        let path = entry.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "py") {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

/// Whether a dependency path matches an exclusion marker
fn is_excluded(path: &Path) -> bool {
    for component in path.components() {
        let name = component.as_os_str().to_string_lossy();
        if EXCLUDED_DIR_MARKERS.contains(&name.as_ref()) || name.ends_with(DIST_INFO_SUFFIX) {
            return true;
        }
    }

    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        if EXCLUDED_EXTENSIONS.contains(&ext) {
            return true;
        }
    }

    path.file_name()
        .map(|n| n.to_string_lossy())
        .is_some_and(|name| EXCLUDED_FILE_NAMES.contains(&name.as_ref()))
}
