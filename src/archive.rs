//! Deflate zip archive writing
//!
//! Dependency files are written first, named by their path relative to the
//! package cache root; source files follow, flattened to their base name so
//! the bundled modules import each other from one namespace level. Two inputs
//! flattening to the same internal name abort the run. The archive is written
//! to a temporary file and renamed into place only on success, so a failed run
//! never leaves a partial archive at the output path.

use std::collections::BTreeSet;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::{DuffelError, Result};
use crate::minify::{self, Minifier};
use crate::progress::{self, FileProgress};

/// Write the bundle archive
///
/// Each source file is minified in place first when a minifier is supplied,
/// and its staged copy is deleted once archived.
pub fn write_bundle(
    packages_dir: &Path,
    dependency_files: &[PathBuf],
    source_files: &[PathBuf],
    archive_path: &Path,
    compression_level: u32,
    minifier: Option<&dyn Minifier>,
    progress: &FileProgress,
) -> Result<()> {
    let output_dir = archive_path.parent().unwrap_or_else(|| Path::new("."));

    let temp = NamedTempFile::new_in(output_dir).map_err(|e| DuffelError::ArchiveWriteFailed {
        path: archive_path.display().to_string(),
        reason: format!("failed to create temporary archive: {}", e),
    })?;
    let temp_file = temp.reopen().map_err(|e| DuffelError::ArchiveWriteFailed {
        path: archive_path.display().to_string(),
        reason: e.to_string(),
    })?;

    let mut writer = ZipWriter::new(temp_file);
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .compression_level(Some(i64::from(compression_level)));

    let mut seen = BTreeSet::new();

    progress::phase("Bundling packages");
    for file in dependency_files {
        let relative =
            file.strip_prefix(packages_dir)
                .map_err(|_| DuffelError::CacheOperationFailed {
                    message: format!(
                        "dependency file {} is outside the package cache",
                        file.display()
                    ),
                })?;
        let entry_name = archive_entry_name(relative);
        add_file(&mut writer, archive_path, file, &entry_name, options, &mut seen)?;
        progress.archived(&entry_name);
    }

    progress::phase("Bundling source files");
    for file in source_files {
        if let Some(minifier) = minifier {
            minify::minify_file(minifier, file)?;
        }

        let entry_name = file
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .ok_or_else(|| DuffelError::FileReadFailed {
                path: file.display().to_string(),
                reason: "source path has no file name".to_string(),
            })?;
        add_file(&mut writer, archive_path, file, &entry_name, options, &mut seen)?;
        progress.archived(&entry_name);

        // Clean up the staged copy; the archive now owns the content
        fs::remove_file(file).map_err(|e| DuffelError::FileWriteFailed {
            path: file.display().to_string(),
            reason: e.to_string(),
        })?;
    }

    writer.finish().map_err(|e| DuffelError::ArchiveWriteFailed {
        path: archive_path.display().to_string(),
        reason: e.to_string(),
    })?;

    temp.persist(archive_path)
        .map_err(|e| DuffelError::ArchiveWriteFailed {
            path: archive_path.display().to_string(),
            reason: e.to_string(),
        })?;

    Ok(())
}

fn add_file(
    writer: &mut ZipWriter<File>,
    archive_path: &Path,
    file: &Path,
    entry_name: &str,
    options: SimpleFileOptions,
    seen: &mut BTreeSet<String>,
) -> Result<()> {
    if !seen.insert(entry_name.to_string()) {
        return Err(DuffelError::DuplicateArchiveEntry {
            name: entry_name.to_string(),
        });
    }

    writer
        .start_file(entry_name, options)
        .map_err(|e| DuffelError::ArchiveWriteFailed {
            path: archive_path.display().to_string(),
            reason: e.to_string(),
        })?;

    let mut input = File::open(file).map_err(|e| DuffelError::FileReadFailed {
        path: file.display().to_string(),
        reason: e.to_string(),
    })?;

    io::copy(&mut input, writer).map_err(|e| DuffelError::ArchiveWriteFailed {
        path: archive_path.display().to_string(),
        reason: e.to_string(),
    })?;

    Ok(())
}

/// Internal archive name for a cache-relative path, with forward slashes on
/// every platform
fn archive_entry_name(relative: &Path) -> String {
    relative.to_string_lossy().replace('\\', "/")
}
