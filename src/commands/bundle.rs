//! Bundle command implementation
//!
//! Runs the whole pipeline: stage the source tree into the output directory,
//! resolve the manifest against the cache, collect candidate files, and write
//! the archive.

use std::time::Instant;

use crate::archive;
use crate::cache;
use crate::cli::BundleArgs;
use crate::collect;
use crate::config::BundleConfig;
use crate::error::{DuffelError, Result};
use crate::fsops;
use crate::manifest::Manifest;
use crate::minify::{Minifier, SourceCompactor};
use crate::progress::{self, FileProgress};
use crate::resolver::{self, PipInstaller};

/// Run bundle command
pub fn run(args: BundleArgs) -> Result<()> {
    let config = BundleConfig::load(&args.config)?;
    let manifest = Manifest::load(&args.manifest)?;
    run_pipeline(&config, &manifest, &PipInstaller)
}

/// Execute the bundling pipeline with an explicit configuration and installer
pub fn run_pipeline(
    config: &BundleConfig,
    manifest: &Manifest,
    installer: &dyn resolver::PackageInstaller,
) -> Result<()> {
    let start = Instant::now();

    if !config.source_directory.is_dir() {
        return Err(DuffelError::SourceDirMissing {
            path: config.source_directory.display().to_string(),
        });
    }

    // Stage a fresh copy of the source tree into the output directory
    fsops::reset_dir(&config.output_directory)?;
    fsops::copy_dir_recursive(&config.source_directory, &config.output_directory)?;

    let cache_root = cache::cache_dir();

    progress::phase("Resolving dependencies");
    let outcome = resolver::resolve(manifest, &cache_root, installer)?;
    if outcome.reused > 0 {
        progress::detail(&format!("{} package(s) already cached", outcome.reused));
    }

    let packages_dir = cache::packages_dir(&cache_root);
    let dependency_files = collect::dependency_files(&packages_dir)?;
    let source_files = collect::source_files(&config.output_directory)?;

    let minifier: Option<&dyn Minifier> = if config.minification {
        Some(&SourceCompactor)
    } else {
        None
    };

    let file_progress =
        FileProgress::new((dependency_files.len() + source_files.len()) as u64);
    let written = archive::write_bundle(
        &packages_dir,
        &dependency_files,
        &source_files,
        &config.archive_path(),
        config.compression_level,
        minifier,
        &file_progress,
    );
    match written {
        Ok(()) => file_progress.finish(),
        Err(e) => {
            file_progress.abandon();
            return Err(e);
        }
    }

    println!(
        "Bundled {} into {} in {:.2}s",
        pluralize(dependency_files.len() + source_files.len(), "file"),
        config.archive_path().display(),
        start.elapsed().as_secs_f64()
    );

    Ok(())
}

fn pluralize(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{} {}", count, noun)
    } else {
        format!("{} {}s", count, noun)
    }
}
