//! Dependency resolution against the local cache
//!
//! Resolution walks the manifest in name order and installs every package the
//! resolution record does not already satisfy. The actual installer is a
//! capability behind the [`PackageInstaller`] trait so it can be swapped or
//! mocked; the default implementation shells out to `pip install --target`.

use std::path::Path;
use std::process::Command;

use crate::cache::{self, CacheRecord};
use crate::error::{DuffelError, Result};
use crate::manifest::{Manifest, VersionSpec};
use crate::progress;

/// Capability for installing one package into a target directory
///
/// Returns the version that was installed, which resolution records so later
/// runs can decide whether the package is already satisfied.
pub trait PackageInstaller {
    fn install(&self, name: &str, spec: &VersionSpec, target: &Path) -> Result<String>;
}

/// Installer that shells out to `pip install --quiet --target <dir>`
pub struct PipInstaller;

impl PackageInstaller for PipInstaller {
    fn install(&self, name: &str, spec: &VersionSpec, target: &Path) -> Result<String> {
        let requirement = match spec {
            VersionSpec::Any => name.to_string(),
            VersionSpec::Exact(version) => format!("{}=={}", name, version),
        };

        let output = Command::new("pip")
            .args(["install", &requirement, "--quiet", "--target"])
            .arg(target)
            .output()
            .map_err(|e| DuffelError::ResolveFailed {
                package: name.to_string(),
                constraint: spec.to_string(),
                reason: format!("failed to run pip: {}", e),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(DuffelError::ResolveFailed {
                package: name.to_string(),
                constraint: spec.to_string(),
                reason: stderr.trim().to_string(),
            });
        }

        // The record wants the installed version; fall back to the constraint
        // string when no dist-info can be matched (mirrors an unconstrained
        // record entry of "*").
        Ok(installed_version(target, name).unwrap_or_else(|| spec.to_string()))
    }
}

/// Summary of a resolution pass
#[derive(Debug, Default)]
pub struct ResolveOutcome {
    /// Packages installed this run, with the versions recorded for them
    pub installed: Vec<(String, String)>,
    /// Packages already satisfied by the record
    pub reused: usize,
}

/// Resolve a manifest against the cache, installing what the record lacks
///
/// A package is (re)installed iff its name is absent from the record or an
/// exact constraint no longer matches the recorded version. The record is
/// persisted after each successful install, so an aborted run keeps the
/// packages it already resolved.
pub fn resolve(
    manifest: &Manifest,
    cache_root: &Path,
    installer: &dyn PackageInstaller,
) -> Result<ResolveOutcome> {
    let packages_dir = cache::packages_dir(cache_root);
    std::fs::create_dir_all(&packages_dir).map_err(|e| DuffelError::CacheOperationFailed {
        message: format!(
            "Failed to create package directory {}: {}",
            packages_dir.display(),
            e
        ),
    })?;

    let mut record: CacheRecord = cache::read_record(cache_root)?;
    let mut outcome = ResolveOutcome::default();

    for (name, spec) in &manifest.packages {
        let satisfied = record
            .get(name)
            .is_some_and(|recorded| spec.matches(recorded));
        if satisfied {
            outcome.reused += 1;
            continue;
        }

        progress::detail(&format!("Installing {}", name));
        let version = installer.install(name, spec, &packages_dir)?;
        record.insert(name.clone(), version.clone());
        cache::write_record(cache_root, &record)?;
        outcome.installed.push((name.clone(), version));
    }

    Ok(outcome)
}

/// Find the installed version of a package by scanning `.dist-info` directories
fn installed_version(target: &Path, name: &str) -> Option<String> {
    let entries = std::fs::read_dir(target).ok()?;
    let wanted = normalize_name(name);

    for entry in entries.filter_map(|e| e.ok()) {
        let file_name = entry.file_name();
        let dir_name = file_name.to_string_lossy();
        let Some(stem) = dir_name.strip_suffix(".dist-info") else {
            continue;
        };
        // dist-info directories are named `<name>-<version>`
        let Some((pkg, version)) = stem.rsplit_once('-') else {
            continue;
        };
        if normalize_name(pkg) == wanted {
            return Some(version.to_string());
        }
    }
    None
}

/// PEP 503 name normalization: lowercase, runs of `-`, `_`, `.` become `-`
fn normalize_name(name: &str) -> String {
    let mut normalized = String::with_capacity(name.len());
    let mut last_was_sep = false;
    for c in name.chars() {
        if c == '-' || c == '_' || c == '.' {
            if !last_was_sep {
                normalized.push('-');
            }
            last_was_sep = true;
        } else {
            normalized.extend(c.to_lowercase());
            last_was_sep = false;
        }
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::fs;
    use tempfile::TempDir;

    /// Installer that records calls and fakes an installed tree
    struct MockInstaller {
        calls: RefCell<Vec<String>>,
        version: String,
        fail_on: Option<String>,
    }

    impl MockInstaller {
        fn new(version: &str) -> Self {
            Self {
                calls: RefCell::new(Vec::new()),
                version: version.to_string(),
                fail_on: None,
            }
        }

        fn failing_on(name: &str) -> Self {
            Self {
                calls: RefCell::new(Vec::new()),
                version: "0.0.0".to_string(),
                fail_on: Some(name.to_string()),
            }
        }
    }

    impl PackageInstaller for MockInstaller {
        fn install(&self, name: &str, spec: &VersionSpec, target: &Path) -> Result<String> {
            self.calls.borrow_mut().push(name.to_string());
            if self.fail_on.as_deref() == Some(name) {
                return Err(DuffelError::ResolveFailed {
                    package: name.to_string(),
                    constraint: spec.to_string(),
                    reason: "mock failure".to_string(),
                });
            }
            fs::create_dir_all(target.join(name)).unwrap();
            fs::write(target.join(name).join("__init__.py"), "").unwrap();
            Ok(self.version.clone())
        }
    }

    fn manifest(entries: &[(&str, &str)]) -> Manifest {
        let mut packages = std::collections::BTreeMap::new();
        for (name, constraint) in entries {
            packages.insert(name.to_string(), VersionSpec::parse(constraint));
        }
        Manifest { packages }
    }

    #[test]
    fn test_cold_cache_installs_everything() {
        let temp = TempDir::new().unwrap();
        let installer = MockInstaller::new("1.0.0");
        let manifest = manifest(&[("requests", "*"), ("rich", "13.7.1")]);

        let outcome = resolve(&manifest, temp.path(), &installer).unwrap();
        assert_eq!(outcome.installed.len(), 2);
        assert_eq!(outcome.reused, 0);
        assert_eq!(*installer.calls.borrow(), vec!["requests", "rich"]);

        let record = cache::read_record(temp.path()).unwrap();
        assert_eq!(record.len(), 2);
        assert_eq!(record["requests"], "1.0.0");
    }

    #[test]
    fn test_warm_cache_installs_nothing() {
        let temp = TempDir::new().unwrap();
        let installer = MockInstaller::new("1.0.0");
        let manifest = manifest(&[("requests", "*")]);

        resolve(&manifest, temp.path(), &installer).unwrap();
        let outcome = resolve(&manifest, temp.path(), &installer).unwrap();

        assert_eq!(outcome.installed.len(), 0);
        assert_eq!(outcome.reused, 1);
        assert_eq!(installer.calls.borrow().len(), 1);
    }

    #[test]
    fn test_partially_populated_record_installs_only_missing() {
        let temp = TempDir::new().unwrap();
        let mut record = CacheRecord::new();
        record.insert("requests".to_string(), "2.32.0".to_string());
        cache::write_record(temp.path(), &record).unwrap();

        let installer = MockInstaller::new("1.0.0");
        let manifest = manifest(&[("requests", "*"), ("rich", "*")]);

        let outcome = resolve(&manifest, temp.path(), &installer).unwrap();
        assert_eq!(outcome.installed, vec![("rich".to_string(), "1.0.0".to_string())]);
        assert_eq!(outcome.reused, 1);
        assert_eq!(*installer.calls.borrow(), vec!["rich"]);
    }

    #[test]
    fn test_changed_pin_reinstalls() {
        let temp = TempDir::new().unwrap();
        let mut record = CacheRecord::new();
        record.insert("rich".to_string(), "13.0.0".to_string());
        cache::write_record(temp.path(), &record).unwrap();

        let installer = MockInstaller::new("13.7.1");
        let manifest = manifest(&[("rich", "13.7.1")]);

        let outcome = resolve(&manifest, temp.path(), &installer).unwrap();
        assert_eq!(outcome.installed.len(), 1);

        let record = cache::read_record(temp.path()).unwrap();
        assert_eq!(record["rich"], "13.7.1");
    }

    #[test]
    fn test_install_failure_aborts_and_names_package() {
        let temp = TempDir::new().unwrap();
        let installer = MockInstaller::failing_on("rich");
        let manifest = manifest(&[("requests", "*"), ("rich", "*")]);

        let result = resolve(&manifest, temp.path(), &installer);
        match result {
            Err(DuffelError::ResolveFailed { package, .. }) => assert_eq!(package, "rich"),
            other => panic!("Expected ResolveFailed, got {:?}", other),
        }

        // Packages resolved before the failure stay recorded
        let record = cache::read_record(temp.path()).unwrap();
        assert_eq!(record.len(), 1);
        assert!(record.contains_key("requests"));
    }

    #[test]
    fn test_installed_version_from_dist_info() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("charset_normalizer-3.4.0.dist-info")).unwrap();

        assert_eq!(
            installed_version(temp.path(), "charset-normalizer"),
            Some("3.4.0".to_string())
        );
        assert_eq!(installed_version(temp.path(), "requests"), None);
    }

    #[test]
    fn test_normalize_name() {
        assert_eq!(normalize_name("Charset_Normalizer"), "charset-normalizer");
        assert_eq!(normalize_name("zope.interface"), "zope-interface");
        assert_eq!(normalize_name("a--b__c"), "a-b-c");
    }
}
