//! Dependency manifest (Pipfile) parsing
//!
//! The manifest is a TOML file whose `[packages]` table maps package names to
//! version constraints: `"*"` for unconstrained, or an exact version string.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{DuffelError, Result};

/// Version constraint for a single package
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionSpec {
    /// Any version (`"*"`)
    Any,
    /// An exact pinned version
    Exact(String),
}

impl VersionSpec {
    /// Parse a constraint string from the manifest
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed == "*" {
            VersionSpec::Any
        } else {
            VersionSpec::Exact(trimmed.to_string())
        }
    }

    /// Whether a previously recorded version still satisfies this constraint
    pub fn matches(&self, recorded: &str) -> bool {
        match self {
            VersionSpec::Any => true,
            VersionSpec::Exact(version) => recorded == version,
        }
    }
}

impl fmt::Display for VersionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionSpec::Any => write!(f, "*"),
            VersionSpec::Exact(version) => write!(f, "{}", version),
        }
    }
}

/// Parsed dependency manifest
#[derive(Debug, Clone, Default)]
pub struct Manifest {
    /// Package name -> version constraint, in name order
    pub packages: BTreeMap<String, VersionSpec>,
}

/// Raw manifest file shape; only the `[packages]` table is consumed
#[derive(Debug, Deserialize)]
struct ManifestFile {
    #[serde(default)]
    packages: BTreeMap<String, toml::Value>,
}

impl Manifest {
    /// Load a manifest file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(DuffelError::ManifestNotFound {
                path: path.display().to_string(),
            });
        }

        let content = fs::read_to_string(path).map_err(|e| DuffelError::FileReadFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        Self::from_toml(&content).map_err(|e| match e {
            DuffelError::ManifestParseFailed { reason, .. } => DuffelError::ManifestParseFailed {
                path: path.display().to_string(),
                reason,
            },
            other => other,
        })
    }

    /// Parse a manifest from a TOML string
    pub fn from_toml(content: &str) -> Result<Self> {
        let raw: ManifestFile = toml::from_str(content)?;

        let mut packages = BTreeMap::new();
        for (name, value) in raw.packages {
            let constraint = match value {
                toml::Value::String(s) => VersionSpec::parse(&s),
                other => {
                    return Err(DuffelError::ManifestInvalid {
                        message: format!(
                            "package '{}' has a non-string constraint: {}",
                            name, other
                        ),
                    });
                }
            };
            packages.insert(name, constraint);
        }

        Ok(Self { packages })
    }

    /// Number of packages in the manifest
    pub fn len(&self) -> usize {
        self.packages.len()
    }

    /// Whether the manifest names no packages
    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}
