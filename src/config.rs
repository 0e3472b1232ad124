//! Bundle configuration (duffel.config.json) data structures
//!
//! The configuration is an explicit struct passed into the pipeline entry
//! point; nothing is read from module-level state.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{DuffelError, Result};

/// Highest zip compression level accepted by the deflate encoder
pub const MAX_COMPRESSION_LEVEL: u32 = 9;

fn default_compression_level() -> u32 {
    6
}

/// Bundle configuration (duffel.config.json)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleConfig {
    /// Directory holding the project's source files
    pub source_directory: PathBuf,

    /// Directory the archive (and staged source copies) are written into
    pub output_directory: PathBuf,

    /// File name of the archive inside the output directory
    pub output_file_name: String,

    /// Deflate compression level, 0 (fastest) to 9 (smallest)
    #[serde(default = "default_compression_level")]
    pub compression_level: u32,

    /// Minify source files before archiving them
    #[serde(default)]
    pub minification: bool,
}

impl BundleConfig {
    /// Load and validate a configuration file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(DuffelError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let content = fs::read_to_string(path).map_err(|e| DuffelError::ConfigReadFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let config: Self =
            serde_json::from_str(&content).map_err(|e| DuffelError::ConfigParseFailed {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;

        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.output_file_name.trim().is_empty() {
            return Err(DuffelError::ConfigInvalid {
                message: "outputFileName must not be empty".to_string(),
            });
        }
        if self.output_file_name.contains('/') || self.output_file_name.contains('\\') {
            return Err(DuffelError::ConfigInvalid {
                message: format!(
                    "outputFileName must be a plain file name, got '{}'",
                    self.output_file_name
                ),
            });
        }
        if self.compression_level > MAX_COMPRESSION_LEVEL {
            return Err(DuffelError::ConfigInvalid {
                message: format!(
                    "compressionLevel must be between 0 and {}, got {}",
                    MAX_COMPRESSION_LEVEL, self.compression_level
                ),
            });
        }
        Ok(())
    }

    /// Full path of the archive this configuration produces
    pub fn archive_path(&self) -> PathBuf {
        self.output_directory.join(&self.output_file_name)
    }
}
