//! Error types and handling for Duffel
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for Duffel operations
#[derive(Error, Diagnostic, Debug)]
pub enum DuffelError {
    // Configuration errors
    #[error("Configuration file not found: {path}")]
    #[diagnostic(
        code(duffel::config::not_found),
        help("Create a duffel.config.json or pass --config with the file's location")
    )]
    ConfigNotFound { path: String },

    #[error("Failed to read configuration file: {path}")]
    #[diagnostic(code(duffel::config::read_failed))]
    ConfigReadFailed { path: String, reason: String },

    #[error("Failed to parse configuration file: {path}")]
    #[diagnostic(code(duffel::config::parse_failed))]
    ConfigParseFailed { path: String, reason: String },

    #[error("Invalid configuration: {message}")]
    #[diagnostic(code(duffel::config::invalid))]
    ConfigInvalid { message: String },

    // Manifest errors
    #[error("Manifest file not found: {path}")]
    #[diagnostic(
        code(duffel::manifest::not_found),
        help("Create a Pipfile with a [packages] table or pass --manifest")
    )]
    ManifestNotFound { path: String },

    #[error("Failed to parse manifest file: {path}")]
    #[diagnostic(code(duffel::manifest::parse_failed))]
    ManifestParseFailed { path: String, reason: String },

    #[error("Invalid manifest: {message}")]
    #[diagnostic(
        code(duffel::manifest::invalid),
        help("Package constraints must be \"*\" or an exact version string")
    )]
    ManifestInvalid { message: String },

    // Resolution errors
    #[error("Failed to install package '{package}' ({constraint})")]
    #[diagnostic(
        code(duffel::resolve::install_failed),
        help("Check that the package name is correct and the installer is on PATH")
    )]
    ResolveFailed {
        package: String,
        constraint: String,
        reason: String,
    },

    // Archive errors
    #[error("Duplicate archive entry: {name}")]
    #[diagnostic(
        code(duffel::archive::duplicate_entry),
        help(
            "Two input files flatten to the same archive name; rename one of them before bundling"
        )
    )]
    DuplicateArchiveEntry { name: String },

    #[error("Failed to write archive: {path}")]
    #[diagnostic(code(duffel::archive::write_failed))]
    ArchiveWriteFailed { path: String, reason: String },

    // Cache errors
    #[error("Cache operation failed: {message}")]
    #[diagnostic(code(duffel::cache::operation_failed))]
    CacheOperationFailed { message: String },

    #[error("Package not found in cache: {name}")]
    #[diagnostic(code(duffel::cache::package_not_found))]
    CachePackageNotFound { name: String },

    // File system errors
    #[error("Source directory not found: {path}")]
    #[diagnostic(
        code(duffel::fs::source_dir_missing),
        help("Check the sourceDirectory value in your configuration")
    )]
    SourceDirMissing { path: String },

    #[error("Failed to read file: {path}")]
    #[diagnostic(code(duffel::fs::read_failed))]
    FileReadFailed { path: String, reason: String },

    #[error("Failed to write file: {path}")]
    #[diagnostic(code(duffel::fs::write_failed))]
    FileWriteFailed { path: String, reason: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(duffel::fs::io_error))]
    IoError { message: String },
}

impl From<std::io::Error> for DuffelError {
    fn from(err: std::io::Error) -> Self {
        DuffelError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for DuffelError {
    fn from(err: serde_json::Error) -> Self {
        DuffelError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for DuffelError {
    fn from(err: toml::de::Error) -> Self {
        DuffelError::ManifestParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, DuffelError>;
