//! Common test utilities for Duffel integration tests

use std::path::PathBuf;
use tempfile::TempDir;

/// A throwaway project directory for integration tests
pub struct TestProject {
    /// Temporary directory
    #[allow(dead_code)]
    pub temp: TempDir,
    /// Path to project root
    pub path: PathBuf,
}

impl TestProject {
    /// Create a new test project
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().to_path_buf();
        Self { temp, path }
    }

    /// Write a file in the project, creating parent directories
    pub fn write_file(&self, path: &str, content: &str) {
        let file_path = self.path.join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
    }

    /// Check if a file exists in the project
    #[allow(dead_code)]
    pub fn file_exists(&self, path: &str) -> bool {
        self.path.join(path).exists()
    }

    /// Write a bundle configuration with the given options
    pub fn write_config(&self, compression_level: u32, minification: bool) {
        self.write_file(
            "duffel.config.json",
            &format!(
                r#"{{
    "sourceDirectory": "./src",
    "outputDirectory": "./out",
    "outputFileName": "bundle.zip",
    "compressionLevel": {},
    "minification": {}
}}"#,
                compression_level, minification
            ),
        );
    }

    /// Write a manifest with the given `[packages]` entries
    pub fn write_manifest(&self, packages: &[(&str, &str)]) {
        let mut content = String::from("[packages]\n");
        for (name, constraint) in packages {
            content.push_str(&format!("{} = \"{}\"\n", name, constraint));
        }
        self.write_file("Pipfile", &content);
    }

    /// Seed the cache directory with a fake installed package so bundle runs
    /// need no installer
    pub fn seed_cache(&self, package: &str, version: &str, files: &[(&str, &str)]) {
        let cache_root = self.path.join("cache");
        let packages_dir = cache_root.join("cachedPackages");
        for (rel, content) in files {
            let file_path = packages_dir.join(rel);
            if let Some(parent) = file_path.parent() {
                std::fs::create_dir_all(parent).expect("Failed to create package directory");
            }
            std::fs::write(&file_path, content).expect("Failed to write package file");
        }

        let record_path = cache_root.join("dependencies.json");
        let existing = std::fs::read_to_string(&record_path).unwrap_or_else(|_| "{}".to_string());
        let mut record: serde_json::Value =
            serde_json::from_str(&existing).expect("Failed to parse record");
        record[package] = serde_json::Value::String(version.to_string());
        std::fs::create_dir_all(&cache_root).expect("Failed to create cache root");
        std::fs::write(
            &record_path,
            serde_json::to_string_pretty(&record).expect("Failed to serialize record"),
        )
        .expect("Failed to write record");
    }

    /// Cache directory used by this project's bundle runs
    pub fn cache_dir(&self) -> PathBuf {
        self.path.join("cache")
    }

    /// Names of the entries in the produced archive
    pub fn archive_entries(&self) -> Vec<String> {
        let file = std::fs::File::open(self.path.join("out/bundle.zip"))
            .expect("Failed to open archive");
        let archive = zip::ZipArchive::new(file).expect("Failed to read archive");
        let mut names: Vec<String> = archive.file_names().map(String::from).collect();
        names.sort();
        names
    }

    /// Content of one archive entry
    pub fn archive_entry(&self, name: &str) -> String {
        use std::io::Read;
        let file = std::fs::File::open(self.path.join("out/bundle.zip"))
            .expect("Failed to open archive");
        let mut archive = zip::ZipArchive::new(file).expect("Failed to read archive");
        let mut entry = archive.by_name(name).expect("Entry not found");
        let mut content = String::new();
        entry
            .read_to_string(&mut content)
            .expect("Failed to read entry");
        content
    }
}
