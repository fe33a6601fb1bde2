#![allow(dead_code)]

use std::fs;
use std::path::Path;

use tempfile::TempDir;

/// Creates an `assert_cmd` Command for the workers-compat binary.
#[macro_export]
macro_rules! workers_compat {
    () => {
        assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("workers-compat"))
    };
}

/// Temporary project directory for integration tests.
pub struct TestFixture {
    pub dir: TempDir,
}

impl TestFixture {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Creates a file, and any missing parent directories, in the project.
    pub fn create_file(&self, relative_path: &str, content: &str) {
        let path = self.dir.path().join(relative_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        fs::write(&path, content).expect("Failed to write file");
    }

    pub fn create_bytes(&self, relative_path: &str, content: &[u8]) {
        let path = self.dir.path().join(relative_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        fs::write(&path, content).expect("Failed to write file");
    }

    pub fn create_dir(&self, relative_path: &str) {
        let path = self.dir.path().join(relative_path);
        fs::create_dir_all(&path).expect("Failed to create directory");
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Writes `.workers-compat.toml` at the project root.
    pub fn create_config(&self, content: &str) {
        self.create_file(".workers-compat.toml", content);
    }

    /// Writes a `package.json` with the given runtime dependencies.
    pub fn create_package_json(&self, dependencies: &[(&str, &str)]) {
        let deps = dependencies
            .iter()
            .map(|(name, version)| format!("    \"{name}\": \"{version}\""))
            .collect::<Vec<_>>()
            .join(",\n");
        self.create_file(
            "package.json",
            &format!("{{\n  \"name\": \"fixture\",\n  \"dependencies\": {{\n{deps}\n  }}\n}}\n"),
        );
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}
