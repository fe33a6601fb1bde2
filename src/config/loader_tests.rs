use std::collections::HashMap;
use std::io::{Error, ErrorKind};
use std::path::{Path, PathBuf};

use super::*;

struct MockFileSystem {
    files: HashMap<PathBuf, String>,
}

impl MockFileSystem {
    fn new() -> Self {
        Self {
            files: HashMap::new(),
        }
    }

    fn with_file(mut self, path: impl Into<PathBuf>, content: &str) -> Self {
        self.files.insert(path.into(), content.to_string());
        self
    }
}

impl FileSystem for MockFileSystem {
    fn read_to_string(&self, path: &Path) -> std::io::Result<String> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| Error::new(ErrorKind::NotFound, "file not found"))
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }
}

#[test]
fn load_without_config_file_returns_defaults() {
    let loader = FileConfigLoader::with_fs(MockFileSystem::new());
    let result = loader.load(Path::new("/project")).unwrap();

    assert_eq!(result.config, Config::default());
    assert!(result.source.is_none());
}

#[test]
fn load_discovers_config_in_project_root() {
    let fs = MockFileSystem::new().with_file(
        "/project/.workers-compat.toml",
        r#"
[scanner]
extensions = ["ts"]
"#,
    );
    let loader = FileConfigLoader::with_fs(fs);
    let result = loader.load(Path::new("/project")).unwrap();

    assert_eq!(result.config.scanner.extensions, vec!["ts".to_string()]);
    assert_eq!(
        result.source,
        Some(PathBuf::from("/project/.workers-compat.toml"))
    );
}

#[test]
fn load_ignores_config_outside_project_root() {
    let fs = MockFileSystem::new().with_file(
        "/elsewhere/.workers-compat.toml",
        "[scanner]\nextensions = [\"ts\"]\n",
    );
    let loader = FileConfigLoader::with_fs(fs);
    let result = loader.load(Path::new("/project")).unwrap();

    assert!(result.source.is_none());
}

#[test]
fn load_from_path_reads_explicit_file() {
    let fs = MockFileSystem::new().with_file(
        "/configs/strict.toml",
        r#"
version = "1"

[rules]
disable = ["console-logging"]
"#,
    );
    let loader = FileConfigLoader::with_fs(fs);
    let result = loader
        .load_from_path(Path::new("/configs/strict.toml"))
        .unwrap();

    assert_eq!(result.config.rules.disable, vec!["console-logging".to_string()]);
}

#[test]
fn load_from_missing_path_is_config_error() {
    let loader = FileConfigLoader::with_fs(MockFileSystem::new());
    let err = loader
        .load_from_path(Path::new("/configs/missing.toml"))
        .unwrap_err();

    assert!(matches!(err, CompatError::Config(_)));
    assert!(err.to_string().contains("missing.toml"));
}

#[test]
fn invalid_toml_is_parse_error() {
    let fs = MockFileSystem::new().with_file("/project/.workers-compat.toml", "[scanner\n");
    let loader = FileConfigLoader::with_fs(fs);
    let err = loader.load(Path::new("/project")).unwrap_err();

    assert!(matches!(err, CompatError::TomlParse(_)));
}

#[test]
fn unsupported_version_is_rejected_on_load() {
    let fs = MockFileSystem::new().with_file("/project/.workers-compat.toml", "version = \"9\"\n");
    let loader = FileConfigLoader::with_fs(fs);
    let err = loader.load(Path::new("/project")).unwrap_err();

    assert!(err.to_string().contains("Unsupported config version"));
}
