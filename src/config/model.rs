use serde::{Deserialize, Serialize};

use crate::rules::{Category, RuleScope};

/// Supported config version.
pub const CONFIG_VERSION: &str = "1";

/// Files larger than this are skipped rather than scanned (10 MB).
pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// Config format version. `None` means current.
    #[serde(default)]
    pub version: Option<String>,

    #[serde(default)]
    pub scanner: ScannerConfig,

    #[serde(default)]
    pub rules: RulesConfig,
}

/// Which files make up the corpus.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScannerConfig {
    /// Source file extensions (without the dot).
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Dependency manifest file names, scanned by manifest-scoped rules.
    #[serde(default = "default_manifests")]
    pub manifests: Vec<String>,

    /// Glob patterns skipped entirely.
    #[serde(default = "default_exclude")]
    pub exclude: Vec<String>,

    /// Size limit in bytes above which a file is skipped.
    #[serde(default = "default_max_file_size")]
    pub max_file_size: u64,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
            manifests: default_manifests(),
            exclude: default_exclude(),
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }
}

/// Adjustments to the built-in rule table.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RulesConfig {
    /// Built-in rule ids to turn off.
    #[serde(default)]
    pub disable: Vec<String>,

    /// Additional rules appended after the built-ins [[rules.custom]].
    #[serde(default)]
    pub custom: Vec<CustomRule>,
}

/// How the strings in `CustomRule::patterns` are interpreted.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    Substring,
    #[default]
    Regex,
}

/// User-defined rule [[rules.custom]].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CustomRule {
    pub id: String,

    pub category: Category,

    #[serde(default)]
    pub patterns: Vec<String>,

    #[serde(default, rename = "match")]
    pub match_mode: MatchMode,

    #[serde(default)]
    pub scope: RuleScope,

    /// Message template; `{count}` is replaced with the occurrence count.
    pub message: String,
}

fn default_extensions() -> Vec<String> {
    ["js", "jsx", "mjs", "cjs", "ts", "tsx", "mts", "cts"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_manifests() -> Vec<String> {
    vec!["package.json".to_string()]
}

fn default_exclude() -> Vec<String> {
    [
        "**/node_modules/**",
        "**/.git/**",
        "**/dist/**",
        "**/build/**",
        "**/.next/**",
        "**/.vercel/**",
        "**/.wrangler/**",
        "**/.serverless/**",
        "**/coverage/**",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

const fn default_max_file_size() -> u64 {
    DEFAULT_MAX_FILE_SIZE
}

#[cfg(test)]
#[path = "model_tests.rs"]
mod tests;
