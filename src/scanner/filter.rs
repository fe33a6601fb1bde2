use std::path::Path;

use globset::{Glob, GlobSet, GlobSetBuilder};

use crate::config::ScannerConfig;
use crate::error::{CompatError, Result};
use crate::rules::RuleScope;

pub trait FileFilter {
    /// Decide whether a file (path relative to the scan root) belongs to the
    /// corpus, and which rules see it.
    fn classify(&self, path: &Path) -> Option<RuleScope>;

    /// Whether a directory can be skipped without descending into it.
    fn prune_dir(&self, path: &Path) -> bool;
}

pub struct GlobFilter {
    extensions: Vec<String>,
    manifests: Vec<String>,
    exclude_patterns: GlobSet,
    exclude_dir_names: Vec<String>,
    exclude_dirs: GlobSet,
}

impl GlobFilter {
    /// Create a new filter with the given extension allowlist, manifest names
    /// and exclude patterns.
    ///
    /// # Errors
    /// Returns an error if any exclude pattern is invalid.
    pub fn new(
        extensions: Vec<String>,
        manifests: Vec<String>,
        exclude_patterns: &[String],
    ) -> Result<Self> {
        let exclude_set = build_glob_set(exclude_patterns)?;
        let (exclude_dir_names, dir_prefixes) = split_dir_patterns(exclude_patterns);
        let exclude_dirs = build_glob_set(&dir_prefixes)?;

        Ok(Self {
            extensions,
            manifests,
            exclude_patterns: exclude_set,
            exclude_dir_names,
            exclude_dirs,
        })
    }

    /// Build from the `[scanner]` config section.
    ///
    /// # Errors
    /// Returns an error if any exclude pattern is invalid.
    pub fn from_config(config: &ScannerConfig) -> Result<Self> {
        Self::new(
            config.extensions.clone(),
            config.manifests.clone(),
            &config.exclude,
        )
    }

    fn is_manifest(&self, path: &Path) -> bool {
        path.file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| self.manifests.iter().any(|m| m == name))
    }

    fn has_valid_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|e| e == ext))
    }

    fn is_excluded(&self, path: &Path) -> bool {
        self.exclude_patterns.is_match(path)
    }
}

impl FileFilter for GlobFilter {
    fn classify(&self, path: &Path) -> Option<RuleScope> {
        if self.is_excluded(path) {
            return None;
        }
        if self.is_manifest(path) {
            return Some(RuleScope::Manifest);
        }
        if self.has_valid_extension(path) {
            return Some(RuleScope::Source);
        }
        None
    }

    fn prune_dir(&self, path: &Path) -> bool {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            return false;
        };
        self.exclude_dir_names.iter().any(|d| d == name)
            || self.exclude_dirs.is_match(path)
            || self.is_excluded(path)
    }
}

fn build_glob_set(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|e| CompatError::InvalidPattern {
            pattern: pattern.clone(),
            source: e,
        })?;
        builder.add(glob);
    }
    builder.build().map_err(|e| CompatError::InvalidPattern {
        pattern: "combined patterns".to_string(),
        source: e,
    })
}

/// Split patterns ending with "/**" into bare directory names and anchored
/// directory globs.
///
/// `x/**` matches files below `x` but not the directory itself. Only
/// `**/name/**` may prune `name` at any depth; any other `prefix/**` prunes
/// the directories that `prefix` matches, so `legacy/**` leaves
/// `src/legacy` alone.
fn split_dir_patterns(patterns: &[String]) -> (Vec<String>, Vec<String>) {
    let mut names = Vec::new();
    let mut prefixes = Vec::new();
    for pattern in patterns {
        let Some(prefix) = pattern.strip_suffix("/**") else {
            continue;
        };
        if prefix.is_empty() {
            continue;
        }
        match prefix.strip_prefix("**/") {
            Some(name) if !name.is_empty() && !name.contains(['/', '*', '?', '[', '{']) => {
                names.push(name.to_string());
            }
            _ => prefixes.push(prefix.to_string()),
        }
    }
    (names, prefixes)
}

#[cfg(test)]
#[path = "filter_tests.rs"]
mod tests;
