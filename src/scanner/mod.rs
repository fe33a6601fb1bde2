//! Corpus source: the files under a project root that the engine reads.
//!
//! [`DirectoryScanner`] walks the root once, classifies each file with a
//! [`FileFilter`] and returns a [`DirectoryCorpus`]. The engine only sees the
//! [`CorpusSource`] trait; the platform detector only sees [`MarkerSource`].

mod filter;

pub use filter::{FileFilter, GlobFilter};

use std::fmt;
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use walkdir::WalkDir;

use crate::error::{CompatError, Result};
use crate::rules::RuleScope;

/// A file selected for analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorpusFile {
    /// Path relative to the scan root.
    pub relative: PathBuf,
    /// Size in bytes at discovery time.
    pub size: u64,
    /// Which rules evaluate this file's lines.
    pub scope: RuleScope,
}

/// Why a file was left out of the analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    PermissionDenied,
    /// Content is not UTF-8 text.
    NotText,
    TooLarge { size: u64, limit: u64 },
    Unreadable(String),
}

impl SkipReason {
    #[must_use]
    pub fn from_io(err: &io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::PermissionDenied => Self::PermissionDenied,
            io::ErrorKind::InvalidData => Self::NotText,
            _ => Self::Unreadable(err.to_string()),
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PermissionDenied => f.write_str("permission denied"),
            Self::NotText => f.write_str("not UTF-8 text"),
            Self::TooLarge { size, limit } => {
                write!(f, "file too large ({size} bytes, limit {limit})")
            }
            Self::Unreadable(msg) => write!(f, "unreadable: {msg}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: SkipReason,
}

/// Supplies corpus files and their lines.
pub trait CorpusSource: Sync {
    /// Files selected for analysis.
    fn files(&self) -> &[CorpusFile];

    /// Open a corpus file for line-by-line reading.
    ///
    /// # Errors
    /// Returns an I/O error if the file cannot be opened.
    fn open(&self, file: &CorpusFile) -> io::Result<Box<dyn BufRead + '_>>;

    /// Entries that could not even be listed during discovery.
    fn discovery_skips(&self) -> &[SkippedFile] {
        &[]
    }
}

/// Marker files and manifests at the project root.
pub trait MarkerSource {
    /// Whether a file or directory exists at `name`, relative to the root.
    fn has_marker(&self, name: &str) -> bool;

    /// Contents of a root-level text file, if present and readable.
    fn read_marker(&self, name: &str) -> Option<String>;
}

/// Trait for scanning a root directory into a corpus.
pub trait FileScanner {
    /// Scan a directory and return the corpus rooted at it.
    ///
    /// # Errors
    /// Returns an error if the root does not exist, is not a directory, or
    /// cannot be read.
    fn scan(&self, root: &Path) -> Result<DirectoryCorpus>;
}

pub struct DirectoryScanner<'c, F: FileFilter> {
    filter: F,
    cancel: Option<&'c AtomicBool>,
}

impl<'c, F: FileFilter> DirectoryScanner<'c, F> {
    #[must_use]
    pub const fn new(filter: F) -> Self {
        Self {
            filter,
            cancel: None,
        }
    }

    /// Abandon discovery with [`CompatError::Cancelled`] once `cancel` is set.
    #[must_use]
    pub fn with_cancel(self, cancel: &'c AtomicBool) -> Self {
        Self {
            cancel: Some(cancel),
            ..self
        }
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.is_some_and(|flag| flag.load(Ordering::Relaxed))
    }

    fn scan_impl(&self, root: &Path) -> Result<DirectoryCorpus> {
        let mut files = Vec::new();
        let mut skipped = Vec::new();

        let walker = WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| {
                e.depth() == 0
                    || !e.file_type().is_dir()
                    || !self.filter.prune_dir(relative_to(root, e.path()))
            });

        for entry in walker {
            if self.is_cancelled() {
                tracing::debug!(discovered = files.len(), "discovery cancelled");
                return Err(CompatError::Cancelled);
            }
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    let path = err
                        .path()
                        .map(|p| relative_to(root, p).to_path_buf())
                        .unwrap_or_default();
                    let reason = err
                        .io_error()
                        .map_or_else(|| SkipReason::Unreadable(err.to_string()), SkipReason::from_io);
                    tracing::debug!(path = %path.display(), %reason, "skipping entry during discovery");
                    skipped.push(SkippedFile { path, reason });
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            let relative = relative_to(root, entry.path()).to_path_buf();
            let Some(scope) = self.filter.classify(&relative) else {
                continue;
            };
            let size = entry.metadata().map(|m| m.len()).unwrap_or_default();
            files.push(CorpusFile {
                relative,
                size,
                scope,
            });
        }

        Ok(DirectoryCorpus {
            root: root.to_path_buf(),
            files,
            skipped,
        })
    }
}

impl<F: FileFilter> FileScanner for DirectoryScanner<'_, F> {
    fn scan(&self, root: &Path) -> Result<DirectoryCorpus> {
        validate_root(root)?;
        self.scan_impl(root)
    }
}

/// Fail fast on a root that cannot be scanned at all.
///
/// # Errors
/// `RootNotFound`, `RootNotDirectory` or `RootUnreadable`.
pub fn validate_root(root: &Path) -> Result<()> {
    let metadata = fs::metadata(root).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => CompatError::RootNotFound {
            path: root.to_path_buf(),
        },
        _ => CompatError::RootUnreadable {
            path: root.to_path_buf(),
            source,
        },
    })?;

    if !metadata.is_dir() {
        return Err(CompatError::RootNotDirectory {
            path: root.to_path_buf(),
        });
    }

    fs::read_dir(root).map_err(|source| CompatError::RootUnreadable {
        path: root.to_path_buf(),
        source,
    })?;

    Ok(())
}

fn relative_to<'a>(root: &Path, path: &'a Path) -> &'a Path {
    path.strip_prefix(root).unwrap_or(path)
}

/// Corpus backed by a directory on disk.
#[derive(Debug, Clone)]
pub struct DirectoryCorpus {
    root: PathBuf,
    files: Vec<CorpusFile>,
    skipped: Vec<SkippedFile>,
}

impl DirectoryCorpus {
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl CorpusSource for DirectoryCorpus {
    fn files(&self) -> &[CorpusFile] {
        &self.files
    }

    fn open(&self, file: &CorpusFile) -> io::Result<Box<dyn BufRead + '_>> {
        let handle = File::open(self.root.join(&file.relative))?;
        Ok(Box::new(BufReader::new(handle)))
    }

    fn discovery_skips(&self) -> &[SkippedFile] {
        &self.skipped
    }
}

impl MarkerSource for DirectoryCorpus {
    fn has_marker(&self, name: &str) -> bool {
        self.root.join(name).exists()
    }

    fn read_marker(&self, name: &str) -> Option<String> {
        fs::read_to_string(self.root.join(name)).ok()
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
