pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod output;
pub mod platform;
pub mod report;
pub mod rules;
pub mod scanner;

pub use error::{CompatError, Result};

use std::path::Path;
use std::sync::atomic::AtomicBool;

use config::Config;
use engine::RuleEngine;
use output::ScanProgress;
use platform::detect_platform;
use report::Report;
use rules::RuleTable;
use scanner::{CorpusSource, DirectoryScanner, FileScanner, GlobFilter};

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FATAL: i32 = 1;

/// Run the whole analysis of `root` and build its report.
///
/// The rule table and file filter are built before anything is read, so a
/// malformed table or configuration fails without touching the tree.
///
/// # Errors
/// Returns a fatal error for an invalid rule table or configuration, an
/// invalid or unreadable root, or a cancelled scan.
pub fn analyze(root: &Path, config: &Config, cancel: &AtomicBool, quiet: bool) -> Result<Report> {
    let table = RuleTable::from_config(&config.rules)?;
    let filter = GlobFilter::from_config(&config.scanner)?;

    let corpus = DirectoryScanner::new(filter)
        .with_cancel(cancel)
        .scan(root)?;
    let platform = detect_platform(&corpus);
    tracing::info!(
        root = %root.display(),
        files = corpus.files().len(),
        rules = table.len(),
        %platform,
        "starting analysis"
    );

    let total = u64::try_from(corpus.files().len()).unwrap_or(u64::MAX);
    let progress = ScanProgress::new(total, quiet);
    let output = RuleEngine::new(&table, config.scanner.max_file_size).run(
        &corpus,
        cancel,
        Some(&progress),
    );
    progress.finish();

    Ok(report::aggregate(platform, output?))
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
