//! Single-pass rule evaluation over a corpus.
//!
//! Files are split across rayon workers. Each worker folds matches into its
//! own [`Tally`]; tallies are summed once at the end, so there is no shared
//! mutable state during the scan. A raised cancel flag is observed before
//! each file read and turns the whole run into [`CompatError::Cancelled`].

mod tally;

pub use tally::{ScanStats, Tally};

use std::io::BufRead;
use std::sync::atomic::{AtomicBool, Ordering};

use rayon::prelude::*;

use crate::error::{CompatError, Result};
use crate::output::ScanProgress;
use crate::rules::{Category, RuleTable};
use crate::scanner::{CorpusFile, CorpusSource, SkipReason, SkippedFile};

use tally::Partial;

/// One activated rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub rule_id: String,
    pub category: Category,
    /// Matching lines across the whole corpus. Always greater than zero.
    pub occurrence_count: usize,
    pub rendered_message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineOutput {
    /// In rule declaration order.
    pub findings: Vec<Finding>,
    pub stats: ScanStats,
}

pub struct RuleEngine<'a> {
    table: &'a RuleTable,
    max_file_size: u64,
}

impl<'a> RuleEngine<'a> {
    #[must_use]
    pub const fn new(table: &'a RuleTable, max_file_size: u64) -> Self {
        Self {
            table,
            max_file_size,
        }
    }

    /// Evaluate every rule against every corpus file.
    ///
    /// # Errors
    /// Returns `Cancelled` if `cancel` is raised before the traversal
    /// completes. Per-file failures are recorded as skips, not errors.
    pub fn run(
        &self,
        corpus: &dyn CorpusSource,
        cancel: &AtomicBool,
        progress: Option<&ScanProgress>,
    ) -> Result<EngineOutput> {
        let rule_count = self.table.len();

        let partial = corpus
            .files()
            .par_iter()
            .try_fold(
                || Partial::new(rule_count),
                |mut acc, file| {
                    if cancel.load(Ordering::Relaxed) {
                        return Err(CompatError::Cancelled);
                    }
                    match self.scan_file(corpus, file) {
                        Ok(hits) => {
                            for rule_index in hits {
                                acc.tally.record(rule_index);
                            }
                            acc.files_scanned += 1;
                        }
                        Err(reason) => {
                            tracing::debug!(path = %file.relative.display(), %reason, "skipping file");
                            acc.skipped.push(SkippedFile {
                                path: file.relative.clone(),
                                reason,
                            });
                        }
                    }
                    if let Some(progress) = progress {
                        progress.inc();
                    }
                    Ok(acc)
                },
            )
            .try_reduce(|| Partial::new(rule_count), |a, b| Ok(a.merge(b)))?;

        if cancel.load(Ordering::Relaxed) {
            return Err(CompatError::Cancelled);
        }

        let mut skipped = corpus.discovery_skips().to_vec();
        skipped.extend(partial.skipped);
        skipped.sort_by(|a, b| a.path.cmp(&b.path));

        let findings = self.findings(&partial.tally);
        tracing::info!(
            files = partial.files_scanned,
            skipped = skipped.len(),
            findings = findings.len(),
            "scan complete"
        );

        Ok(EngineOutput {
            findings,
            stats: ScanStats {
                files_scanned: partial.files_scanned,
                skipped,
            },
        })
    }

    /// Rule indices hit by each line of one file, or why the file was skipped.
    ///
    /// Hits are buffered so a file that fails halfway contributes nothing.
    fn scan_file(
        &self,
        corpus: &dyn CorpusSource,
        file: &CorpusFile,
    ) -> std::result::Result<Vec<usize>, SkipReason> {
        if file.size > self.max_file_size {
            return Err(SkipReason::TooLarge {
                size: file.size,
                limit: self.max_file_size,
            });
        }

        let reader = corpus.open(file).map_err(|e| SkipReason::from_io(&e))?;
        let matcher = self.table.matcher(file.scope);
        let mut hits = Vec::new();
        for line in reader.lines() {
            let line = line.map_err(|e| SkipReason::from_io(&e))?;
            matcher.for_each_match(&line, |rule_index| hits.push(rule_index));
        }
        Ok(hits)
    }

    fn findings(&self, tally: &Tally) -> Vec<Finding> {
        tally
            .non_zero()
            .filter_map(|(index, count)| {
                self.table.get_index(index).map(|rule| Finding {
                    rule_id: rule.id.clone(),
                    category: rule.category,
                    occurrence_count: count,
                    rendered_message: rule.render_message(count),
                })
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
