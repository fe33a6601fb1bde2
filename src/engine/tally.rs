use crate::scanner::SkippedFile;

/// Per-rule line counts, indexed by rule declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tally {
    counts: Vec<usize>,
}

impl Tally {
    #[must_use]
    pub fn new(rule_count: usize) -> Self {
        Self {
            counts: vec![0; rule_count],
        }
    }

    pub fn record(&mut self, rule_index: usize) {
        if let Some(count) = self.counts.get_mut(rule_index) {
            *count += 1;
        }
    }

    #[must_use]
    pub fn get(&self, rule_index: usize) -> usize {
        self.counts.get(rule_index).copied().unwrap_or(0)
    }

    /// Element-wise sum.
    #[must_use]
    pub fn merge(mut self, other: &Self) -> Self {
        for (mine, theirs) in self.counts.iter_mut().zip(&other.counts) {
            *mine += theirs;
        }
        self
    }

    /// `(rule_index, count)` pairs with a non-zero count.
    pub fn non_zero(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.counts
            .iter()
            .copied()
            .enumerate()
            .filter(|&(_, count)| count > 0)
    }
}

/// Traversal statistics carried into the report.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanStats {
    pub files_scanned: usize,
    /// Sorted by path.
    pub skipped: Vec<SkippedFile>,
}

/// What one worker accumulates before the final reduction.
#[derive(Debug)]
pub(super) struct Partial {
    pub(super) tally: Tally,
    pub(super) files_scanned: usize,
    pub(super) skipped: Vec<SkippedFile>,
}

impl Partial {
    pub(super) fn new(rule_count: usize) -> Self {
        Self {
            tally: Tally::new(rule_count),
            files_scanned: 0,
            skipped: Vec::new(),
        }
    }

    pub(super) fn merge(mut self, other: Self) -> Self {
        self.tally = self.tally.merge(&other.tally);
        self.files_scanned += other.files_scanned;
        self.skipped.extend(other.skipped);
        self
    }
}

#[cfg(test)]
#[path = "tally_tests.rs"]
mod tests;
