//! Severity aggregation.
//!
//! Turns engine findings and the detected platform into a [`Report`]: the
//! findings grouped by tier, the per-tier activation counts, the complexity
//! verdict and the platform's recommendations. Renderers read a `Report` and
//! never compute anything themselves.

mod recommendations;

pub use recommendations::recommendations_for;

use serde::Serialize;

use crate::engine::{EngineOutput, Finding, ScanStats};
use crate::platform::Platform;
use crate::rules::Category;

/// More than this many critical rules makes a migration HIGH.
pub const HIGH_CRITICAL_THRESHOLD: usize = 5;
/// More than this many critical plus warning rules makes a migration MEDIUM.
pub const MEDIUM_COMBINED_THRESHOLD: usize = 10;

/// Number of distinct activated rules per tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub critical: usize,
    pub warning: usize,
    pub info: usize,
    pub compatible: usize,
}

impl Summary {
    #[must_use]
    pub fn from_findings(findings: &[Finding]) -> Self {
        findings.iter().fold(Self::default(), |mut s, f| {
            match f.category {
                Category::Critical => s.critical += 1,
                Category::Warning => s.warning += 1,
                Category::Info => s.info += 1,
                Category::Compatible => s.compatible += 1,
            }
            s
        })
    }

    #[must_use]
    pub const fn get(&self, category: Category) -> usize {
        match category {
            Category::Critical => self.critical,
            Category::Warning => self.warning,
            Category::Info => self.info,
            Category::Compatible => self.compatible,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Complexity {
    Low,
    Medium,
    High,
}

impl Complexity {
    #[must_use]
    pub const fn from_summary(summary: &Summary) -> Self {
        if summary.critical > HIGH_CRITICAL_THRESHOLD {
            Self::High
        } else if summary.critical + summary.warning > MEDIUM_COMBINED_THRESHOLD {
            Self::Medium
        } else {
            Self::Low
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
        }
    }
}

impl std::fmt::Display for Complexity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub platform: Platform,
    /// Critical first, then warning, info, compatible; declaration order
    /// within a tier.
    pub findings: Vec<Finding>,
    pub summary: Summary,
    pub complexity: Complexity,
    pub recommendations: Vec<String>,
    pub scan: ScanStats,
}

impl Report {
    /// Findings of a single tier, in report order.
    pub fn findings_in(&self, category: Category) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(move |f| f.category == category)
    }
}

/// Build the report for one run.
///
/// `output.findings` must be in rule declaration order; the stable sort keeps
/// that order within each tier.
#[must_use]
pub fn aggregate(platform: Platform, output: EngineOutput) -> Report {
    let mut findings = output.findings;
    findings.sort_by_key(|f| f.category);

    let summary = Summary::from_findings(&findings);
    let complexity = Complexity::from_summary(&summary);
    let recommendations = recommendations_for(platform)
        .iter()
        .map(|r| (*r).to_string())
        .collect();

    Report {
        platform,
        findings,
        summary,
        complexity,
        recommendations,
        scan: output.stats,
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
