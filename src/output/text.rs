use std::fmt::Write;

use crate::engine::Finding;
use crate::error::Result;
use crate::report::Report;
use crate::rules::Category;

use super::ReportFormatter;

/// Plain, color-free text report.
pub struct TextFormatter {
    verbose: u8,
}

impl TextFormatter {
    #[must_use]
    pub const fn new() -> Self {
        Self::with_verbose(0)
    }

    #[must_use]
    pub const fn with_verbose(verbose: u8) -> Self {
        Self { verbose }
    }

    const fn heading(category: Category) -> &'static str {
        match category {
            Category::Critical => "CRITICAL (blocks migration)",
            Category::Warning => "WARNING (needs changes)",
            Category::Info => "INFO (review)",
            Category::Compatible => "COMPATIBLE (works on Workers)",
        }
    }

    const fn icon(category: Category) -> &'static str {
        match category {
            Category::Critical => "✗",
            Category::Warning => "⚠",
            Category::Info => "ℹ",
            Category::Compatible => "✓",
        }
    }

    fn format_group(out: &mut String, category: Category, findings: &[&Finding]) {
        if findings.is_empty() {
            return;
        }
        let _ = writeln!(out, "{} [{}]", Self::heading(category), findings.len());
        for finding in findings {
            let _ = writeln!(
                out,
                "  {} {}: {}",
                Self::icon(category),
                finding.rule_id,
                finding.rendered_message
            );
        }
        out.push('\n');
    }

    fn format_scan(out: &mut String, report: &Report) {
        let scan = &report.scan;
        let _ = writeln!(
            out,
            "Scan: {} files scanned, {} skipped",
            scan.files_scanned,
            scan.skipped.len()
        );
        for skipped in &scan.skipped {
            let _ = writeln!(out, "  - {}: {}", skipped.path.display(), skipped.reason);
        }
        out.push('\n');
    }
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for TextFormatter {
    fn format(&self, report: &Report) -> Result<String> {
        let mut out = String::new();

        let _ = writeln!(out, "Workers Compatibility Report");
        let _ = writeln!(out, "============================");
        let _ = writeln!(
            out,
            "Platform: {} ({})",
            report.platform.display_name(),
            report.platform
        );
        let summary = &report.summary;
        let _ = writeln!(
            out,
            "Summary: {} critical, {} warning, {} info, {} compatible",
            summary.critical, summary.warning, summary.info, summary.compatible
        );
        out.push('\n');

        if report.findings.is_empty() {
            let _ = writeln!(out, "No compatibility findings.");
            out.push('\n');
        }
        for category in Category::ALL {
            let group: Vec<_> = report.findings_in(category).collect();
            Self::format_group(&mut out, category, &group);
        }

        if self.verbose > 0 {
            Self::format_scan(&mut out, report);
        }

        let _ = writeln!(out, "Migration complexity: {}", report.complexity);
        out.push('\n');

        let _ = writeln!(out, "Recommendations:");
        for (i, recommendation) in report.recommendations.iter().enumerate() {
            let _ = writeln!(out, "  {}. {recommendation}", i + 1);
        }

        Ok(out)
    }
}

#[cfg(test)]
#[path = "text_tests.rs"]
mod tests;
