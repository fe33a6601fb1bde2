use serde::Serialize;

use crate::error::Result;
use crate::platform::Platform;
use crate::report::{Complexity, Report, Summary};
use crate::rules::Category;

use super::ReportFormatter;

pub struct JsonFormatter;

// Field order is the wire order.
#[derive(Serialize)]
struct JsonOutput<'a> {
    platform: Platform,
    summary: Summary,
    findings: Findings<'a>,
    compatible: Vec<&'a str>,
    complexity: Complexity,
    recommendations: &'a [String],
}

#[derive(Serialize)]
struct Findings<'a> {
    critical: Vec<&'a str>,
    warning: Vec<&'a str>,
    info: Vec<&'a str>,
}

fn messages(report: &Report, category: Category) -> Vec<&str> {
    report
        .findings_in(category)
        .map(|f| f.rendered_message.as_str())
        .collect()
}

impl ReportFormatter for JsonFormatter {
    fn format(&self, report: &Report) -> Result<String> {
        let output = JsonOutput {
            platform: report.platform,
            summary: report.summary,
            findings: Findings {
                critical: messages(report, Category::Critical),
                warning: messages(report, Category::Warning),
                info: messages(report, Category::Info),
            },
            compatible: messages(report, Category::Compatible),
            complexity: report.complexity,
            recommendations: &report.recommendations,
        };

        Ok(serde_json::to_string_pretty(&output)?)
    }
}

#[cfg(test)]
#[path = "json_tests.rs"]
mod tests;
