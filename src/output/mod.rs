mod error_output;
mod json;
mod progress;
mod text;

pub use error_output::ErrorOutput;
pub use json::JsonFormatter;
pub use progress::ScanProgress;
pub use text::TextFormatter;

use crate::error::Result;
use crate::report::Report;

/// Trait for rendering a report into an output format.
///
/// Implementations read the report only; every number they print is already
/// in the `Report`.
pub trait ReportFormatter {
    /// Render the report into a string.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    fn format(&self, report: &Report) -> Result<String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    /// Formatter for this format. `verbose` only affects text output.
    #[must_use]
    pub fn formatter(self, verbose: u8) -> Box<dyn ReportFormatter> {
        match self {
            Self::Text => Box::new(TextFormatter::with_verbose(verbose)),
            Self::Json => Box::new(JsonFormatter),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown output format: {s} (expected text or json)")),
        }
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
