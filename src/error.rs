use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CompatError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Directory not found: {}", path.display())]
    RootNotFound { path: PathBuf },

    #[error("Not a directory: {}", path.display())]
    RootNotDirectory { path: PathBuf },

    #[error("Directory is not readable: {}", path.display())]
    RootUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid rule '{id}': {reason}")]
    RuleTable { id: String, reason: String },

    #[error("Invalid regex in rule '{id}': {pattern}")]
    InvalidRegex {
        id: String,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Invalid glob pattern: {pattern}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("Scan cancelled before completion")]
    Cancelled,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON serialization error: {0}")]
    JsonSerialize(#[from] serde_json::Error),
}

impl CompatError {
    /// Short category label used as the heading of stderr diagnostics.
    #[must_use]
    pub const fn error_type(&self) -> &'static str {
        match self {
            Self::Config(_) | Self::TomlParse(_) | Self::InvalidPattern { .. } => {
                "Configuration error"
            }
            Self::RootNotFound { .. } | Self::RootNotDirectory { .. } | Self::RootUnreadable { .. } => {
                "Invalid directory"
            }
            Self::RuleTable { .. } | Self::InvalidRegex { .. } => "Rule table error",
            Self::Cancelled => "Cancelled",
            Self::Io(_) | Self::JsonSerialize(_) => "Error",
        }
    }

    /// Actionable hint printed under the error, when one exists.
    #[must_use]
    pub const fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::RootNotFound { .. } | Self::RootNotDirectory { .. } => {
                Some("Pass the project root directory, e.g. `workers-compat ./my-app`")
            }
            Self::RootUnreadable { .. } => Some("Check the directory permissions"),
            Self::TomlParse(_) | Self::Config(_) => {
                Some("Fix .workers-compat.toml or run with --no-config")
            }
            Self::RuleTable { .. } | Self::InvalidRegex { .. } => {
                Some("Check the [[rules.custom]] entries in your configuration")
            }
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, CompatError>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
