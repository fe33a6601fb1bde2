//! Configuration semantic validation.
//!
//! Validates that configuration values are semantically correct after parsing.
//! Custom rule shape (patterns, regexes, ids) is checked later when the rule
//! table is built, so the error names the offending rule.

use globset::Glob;

use crate::config::{CONFIG_VERSION, Config};
use crate::error::{CompatError, Result};

/// Validates semantic correctness of a configuration.
///
/// # Errors
/// Returns an error for an unsupported version, an empty extension allowlist,
/// a zero size limit or an invalid exclude glob.
pub fn validate_config_semantics(config: &Config) -> Result<()> {
    validate_version(config)?;
    validate_scanner_section(config)?;
    Ok(())
}

fn validate_version(config: &Config) -> Result<()> {
    match &config.version {
        None => Ok(()),
        Some(v) if v == CONFIG_VERSION => Ok(()),
        Some(v) => Err(CompatError::Config(format!(
            "Unsupported config version '{v}'. Only version '{CONFIG_VERSION}' is supported."
        ))),
    }
}

fn validate_scanner_section(config: &Config) -> Result<()> {
    let scanner = &config.scanner;

    // An empty allowlist would let binary files into the corpus.
    if scanner.extensions.is_empty() {
        return Err(CompatError::Config(
            "scanner.extensions must not be empty".to_string(),
        ));
    }

    if let Some(ext) = scanner
        .extensions
        .iter()
        .find(|e| e.is_empty() || e.starts_with('.'))
    {
        return Err(CompatError::Config(format!(
            "scanner.extensions entries must be bare extensions like \"ts\", got {ext:?}"
        )));
    }

    if scanner.max_file_size == 0 {
        return Err(CompatError::Config(
            "scanner.max_file_size must be greater than 0".to_string(),
        ));
    }

    for pattern in &scanner.exclude {
        Glob::new(pattern).map_err(|e| CompatError::InvalidPattern {
            pattern: pattern.clone(),
            source: e,
        })?;
    }

    Ok(())
}

#[cfg(test)]
#[path = "validation_tests.rs"]
mod tests;
