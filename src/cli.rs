use std::path::PathBuf;

use clap::Parser;

use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "workers-compat")]
#[command(
    author,
    version,
    about = "Analyze a Node.js project for Cloudflare Workers compatibility"
)]
#[command(long_about = "Scans a project for Node.js APIs and platform patterns that \
    block or complicate a migration to Cloudflare Workers, and reports a \
    migration complexity verdict with recommendations.\n\n\
    Exit codes:\n  \
    0 - Report produced\n  \
    1 - Invalid directory, configuration or rule table, or cancelled")]
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Project directory to analyze
    #[arg(default_value = ".")]
    pub directory: PathBuf,

    /// Output format [possible values: text, json]
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,

    /// List skipped files in text output (-v); also raise log level (-vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Hide the progress bar
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(short, long, conflicts_with = "no_config")]
    pub config: Option<PathBuf>,

    /// Skip loading configuration file
    #[arg(long)]
    pub no_config: bool,

    /// File extensions to analyze (comma-separated, e.g., js,ts)
    #[arg(long, value_delimiter = ',')]
    pub ext: Option<Vec<String>>,

    /// Exclude patterns (glob syntax, can be specified multiple times)
    #[arg(long, short = 'x')]
    pub exclude: Vec<String>,

    /// Print the effective rule table and exit
    #[arg(long)]
    pub list_rules: bool,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
