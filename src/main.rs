use std::io::Write;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use clap::Parser;
use signal_hook::consts::SIGINT;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use workers_compat::cli::Cli;
use workers_compat::config::{Config, ConfigLoader, FileConfigLoader, validate_config_semantics};
use workers_compat::output::ErrorOutput;
use workers_compat::rules::RuleTable;
use workers_compat::{EXIT_FATAL, EXIT_SUCCESS, analyze};

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let exit_code = match run(&cli) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "fatal error");
            ErrorOutput::stderr().print(&e);
            EXIT_FATAL
        }
    };

    std::process::exit(exit_code);
}

/// Logs go to stderr. `RUST_LOG` takes precedence over `-v`.
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .init();
}

fn run(cli: &Cli) -> workers_compat::Result<()> {
    let cancel = Arc::new(AtomicBool::new(false));
    signal_hook::flag::register(SIGINT, Arc::clone(&cancel))?;

    let mut config = load_config(cli)?;
    apply_cli_overrides(&mut config, cli);
    validate_config_semantics(&config)?;

    let output = if cli.list_rules {
        format_rule_list(&RuleTable::from_config(&config.rules)?)
    } else {
        let report = analyze(&cli.directory, &config, &cancel, cli.quiet)?;
        cli.format.formatter(cli.verbose).format(&report)?
    };

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", output.trim_end())?;
    stdout.flush()?;
    Ok(())
}

fn load_config(cli: &Cli) -> workers_compat::Result<Config> {
    if cli.no_config {
        return Ok(Config::default());
    }

    let loader = FileConfigLoader::new();
    let result = match &cli.config {
        Some(path) => loader.load_from_path(path)?,
        None => loader.load(&cli.directory)?,
    };
    if let Some(source) = &result.source {
        tracing::info!(path = %source.display(), "using configuration file");
    }
    Ok(result.config)
}

fn apply_cli_overrides(config: &mut Config, cli: &Cli) {
    if let Some(ext) = &cli.ext {
        config.scanner.extensions.clone_from(ext);
    }
    config.scanner.exclude.extend(cli.exclude.iter().cloned());
}

fn format_rule_list(table: &RuleTable) -> String {
    let id_width = table.iter().map(|r| r.id.len()).max().unwrap_or(0);
    table
        .iter()
        .map(|rule| {
            format!(
                "{:<id_width$}  {:<10}  {:<8}  {}",
                rule.id,
                rule.category.as_str(),
                rule.scope.as_str(),
                rule.message_template
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
