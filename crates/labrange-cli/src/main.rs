//! labrange CLI.

use clap::{ColorChoice, Parser};
use labrange_cli::logging::{LogConfig, init_logging};
use std::io::{self, IsTerminal};
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;

use crate::cli::{Cli, Command};
use crate::commands::{build_classifier, run_classify, run_panel, run_ranges};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let classifier = match build_classifier(cli.config.as_deref(), cli.ranges.as_deref()) {
        Ok(classifier) => classifier,
        Err(error) => {
            eprintln!("error: {error:#}");
            std::process::exit(1);
        }
    };
    let outcome = match &cli.command {
        Command::Classify(args) => run_classify(&classifier, args).map(|()| false),
        Command::Ranges(args) => run_ranges(&classifier, args).map(|()| false),
        Command::Panel(args) => run_panel(&classifier, args),
    };
    let exit_code = match outcome {
        Ok(failed) => i32::from(failed),
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

/// An explicit `--log-level` beats `-v`/`-q`, and either one beats `RUST_LOG`.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let explicit = cli.log_level.map(LevelFilter::from);
    let level = explicit.unwrap_or_else(|| cli.verbosity.tracing_level_filter());
    let ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    LogConfig {
        use_env_filter: explicit.is_none() && !cli.verbosity.is_present(),
        with_ansi: ansi,
        ..LogConfig::default()
    }
    .with_level_filter(level)
    .with_format(cli.log_format.into())
    .with_log_file(cli.log_file.clone())
    .with_log_data(cli.log_data)
}
