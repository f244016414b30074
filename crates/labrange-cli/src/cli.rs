//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use labrange_cli::logging::LogFormat;
use tracing::level_filters::LevelFilter;

#[derive(Parser)]
#[command(
    name = "labrange",
    version,
    about = "Classify blood-test results against biomarker reference ranges",
    long_about = "Classify blood-test results against biomarker reference ranges.\n\n\
                  Each value is reported as Low, Normal, High or Out of range, or as\n\
                  Unknown / Missing when it cannot be classified."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow measured values to appear in logs.
    ///
    /// Results are patient data; by default they are redacted.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,

    /// Classifier configuration file (TOML).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Reference-range table (.csv or .json). Overrides the config file.
    #[arg(long = "ranges", value_name = "PATH", global = true)]
    pub ranges: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Classify a single biomarker value.
    Classify(ClassifyArgs),

    /// List the active reference ranges.
    Ranges(RangesArgs),

    /// Classify a patient's result history from a CSV file.
    Panel(PanelArgs),
}

#[derive(Parser)]
pub struct ClassifyArgs {
    /// Biomarker label, e.g. "RBC (X10*12)".
    #[arg(value_name = "LABEL")]
    pub label: String,

    /// Measured value, or a missing-value token such as "#N/A".
    #[arg(value_name = "VALUE", allow_hyphen_values = true)]
    pub value: String,

    /// Print JSON instead of a table.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Parser)]
pub struct RangesArgs {
    /// Print JSON instead of a table.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Parser)]
pub struct PanelArgs {
    /// CSV file with Date, Biomarker and Value columns.
    #[arg(value_name = "CSV")]
    pub path: PathBuf,

    /// Print JSON instead of tables.
    #[arg(long = "json")]
    pub json: bool,

    /// Exit with status 1 when any latest value is out of range.
    #[arg(long = "fail-on-out-of-range")]
    pub fail_on_out_of_range: bool,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

impl From<LogLevelArg> for LevelFilter {
    fn from(level: LogLevelArg) -> Self {
        match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        }
    }
}

impl From<LogFormatArg> for LogFormat {
    fn from(format: LogFormatArg) -> Self {
        match format {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Compact => LogFormat::Compact,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}
