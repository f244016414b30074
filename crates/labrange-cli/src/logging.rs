//! Logging infrastructure using `tracing` and `tracing-subscriber`.
//!
//! # Log Levels
//!
//! - `error`: unreadable inputs, invalid configuration
//! - `warn`: default; values that could not be classified
//! - `info`: table and panel summaries
//! - `debug`: loader and evaluation details
//! - `trace`: per-value key resolution (values redacted unless `--log-data`)
//!
//! # Usage
//!
//! ```ignore
//! use labrange_cli::logging::{init_logging, LogConfig};
//! use tracing::level_filters::LevelFilter;
//!
//! let config = LogConfig::default().with_level_filter(LevelFilter::DEBUG);
//! init_logging(&config).expect("init logging");
//! ```

use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::Subscriber;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, MakeWriter},
    layer::SubscriberExt,
    registry::LookupSpan,
    util::SubscriberInitExt,
};

static LOG_DATA_ENABLED: AtomicBool = AtomicBool::new(false);

/// Placeholder used when value logging is disabled.
pub const REDACTED_VALUE: &str = "[REDACTED]";

/// Returns true if measured values may be logged.
pub fn log_data_enabled() -> bool {
    LOG_DATA_ENABLED.load(Ordering::Relaxed)
}

/// Returns the input value when value logging is enabled, otherwise a redacted token.
pub fn redact_value(value: &str) -> &str {
    if log_data_enabled() {
        value
    } else {
        REDACTED_VALUE
    }
}

/// Configuration for logging behavior.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Maximum level to emit.
    pub level_filter: LevelFilter,
    /// Whether `RUST_LOG` may override `level_filter`.
    pub use_env_filter: bool,
    /// Whether to include timestamps in log output.
    pub with_timestamps: bool,
    /// Whether to include target (module path) in log output.
    pub with_target: bool,
    /// Whether to use ANSI colors in output.
    pub with_ansi: bool,
    /// Output format.
    pub format: LogFormat,
    /// Optional log file path. When set, logs are written to the file.
    pub log_file: Option<PathBuf>,
    /// Whether measured values may be logged.
    pub log_data: bool,
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable pretty format with colors.
    #[default]
    Pretty,
    /// Compact single-line format.
    Compact,
    /// JSON format for machine parsing.
    Json,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level_filter: LevelFilter::WARN,
            use_env_filter: true,
            with_timestamps: false,
            with_target: false,
            with_ansi: true,
            format: LogFormat::default(),
            log_file: None,
            log_data: false,
        }
    }
}

impl LogConfig {
    #[must_use]
    pub fn with_level_filter(mut self, level_filter: LevelFilter) -> Self {
        self.level_filter = level_filter;
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Set the log file path (writes to stderr when None).
    #[must_use]
    pub fn with_log_file(mut self, path: Option<PathBuf>) -> Self {
        self.log_file = path;
        self
    }

    #[must_use]
    pub fn with_log_data(mut self, enable: bool) -> Self {
        self.log_data = enable;
        self
    }

    /// Filter directives for our crates at the configured level.
    pub fn filter_directives(&self) -> String {
        let level = self.level_filter.to_string().to_lowercase();
        format!(
            "warn,labrange={level},labrange_cli={level},labrange_core={level},\
             labrange_model={level},labrange_standards={level}"
        )
    }
}

/// Initialize the global tracing subscriber with the given configuration.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened.
///
/// # Panics
///
/// Panics if called more than once.
pub fn init_logging(config: &LogConfig) -> io::Result<()> {
    match &config.log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            init_logging_with_writer(config, Mutex::new(file));
        }
        None => init_logging_with_writer(config, io::stderr),
    }
    Ok(())
}

/// Initialize logging with a custom writer (useful for testing).
pub fn init_logging_with_writer<W>(config: &LogConfig, writer: W)
where
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    LOG_DATA_ENABLED.store(config.log_data, Ordering::Release);
    let layer = fmt_layer(config, writer).with_filter(build_env_filter(config));
    tracing_subscriber::registry().with(layer).init();
}

type BoxedLayer<S> = Box<dyn Layer<S> + Send + Sync + 'static>;

fn fmt_layer<S, W>(config: &LogConfig, writer: W) -> BoxedLayer<S>
where
    S: Subscriber + for<'span> LookupSpan<'span>,
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    let layer = fmt::layer()
        .with_writer(writer)
        .with_target(config.with_target);
    if config.format == LogFormat::Json {
        return layer.json().boxed();
    }
    let layer = layer.with_ansi(config.with_ansi);
    match (config.format, config.with_timestamps) {
        (LogFormat::Compact, true) => layer.compact().boxed(),
        (LogFormat::Compact, false) => layer.compact().without_time().boxed(),
        (_, true) => layer.boxed(),
        (_, false) => layer.without_time().boxed(),
    }
}

/// `RUST_LOG` wins when allowed; otherwise our crates log at the configured level.
fn build_env_filter(config: &LogConfig) -> EnvFilter {
    config
        .use_env_filter
        .then(|| EnvFilter::try_from_default_env().ok())
        .flatten()
        .unwrap_or_else(|| EnvFilter::new(config.filter_directives()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builders_override_defaults() {
        let config = LogConfig::default()
            .with_level_filter(LevelFilter::TRACE)
            .with_format(LogFormat::Compact)
            .with_log_data(true);
        assert_eq!(config.level_filter, LevelFilter::TRACE);
        assert_eq!(config.format, LogFormat::Compact);
        assert!(config.log_data);
        assert!(config.log_file.is_none());
    }

    #[test]
    fn explicit_level_ignores_rust_log() {
        let config = LogConfig {
            use_env_filter: false,
            ..LogConfig::default()
        }
        .with_level_filter(LevelFilter::ERROR);
        assert_eq!(
            build_env_filter(&config).to_string(),
            EnvFilter::new(config.filter_directives()).to_string()
        );
    }

    #[test]
    fn directives_cover_workspace_crates() {
        let directives = LogConfig::default()
            .with_level_filter(LevelFilter::DEBUG)
            .filter_directives();
        assert!(directives.starts_with("warn,"));
        assert!(directives.contains("labrange_core=debug"));
        assert!(directives.contains("labrange_standards=debug"));
    }

    #[test]
    fn values_are_redacted_by_default() {
        assert_eq!(redact_value("4.3"), REDACTED_VALUE);
    }
}
