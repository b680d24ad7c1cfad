//! Logging infrastructure using `tracing` and `tracing-subscriber`.
//!
//! Diagnostics go to stderr through a `fmt` layer. The validation report itself is user output
//! and is printed by the CLI, not logged.
//!
//! # Log Levels
//!
//! - `error`: ingestion and write failures
//! - `warn`: validation failure, unwritable error report
//! - `info`: stage progress and counts
//! - `debug`: per-stage detail

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable multi-line format.
    Pretty,
    /// Single-line format.
    #[default]
    Compact,
    /// JSON lines for machine parsing.
    Json,
}

/// Configuration for logging behavior.
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub level_filter: LevelFilter,
    /// Defer to `RUST_LOG` when set (only when no explicit verbosity was requested).
    pub use_env_filter: bool,
    pub format: LogFormat,
    pub with_ansi: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level_filter: LevelFilter::WARN,
            use_env_filter: true,
            format: LogFormat::default(),
            with_ansi: false,
        }
    }
}

impl LogConfig {
    /// Map a `-v` count onto a level: none → warn, `-v` → info, `-vv` → debug, more → trace.
    #[must_use]
    pub fn from_verbosity(verbosity: u8) -> Self {
        let level_filter = match verbosity {
            0 => LevelFilter::WARN,
            1 => LevelFilter::INFO,
            2 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        };
        Self {
            level_filter,
            use_env_filter: verbosity == 0,
            ..Default::default()
        }
    }

    fn env_filter(&self) -> EnvFilter {
        let fallback = || EnvFilter::new(self.level_filter.to_string());
        if self.use_env_filter {
            EnvFilter::try_from_default_env().unwrap_or_else(|_| fallback())
        } else {
            fallback()
        }
    }
}

/// Install the global subscriber.
pub fn init_logging(config: &LogConfig) -> Result<(), tracing_subscriber::util::TryInitError> {
    let registry = tracing_subscriber::registry().with(config.env_filter());
    let base = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(config.with_ansi)
        .with_target(false);

    match config.format {
        LogFormat::Pretty => registry.with(base.pretty()).try_init(),
        LogFormat::Compact => registry.with(base.compact()).try_init(),
        LogFormat::Json => registry.with(base.json()).try_init(),
    }
}
