//! Logging System
//!
//! Structured logging over the `tracing` crate with configurable level,
//! format, and color. The `QUIZSMITH_LOG` environment variable takes
//! priority over configured levels and accepts full filter directives.

use serde::{Deserialize, Serialize};
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

use crate::error::QuizError;

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error, off
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format: json, text (default: text)
    #[serde(default = "default_format")]
    pub format: String,

    /// Enable colored output (text format only)
    #[serde(default = "default_true")]
    pub color: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_format() -> String {
    "text".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_format(),
            color: default_true(),
        }
    }
}

/// Initialize the logging system.
///
/// Priority order: `QUIZSMITH_LOG` environment filter, then the configured
/// level. Logs go to stderr so interactive quiz output stays clean on
/// stdout.
pub fn init_logging(config: &LoggingConfig) -> Result<(), QuizError> {
    let filter = EnvFilter::try_from_env("QUIZSMITH_LOG")
        .unwrap_or_else(|_| EnvFilter::new(&config.level));

    let base_subscriber = Registry::default().with(filter);

    match config.format.as_str() {
        "json" => {
            base_subscriber
                .with(
                    fmt::layer()
                        .json()
                        .with_target(true)
                        .with_timer(ChronoUtc::rfc_3339())
                        .with_writer(std::io::stderr),
                )
                .init();
        }
        "text" => {
            base_subscriber
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_timer(ChronoUtc::rfc_3339())
                        .with_ansi(config.color)
                        .with_writer(std::io::stderr),
                )
                .init();
        }
        other => {
            return Err(QuizError::ConfigError(format!(
                "Invalid log format: {} (must be 'json' or 'text')",
                other
            )));
        }
    }

    Ok(())
}
