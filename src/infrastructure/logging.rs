//! Logging setup for hosts embedding the buffers
//!
//! The buffers only emit `tracing` events on the `buffer` target. A host
//! that wants to see them calls [`init_logging`] once at startup:
//! - console output, filtered by `RUST_LOG` or the configured level
//! - optionally a daily rolling file under `directory/buffer.*`

use std::fs;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::infrastructure::config::LoggingConfig;

/// Target used by every event the buffers emit
pub const BUFFER_TARGET: &str = "buffer";

/// Initialize console (and optional file) logging
///
/// Returns the file writer's WorkerGuard, which must be kept alive for the
/// duration of the program. Returns `None` when logging to console only.
///
/// # Errors
/// Fails if the log directory cannot be created or a global subscriber is
/// already installed.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>, LoggingError> {
    let filter = match std::env::var(EnvFilter::DEFAULT_ENV) {
        Ok(directive) => build_filter(&directive)?,
        Err(_) => build_filter(&config.level)?,
    };

    let console_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_level(true)
        .boxed();

    let (file_layer, guard) = match &config.directory {
        Some(dir) => {
            fs::create_dir_all(dir).map_err(LoggingError::Io)?;

            let appender = RollingFileAppender::new(Rotation::DAILY, dir, BUFFER_TARGET);
            let (writer, guard) = tracing_appender::non_blocking(appender);

            let layer = tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true)
                .with_level(true)
                .with_thread_ids(true);

            let layer = if config.json {
                layer.json().boxed()
            } else {
                layer.boxed()
            };

            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| LoggingError::Init(e.to_string()))?;

    tracing::info!(
        level = %config.level,
        file = config.directory.is_some(),
        "Logging system initialized"
    );

    Ok(guard)
}

/// Parse a filter directive such as `info` or `buffer=trace,warn`
pub fn build_filter(directive: &str) -> Result<EnvFilter, LoggingError> {
    EnvFilter::try_new(directive).map_err(|e| LoggingError::Filter(e.to_string()))
}

/// Logging setup errors
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("invalid log filter: {0}")]
    Filter(String),

    #[error("failed to create log directory: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to install subscriber: {0}")]
    Init(String),
}

/// Emit an event on the buffer target
#[macro_export]
macro_rules! log_buffer {
    ($level:expr, $($arg:tt)+) => {
        tracing::event!(target: "buffer", $level, $($arg)+)
    };
}
