//! Infrastructure - ambient concerns around the buffers
//!
//! This module contains code outside the insert/search/iterate paths:
//! - Configuration loading
//! - Logging setup
//! - Insertion statistics

pub mod config;
pub mod logging;
pub mod metrics;

pub use config::{BufferConfig, Config, ConfigError, LoggingConfig};
pub use logging::{build_filter, init_logging, LoggingError};
pub use metrics::BufferStats;
