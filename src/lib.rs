//! Fixed-capacity buffers: FIFO-overwrite ring and bounded top-K sorted set
//!
//! Both variants allocate their slots once and never grow.
//! - [`CircularBuffer`]: keeps the most recent `capacity` elements in arrival order
//! - [`OrderedCircularBuffer`]: keeps the `capacity` largest elements in ascending order
//!
//! Both expose a single-pass [`Iter`] that can be stopped early and always
//! returns the buffer to idle.

pub mod buffer;
pub mod core;
pub mod infrastructure;

#[cfg(test)]
pub mod test_utils;

// Re-export commonly used types
pub use crate::buffer::{CircularBuffer, Iter, OrderedCircularBuffer, Rejected};
pub use crate::core::Ordered;
pub use crate::infrastructure::config::{BufferConfig, Config};
pub use crate::infrastructure::metrics::BufferStats;

use thiserror::Error;

/// Main error type for the buffers
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BufferError {
    #[error("capacity must be positive")]
    InvalidCapacity,

    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("rejected: buffer full and item below minimum")]
    Rejected,

    #[error("a traversal is already active on this buffer")]
    IterationActive,
}

/// Result type alias
pub type Result<T> = std::result::Result<T, BufferError>;
