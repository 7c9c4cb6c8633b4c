//! Public buffer variants and their shared traversal
//!
//! - CircularBuffer: FIFO ring that overwrites the oldest element
//! - OrderedCircularBuffer: ascending set retaining the largest elements
//! - Iter: early-terminable cursor returned by `iter()` on either

pub mod ordered;
pub mod plain;
pub mod traversal;

pub use ordered::{OrderedCircularBuffer, Rejected};
pub use plain::CircularBuffer;
pub use traversal::Iter;
