//! Core building blocks shared by both buffer variants
//!
//! - Ordered: element capability (strict less-than, equality)
//! - Storage: fixed slots with wraparound logical indexing

pub mod ordering;
pub mod storage;

pub use ordering::Ordered;
pub use storage::Storage;
