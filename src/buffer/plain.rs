//! FIFO-overwrite ring buffer
//!
//! Stores the most recent `capacity` elements in arrival order.
//! `add` never fails: once full, the oldest element is overwritten.

use std::fmt;
use std::ops::Index;

use crate::buffer::traversal::{Iter, Traversal};
use crate::core::Storage;
use crate::infrastructure::config::BufferConfig;
use crate::infrastructure::metrics::BufferStats;
use crate::log_buffer;
use crate::{BufferError, Result};

/// Ring buffer with fixed capacity
///
/// # Example
/// ```
/// use cbuffer::CircularBuffer;
///
/// let mut cb = CircularBuffer::new(3).unwrap();
/// for i in 0..5 {
///     cb.add(i);
/// }
///
/// // Oldest first
/// let seen: Vec<i32> = cb.iter().unwrap().copied().collect();
/// assert_eq!(seen, vec![2, 3, 4]);
/// assert!(!cb.is_iterating());
/// ```
pub struct CircularBuffer<T> {
    storage: Storage<T>,
    traversal: Traversal,
    stats: BufferStats,
}

impl<T> CircularBuffer<T> {
    /// Create an empty buffer holding at most `capacity` elements
    ///
    /// # Errors
    /// Returns `BufferError::InvalidCapacity` if `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self> {
        let storage = Storage::new(capacity)?;
        log_buffer!(tracing::Level::DEBUG, capacity, "plain buffer created");

        Ok(Self {
            storage,
            traversal: Traversal::new(),
            stats: BufferStats::new(),
        })
    }

    /// Create from a loaded configuration
    pub fn from_config(config: &BufferConfig) -> Result<Self> {
        Self::new(config.capacity)
    }

    /// Add value to buffer, overwriting the oldest once full
    #[inline]
    pub fn add(&mut self, item: T) {
        if self.storage.push_back(item).is_some() {
            self.stats.record_overwrite();
            log_buffer!(tracing::Level::TRACE, len = self.storage.len(), "oldest overwritten");
        }
        self.stats.record_insert();
    }

    /// Fixed capacity
    #[inline]
    pub fn cap(&self) -> usize {
        self.storage.capacity()
    }

    /// Live element count
    #[inline]
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.storage.is_full()
    }

    /// Element at `index`, oldest at 0
    ///
    /// # Errors
    /// Returns `BufferError::IndexOutOfRange` unless `index < len()`.
    pub fn get_item(&self, index: usize) -> Result<&T> {
        self.storage.get(index).ok_or(BufferError::IndexOutOfRange {
            index,
            len: self.storage.len(),
        })
    }

    /// Oldest element
    pub fn first(&self) -> Option<&T> {
        self.storage.get(0)
    }

    /// Most recently added element
    pub fn last(&self) -> Option<&T> {
        self.storage.len().checked_sub(1).and_then(|i| self.storage.get(i))
    }

    /// Start a traversal, oldest first
    ///
    /// # Errors
    /// Returns `BufferError::IterationActive` if another traversal of this
    /// buffer has not finished, been halted or been dropped.
    pub fn iter(&self) -> Result<Iter<'_, T>> {
        self.traversal.iter(&self.storage)
    }

    /// Stop the active traversal, if any
    pub fn break_iter(&self) {
        self.traversal.halt();
    }

    /// True while a traversal is in progress
    #[inline]
    pub fn is_iterating(&self) -> bool {
        self.traversal.is_active()
    }

    /// Copy out the live elements, oldest first
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.storage.values().cloned().collect()
    }

    /// Drop all elements; capacity and stats are kept
    pub fn clear(&mut self) {
        self.traversal.halt();
        self.storage.clear();
    }

    /// Insertion counters
    #[inline]
    pub fn stats(&self) -> BufferStats {
        self.stats
    }
}

impl<T> Index<usize> for CircularBuffer<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        match self.get_item(index) {
            Ok(item) => item,
            Err(e) => panic!("{}", e),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for CircularBuffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CircularBuffer")
            .field("cap", &self.cap())
            .field("len", &self.len())
            .field("items", &self.storage.values().collect::<Vec<_>>())
            .field("iterating", &self.is_iterating())
            .finish()
    }
}

impl<T: fmt::Display> fmt::Display for CircularBuffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, item) in self.storage.values().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", item)?;
        }
        write!(f, "]")
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(256))]

        /// Contents are the last `capacity` values, oldest first
        #[test]
        fn prop_keeps_most_recent(
            capacity in 1usize..64,
            values in prop::collection::vec(any::<u32>(), 0..500)
        ) {
            let mut cb = CircularBuffer::new(capacity).unwrap();
            for &v in &values {
                cb.add(v);
                prop_assert!(cb.len() <= cb.cap());
            }

            let keep = values.len().min(capacity);
            let expected = values[values.len() - keep..].to_vec();
            prop_assert_eq!(cb.to_vec(), expected);
        }

        /// Stopping after `k` elements always leaves the buffer idle
        #[test]
        fn prop_partial_traversal_releases(
            capacity in 1usize..32,
            fill in 0usize..64,
            k in 0usize..40
        ) {
            let mut cb = CircularBuffer::new(capacity).unwrap();
            for i in 0..fill {
                cb.add(i);
            }

            let taken = cb.iter().unwrap().take(k).count();
            prop_assert_eq!(taken, k.min(cb.len()));
            prop_assert!(!cb.is_iterating());

            prop_assert_eq!(cb.iter().unwrap().count(), cb.len());
        }
    }
}
