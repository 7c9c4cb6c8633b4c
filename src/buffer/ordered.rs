//! Bounded sorted set retaining the largest elements seen
//!
//! Elements are kept in ascending order under [`Ordered::less`]. Once full,
//! a new element must beat the current minimum, which it then replaces;
//! anything else is handed back as [`Rejected`].
//!
//! Insert: O(log n) search + O(min(i, n - i)) shift. Search: O(log n) plus
//! the width of the tie range.

use std::fmt;
use std::ops::Index;

use crate::buffer::traversal::{Iter, Traversal};
use crate::core::{Ordered, Storage};
use crate::infrastructure::config::BufferConfig;
use crate::infrastructure::metrics::BufferStats;
use crate::log_buffer;
use crate::{BufferError, Result};

/// Item refused by a full [`OrderedCircularBuffer`]
///
/// Carries the item back to the caller; the buffer is unchanged.
#[derive(Clone, PartialEq, Eq)]
pub struct Rejected<T>(pub T);

impl<T> Rejected<T> {
    /// Take the refused item back
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> fmt::Debug for Rejected<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Rejected(..)")
    }
}

impl<T> fmt::Display for Rejected<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", BufferError::Rejected)
    }
}

impl<T> std::error::Error for Rejected<T> {}

impl<T> From<Rejected<T>> for BufferError {
    fn from(_: Rejected<T>) -> Self {
        BufferError::Rejected
    }
}

/// Sorted buffer keeping the `capacity` largest elements
///
/// # Example
/// ```
/// use cbuffer::OrderedCircularBuffer;
///
/// let mut top = OrderedCircularBuffer::new(3).unwrap();
/// for v in [5, 1, 9, 7, 3] {
///     let _ = top.add(v);
/// }
///
/// assert_eq!(top.to_vec(), vec![5, 7, 9]);
/// assert_eq!(top.search(&7), Some(1));
/// assert_eq!(top.search(&1), None);
/// ```
pub struct OrderedCircularBuffer<T> {
    storage: Storage<T>,
    traversal: Traversal,
    stats: BufferStats,
}

impl<T: Ordered> OrderedCircularBuffer<T> {
    /// Create an empty buffer keeping at most `capacity` elements
    ///
    /// # Errors
    /// Returns `BufferError::InvalidCapacity` if `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self> {
        let storage = Storage::new(capacity)?;
        log_buffer!(tracing::Level::DEBUG, capacity, "ordered buffer created");

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

    /// Insert keeping ascending order
    ///
    /// Below capacity this always succeeds. When full, `item` must be
    /// strictly greater than the current minimum; the minimum is then
    /// evicted. Otherwise the item is returned untouched.
    ///
    /// # Errors
    /// Returns `Rejected(item)` if the buffer is full and `item` does not
    /// beat the minimum.
    pub fn add(&mut self, item: T) -> std::result::Result<(), Rejected<T>> {
        if self.storage.is_full() {
            let beats_min = match self.storage.get(0) {
                Some(min) => min.less(&item),
                None => true,
            };

            if !beats_min {
                self.stats.record_rejection();
                log_buffer!(tracing::Level::TRACE, len = self.storage.len(), "item rejected");
                return Err(Rejected(item));
            }

            self.storage.pop_front();
            self.stats.record_eviction();
            log_buffer!(tracing::Level::TRACE, len = self.storage.len(), "minimum evicted");
        }

        self.insert_sorted(item);
        self.stats.record_insert();
        Ok(())
    }

    /// Place `item` after every element it is not less than
    ///
    /// Ties therefore keep insertion order.
    #[inline]
    fn insert_sorted(&mut self, item: T) {
        let index = self.storage.partition_point(|e| !item.less(e));
        self.storage.insert(index, item);
    }

    /// Logical index of an element `equals` to `item`
    ///
    /// Binary-searches with `less` to the first element not less than
    /// `item`, then scans the elements tied with it for one that `equals`.
    /// Returns the first match, or `None` if nothing stored is equal.
    pub fn search(&self, item: &T) -> Option<usize> {
        let start = self.storage.partition_point(|e| e.less(item));

        for index in start..self.storage.len() {
            let candidate = self.storage.get(index)?;
            if item.less(candidate) {
                break;
            }
            if candidate.equals(item) {
                return Some(index);
            }
        }

        None
    }

    /// True if an element `equals` to `item` is stored
    #[inline]
    pub fn contains(&self, item: &T) -> bool {
        self.search(item).is_some()
    }
}

impl<T> OrderedCircularBuffer<T> {
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

    /// Element at `index`, smallest at 0
    ///
    /// # Errors
    /// Returns `BufferError::IndexOutOfRange` unless `index < len()`.
    pub fn get_item(&self, index: usize) -> Result<&T> {
        self.storage.get(index).ok_or(BufferError::IndexOutOfRange {
            index,
            len: self.storage.len(),
        })
    }

    /// Smallest element, the next one to be evicted
    pub fn min(&self) -> Option<&T> {
        self.storage.get(0)
    }

    /// Largest element
    pub fn max(&self) -> Option<&T> {
        self.storage.len().checked_sub(1).and_then(|i| self.storage.get(i))
    }

    /// Start a traversal in ascending order
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

    /// Copy out the live elements in ascending order
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

impl<T> Index<usize> for OrderedCircularBuffer<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        match self.get_item(index) {
            Ok(item) => item,
            Err(e) => panic!("{}", e),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for OrderedCircularBuffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrderedCircularBuffer")
            .field("cap", &self.cap())
            .field("len", &self.len())
            .field("items", &self.storage.values().collect::<Vec<_>>())
            .field("iterating", &self.is_iterating())
            .finish()
    }
}

impl<T: fmt::Display> fmt::Display for OrderedCircularBuffer<T> {
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

        /// Length bounded by capacity and ascending order after every add
        #[test]
        fn prop_bounded_and_sorted(
            capacity in 1usize..20,
            values in prop::collection::vec(-50i32..50, 0..200)
        ) {
            let mut ocb = OrderedCircularBuffer::new(capacity).unwrap();

            for v in values {
                let _ = ocb.add(v);
                prop_assert!(ocb.len() <= ocb.cap());

                let contents = ocb.to_vec();
                prop_assert!(contents.windows(2).all(|w| !w[1].less(&w[0])),
                    "not ascending: {:?}", contents);
            }
        }

        /// Contents are the `capacity` largest values inserted
        #[test]
        fn prop_retains_top_k(
            capacity in 1usize..20,
            values in prop::collection::vec(any::<i32>(), 0..200)
        ) {
            let mut ocb = OrderedCircularBuffer::new(capacity).unwrap();
            for &v in &values {
                let _ = ocb.add(v);
            }

            let mut sorted = values.clone();
            sorted.sort_unstable();
            let keep = sorted.len().min(capacity);
            let expected = sorted[sorted.len() - keep..].to_vec();

            prop_assert_eq!(ocb.to_vec(), expected);
        }

        /// A full buffer refusing an item is left exactly as it was
        #[test]
        fn prop_rejection_is_noop(
            values in prop::collection::vec(0i32..1000, 1..50),
            below in 0i32..1000
        ) {
            let capacity = values.len();
            let mut ocb = OrderedCircularBuffer::new(capacity).unwrap();
            for &v in &values {
                prop_assert!(ocb.add(v).is_ok());
            }

            let before = ocb.to_vec();
            let min = before[0];
            let candidate = below.min(min);

            prop_assert_eq!(ocb.add(candidate), Err(Rejected(candidate)));
            prop_assert_eq!(ocb.to_vec(), before);
            prop_assert_eq!(ocb.min(), Some(&min));
        }

        /// Every stored distinct value is found at its index; absent ones are not
        #[test]
        fn prop_search_finds_stored(
            set in prop::collection::btree_set(-500i32..500, 1..100),
            probe in -1000i32..1000
        ) {
            let values: Vec<i32> = set.iter().copied().collect();
            let mut ocb = OrderedCircularBuffer::new(values.len()).unwrap();
            for &v in values.iter().rev() {
                prop_assert!(ocb.add(v).is_ok());
            }

            for (i, v) in values.iter().enumerate() {
                prop_assert_eq!(ocb.search(v), Some(i));
            }

            if !set.contains(&probe) {
                prop_assert_eq!(ocb.search(&probe), None);
            }
        }
    }
}
