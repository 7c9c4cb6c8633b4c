//! Fixed-slot storage shared by both buffer variants
//!
//! Slots are allocated once at construction. Logical position `i` lives in
//! physical slot `(head + i) % capacity`, so dropping the front is O(1) and
//! inserts only shift the shorter side of the live window.

use crate::{BufferError, Result};

/// Storage core with wraparound indexing
pub struct Storage<T> {
    slots: Box<[Option<T>]>,
    /// Physical slot of logical position 0
    head: usize,
    len: usize,
}

impl<T> Storage<T> {
    /// Allocate `capacity` empty slots
    ///
    /// # Errors
    /// Returns `BufferError::InvalidCapacity` if `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(BufferError::InvalidCapacity);
        }

        let slots = std::iter::repeat_with(|| None).take(capacity).collect();

        Ok(Self {
            slots,
            head: 0,
            len: 0,
        })
    }

    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline(always)]
    pub fn is_full(&self) -> bool {
        self.len == self.slots.len()
    }

    /// Map a logical position to its physical slot
    #[inline(always)]
    fn physical(&self, index: usize) -> usize {
        (self.head + index) % self.slots.len()
    }

    /// Element at logical position `index`
    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        if index >= self.len {
            return None;
        }
        self.slots[self.physical(index)].as_ref()
    }

    /// Append at the back
    ///
    /// When full, the oldest element is overwritten and returned, and the
    /// window slides forward by one.
    pub fn push_back(&mut self, item: T) -> Option<T> {
        if self.len < self.slots.len() {
            let slot = self.physical(self.len);
            self.slots[slot] = Some(item);
            self.len += 1;
            return None;
        }

        let oldest = self.slots[self.head].replace(item);
        self.head = (self.head + 1) % self.slots.len();
        oldest
    }

    /// Remove logical position 0
    pub fn pop_front(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }

        let front = self.slots[self.head].take();
        self.head = (self.head + 1) % self.slots.len();
        self.len -= 1;
        front
    }

    /// Insert at logical `index`, shifting whichever side is shorter
    ///
    /// # Panics
    /// Panics if the storage is full or `index > len`. Callers make room
    /// first.
    pub fn insert(&mut self, index: usize, item: T) {
        assert!(self.len < self.slots.len(), "insert into full storage");
        assert!(index <= self.len, "insert index {} beyond len {}", index, self.len);

        let cap = self.slots.len();

        if index < self.len - index {
            // Move the head back one slot and pull the front part down
            self.head = (self.head + cap - 1) % cap;
            for i in 0..index {
                let from = self.physical(i + 1);
                let to = self.physical(i);
                self.slots[to] = self.slots[from].take();
            }
        } else {
            for i in (index..self.len).rev() {
                let from = self.physical(i);
                let to = self.physical(i + 1);
                self.slots[to] = self.slots[from].take();
            }
        }

        let slot = self.physical(index);
        self.slots[slot] = Some(item);
        self.len += 1;
    }

    /// First logical position for which `pred` is false
    ///
    /// `pred` must hold for a prefix of the live elements and fail for the
    /// rest, as with [`slice::partition_point`].
    pub fn partition_point<P>(&self, mut pred: P) -> usize
    where
        P: FnMut(&T) -> bool,
    {
        let mut lo = 0;
        let mut hi = self.len;

        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            match self.get(mid) {
                Some(item) if pred(item) => lo = mid + 1,
                _ => hi = mid,
            }
        }

        lo
    }

    /// Live elements in logical order
    pub fn values(&self) -> impl Iterator<Item = &T> + '_ {
        (0..self.len).filter_map(move |i| self.get(i))
    }

    /// Drop all elements, keeping the allocation
    pub fn clear(&mut self) {
        for slot in self.slots.iter_mut() {
            *slot = None;
        }
        self.head = 0;
        self.len = 0;
    }
}
