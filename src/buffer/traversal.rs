//! Single-pass, early-terminable traversal shared by both buffers
//!
//! A buffer owns one [`Traversal`] slot. `iter()` claims it and hands out an
//! [`Iter`] cursor; the slot is released when the cursor runs out, when it is
//! halted, when the buffer breaks the traversal, or when the cursor is
//! dropped. At most one traversal per buffer is active at a time.

use std::cell::Cell;
use std::iter::FusedIterator;

use crate::core::Storage;
use crate::log_buffer;
use crate::{BufferError, Result};

/// Cursor recorded while a traversal is active
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Cursor {
    position: usize,
    /// Live length when the traversal started
    limit: usize,
    epoch: u64,
}

/// Per-buffer iteration state slot
///
/// Interior mutability lets the owner observe and break a traversal through
/// `&self` while the `Iter` still borrows the buffer.
#[derive(Debug, Default)]
pub(crate) struct Traversal {
    cursor: Cell<Option<Cursor>>,
    next_epoch: Cell<u64>,
}

impl Traversal {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Claim the slot for a traversal over `limit` elements
    fn begin(&self, limit: usize) -> Result<u64> {
        if self.cursor.get().is_some() {
            return Err(BufferError::IterationActive);
        }

        let epoch = self.next_epoch.get();
        self.next_epoch.set(epoch.wrapping_add(1));

        // Nothing to yield: stay idle
        if limit > 0 {
            self.cursor.set(Some(Cursor {
                position: 0,
                limit,
                epoch,
            }));
        }

        Ok(epoch)
    }

    #[inline]
    pub(crate) fn is_active(&self) -> bool {
        self.cursor.get().is_some()
    }

    /// Position to read for traversal `epoch`, advancing the cursor
    ///
    /// The slot is cleared while handing out the final position.
    fn advance(&self, epoch: u64) -> Option<usize> {
        let mut cursor = self.cursor.get().filter(|c| c.epoch == epoch)?;

        let position = cursor.position;
        cursor.position += 1;

        if cursor.position >= cursor.limit {
            self.cursor.set(None);
        } else {
            self.cursor.set(Some(cursor));
        }

        Some(position)
    }

    fn remaining(&self, epoch: u64) -> usize {
        match self.cursor.get() {
            Some(c) if c.epoch == epoch => c.limit - c.position,
            _ => 0,
        }
    }

    /// Release the slot if it still belongs to `epoch`
    fn release(&self, epoch: u64) -> Option<Cursor> {
        match self.cursor.get() {
            Some(c) if c.epoch == epoch => self.cursor.take(),
            _ => None,
        }
    }

    /// Drop whatever traversal is active; no-op when idle
    pub(crate) fn halt(&self) {
        if let Some(cursor) = self.cursor.take() {
            Self::log_break(cursor);
        }
    }

    fn log_break(cursor: Cursor) {
        log_buffer!(
            tracing::Level::DEBUG,
            epoch = cursor.epoch,
            visited = cursor.position,
            limit = cursor.limit,
            "traversal broken"
        );
    }

    /// Start a traversal over `storage`
    pub(crate) fn iter<'a, T>(&'a self, storage: &'a Storage<T>) -> Result<Iter<'a, T>> {
        let epoch = self.begin(storage.len())?;
        Ok(Iter {
            storage,
            traversal: self,
            epoch,
        })
    }
}

/// Lazy cursor over a buffer's live elements in logical order
///
/// Returned by `iter()` on either buffer. Forward-only and not restartable.
/// Dropping it, or calling [`Iter::halt`], returns the buffer to idle.
pub struct Iter<'a, T> {
    storage: &'a Storage<T>,
    traversal: &'a Traversal,
    epoch: u64,
}

impl<'a, T> Iter<'a, T> {
    /// Stop early, discarding the cursor
    pub fn halt(self) {
        if let Some(cursor) = self.traversal.release(self.epoch) {
            Traversal::log_break(cursor);
        }
    }

    /// True while this cursor still owns the buffer's traversal slot
    pub fn is_active(&self) -> bool {
        self.traversal.remaining(self.epoch) > 0
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<&'a T> {
        let position = self.traversal.advance(self.epoch)?;
        self.storage.get(position)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.traversal.remaining(self.epoch);
        (remaining, Some(remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Drop for Iter<'_, T> {
    fn drop(&mut self) {
        self.traversal.release(self.epoch);
    }
}

impl<T> std::fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Iter")
            .field("epoch", &self.epoch)
            .field("remaining", &self.traversal.remaining(self.epoch))
            .finish()
    }
}
