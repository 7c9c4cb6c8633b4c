//! Insertion statistics per buffer
//!
//! Buffers are single-owner, so counters are plain integers updated in place.
//! `stats()` hands out a Copy snapshot.

/// Cumulative insertion counters for one buffer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BufferStats {
    /// Elements accepted by `add`
    pub inserted: u64,
    /// Plain buffer: oldest elements overwritten once full
    pub overwritten: u64,
    /// Ordered buffer: minimums evicted to make room
    pub evicted: u64,
    /// Ordered buffer: elements refused because they were below the minimum
    pub rejected: u64,
}

impl BufferStats {
    /// Create zeroed counters
    pub const fn new() -> Self {
        Self {
            inserted: 0,
            overwritten: 0,
            evicted: 0,
            rejected: 0,
        }
    }

    #[inline]
    pub(crate) fn record_insert(&mut self) {
        self.inserted += 1;
    }

    #[inline]
    pub(crate) fn record_overwrite(&mut self) {
        self.overwritten += 1;
    }

    #[inline]
    pub(crate) fn record_eviction(&mut self) {
        self.evicted += 1;
    }

    #[inline]
    pub(crate) fn record_rejection(&mut self) {
        self.rejected += 1;
    }

    /// Total `add` calls seen, accepted or not
    pub fn attempts(&self) -> u64 {
        self.inserted + self.rejected
    }

    /// Fraction of `add` calls that were rejected (0.0 when none)
    pub fn rejection_rate(&self) -> f64 {
        let attempts = self.attempts();
        if attempts == 0 {
            return 0.0;
        }
        self.rejected as f64 / attempts as f64
    }

    /// Zero all counters
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}
