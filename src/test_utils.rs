//! Test element types and builders shared by buffer tests

use std::fmt;

use crate::buffer::OrderedCircularBuffer;
use crate::core::Ordered;

/// Minimal element with an integer key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct D {
    pub value: i32,
}

impl Ordered for D {
    fn less(&self, other: &Self) -> bool {
        self.value < other.value
    }

    fn equals(&self, other: &Self) -> bool {
        self == other
    }
}

impl fmt::Display for D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

#[inline]
pub fn d(value: i32) -> D {
    D { value }
}

/// Element ordered by `value` only but compared for equality on both fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tagged {
    pub value: i32,
    pub tag: char,
}

impl Tagged {
    pub fn new(value: i32, tag: char) -> Self {
        Self { value, tag }
    }
}

impl Ordered for Tagged {
    fn less(&self, other: &Self) -> bool {
        self.value < other.value
    }

    fn equals(&self, other: &Self) -> bool {
        self.value == other.value && self.tag == other.tag
    }
}

/// Ordered buffer filled from `values`, ignoring rejections
pub fn ordered_from(capacity: usize, values: &[i32]) -> OrderedCircularBuffer<D> {
    let mut ocb = OrderedCircularBuffer::new(capacity).unwrap();
    for &v in values {
        let _ = ocb.add(d(v));
    }
    ocb
}
