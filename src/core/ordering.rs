//! Element capability for the ordered buffer
//!
//! The ordered buffer never looks at element identity directly. It only asks
//! two questions: is `a` strictly less than `b`, and is `a` equal to `b`.
//! Types answer them by implementing [`Ordered`].

/// Ordering and equality supplied by the element type.
///
/// `equals` is used only to confirm search hits and is free to disagree with
/// the ordering: two values may tie under `less` without being `equals`.
///
/// # Example
/// ```
/// use cbuffer::Ordered;
///
/// #[derive(Debug, Clone)]
/// struct Quote {
///     price: i64,
///     venue: &'static str,
/// }
///
/// impl Ordered for Quote {
///     fn less(&self, other: &Self) -> bool {
///         self.price < other.price
///     }
///
///     fn equals(&self, other: &Self) -> bool {
///         self.price == other.price && self.venue == other.venue
///     }
/// }
/// ```
pub trait Ordered {
    /// Strict less-than
    fn less(&self, other: &Self) -> bool;

    /// Equality used by search
    fn equals(&self, other: &Self) -> bool;
}

macro_rules! impl_ordered_natural {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Ordered for $ty {
                #[inline(always)]
                fn less(&self, other: &Self) -> bool {
                    self < other
                }

                #[inline(always)]
                fn equals(&self, other: &Self) -> bool {
                    self == other
                }
            }
        )*
    };
}

impl_ordered_natural!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, char, bool, String,
);

impl Ordered for &str {
    #[inline(always)]
    fn less(&self, other: &Self) -> bool {
        self < other
    }

    #[inline(always)]
    fn equals(&self, other: &Self) -> bool {
        self == other
    }
}
