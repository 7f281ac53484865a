use std::{fmt::Debug, hash::Hash};

/// A single unit of comparison: a byte, a code point, or any other small value
/// compared for exact equality.
pub trait Symbol: Copy + Ord + Hash + Debug + 'static {}

impl<T: Copy + Ord + Hash + Debug + 'static> Symbol for T {}

/// Splits a string into code points.
pub fn chars<S: AsRef<str>>(s: S) -> Vec<char> {
    s.as_ref().chars().collect()
}
