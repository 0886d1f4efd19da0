//! Collections that repeated parsers accumulate their outputs into.
//!
//! The repetition combinators in [`combinator`](crate::combinator) are generic over the type they collect into, so the
//! caller decides at the use site whether matches should be gathered into a list, counted, discarded or merged into a
//! single zero-copy span of the source.

use super::*;
use alloc::{string::String, vec::Vec};
use core::hash::Hash;

/// A type that can be built up one item at a time from the outputs of a repeated parser.
///
/// # Examples
///
/// ```
/// # use mparse::prelude::*;
/// let digits = many::<_, Vec<u32>>(digit(0, 9));
/// assert_eq!(digits.parse("123"), Ok(vec![1, 2, 3]));
///
/// let count = many::<_, usize>(digit(0, 9));
/// assert_eq!(count.parse("123"), Ok(3));
///
/// // Substrings merge into one slice of the input, without allocating
/// let span = many::<_, &str>(range('0', '9'));
/// assert_eq!(span.parse("123"), Ok("123"));
/// ```
pub trait Collect<'a, T>: Sized {
    /// Create an empty collection for a repetition that starts at the given position.
    fn start(at: Input<'a>) -> Self;

    /// Add an item that was matched starting at the given position.
    ///
    /// Returning an error aborts the repetition with a failure at that position.
    fn push(&mut self, item: T, at: Input<'a>) -> Result<(), Reason>;
}

impl<'a, T> Collect<'a, T> for Vec<T> {
    fn start(_: Input<'a>) -> Self {
        Vec::new()
    }
    fn push(&mut self, item: T, _: Input<'a>) -> Result<(), Reason> {
        Vec::push(self, item);
        Ok(())
    }
}

impl<'a> Collect<'a, char> for String {
    fn start(_: Input<'a>) -> Self {
        String::new()
    }
    fn push(&mut self, item: char, _: Input<'a>) -> Result<(), Reason> {
        String::push(self, item);
        Ok(())
    }
}

impl<'a, 'b> Collect<'a, &'b str> for String {
    fn start(_: Input<'a>) -> Self {
        String::new()
    }
    fn push(&mut self, item: &'b str, _: Input<'a>) -> Result<(), Reason> {
        self.push_str(item);
        Ok(())
    }
}

/// Merges adjacent slices of the source into one slice. Fails with [`Reason::Discontiguous`] if an item does not
/// begin exactly where the previous one ended.
impl<'a> Collect<'a, &'a str> for &'a str {
    fn start(at: Input<'a>) -> Self {
        at.slice_to(at)
    }
    fn push(&mut self, item: &'a str, at: Input<'a>) -> Result<(), Reason> {
        if item.is_empty() {
            return Ok(());
        }
        let source = at.source();
        let base = source.as_ptr() as usize;
        let start = (self.as_ptr() as usize)
            .checked_sub(base)
            .ok_or(Reason::Discontiguous)?;
        let end = start + self.len();
        if item.as_ptr() as usize != base + end {
            return Err(Reason::Discontiguous);
        }
        *self = source
            .get(start..end + item.len())
            .ok_or(Reason::Discontiguous)?;
        Ok(())
    }
}

/// Counts the items.
impl<'a, T> Collect<'a, T> for usize {
    fn start(_: Input<'a>) -> Self {
        0
    }
    fn push(&mut self, _: T, _: Input<'a>) -> Result<(), Reason> {
        *self += 1;
        Ok(())
    }
}

/// Discards the items.
impl<'a, T> Collect<'a, T> for () {
    fn start(_: Input<'a>) -> Self {}
    fn push(&mut self, _: T, _: Input<'a>) -> Result<(), Reason> {
        Ok(())
    }
}

/// Later entries replace earlier ones with the same key.
impl<'a, K: Eq + Hash, V> Collect<'a, (K, V)> for hashbrown::HashMap<K, V> {
    fn start(_: Input<'a>) -> Self {
        hashbrown::HashMap::new()
    }
    fn push(&mut self, (key, value): (K, V), _: Input<'a>) -> Result<(), Reason> {
        self.insert(key, value);
        Ok(())
    }
}

/// Later entries replace earlier ones with the same key.
#[cfg(feature = "std")]
impl<'a, K: Eq + Hash, V> Collect<'a, (K, V)> for std::collections::HashMap<K, V> {
    fn start(_: Input<'a>) -> Self {
        std::collections::HashMap::new()
    }
    fn push(&mut self, (key, value): (K, V), _: Input<'a>) -> Result<(), Reason> {
        self.insert(key, value);
        Ok(())
    }
}
