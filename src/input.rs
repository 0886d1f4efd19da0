//! Read-only views over the text being parsed.
//!
//! An [`Input`] is a position within a borrowed `&str`. Parsers never copy or mutate the text: consuming input just
//! produces a new [`Input`] further along the same buffer, so any substring a parser returns is a slice of the caller's
//! original text.

use super::*;
use core::ops::Range;

/// A position within a borrowed source text.
///
/// `Input` is `Copy`, so backtracking is free: an alternative simply runs again from the same value.
///
/// # Examples
///
/// ```
/// # use mparse::Input;
/// let input = Input::new("hello");
/// assert_eq!(input.peek(), Some('h'));
///
/// let (c, rest) = input.split_first().unwrap();
/// assert_eq!(c, 'h');
/// assert_eq!(rest.rest(), "ello");
/// assert_eq!(rest.offset(), 1);
/// ```
#[derive(Copy, Clone)]
pub struct Input<'a> {
    source: &'a str,
    offset: usize,
}

impl<'a> Input<'a> {
    /// Create an input positioned at the start of the given text.
    pub fn new(source: &'a str) -> Self {
        Self { source, offset: 0 }
    }

    /// The whole text this input is a position within, including anything already consumed.
    pub fn source(&self) -> &'a str {
        self.source
    }

    /// The byte offset of this position from the start of the source.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// The text that has not yet been consumed.
    pub fn rest(&self) -> &'a str {
        self.source.get(self.offset..).unwrap_or_default()
    }

    /// The number of bytes left to consume.
    pub fn len(&self) -> usize {
        self.source.len().saturating_sub(self.offset)
    }

    /// Whether all of the source has been consumed.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The next character, without consuming it.
    pub fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Split off the next character, returning it along with the input that follows it.
    pub fn split_first(self) -> Option<(char, Self)> {
        let c = self.peek()?;
        Some((c, self.advance(c.len_utf8())))
    }

    /// The text between this position and a later one.
    ///
    /// Returns an empty string if `end` is not at or after this position within the same source.
    pub fn slice_to(&self, end: Input<'a>) -> &'a str {
        self.source.get(self.offset..end.offset).unwrap_or_default()
    }

    // Callers must only advance by whole characters.
    pub(crate) fn advance(self, bytes: usize) -> Self {
        Self {
            source: self.source,
            offset: (self.offset + bytes).min(self.source.len()),
        }
    }

    /// The 1-based line and column of this position. Columns count characters, not bytes.
    ///
    /// # Examples
    ///
    /// ```
    /// # use mparse::Input;
    /// let input = Input::new("ab\ncd");
    /// let (_, after) = input.split_first().unwrap();
    /// assert_eq!(after.line_col(), (1, 2));
    ///
    /// let last = input.split_first().and_then(|(_, i)| i.split_first()).and_then(|(_, i)| i.split_first()).unwrap().1;
    /// assert_eq!(last.line_col(), (2, 1));
    /// ```
    pub fn line_col(&self) -> (usize, usize) {
        let consumed = self.source.get(..self.offset).unwrap_or_default();
        let line = consumed.matches('\n').count() + 1;
        let line_start = consumed.rfind('\n').map_or(0, |i| i + 1);
        let col = consumed[line_start..].chars().count() + 1;
        (line, col)
    }

    /// The byte range covered by the next character, or an empty range at the end of input.
    pub fn span(&self) -> Range<usize> {
        let width = self.peek().map_or(0, char::len_utf8);
        self.offset..self.offset + width
    }
}

impl<'a> From<&'a str> for Input<'a> {
    fn from(source: &'a str) -> Self {
        Self::new(source)
    }
}

impl<'a> PartialEq for Input<'a> {
    fn eq(&self, other: &Self) -> bool {
        core::ptr::eq(self.source, other.source) && self.offset == other.offset
    }
}

impl<'a> Eq for Input<'a> {}

impl<'a> fmt::Debug for Input<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const PREVIEW: usize = 16;
        let rest = self.rest();
        match rest.char_indices().nth(PREVIEW) {
            Some((end, _)) => write!(f, "Input@{} {:?}..", self.offset, &rest[..end]),
            None => write!(f, "Input@{} {:?}", self.offset, rest),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advances_by_whole_characters() {
        let input = Input::new("é!");
        let (c, rest) = input.split_first().unwrap();
        assert_eq!(c, 'é');
        assert_eq!(rest.offset(), 2);
        assert_eq!(rest.rest(), "!");
        assert_eq!(input.slice_to(rest), "é");
    }

    #[test]
    fn empty_input() {
        let input = Input::new("");
        assert!(input.is_empty());
        assert_eq!(input.peek(), None);
        assert!(input.split_first().is_none());
        assert_eq!(input.span(), 0..0);
        assert_eq!(input.line_col(), (1, 1));
    }

    #[test]
    fn slice_backwards_is_empty() {
        let input = Input::new("abc");
        let later = input.advance(2);
        assert_eq!(later.slice_to(input), "");
    }

    #[test]
    fn equality_is_by_buffer_and_offset() {
        let text = String::from("aa");
        let a = Input::new(&text);
        let b = Input::new(&text[..]);
        assert_eq!(a, b);
        assert_ne!(a, a.advance(1));

        let copy = text.clone();
        assert_ne!(a, Input::new(&copy));
    }

    #[test]
    fn debug_preview() {
        let input = Input::new("abcdefghijklmnopqrstuvwxyz").advance(2);
        assert_eq!(format!("{:?}", input), "Input@2 \"cdefghijklmnopqr\"..");
    }
}
