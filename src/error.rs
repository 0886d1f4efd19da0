//! Error types and utilities.
//!
//! A failed parse produces a [`Failure`]: the [`Input`] position at which the parser gave up and the [`Reason`] it
//! gave up for. Failures are ordinary values; nothing in this crate panics or prints when a parse fails.

use super::*;
use alloc::{boxed::Box, string::String};
use core::ops::Range;

/// A description of what a parser was looking for when it failed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Expected {
    /// A specific character.
    Char(char),
    /// Any character in an inclusive range.
    Range(char, char),
    /// Any of the characters in the set.
    AnyOf(String),
    /// Any character that is not in the set.
    NoneOf(String),
    /// A character of a named class, such as `"whitespace"`.
    Class(Cow<'static, str>),
    /// A decimal digit with a value in an inclusive range.
    Digit(u32, u32),
    /// A literal piece of text.
    Str(String),
    /// Any character at all.
    Any,
    /// The end of the input.
    End,
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Char(c) => write!(f, "{:?}", c),
            Self::Range(first, last) => write!(f, "{:?} to {:?}", first, last),
            Self::AnyOf(set) => write!(f, "one of {:?}", set),
            Self::NoneOf(set) => write!(f, "anything but {:?}", set),
            Self::Class(name) => write!(f, "{}", name),
            Self::Digit(0, 9) => write!(f, "digit"),
            Self::Digit(first, last) if first == last => write!(f, "digit {}", first),
            Self::Digit(first, last) => write!(f, "digit {} to {}", first, last),
            Self::Str(text) => write!(f, "{:?}", text),
            Self::Any => write!(f, "any character"),
            Self::End => write!(f, "end of input"),
        }
    }
}

/// The reason a parser failed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Reason {
    /// The parser expected one thing but found another (or the end of input).
    Unexpected {
        /// What the parser was looking for.
        expected: Expected,
        /// The character actually found. `None` means the end of input was reached.
        found: Option<char>,
    },
    /// A repeated pattern matched fewer times than required.
    TooFew {
        /// The number of matches required.
        min: usize,
        /// The number of matches made.
        count: usize,
        /// Why the next match failed, if it did.
        inner: Option<Box<Reason>>,
    },
    /// A repeated pattern could have matched more times than allowed.
    TooMany {
        /// The maximum number of matches.
        max: usize,
    },
    /// A pattern matched but was followed by something forbidden after it.
    Forbidden {
        /// The text that was matched by the forbidden pattern. Empty if it matched without consuming anything.
        found: String,
    },
    /// A stage of a larger structure, such as a sequence or a delimited list, failed.
    Structure {
        /// The stage that failed.
        stage: Cow<'static, str>,
        /// Why it failed.
        inner: Box<Reason>,
    },
    /// Substrings were collected into a single span but were not adjacent in the source.
    Discontiguous,
    /// A recursive parser was invoked before it was defined, or after its definition was dropped.
    Undefined,
    /// The parser never matches.
    Never,
    /// A custom error, usually produced by [`Parser::try_transform`].
    Custom(String),
    /// A named pattern failed. See [`Parser::labelled`].
    Labelled {
        /// The name of the pattern.
        label: Cow<'static, str>,
        /// Why it failed.
        inner: Box<Reason>,
    },
}

impl Reason {
    /// The innermost reason, stripping away any context wrapped around it.
    ///
    /// # Examples
    ///
    /// ```
    /// # use mparse::{prelude::*, error::Expected};
    /// let failure = literal('a').labelled("letter a").invoke("b").unwrap_err();
    ///
    /// assert_eq!(
    ///     failure.reason().root(),
    ///     &Reason::Unexpected { expected: Expected::Char('a'), found: Some('b') },
    /// );
    /// ```
    pub fn root(&self) -> &Reason {
        match self {
            Self::Structure { inner, .. } | Self::Labelled { inner, .. } => inner.root(),
            Self::TooFew {
                inner: Some(inner), ..
            } => inner.root(),
            _ => self,
        }
    }
}

fn write_found(f: &mut fmt::Formatter<'_>, found: Option<char>) -> fmt::Result {
    match found {
        Some(c) => write!(f, "{:?}", c),
        None => write!(f, "end of input"),
    }
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unexpected { expected, found } => {
                write!(f, "expected {}, found ", expected)?;
                write_found(f, *found)
            }
            Self::TooFew { min, count, inner } => {
                write!(f, "expected at least {} occurrences, found {}", min, count)?;
                if let Some(inner) = inner {
                    write!(f, " ({})", inner)?;
                }
                Ok(())
            }
            Self::TooMany { max } => write!(f, "expected at most {} occurrences, found more", max),
            Self::Forbidden { found } if found.is_empty() => write!(f, "unexpected continuation"),
            Self::Forbidden { found } => write!(f, "unexpected {:?}", found),
            Self::Structure { stage, inner } => write!(f, "in {}: {}", stage, inner),
            Self::Discontiguous => write!(f, "collected text is not contiguous"),
            Self::Undefined => write!(f, "recursive parser is not defined"),
            Self::Never => write!(f, "no match possible"),
            Self::Custom(msg) => write!(f, "{}", msg),
            Self::Labelled { label, inner } => write!(f, "expected {}: {}", label, inner),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Reason {}

/// A failed parse: where it failed and why.
///
/// # Examples
///
/// ```
/// # use mparse::prelude::*;
/// let word = string("abc");
/// let failure = word.invoke("xyz").unwrap_err();
///
/// assert_eq!(failure.offset(), 0);
/// assert_eq!(failure.line_col(), (1, 1));
/// assert_eq!(failure.span(), 0..1);
/// assert_eq!(failure.message(), "expected \"abc\", found 'x'");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Failure<'a> {
    position: Input<'a>,
    reason: Reason,
}

impl<'a> Failure<'a> {
    /// Create a new failure at the given position.
    pub fn new(position: Input<'a>, reason: Reason) -> Self {
        Self { position, reason }
    }

    /// Create a failure for a parser that expected something at `position` but found whatever is there instead.
    pub fn unexpected(position: Input<'a>, expected: Expected) -> Self {
        Self::new(
            position,
            Reason::Unexpected {
                expected,
                found: position.peek(),
            },
        )
    }

    /// The position at which the parser gave up.
    pub fn position(&self) -> Input<'a> {
        self.position
    }

    /// Why the parser gave up.
    pub fn reason(&self) -> &Reason {
        &self.reason
    }

    /// Take the reason out of this failure.
    pub fn into_reason(self) -> Reason {
        self.reason
    }

    /// Replace the reason of this failure, keeping its position.
    pub fn map_reason(self, f: impl FnOnce(Reason) -> Reason) -> Self {
        Self {
            position: self.position,
            reason: f(self.reason),
        }
    }

    /// A human-readable description of the failure, without its position.
    pub fn message(&self) -> String {
        self.reason.to_string()
    }

    /// The byte offset of the failure from the start of the source.
    pub fn offset(&self) -> usize {
        self.position.offset()
    }

    /// The 1-based line and column of the failure.
    pub fn line_col(&self) -> (usize, usize) {
        self.position.line_col()
    }

    /// The byte range of the offending character, or an empty range at the end of input.
    pub fn span(&self) -> Range<usize> {
        self.position.span()
    }
}

impl<'a> fmt::Display for Failure<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (line, col) = self.line_col();
        write!(f, "{} at {}:{}", self.reason, line, col)
    }
}

#[cfg(feature = "std")]
impl<'a> std::error::Error for Failure<'a> {}

#[cfg(test)]
mod tests;
