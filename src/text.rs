//! Text-specific parsers and utilities.
//!
//! Character classification is ASCII-only and independent of the host locale; see [`ascii`].
//!
//! # Whitespace and contiguity
//!
//! Skipping whitespace around a pattern means its output no longer sits next to its neighbours in the source. Merging
//! such outputs into one [`&str`](str) span with the repetition combinators fails with
//! [`Reason::Discontiguous`] rather than silently covering the skipped whitespace. When a list of separated pieces is
//! wanted, use [`Parser::padded`] to produce explicit [`Fragment`]s and collect them into a [`Vec`](alloc::vec::Vec).

use super::*;
use crate::{combinator::{at_least, many}, primitive::class};

/// ASCII character classification.
///
/// These are narrower than the equivalent [`char`] methods: only ASCII characters are ever accepted.
pub mod ascii {
    /// `'0'` to `'9'`.
    pub fn is_digit(c: char) -> bool {
        c.is_ascii_digit()
    }

    /// `'a'` to `'z'` and `'A'` to `'Z'`.
    pub fn is_alpha(c: char) -> bool {
        c.is_ascii_alphabetic()
    }

    /// Either [`is_alpha`] or [`is_digit`].
    pub fn is_alnum(c: char) -> bool {
        is_alpha(c) || is_digit(c)
    }

    /// Space, tab, line feed, vertical tab, form feed and carriage return.
    pub fn is_space(c: char) -> bool {
        matches!(c, ' ' | '\t' | '\n' | '\x0B' | '\x0C' | '\r')
    }

    /// `'0'` to `'9'`, `'a'` to `'f'` and `'A'` to `'F'`.
    pub fn is_hex_digit(c: char) -> bool {
        c.is_ascii_hexdigit()
    }
}

/// A parser that accepts one ASCII letter.
pub fn alpha<'a>() -> Parser<'a, &'a str> {
    class("letter", ascii::is_alpha)
}

/// A parser that accepts one ASCII letter or digit.
pub fn alnum<'a>() -> Parser<'a, &'a str> {
    class("letter or digit", ascii::is_alnum)
}

/// A parser that accepts one ASCII whitespace character.
pub fn space<'a>() -> Parser<'a, &'a str> {
    class("whitespace", ascii::is_space)
}

/// A parser that accepts one hexadecimal digit, in either case.
///
/// # Examples
///
/// ```
/// # use mparse::prelude::*;
/// let color = literal('#').ignore_then(times::<_, &str>(hex_digit(), 6));
///
/// assert_eq!(color.parse("#C0FFEE"), Ok("C0FFEE"));
/// assert!(color.parse("#C0FFEG").is_err());
/// ```
pub fn hex_digit<'a>() -> Parser<'a, &'a str> {
    class("hexadecimal digit", ascii::is_hex_digit)
}

/// A parser that accepts (and ignores) any amount of whitespace, including none at all.
///
/// # Examples
///
/// ```
/// # use mparse::prelude::*;
/// assert_eq!(optional_whitespace().parse(""), Ok(()));
/// assert_eq!(optional_whitespace().parse(" \t\r\n"), Ok(()));
/// ```
pub fn optional_whitespace<'a>() -> Parser<'a, ()> {
    many(space())
}

/// A parser that accepts (and ignores) one or more whitespace characters.
///
/// # Examples
///
/// ```
/// # use mparse::prelude::*;
/// let pair = alpha().skip(required_whitespace()).skip(alpha());
///
/// assert_eq!(pair.parse("a  b"), Ok("a"));
/// assert!(pair.parse("ab").is_err());
/// ```
pub fn required_whitespace<'a>() -> Parser<'a, ()> {
    at_least(space(), 1)
}

/// Parse a pattern, ignoring matches of `ignore` before and after it.
///
/// The pattern is first tried directly, followed by `ignore`. If that fails, `ignore` is parsed first, then the
/// pattern, then `ignore` again.
///
/// # Examples
///
/// ```
/// # use mparse::prelude::*;
/// let dots = many::<_, ()>(literal('.'));
/// let word = ignoring(at_least::<_, &str>(alpha(), 1), dots);
///
/// assert_eq!(word.parse("..abc."), Ok("abc"));
/// assert_eq!(word.parse("abc"), Ok("abc"));
/// ```
pub fn ignoring<'a, T, U>(parser: Parser<'a, T>, ignore: Parser<'a, U>) -> Parser<'a, T>
where
    T: 'a,
    U: 'a,
{
    let direct = parser.clone().skip(ignore.clone());
    let prefixed = ignore.clone().ignore_then(parser).skip(ignore);
    direct.or_else(prefixed)
}

/// Parse a pattern, ignoring any whitespace before and after it. The same as [`Parser::trim`].
///
/// Applying this more than once accepts the same inputs as applying it once.
///
/// The output type is unchanged, so a trimmed substring parser still produces a `&str`. Repeating it and collecting
/// into a `&str` fails with [`Reason::Discontiguous`] as soon as whitespace separates two matches. Use
/// [`Parser::padded`] to get each match as a [`Fragment`], which marks it as not adjacent to its neighbours.
///
/// # Examples
///
/// ```
/// # use mparse::prelude::*;
/// let words = many::<_, &str>(ignoring_whitespace(alpha()));
/// assert_eq!(words.parse("a b").unwrap_err().reason(), &Reason::Discontiguous);
///
/// let words = many::<_, Vec<_>>(alpha().padded());
/// assert_eq!(words.parse("a b").unwrap().len(), 2);
/// ```
pub fn ignoring_whitespace<'a, T: 'a>(parser: Parser<'a, T>) -> Parser<'a, T> {
    ignoring(parser, optional_whitespace())
}

/// A piece of source text that is not assumed to be adjacent to any other.
///
/// Produced by [`Parser::detached`] and [`Parser::padded`]. Unlike a plain `&str`, fragments cannot be merged into a
/// span by the repetition combinators; collect them into a list instead.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fragment<'a>(&'a str);

impl<'a> Fragment<'a> {
    /// The text of this fragment, as a slice of the source.
    pub fn as_str(&self) -> &'a str {
        self.0
    }
}

impl<'a> core::ops::Deref for Fragment<'a> {
    type Target = str;

    fn deref(&self) -> &str {
        self.0
    }
}

impl<'a> fmt::Display for Fragment<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl<'a> Parser<'a, &'a str> {
    /// Wrap the matched text in a [`Fragment`], so it will not be merged with neighbouring matches.
    pub fn detached(self) -> Parser<'a, Fragment<'a>> {
        self.transform(Fragment)
    }

    /// Parse a pattern, ignoring surrounding whitespace, producing the matched text as a [`Fragment`].
    ///
    /// # Examples
    ///
    /// ```
    /// # use mparse::prelude::*;
    /// let values = many::<_, Vec<_>>(at_least::<_, &str>(range('0', '9'), 1).padded());
    ///
    /// let fragments = values.parse(" 10 20  30 ").unwrap();
    /// assert_eq!(fragments.iter().map(|f| f.as_str()).collect::<Vec<_>>(), ["10", "20", "30"]);
    /// ```
    pub fn padded(self) -> Parser<'a, Fragment<'a>> {
        ignoring_whitespace(self.detached())
    }
}
