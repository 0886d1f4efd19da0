#![doc = include_str!("../README.md")]
#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]

extern crate alloc;

/// Combinators that allow combining and extending existing parsers.
pub mod combinator;
/// Collections that repeated parsers accumulate their outputs into.
pub mod container;
/// Utilities for debugging parsers.
pub mod debug;
/// Error types and utilities.
pub mod error;
/// Read-only views over the text being parsed.
pub mod input;
/// Parser primitives that accept specific character patterns.
pub mod primitive;
/// Recursive parsers (parser that include themselves within their patterns).
pub mod recursive;
/// Text-specific parsers and utilities.
pub mod text;
mod util;

pub use crate::{
    error::{Failure, Reason},
    input::Input,
    util::MaybeSync,
};

/// Commonly used functions, traits and types.
pub mod prelude {
    pub use super::{
        combinator::{at_least, delimited_by, many, many_at_most, times, times_between},
        container::Collect,
        primitive::{
            any_of, char_class, digit, end, literal, never, none_of, not, pure, range, sequence,
            string,
        },
        recursive::{recursive, Recursive},
        text::{
            alnum, alpha, hex_digit, ignoring, ignoring_whitespace, optional_whitespace,
            required_whitespace, space, Fragment,
        },
        Failure, Input, Outcome, Parser, Reason, Success,
    };
}

use crate::util::{DynParse, RefC};
use alloc::{borrow::Cow, boxed::Box, string::ToString};
use core::fmt;

/// The product of a parse attempt that matched: a value and whatever input was left over.
#[derive(Clone, Debug, PartialEq)]
pub struct Success<'a, T> {
    /// The value produced by the parser.
    pub value: T,
    /// The input that the parser did not consume. Always a suffix of the input the parser was given.
    pub remaining: Input<'a>,
}

impl<'a, T> Success<'a, T> {
    /// Create a new [`Success`].
    pub fn new(value: T, remaining: Input<'a>) -> Self {
        Self { value, remaining }
    }

    /// Map the value of this success, keeping the remaining input.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Success<'a, U> {
        Success::new(f(self.value), self.remaining)
    }
}

/// The outcome of invoking a parser.
pub type Outcome<'a, T> = Result<Success<'a, T>, Failure<'a>>;

/// A parser: a cheaply clonable handle around a function from [`Input`] to [`Outcome`].
///
/// Parsers are built from the [primitives](crate::primitive) and glued together with the methods on this type and the
/// functions in [`combinator`], [`text`] and [`recursive`]. Combining parsers never mutates them: every combinator
/// returns a new parser that shares its operands.
///
/// The same parser invoked on the same input always produces the same outcome.
///
/// # Examples
///
/// ```
/// # use mparse::prelude::*;
/// let greeting = string("hello")
///     .skip(optional_whitespace())
///     .ignore_then(literal(','))
///     .skip(optional_whitespace())
///     .ignore_then(string("world"));
///
/// let success = greeting.invoke("hello, world").unwrap();
/// assert_eq!(success.value, "world");
/// assert!(success.remaining.is_empty());
/// ```
pub struct Parser<'a, T> {
    parse: RefC<DynParse<'a, T>>,
}

impl<'a, T> Clone for Parser<'a, T> {
    fn clone(&self) -> Self {
        Self {
            parse: self.parse.clone(),
        }
    }
}

impl<'a, T> fmt::Debug for Parser<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Parser<{}>", core::any::type_name::<T>())
    }
}

impl<'a, T: 'a> Parser<'a, T> {
    /// Create a parser from a function. This is the escape hatch for patterns the provided primitives don't cover.
    ///
    /// The function must uphold the same contract as every other parser: on success the remaining input is a suffix
    /// of the input it was given, and it has no side effects.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(Input<'a>) -> Outcome<'a, T> + MaybeSync + 'a,
    {
        Self {
            parse: RefC::new(f),
        }
    }

    /// Run this parser on the given input.
    ///
    /// # Examples
    ///
    /// ```
    /// # use mparse::prelude::*;
    /// let success = literal('a').invoke("abc").unwrap();
    /// assert_eq!(success.value, "a");
    /// assert_eq!(success.remaining.rest(), "bc");
    ///
    /// let failure = literal('a').invoke("xyz").unwrap_err();
    /// assert_eq!(failure.offset(), 0);
    /// ```
    pub fn invoke(&self, input: impl Into<Input<'a>>) -> Outcome<'a, T> {
        (self.parse)(input.into())
    }

    /// Run this parser on the given text, requiring that it consumes all of it.
    ///
    /// # Examples
    ///
    /// ```
    /// # use mparse::prelude::*;
    /// let word = many::<_, &str>(alpha());
    ///
    /// assert_eq!(word.parse("hello"), Ok("hello"));
    /// assert!(word.parse("hello!").is_err());
    /// ```
    pub fn parse(&self, text: &'a str) -> Result<T, Failure<'a>> {
        let Success { value, remaining } = self.invoke(text)?;
        if remaining.is_empty() {
            Ok(value)
        } else {
            Err(Failure::unexpected(remaining, error::Expected::End))
        }
    }

    /// Try this parser and, should it fail, try `other` on the same input instead.
    ///
    /// If this parser succeeds, `other` is never invoked. If both fail, the failure of `other` is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// # use mparse::prelude::*;
    /// let sign = literal('+').or_else(literal('-'));
    ///
    /// assert_eq!(sign.parse("+"), Ok("+"));
    /// assert_eq!(sign.parse("-"), Ok("-"));
    /// assert!(sign.parse("*").is_err());
    /// ```
    pub fn or_else(self, other: Parser<'a, T>) -> Parser<'a, T> {
        Parser::new(move |input| match self.invoke(input) {
            Ok(success) => Ok(success),
            Err(_) => other.invoke(input),
        })
    }

    /// Parse a pattern, then use its value to decide which parser to run on the remaining input.
    ///
    /// The output type of the new parser is that of the parser returned by `f`. If this parser fails, `f` is not
    /// called and the failure is propagated.
    ///
    /// # Examples
    ///
    /// ```
    /// # use mparse::prelude::*;
    /// // A digit followed by that many 'x's
    /// let counted = digit(0, 9).and_then(|n| times::<_, &str>(literal('x'), n as usize));
    ///
    /// assert_eq!(counted.parse("3xxx"), Ok("xxx"));
    /// assert!(counted.parse("3xx").is_err());
    /// ```
    pub fn and_then<U: 'a, F>(self, f: F) -> Parser<'a, U>
    where
        F: Fn(T) -> Parser<'a, U> + MaybeSync + 'a,
    {
        Parser::new(move |input| {
            let Success { value, remaining } = self.invoke(input)?;
            f(value).invoke(remaining)
        })
    }

    /// Parse a pattern, then `next`, keeping only the value of `next`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use mparse::prelude::*;
    /// let hex = string("0x").ignore_then(many::<_, &str>(hex_digit()));
    ///
    /// assert_eq!(hex.parse("0xBEEF"), Ok("BEEF"));
    /// ```
    pub fn ignore_then<U: 'a>(self, next: Parser<'a, U>) -> Parser<'a, U> {
        Parser::new(move |input| {
            let first = self.invoke(input)?;
            next.invoke(first.remaining)
        })
    }

    /// Parse a pattern, then `next`, keeping only the value of this parser.
    ///
    /// The remaining input is whatever `next` left behind. Fails if either parser fails.
    ///
    /// # Examples
    ///
    /// ```
    /// # use mparse::prelude::*;
    /// let statement = string("return").skip(literal(';'));
    ///
    /// let success = statement.invoke("return;").unwrap();
    /// assert_eq!(success.value, "return");
    /// assert!(success.remaining.is_empty());
    /// ```
    pub fn skip<U: 'a>(self, next: Parser<'a, U>) -> Parser<'a, T> {
        Parser::new(move |input| {
            let Success { value, remaining } = self.invoke(input)?;
            let after = next.invoke(remaining)?;
            Ok(Success::new(value, after.remaining))
        })
    }

    /// Parse a pattern, then reject the match if `forbidden` matches immediately after it.
    ///
    /// `forbidden` is only looked at: when it does not match, the output and remaining input are exactly those of
    /// this parser. When it does match, the new parser fails at the position this parser started from.
    ///
    /// # Examples
    ///
    /// ```
    /// # use mparse::prelude::*;
    /// // A lone zero, but not the start of "01"
    /// let zero = digit(0, 0).and_not(digit(0, 9));
    ///
    /// assert_eq!(zero.parse("0"), Ok(0));
    /// assert!(zero.invoke("01").is_err());
    /// ```
    pub fn and_not<U: 'a>(self, forbidden: Parser<'a, U>) -> Parser<'a, T> {
        Parser::new(move |input| {
            let success = self.invoke(input)?;
            match forbidden.invoke(success.remaining) {
                Ok(found) => Err(Failure::new(
                    input,
                    Reason::Forbidden {
                        found: success.remaining.slice_to(found.remaining).into(),
                    },
                )),
                Err(_) => Ok(success),
            }
        })
    }

    /// Map the output of this parser to another value.
    ///
    /// Failures pass through untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// # use mparse::prelude::*;
    /// let number = many::<_, &str>(range('0', '9')).transform(|digits| digits.len());
    ///
    /// assert_eq!(number.parse("12345"), Ok(5));
    /// ```
    pub fn transform<U: 'a, F>(self, f: F) -> Parser<'a, U>
    where
        F: Fn(T) -> U + MaybeSync + 'a,
    {
        Parser::new(move |input| self.invoke(input).map(|success| success.map(&f)))
    }

    /// Transform all outputs of this parser to a predetermined value.
    ///
    /// # Examples
    ///
    /// ```
    /// # use mparse::prelude::*;
    /// #[derive(Clone, Debug, PartialEq)]
    /// enum Op { Add, Mul }
    ///
    /// let op = literal('+').to(Op::Add).or_else(literal('*').to(Op::Mul));
    ///
    /// assert_eq!(op.parse("+"), Ok(Op::Add));
    /// assert_eq!(op.parse("*"), Ok(Op::Mul));
    /// ```
    pub fn to<U>(self, value: U) -> Parser<'a, U>
    where
        U: Clone + MaybeSync + 'a,
    {
        self.transform(move |_| value.clone())
    }

    /// After a successful parse, apply a fallible function to the output. If the function produces an error, treat
    /// it as a parse failure at the position where the match began.
    ///
    /// # Examples
    ///
    /// ```
    /// # use mparse::prelude::*;
    /// let byte = many::<_, &str>(range('0', '9'))
    ///     .try_transform(|digits| digits.parse::<u8>());
    ///
    /// assert_eq!(byte.parse("255"), Ok(255));
    /// assert!(byte.parse("256").is_err());
    /// ```
    pub fn try_transform<U: 'a, E, F>(self, f: F) -> Parser<'a, U>
    where
        E: fmt::Display,
        F: Fn(T) -> Result<U, E> + MaybeSync + 'a,
    {
        Parser::new(move |input| {
            let Success { value, remaining } = self.invoke(input)?;
            match f(value) {
                Ok(value) => Ok(Success::new(value, remaining)),
                Err(e) => Err(Failure::new(input, Reason::Custom(e.to_string()))),
            }
        })
    }

    /// Give the pattern parsed by this parser a name that is added to the failures it produces.
    ///
    /// # Examples
    ///
    /// ```
    /// # use mparse::prelude::*;
    /// let number = digit(0, 9).labelled("number");
    ///
    /// let failure = number.invoke("x").unwrap_err();
    /// assert!(failure.message().starts_with("expected number"));
    /// ```
    pub fn labelled(self, label: impl Into<Cow<'static, str>>) -> Parser<'a, T> {
        let label = label.into();
        Parser::new(move |input| {
            self.invoke(input).map_err(|failure| {
                failure.map_reason(|inner| Reason::Labelled {
                    label: label.clone(),
                    inner: Box::new(inner),
                })
            })
        })
    }

    /// Parse a pattern, ignoring any amount of whitespace both before and after it.
    ///
    /// See [`text::ignoring_whitespace`].
    ///
    /// # Examples
    ///
    /// ```
    /// # use mparse::prelude::*;
    /// let comma = literal(',').trim();
    ///
    /// assert_eq!(comma.parse("  ,  "), Ok(","));
    /// assert_eq!(comma.parse(","), Ok(","));
    /// ```
    pub fn trim(self) -> Parser<'a, T> {
        text::ignoring_whitespace(self)
    }
}
