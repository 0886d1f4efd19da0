//! Parser primitives that accept specific character patterns.
//!
//! Primitives are the most basic building blocks of a parser. Each one examines at most a few characters of input and
//! either matches them or fails without consuming anything. Character primitives produce the matched text as a slice
//! of the input, so their outputs can be merged back into longer spans by the repetition combinators.

use super::*;
use crate::{container::Collect, error::Expected, text::ascii};
use alloc::{format, string::String, vec::Vec};

/// Accept one character satisfying `accept`, producing it as a slice of the input.
fn one_char<'a, F>(expected: Expected, accept: F) -> Parser<'a, &'a str>
where
    F: Fn(char) -> bool + MaybeSync + 'a,
{
    Parser::new(move |input: Input<'a>| match input.split_first() {
        Some((c, rest)) if accept(c) => Ok(Success::new(input.slice_to(rest), rest)),
        _ => Err(Failure::unexpected(input, expected.clone())),
    })
}

/// A parser that accepts one character of a named class.
pub(crate) fn class<'a, F>(name: &'static str, accept: F) -> Parser<'a, &'a str>
where
    F: Fn(char) -> bool + MaybeSync + 'a,
{
    one_char(Expected::Class(Cow::Borrowed(name)), accept)
}

/// A parser that accepts only the given character.
///
/// # Examples
///
/// ```
/// # use mparse::prelude::*;
/// let question = literal('?');
///
/// assert_eq!(question.parse("?"), Ok("?"));
/// assert!(question.parse("!").is_err());
/// // Parsers do not eagerly consume input, so the '!' is left behind
/// assert_eq!(question.invoke("?!").unwrap().remaining.rest(), "!");
/// ```
pub fn literal<'a>(ch: char) -> Parser<'a, &'a str> {
    one_char(Expected::Char(ch), move |c| c == ch)
}

/// A parser that accepts one character between `first` and `last`, inclusive.
///
/// # Examples
///
/// ```
/// # use mparse::prelude::*;
/// let lower = range('a', 'z');
///
/// assert_eq!(lower.parse("q"), Ok("q"));
/// assert!(lower.parse("Q").is_err());
/// ```
pub fn range<'a>(first: char, last: char) -> Parser<'a, &'a str> {
    one_char(Expected::Range(first, last), move |c| {
        (first..=last).contains(&c)
    })
}

/// A parser that accepts any one of the characters in `set`.
///
/// # Examples
///
/// ```
/// # use mparse::prelude::*;
/// let sign = any_of("+-");
///
/// assert_eq!(sign.parse("+"), Ok("+"));
/// assert_eq!(sign.parse("-"), Ok("-"));
/// assert!(sign.parse("*").is_err());
/// ```
pub fn any_of<'a>(set: &str) -> Parser<'a, &'a str> {
    let set = String::from(set);
    one_char(Expected::AnyOf(set.clone()), move |c| set.contains(c))
}

/// A parser that accepts any one character that is not in `set`.
///
/// Like every character primitive, it fails at the end of input.
///
/// # Examples
///
/// ```
/// # use mparse::prelude::*;
/// let body = many::<_, &str>(none_of("\""));
///
/// let success = body.invoke("say \"hi\"").unwrap();
/// assert_eq!(success.value, "say ");
/// assert!(none_of("abc").invoke("").is_err());
/// ```
pub fn none_of<'a>(set: &str) -> Parser<'a, &'a str> {
    let set = String::from(set);
    one_char(Expected::NoneOf(set.clone()), move |c| !set.contains(c))
}

/// A parser that accepts one character satisfying a predicate.
///
/// # Examples
///
/// ```
/// # use mparse::prelude::*;
/// let vowel = char_class(|c| "aeiou".contains(c));
///
/// assert_eq!(vowel.parse("e"), Ok("e"));
/// assert!(vowel.parse("x").is_err());
/// ```
pub fn char_class<'a, F>(predicate: F) -> Parser<'a, &'a str>
where
    F: Fn(char) -> bool + MaybeSync + 'a,
{
    class("matching character", predicate)
}

/// A parser that accepts one ASCII decimal digit whose value lies between `first` and `last`, inclusive, and produces
/// that value.
///
/// # Examples
///
/// ```
/// # use mparse::prelude::*;
/// let nonzero = digit(1, 9);
///
/// assert_eq!(nonzero.parse("7"), Ok(7));
/// assert!(nonzero.parse("0").is_err());
/// assert!(nonzero.parse("a").is_err());
/// ```
pub fn digit<'a>(first: u32, last: u32) -> Parser<'a, u32> {
    Parser::new(move |input: Input<'a>| {
        let found = input
            .split_first()
            .filter(|(c, _)| ascii::is_digit(*c))
            .and_then(|(c, rest)| Some((c.to_digit(10)?, rest)));
        match found {
            Some((value, rest)) if (first..=last).contains(&value) => Ok(Success::new(value, rest)),
            _ => Err(Failure::unexpected(input, Expected::Digit(first, last))),
        }
    })
}

/// A parser that accepts the given text as a prefix of the input.
///
/// # Examples
///
/// ```
/// # use mparse::prelude::*;
/// let unit = string("px");
///
/// assert_eq!(unit.parse("px"), Ok("px"));
/// assert!(unit.parse("pt").is_err());
/// ```
pub fn string<'a>(text: &str) -> Parser<'a, &'a str> {
    let text = String::from(text);
    Parser::new(move |input: Input<'a>| {
        if input.rest().starts_with(text.as_str()) {
            let rest = input.advance(text.len());
            Ok(Success::new(input.slice_to(rest), rest))
        } else {
            Err(Failure::unexpected(input, Expected::Str(text.clone())))
        }
    })
}

/// A parser that runs each of the given parsers in order, producing the whole matched text as one slice.
///
/// If any parser fails, the sequence fails at that parser's failure position, naming which element failed.
///
/// # Examples
///
/// ```
/// # use mparse::prelude::*;
/// let ident = sequence([
///     alpha(),
///     many(alnum().or_else(literal('_'))),
/// ]);
///
/// assert_eq!(ident.parse("snake_case_2"), Ok("snake_case_2"));
/// assert!(ident.parse("2fast").is_err());
/// ```
pub fn sequence<'a, I>(parsers: I) -> Parser<'a, &'a str>
where
    I: IntoIterator<Item = Parser<'a, &'a str>>,
{
    let parsers: Vec<_> = parsers.into_iter().collect();
    Parser::new(move |input: Input<'a>| {
        let mut span = <&str as Collect<&str>>::start(input);
        let mut cursor = input;
        for (i, parser) in parsers.iter().enumerate() {
            let stage = |inner| Reason::Structure {
                stage: format!("element {} of sequence", i + 1).into(),
                inner: Box::new(inner),
            };
            let Success { value, remaining } = parser
                .invoke(cursor)
                .map_err(|failure| failure.map_reason(stage))?;
            span.push(value, cursor)
                .map_err(|reason| Failure::new(cursor, stage(reason)))?;
            cursor = remaining;
        }
        Ok(Success::new(span, cursor))
    })
}

/// A parser that accepts only the end of input, consuming nothing.
///
/// # Examples
///
/// ```
/// # use mparse::prelude::*;
/// assert_eq!(end().parse(""), Ok(()));
/// assert!(end().parse("hello").is_err());
/// ```
pub fn end<'a>() -> Parser<'a, ()> {
    Parser::new(|input: Input<'a>| {
        if input.is_empty() {
            Ok(Success::new((), input))
        } else {
            Err(Failure::unexpected(input, Expected::End))
        }
    })
}

/// A parser that never matches.
///
/// Useful as the identity of [`Parser::or_else`] when building alternatives in a loop.
///
/// # Examples
///
/// ```
/// # use mparse::prelude::*;
/// let keywords = ["let", "fn", "if"]
///     .into_iter()
///     .fold(never(), |acc, kw| acc.or_else(string(kw)));
///
/// assert_eq!(keywords.parse("fn"), Ok("fn"));
/// assert!(never::<()>().parse("").is_err());
/// ```
pub fn never<'a, T: 'a>() -> Parser<'a, T> {
    Parser::new(|input| Err(Failure::new(input, Reason::Never)))
}

/// A parser that always succeeds with the given value, consuming nothing.
///
/// # Examples
///
/// ```
/// # use mparse::prelude::*;
/// let sign = literal('-').to(-1).or_else(pure(1));
///
/// assert_eq!(sign.invoke("-5").unwrap().value, -1);
/// assert_eq!(sign.invoke("5").unwrap().value, 1);
/// ```
pub fn pure<'a, T>(value: T) -> Parser<'a, T>
where
    T: Clone + MaybeSync + 'a,
{
    Parser::new(move |input| Ok(Success::new(value.clone(), input)))
}

/// A parser that consumes one character, but only if `parser` fails at the current position.
///
/// Fails at the end of input.
///
/// # Examples
///
/// ```
/// # use mparse::prelude::*;
/// let comment = string("/*")
///     .ignore_then(many::<_, &str>(not(string("*/"))))
///     .skip(string("*/"));
///
/// assert_eq!(comment.parse("/* a * b */"), Ok(" a * b "));
/// ```
pub fn not<'a, T: 'a>(parser: Parser<'a, T>) -> Parser<'a, &'a str> {
    Parser::new(move |input: Input<'a>| match parser.invoke(input) {
        Ok(found) => Err(Failure::new(
            input,
            Reason::Forbidden {
                found: input.slice_to(found.remaining).into(),
            },
        )),
        Err(_) => match input.split_first() {
            Some((_, rest)) => Ok(Success::new(input.slice_to(rest), rest)),
            None => Err(Failure::unexpected(input, Expected::Any)),
        },
    })
}
