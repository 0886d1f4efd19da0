//! Combinators that allow combining and extending existing parsers.
//!
//! The most common combinators are methods on [`Parser`]. The ones here repeat a parser, collecting its outputs into
//! any [`Collect`] type chosen by the caller, or parse delimited lists.
//!
//! # Repetition
//!
//! Every repetition combinator follows the same rules:
//!
//! - Matching stops at the first failure of the inner parser, which is not an error in itself.
//! - If the maximum number of matches has been made and the inner parser would match again, the repetition fails at
//!   the position where that extra match began.
//! - If fewer than the minimum number of matches were made, the repetition fails at the position of the inner failure,
//!   reporting it.
//! - A match that consumes nothing is counted once and then ends the repetition, so repeating a parser that can match
//!   the empty string always terminates.

use super::*;
use crate::container::Collect;
use alloc::vec::Vec;

fn repeat<'a, T, C>(parser: Parser<'a, T>, min: usize, max: Option<usize>) -> Parser<'a, C>
where
    T: 'a,
    C: Collect<'a, T> + 'a,
{
    Parser::new(move |input: Input<'a>| {
        let mut items = C::start(input);
        let mut count = 0;
        let mut cursor = input;
        let stopped = loop {
            match parser.invoke(cursor) {
                Ok(Success { value, remaining }) => {
                    if max.is_some_and(|max| count >= max) {
                        return Err(Failure::new(cursor, Reason::TooMany { max: count }));
                    }
                    items
                        .push(value, cursor)
                        .map_err(|reason| Failure::new(cursor, reason))?;
                    count += 1;
                    let progressed = remaining.offset() > cursor.offset();
                    cursor = remaining;
                    if !progressed {
                        break None;
                    }
                }
                Err(failure) => break Some(failure),
            }
        };

        if count < min {
            let (position, inner) = match stopped {
                Some(failure) => (failure.position(), Some(Box::new(failure.into_reason()))),
                None => (cursor, None),
            };
            return Err(Failure::new(position, Reason::TooFew { min, count, inner }));
        }
        Ok(Success::new(items, cursor))
    })
}

/// Parse a pattern zero or more times, collecting the outputs into `C`.
///
/// Never fails unless the outputs cannot be collected (see [`Collect`]).
///
/// # Examples
///
/// ```
/// # use mparse::prelude::*;
/// let digits = many::<_, &str>(range('0', '9'));
///
/// assert_eq!(digits.parse("2024"), Ok("2024"));
/// assert_eq!(digits.parse(""), Ok(""));
///
/// let word = at_least::<_, &str>(alpha(), 1);
/// let words = many::<_, Vec<_>>(word.skip(optional_whitespace()));
/// assert_eq!(words.parse("hello big world"), Ok(vec!["hello", "big", "world"]));
/// ```
pub fn many<'a, T, C>(parser: Parser<'a, T>) -> Parser<'a, C>
where
    T: 'a,
    C: Collect<'a, T> + 'a,
{
    repeat(parser, 0, None)
}

/// Parse a pattern zero or more times, failing if it could match more than `max` times.
///
/// # Examples
///
/// ```
/// # use mparse::prelude::*;
/// let short = many_at_most::<_, &str>(alpha(), 3);
///
/// assert_eq!(short.parse("abc"), Ok("abc"));
/// assert_eq!(short.parse("a"), Ok("a"));
///
/// let failure = short.invoke("abcd").unwrap_err();
/// assert_eq!(failure.offset(), 3);
/// ```
pub fn many_at_most<'a, T, C>(parser: Parser<'a, T>, max: usize) -> Parser<'a, C>
where
    T: 'a,
    C: Collect<'a, T> + 'a,
{
    repeat(parser, 0, Some(max))
}

/// Parse a pattern exactly `n` times.
///
/// # Examples
///
/// ```
/// # use mparse::prelude::*;
/// let byte = times::<_, &str>(hex_digit(), 2);
///
/// assert_eq!(byte.parse("ff"), Ok("ff"));
/// assert!(byte.parse("f").is_err());
/// assert!(byte.parse("fff").is_err());
/// ```
pub fn times<'a, T, C>(parser: Parser<'a, T>, n: usize) -> Parser<'a, C>
where
    T: 'a,
    C: Collect<'a, T> + 'a,
{
    repeat(parser, n, Some(n))
}

/// Parse a pattern at least `min` and at most `max` times.
///
/// # Examples
///
/// ```
/// # use mparse::prelude::*;
/// let year = times_between::<_, Vec<_>>(digit(0, 9), 2, 4);
///
/// assert_eq!(year.parse("99"), Ok(vec![9, 9]));
/// assert_eq!(year.parse("2024"), Ok(vec![2, 0, 2, 4]));
/// assert!(year.parse("1").is_err());
/// assert!(year.parse("12345").is_err());
/// ```
pub fn times_between<'a, T, C>(parser: Parser<'a, T>, min: usize, max: usize) -> Parser<'a, C>
where
    T: 'a,
    C: Collect<'a, T> + 'a,
{
    repeat(parser, min, Some(max))
}

/// Parse a pattern `min` or more times.
///
/// # Examples
///
/// ```
/// # use mparse::prelude::*;
/// let number = at_least::<_, &str>(range('0', '9'), 1);
///
/// assert_eq!(number.parse("42"), Ok("42"));
///
/// let failure = number.invoke("x").unwrap_err();
/// assert!(matches!(failure.reason(), Reason::TooFew { min: 1, count: 0, .. }));
/// ```
pub fn at_least<'a, T, C>(parser: Parser<'a, T>, min: usize) -> Parser<'a, C>
where
    T: 'a,
    C: Collect<'a, T> + 'a,
{
    repeat(parser, min, None)
}

/// Parse a list of `item`s separated by `delimiter` and followed by `terminator`.
///
/// The list holds at least one item: zero or more items each followed by a delimiter, then a final item. The
/// terminator must follow the final item immediately, but is not consumed: the remaining input of a successful parse
/// begins with the terminator.
///
/// If the final item or the terminator does not match, the parser fails with a [`Reason::Structure`] naming the
/// `"final list item"` or `"list terminator"` stage and wrapping the inner failure.
///
/// # Examples
///
/// ```
/// # use mparse::prelude::*;
/// let args = delimited_by(
///     many::<_, &str>(alnum()),
///     literal(',').trim(),
///     literal(')'),
/// );
///
/// let success = args.invoke("a, b ,c)").unwrap();
/// assert_eq!(success.value, vec!["a", "b", "c"]);
/// assert_eq!(success.remaining.rest(), ")");
/// ```
pub fn delimited_by<'a, T, D, S>(
    item: Parser<'a, T>,
    delimiter: Parser<'a, D>,
    terminator: Parser<'a, S>,
) -> Parser<'a, Vec<T>>
where
    T: 'a,
    D: 'a,
    S: 'a,
{
    let unit = item.clone().skip(delimiter);
    Parser::new(move |input: Input<'a>| {
        let mut items = Vec::new();
        let mut cursor = input;
        while let Ok(Success { value, remaining }) = unit.invoke(cursor) {
            if remaining.offset() == cursor.offset() {
                break;
            }
            items.push(value);
            cursor = remaining;
        }

        let last = item.invoke(cursor).map_err(|failure| {
            failure.map_reason(|inner| Reason::Structure {
                stage: Cow::Borrowed("final list item"),
                inner: Box::new(inner),
            })
        })?;
        terminator.invoke(last.remaining).map_err(|failure| {
            failure.map_reason(|inner| Reason::Structure {
                stage: Cow::Borrowed("list terminator"),
                inner: Box::new(inner),
            })
        })?;
        items.push(last.value);
        Ok(Success::new(items, last.remaining))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::*;

    #[test]
    fn many_stops_at_first_failure() {
        let success = many::<_, Vec<_>>(digit(0, 9)).invoke("12a3").unwrap();
        assert_eq!(success.value, vec![1, 2]);
        assert_eq!(success.remaining.rest(), "a3");
    }

    #[test]
    fn many_of_zero_width_terminates() {
        let success = many::<_, usize>(pure(())).invoke("abc").unwrap();
        assert_eq!(success.value, 1);
        assert_eq!(success.remaining.offset(), 0);

        let success = many::<_, &str>(optional_whitespace().to("")).invoke("abc").unwrap();
        assert_eq!(success.value, "");
    }

    #[test]
    fn too_many_fails_where_extra_match_begins() {
        let failure = many_at_most::<_, ()>(literal('a'), 2).invoke("aaab").unwrap_err();
        assert_eq!(failure.offset(), 2);
        assert_eq!(failure.reason(), &Reason::TooMany { max: 2 });
    }

    #[test]
    fn too_few_reports_inner_failure() {
        let failure = times::<_, ()>(literal('a'), 3).invoke("aab").unwrap_err();
        assert_eq!(failure.offset(), 2);
        match failure.reason() {
            Reason::TooFew { min: 3, count: 2, inner: Some(inner) } => assert_eq!(
                **inner,
                Reason::Unexpected {
                    expected: crate::error::Expected::Char('a'),
                    found: Some('b'),
                }
            ),
            other => panic!("unexpected reason {:?}", other),
        }
    }

    #[test]
    fn too_few_after_zero_width_match() {
        let failure = at_least::<_, ()>(pure(()), 2).invoke("x").unwrap_err();
        assert_eq!(failure.offset(), 0);
        assert_eq!(
            failure.reason(),
            &Reason::TooFew {
                min: 2,
                count: 1,
                inner: None,
            }
        );
    }

    #[test]
    fn exact_count_on_longer_input() {
        let lower = times::<_, &str>(range('a', 'z'), 2);
        assert_eq!(lower.invoke("ab1").unwrap().value, "ab");
        assert!(lower.invoke("abc").is_err());
    }

    #[test]
    fn collecting_padded_items_into_a_span_fails() {
        let failure = many::<_, &str>(alpha().trim()).invoke("a b").unwrap_err();
        assert_eq!(failure.reason(), &Reason::Discontiguous);

        let fragments = many::<_, Vec<_>>(alpha().padded()).parse("a b").unwrap();
        let fragments: Vec<&str> = fragments.iter().map(|f| f.as_str()).collect();
        assert_eq!(fragments, ["a", "b"]);
    }

    #[test]
    fn delimited_list() {
        let item = times_between::<_, &str>(any_of("abcd"), 1, 2);
        let list = delimited_by(item, literal(','), literal(';'));

        let success = list.invoke("a,bc,d;").unwrap();
        assert_eq!(success.value, vec!["a", "bc", "d"]);
        assert_eq!(success.remaining.rest(), ";");
        assert_eq!(success.remaining.offset(), 6);
    }

    #[test]
    fn delimited_single_item() {
        let list = delimited_by(digit(0, 9), literal(','), end());
        assert_eq!(list.parse("7"), Ok(vec![7]));
    }

    #[test]
    fn delimited_failures() {
        let list = delimited_by(digit(0, 9), literal(','), literal(']'));

        // Trailing delimiter: the final item is missing
        let failure = list.invoke("1,2,]").unwrap_err();
        assert_eq!(failure.offset(), 4);
        match failure.reason() {
            Reason::Structure { stage, inner } => {
                assert_eq!(stage, "final list item");
                assert!(matches!(**inner, Reason::Unexpected { .. }));
            }
            other => panic!("unexpected reason {:?}", other),
        }

        // Missing terminator
        let failure = list.invoke("1,2 ]").unwrap_err();
        assert_eq!(failure.offset(), 3);
        assert!(matches!(failure.reason(), Reason::Structure { stage, .. } if stage == "list terminator"));

        // Empty lists are not lists
        assert!(list.invoke("]").is_err());
    }

    #[test]
    fn delimited_list_is_unbounded() {
        let text = "1,".repeat(10_000) + "1.";
        let list = delimited_by(digit(0, 9), literal(','), literal('.'));
        assert_eq!(list.invoke(text.as_str()).unwrap().value.len(), 10_001);
    }
}
