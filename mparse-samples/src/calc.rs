//! Integer arithmetic with `+`, `*` and parentheses.
//!
//! ```text
//! expression ::= term ('+' term)*
//! term       ::= factor ('*' factor)*
//! factor     ::= number | '(' expression ')'
//! ```
//!
//! Whitespace may appear between any two tokens. Results that overflow an `i64` are reported as failures.

use crate::number::number;
use mparse::prelude::*;

/// Fold `operand (op operand)*` from the left with a checked operation.
fn chain<'a>(
    operand: Parser<'a, i64>,
    op: char,
    apply: fn(i64, i64) -> Option<i64>,
) -> Parser<'a, i64> {
    let rest = many::<_, Vec<_>>(literal(op).trim().ignore_then(operand.clone()));
    operand.and_then(move |first| {
        rest.clone().try_transform(move |operands| {
            operands
                .into_iter()
                .try_fold(first, apply)
                .ok_or("arithmetic overflow")
        })
    })
}

/// An arithmetic expression, evaluated as it is parsed.
///
/// ```
/// # use mparse_samples::calc::expression;
/// assert_eq!(expression().parse("1 + 2 * 8"), Ok(17));
/// assert_eq!(expression().parse("(1 + 2) * 8"), Ok(24));
/// ```
pub fn expression<'a>() -> Parser<'a, i64> {
    recursive(|expression| {
        let parenthesised = literal('(')
            .ignore_then(expression.trim())
            .skip(literal(')'));
        let factor = number().or_else(parenthesised);
        let term = chain(factor, '*', i64::checked_mul);
        chain(term, '+', i64::checked_add)
    })
    .trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn precedence() {
        assert_eq!(expression().parse("1+2"), Ok(3));
        assert_eq!(expression().parse("2*8"), Ok(16));
        assert_eq!(expression().parse("1+2*8"), Ok(17));
        assert_eq!(expression().parse("2*8+1"), Ok(17));
        assert_eq!(expression().parse("(1+2)*8"), Ok(24));
        assert_eq!(expression().parse("(1+2)*(5+3)"), Ok(24));
    }

    #[test]
    fn negative_operands() {
        assert_eq!(expression().parse("-2 * 3 + 10"), Ok(4));
    }

    #[test]
    fn overflow_is_a_failure() {
        let failure = expression().parse("9223372036854775807 + 1").unwrap_err();
        assert_eq!(failure.reason(), &Reason::Custom("arithmetic overflow".into()));
        assert!(expression().parse("4611686018427387904 * 2").is_err());
    }

    #[test]
    fn unclosed_parenthesis() {
        assert!(expression().parse("(1 + 2").is_err());
        assert!(expression().parse("1 +").is_err());
    }
}
