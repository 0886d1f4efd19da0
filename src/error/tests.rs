use super::*;
use crate::prelude::*;
use alloc::{boxed::Box, string::ToString};

fn unexpected(expected: Expected, found: Option<char>) -> Reason {
    Reason::Unexpected { expected, found }
}

#[test]
fn display_unexpected() {
    assert_eq!(
        unexpected(Expected::Char('a'), Some('b')).to_string(),
        "expected 'a', found 'b'",
    );
    assert_eq!(
        unexpected(Expected::End, Some('x')).to_string(),
        "expected end of input, found 'x'",
    );
    assert_eq!(
        unexpected(Expected::Range('a', 'z'), None).to_string(),
        "expected 'a' to 'z', found end of input",
    );
    assert_eq!(
        unexpected(Expected::Str("px".into()), Some('e')).to_string(),
        "expected \"px\", found 'e'",
    );
}

#[test]
fn display_digits() {
    assert_eq!(Expected::Digit(0, 9).to_string(), "digit");
    assert_eq!(Expected::Digit(0, 0).to_string(), "digit 0");
    assert_eq!(Expected::Digit(1, 9).to_string(), "digit 1 to 9");
}

#[test]
fn display_counts() {
    let too_few = Reason::TooFew {
        min: 3,
        count: 1,
        inner: Some(Box::new(unexpected(Expected::Char('x'), None))),
    };
    assert_eq!(
        too_few.to_string(),
        "expected at least 3 occurrences, found 1 (expected 'x', found end of input)",
    );
    assert_eq!(
        Reason::TooMany { max: 2 }.to_string(),
        "expected at most 2 occurrences, found more",
    );
}

#[test]
fn display_context() {
    let inner = Box::new(unexpected(Expected::Char(';'), Some(' ')));
    let structure = Reason::Structure {
        stage: "list terminator".into(),
        inner: inner.clone(),
    };
    assert_eq!(
        structure.to_string(),
        "in list terminator: expected ';', found ' '"
    );

    let labelled = Reason::Labelled {
        label: "statement".into(),
        inner,
    };
    assert_eq!(
        labelled.to_string(),
        "expected statement: expected ';', found ' '"
    );
}

#[test]
fn root_strips_context() {
    let root = unexpected(Expected::Any, None);
    let wrapped = Reason::Labelled {
        label: "outer".into(),
        inner: Box::new(Reason::Structure {
            stage: "inner".into(),
            inner: Box::new(Reason::TooFew {
                min: 1,
                count: 0,
                inner: Some(Box::new(root.clone())),
            }),
        }),
    };
    assert_eq!(wrapped.root(), &root);
    assert_eq!(Reason::Never.root(), &Reason::Never);
}

#[test]
fn failure_position_reporting() {
    let text = "ab\nc?";
    let parser = many::<_, &str>(alpha().or_else(literal('\n'))).skip(end());
    let failure = parser.invoke(text).unwrap_err();

    assert_eq!(failure.offset(), 4);
    assert_eq!(failure.line_col(), (2, 2));
    assert_eq!(failure.span(), 4..5);
    assert_eq!(failure.to_string(), "expected end of input, found '?' at 2:2");
}

#[test]
fn failure_at_end_has_empty_span() {
    let failure = literal('a').invoke("").unwrap_err();
    assert_eq!(failure.span(), 0..0);
    assert_eq!(failure.message(), "expected 'a', found end of input");
}

#[cfg(feature = "std")]
#[test]
fn failure_is_std_error() {
    fn assert_error<E: std::error::Error>(_: &E) {}
    let failure = never::<()>().invoke("").unwrap_err();
    assert_error(&failure);
    assert_eq!(failure.reason(), &Reason::Never);
}
