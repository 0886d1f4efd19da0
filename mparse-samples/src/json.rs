//! A JSON parser for integers, escape-free strings, booleans, `null`, arrays and objects.
//!
//! Strings are borrowed from the input, so a parsed document cannot outlive its text.

use crate::number::number;
use hashbrown::HashMap;
use mparse::prelude::*;

/// A JSON value.
#[derive(Clone, Debug, PartialEq)]
pub enum Json<'a> {
    /// `null`.
    Null,
    /// `true` or `false`.
    Bool(bool),
    /// An integer.
    Int(i64),
    /// A string, without its quotes.
    Str(&'a str),
    /// An array.
    Array(Vec<Json<'a>>),
    /// An object. If a key appears more than once, its last value wins.
    Object(HashMap<&'a str, Json<'a>>),
}

impl<'a> Json<'a> {
    /// The value of a key, if this is an object containing it.
    pub fn get(&self, key: &str) -> Option<&Json<'a>> {
        match self {
            Self::Object(members) => members.get(key),
            _ => None,
        }
    }

    /// The item at an index, if this is an array long enough to contain it.
    pub fn at(&self, index: usize) -> Option<&Json<'a>> {
        match self {
            Self::Array(items) => items.get(index),
            _ => None,
        }
    }
}

/// A keyword that is not the start of a longer word, so `nullable` is not read as `null`.
fn keyword<'a>(word: &str) -> Parser<'a, &'a str> {
    string(word).and_not(alnum())
}

/// A string in double quotes. There are no escapes, so it ends at the next `"`.
fn quoted<'a>() -> Parser<'a, &'a str> {
    literal('"')
        .ignore_then(many::<_, &str>(not(literal('"'))))
        .skip(literal('"'))
}

/// A JSON value, with optional whitespace around it.
///
/// ```
/// # use mparse_samples::json::{json, Json};
/// let doc = json().parse(r#"{ "tags": ["a", "b"], "count": 2 }"#).unwrap();
///
/// assert_eq!(doc.get("count"), Some(&Json::Int(2)));
/// assert_eq!(doc.get("tags").and_then(|tags| tags.at(1)), Some(&Json::Str("b")));
/// ```
pub fn json<'a>() -> Parser<'a, Json<'a>> {
    recursive(|value| {
        let empty_array = literal('[')
            .skip(optional_whitespace())
            .skip(literal(']'))
            .to(Vec::new());
        let array = literal('[')
            .ignore_then(delimited_by(value.clone(), literal(','), literal(']')))
            .skip(literal(']'));

        let member = quoted()
            .trim()
            .skip(literal(':'))
            .and_then(move |key| value.clone().transform(move |value| (key, value)));
        let empty_object = literal('{')
            .skip(optional_whitespace())
            .skip(literal('}'))
            .to(HashMap::new());
        let object = literal('{')
            .ignore_then(delimited_by(member, literal(','), literal('}')))
            .skip(literal('}'))
            .transform(|members| members.into_iter().collect::<HashMap<_, _>>());

        empty_object
            .or_else(object)
            .transform(Json::Object)
            .or_else(empty_array.or_else(array).transform(Json::Array))
            .or_else(quoted().transform(Json::Str))
            .or_else(number().transform(Json::Int))
            .or_else(keyword("true").to(Json::Bool(true)))
            .or_else(keyword("false").to(Json::Bool(false)))
            .or_else(keyword("null").to(Json::Null))
            .trim()
    })
}
