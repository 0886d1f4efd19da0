//! A small stylesheet language.
//!
//! ```text
//! .button {
//!     padding: 4px 8px;
//!     width: 50%;
//!     color: #C0FFEE;
//!     background-color: rgb(0x20, 32, 0x20);
//! }
//! ```
//!
//! A stylesheet is one or more selector blocks. Each block holds zero or more rules of the form `property: value;`,
//! where the property decides how its value is parsed. Whitespace is allowed between tokens, except between the values
//! of a spacing shorthand and its closing `;`.

use crate::number::{byte, hex_byte, number};
use hashbrown::HashMap;
use mparse::prelude::*;
use std::fmt;

/// The unit of a [`Dimension`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Unit {
    /// Pixels, written `px`.
    Px,
    /// A percentage, written `%`.
    Pct,
}

/// A length such as `10px` or `50%`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Dimension {
    /// The magnitude.
    pub value: i64,
    /// The unit.
    pub unit: Unit,
}

impl Dimension {
    /// A length in pixels.
    pub fn px(value: i64) -> Self {
        Self { value, unit: Unit::Px }
    }

    /// A percentage.
    pub fn pct(value: i64) -> Self {
        Self { value, unit: Unit::Pct }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.unit {
            Unit::Px => write!(f, "{}px", self.value),
            Unit::Pct => write!(f, "{}%", self.value),
        }
    }
}

/// An RGB color.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Color {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

/// The space around each side of a box.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Spacing {
    /// Top.
    pub top: Dimension,
    /// Right.
    pub right: Dimension,
    /// Bottom.
    pub bottom: Dimension,
    /// Left.
    pub left: Dimension,
}

impl Spacing {
    /// Expand the one to four values of a spacing shorthand, in the same way as CSS.
    pub fn from_shorthand(values: &[Dimension]) -> Option<Self> {
        let (top, right, bottom, left) = match *values {
            [all] => (all, all, all, all),
            [vertical, horizontal] => (vertical, horizontal, vertical, horizontal),
            [top, horizontal, bottom] => (top, horizontal, bottom, horizontal),
            [top, right, bottom, left] => (top, right, bottom, left),
            _ => return None,
        };
        Some(Self { top, right, bottom, left })
    }
}

impl fmt::Display for Spacing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.top, self.right, self.bottom, self.left)
    }
}

/// A known property, which determines how its value is parsed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Property {
    /// `padding`, a [`Spacing`].
    Padding,
    /// `margin`, a [`Spacing`].
    Margin,
    /// `height`, a [`Dimension`].
    Height,
    /// `width`, a [`Dimension`].
    Width,
    /// `color`, a [`Color`].
    Color,
    /// `background-color`, a [`Color`].
    BackgroundColor,
}

impl Property {
    /// Look up a property by its name.
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "padding" => Self::Padding,
            "margin" => Self::Margin,
            "height" => Self::Height,
            "width" => Self::Width,
            "color" => Self::Color,
            "background-color" => Self::BackgroundColor,
            _ => return None,
        })
    }

    /// The name of the property.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Padding => "padding",
            Self::Margin => "margin",
            Self::Height => "height",
            Self::Width => "width",
            Self::Color => "color",
            Self::BackgroundColor => "background-color",
        }
    }

    /// A parser for values of this property.
    pub fn value<'a>(&self) -> Parser<'a, Value> {
        match self {
            Self::Padding | Self::Margin => spacing().transform(Value::Spacing),
            Self::Height | Self::Width => dimension().transform(Value::Dimension),
            Self::Color | Self::BackgroundColor => color().transform(Value::Color),
        }
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The value of a rule.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Value {
    /// A single length.
    Dimension(Dimension),
    /// A color.
    Color(Color),
    /// Lengths for each side of a box.
    Spacing(Spacing),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dimension(dimension) => dimension.fmt(f),
            Self::Color(color) => color.fmt(f),
            Self::Spacing(spacing) => spacing.fmt(f),
        }
    }
}

/// One `property: value;` rule.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Rule {
    /// The property being set.
    pub property: Property,
    /// Its value.
    pub value: Value,
}

/// A parsed stylesheet: the rules of each selector.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StyleSheet<'a> {
    /// Rules by selector. If a selector appears more than once, its last block wins.
    pub selectors: HashMap<&'a str, Vec<Rule>>,
}

impl<'a> StyleSheet<'a> {
    /// The rules of a selector.
    pub fn rules(&self, selector: &str) -> Option<&[Rule]> {
        self.selectors.get(selector).map(Vec::as_slice)
    }
}

/// Selectors are printed in alphabetical order.
impl<'a> fmt::Display for StyleSheet<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut selectors: Vec<_> = self.selectors.iter().collect();
        selectors.sort_by_key(|(name, _)| **name);
        for (name, rules) in selectors {
            writeln!(f, "{}:", name)?;
            for rule in rules {
                writeln!(f, "  {} = {}", rule.property, rule.value)?;
            }
        }
        Ok(())
    }
}

/// A length: a [`number`] followed by `px` or `%`.
pub fn dimension<'a>() -> Parser<'a, Dimension> {
    number().and_then(|value| {
        string("px")
            .to(Dimension::px(value))
            .or_else(literal('%').to(Dimension::pct(value)))
    })
}

/// One to four [`dimension`]s separated by whitespace, expanded with [`Spacing::from_shorthand`].
///
/// The values must be followed immediately by `;`, which is not consumed.
pub fn spacing<'a>() -> Parser<'a, Spacing> {
    delimited_by(dimension(), required_whitespace(), literal(';')).try_transform(|values| {
        Spacing::from_shorthand(&values)
            .ok_or_else(|| format!("expected 1 to 4 spacing values, found {}", values.len()))
    })
}

/// A color, written either as `#rrggbb` or as `rgb(r, g, b)` where each component is a [`byte`].
pub fn color<'a>() -> Parser<'a, Color> {
    let hex = literal('#').ignore_then(hex_byte().and_then(|r| {
        hex_byte().and_then(move |g| hex_byte().transform(move |b| Color { r, g, b }))
    }));

    let rgb = string("rgb")
        .skip(optional_whitespace())
        .skip(literal('('))
        .ignore_then(delimited_by(byte().trim(), literal(','), literal(')')))
        .skip(literal(')'))
        .try_transform(|components| match components.as_slice() {
            &[r, g, b] => Ok(Color { r, g, b }),
            other => Err(format!("expected 3 color components, found {}", other.len())),
        });

    hex.or_else(rgb).labelled("color")
}

/// A selector or property name: a letter or one of `_`, `.` and `#`, then any number of letters, digits, `-` and `_`.
pub fn identifier<'a>() -> Parser<'a, &'a str> {
    sequence([
        any_of("_.#").or_else(alpha()),
        many::<_, &str>(alnum().or_else(any_of("-_"))),
    ])
}

/// A single `property: value;` rule, followed by optional whitespace.
pub fn rule<'a>() -> Parser<'a, Rule> {
    let property = identifier().try_transform(|name| {
        Property::from_name(name).ok_or_else(|| format!("unknown property `{}`", name))
    });

    property
        .skip(literal(':').trim())
        .and_then(|property| property.value().transform(move |value| Rule { property, value }))
        .skip(optional_whitespace())
        .skip(literal(';'))
        .skip(optional_whitespace())
}

/// A selector followed by a block of rules in braces.
pub fn block<'a>() -> Parser<'a, (&'a str, Vec<Rule>)> {
    // When the block does not close, report why the next rule failed rather than the missing brace
    let close = literal('}').or_else(rule().ignore_then(never()));

    identifier()
        .skip(literal('{').trim())
        .and_then(|selector| many::<_, Vec<_>>(rule()).transform(move |rules| (selector, rules)))
        .skip(close)
        .skip(optional_whitespace())
}

/// A whole stylesheet: one or more [`block`]s.
///
/// ```
/// # use mparse_samples::style::{stylesheet, Dimension, Property, Rule, Value};
/// let sheet = stylesheet().parse("body { width: 100%; }").unwrap();
///
/// assert_eq!(
///     sheet.rules("body"),
///     Some(&[Rule { property: Property::Width, value: Value::Dimension(Dimension::pct(100)) }][..]),
/// );
/// ```
pub fn stylesheet<'a>() -> Parser<'a, StyleSheet<'a>> {
    // Anything left over is a block that failed to parse, so report why
    let rest = end().or_else(block().ignore_then(never()));

    optional_whitespace()
        .ignore_then(at_least::<_, HashMap<_, _>>(block(), 1))
        .skip(rest)
        .transform(|selectors| StyleSheet { selectors })
}
