use mparse::prelude::*;
use mparse_samples::style::{
    color, dimension, spacing, stylesheet, Color, Dimension, Property, Rule, Spacing, Value,
};

const SITE: &str = include_str!("../samples/site.style");

#[test]
fn spacing_stops_before_semicolon() {
    let success = spacing().invoke("10px 22px;").unwrap();
    assert_eq!(success.value.top, Dimension::px(10));
    assert_eq!(success.value.right, Dimension::px(22));
    assert_eq!(success.value.bottom, Dimension::px(10));
    assert_eq!(success.value.left, Dimension::px(22));
    assert_eq!(success.remaining.peek(), Some(';'));
}

#[test]
fn spacing_needs_its_semicolon() {
    assert!(spacing().invoke("10px 22px").is_err());
    assert!(spacing().invoke("10px 22px ;").is_err());
}

#[test]
fn hex_color_leaves_the_rest() {
    let success = color().invoke("#A87F01;").unwrap();
    assert_eq!(success.value, Color { r: 0xA8, g: 0x7F, b: 0x01 });
    assert_eq!(success.remaining.rest(), ";");
}

#[test]
fn rgb_color() {
    assert_eq!(
        color().parse("rgb(0xFF, 0xA0, 0x45)"),
        Ok(Color { r: 0xFF, g: 0xA0, b: 0x45 }),
    );
    assert_eq!(color().parse("rgb(255,160, 69)"), Ok(Color { r: 255, g: 160, b: 69 }));
    assert!(color().parse("rgb(256, 0, 0)").is_err());
}

#[test]
fn dimension_then_suffix() {
    let success = dimension().invoke("50%;").unwrap();
    assert_eq!(success.value, Dimension::pct(50));
    assert_eq!(success.remaining.rest(), ";");
}

#[test]
fn site_stylesheet() {
    let sheet = stylesheet().parse(SITE).unwrap();
    assert_eq!(sheet.selectors.len(), 3);

    let body = sheet.rules("body").unwrap();
    assert_eq!(
        body[0],
        Rule {
            property: Property::Margin,
            value: Value::Spacing(Spacing {
                top: Dimension::px(0),
                right: Dimension::px(0),
                bottom: Dimension::px(0),
                left: Dimension::px(0),
            }),
        },
    );
    assert_eq!(
        body[1],
        Rule {
            property: Property::BackgroundColor,
            value: Value::Color(Color { r: 0xFA, g: 0xFA, b: 0xFA }),
        },
    );

    let button = sheet.rules(".button").unwrap();
    assert_eq!(button.len(), 4);
    assert_eq!(
        button[0].value,
        Value::Spacing(Spacing {
            top: Dimension::px(4),
            right: Dimension::px(8),
            bottom: Dimension::px(4),
            left: Dimension::px(8),
        }),
    );
    assert_eq!(button[3].value, Value::Color(Color { r: 0x20, g: 32, b: 0x20 }));

    assert_eq!(
        sheet.rules("#main").map(<[Rule]>::len),
        Some(2),
    );
}

#[test]
fn printed_in_selector_order() {
    let sheet = stylesheet()
        .parse("b { width: 2px; } a { height: 50%; color: #000000; }")
        .unwrap();
    assert_eq!(
        sheet.to_string(),
        "a:\n  height = 50%\n  color = rgb(0, 0, 0)\nb:\n  width = 2px\n",
    );
}

#[test]
fn unknown_property_is_reported_inside_the_block() {
    let text = "p {\n  width: 1px;\n  border: 2px;\n}\n";
    let failure = stylesheet().parse(text).unwrap_err();
    assert_eq!(failure.line_col(), (3, 3));
    assert_eq!(
        failure.reason().root(),
        &Reason::Custom("unknown property `border`".into()),
    );
}

#[test]
fn bad_value_is_reported_where_it_starts() {
    let text = "p { width: 10em; }";
    let failure = stylesheet().parse(text).unwrap_err();
    assert!(failure.offset() >= 11, "{}", failure);
}

#[test]
fn empty_stylesheet_is_rejected() {
    assert!(stylesheet().parse("").is_err());
    assert!(stylesheet().parse("   ").is_err());
}
