use mparse_samples::json::{json, Json};

const NESTED: &str = r#"
  {
    "x": {
        "name": "Fred",
        "age": 99
    },
    "y": [1, 2, 3, true, { "a": "bc" }],
    "z": {
        "email":"somebody@examle.com",
        "phone": "(123) - 456 - 7890",
        "json": true
    }
  }
  "#;

#[test]
fn nested_document() {
    let doc = json().parse(NESTED).unwrap();

    let x = doc.get("x").unwrap();
    assert_eq!(x.get("name"), Some(&Json::Str("Fred")));
    assert_eq!(x.get("age"), Some(&Json::Int(99)));

    let y = doc.get("y").unwrap();
    assert_eq!(y.at(0), Some(&Json::Int(1)));
    assert_eq!(y.at(3), Some(&Json::Bool(true)));
    assert_eq!(y.at(4).and_then(|o| o.get("a")), Some(&Json::Str("bc")));
    assert_eq!(y.at(5), None);

    let z = doc.get("z").unwrap();
    assert_eq!(z.get("email"), Some(&Json::Str("somebody@examle.com")));
    assert_eq!(z.get("phone"), Some(&Json::Str("(123) - 456 - 7890")));
    assert_eq!(z.get("json"), Some(&Json::Bool(true)));
}

#[test]
fn flat_values() {
    assert_eq!(
        json().parse("[1,2,3]"),
        Ok(Json::Array(vec![Json::Int(1), Json::Int(2), Json::Int(3)])),
    );
    assert_eq!(
        json().parse("[null, [], {}]"),
        Ok(Json::Array(vec![
            Json::Null,
            Json::Array(Vec::new()),
            Json::Object(Default::default()),
        ])),
    );
}

#[test]
fn duplicate_keys_keep_the_last_value() {
    let doc = json().parse(r#"{"k": 1, "k": 2}"#).unwrap();
    assert_eq!(doc.get("k"), Some(&Json::Int(2)));
}

#[test]
fn unterminated_input_fails() {
    assert!(json().parse(r#"{"a": 1"#).is_err());
    assert!(json().parse("[1, 2").is_err());
    assert!(json().parse(r#""open"#).is_err());
}

#[test]
fn parser_is_reusable() {
    let parser = json();
    for _ in 0..3 {
        assert_eq!(parser.parse("[true]"), Ok(Json::Array(vec![Json::Bool(true)])));
    }
}
