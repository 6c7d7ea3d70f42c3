#![cfg(feature = "serde")]

use platen::{
    Align, CompositeDescriptor, FieldDescriptor, FieldKind, FormatConfig, GroupDescriptor,
    Justify,
};

#[test]
fn config_round_trips_through_json() {
    let config = FormatConfig::default()
        .with_numeric(Justify::new(Align::Left, ' '))
        .with_boolean_literals("T", "F");

    let json = serde_json::to_string(&config).unwrap();
    let parsed: FormatConfig = serde_json::from_str(&json).unwrap();

    assert_eq!(parsed, config);
}

#[test]
fn partial_config_keeps_defaults() {
    let parsed: FormatConfig =
        serde_json::from_str(r#"{ "text": { "align": "right", "padding": "*" } }"#).unwrap();

    assert_eq!(parsed.text, Justify::new(Align::Right, '*'));
    assert_eq!(parsed.numeric, FormatConfig::default().numeric);
    assert_eq!(parsed.true_literal, "Y");
}

#[test]
fn group_descriptor_from_json() {
    let parsed: GroupDescriptor = serde_json::from_str(
        r#"{ "position": 4, "counter": { "length": 3 }, "element": { "identification": "LN" } }"#,
    )
    .unwrap();

    let expected = GroupDescriptor::new(4)
        .counter(FieldDescriptor::new(0, 3))
        .element(CompositeDescriptor::new(0).identification("LN"));

    assert_eq!(parsed, expected);
}

#[test]
fn field_kind_is_tagged_by_variant() {
    let parsed: FieldKind = serde_json::from_str(
        r#"{ "scalar": { "position": 2, "length": 8, "required": true, "align": "right" } }"#,
    )
    .unwrap();

    let expected = FieldDescriptor::new(2, 8).required(true).align(Align::Right);

    assert_eq!(parsed, FieldKind::Scalar(expected));
}
