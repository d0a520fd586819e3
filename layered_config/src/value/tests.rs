//! Unit tests for the value tree model.

use std::time::Duration;

use rstest::rstest;

use super::{Mapping, Value};
use crate::coerce::to_integer;

#[rstest]
#[case(Value::Null, "null")]
#[case(Value::Bool(true), "true")]
#[case(Value::Integer(-42), "-42")]
#[case(Value::Float(1.5), "1.5")]
#[case(Value::from("plain"), "plain")]
fn scalars_render_plainly(#[case] value: Value, #[case] expected: &str) {
    assert_eq!(value.to_string(), expected);
}

#[test]
fn composites_render_as_compact_json() {
    let mut inner = Mapping::new();
    inner.insert("b".into(), Value::Integer(1));
    let mut map = Mapping::new();
    map.insert("a".into(), Value::Mapping(inner));
    map.insert("list".into(), Value::from(vec![1_i64, 2]));
    assert_eq!(
        Value::Mapping(map).to_string(),
        r#"{"a":{"b":1},"list":[1,2]}"#
    );
}

#[test]
fn wide_unsigned_values_keep_their_digits() {
    assert_eq!(
        Value::from(u64::MAX),
        Value::String("18446744073709551615".to_owned())
    );
    assert_eq!(Value::from(7_u64), Value::Integer(7));
    assert_eq!(to_integer::<u64>(&Value::from(u64::MAX)).ok(), Some(u64::MAX));
    assert!(to_integer::<i64>(&Value::from(u64::MAX)).is_err());
}

#[test]
fn wide_unsigned_values_deserialize_exactly() -> serde_json::Result<()> {
    let value: Value = serde_json::from_str(r#"{"limit": 18446744073709551615}"#)?;
    let limit = value.as_mapping().and_then(|map| map.get("limit"));
    assert_eq!(
        limit.and_then(|v| to_integer::<u64>(v).ok()),
        Some(u64::MAX)
    );
    Ok(())
}

#[test]
fn durations_enter_as_canonical_text() {
    assert_eq!(
        Value::from(Duration::from_secs(90)),
        Value::String("1m30s".into())
    );
}

#[test]
fn none_becomes_null() {
    assert_eq!(Value::from(None::<i32>), Value::Null);
    assert_eq!(Value::from(Some(3_i32)), Value::Integer(3));
}

#[test]
fn json_numbers_keep_integer_precision() {
    let value = Value::from(serde_json::json!({"n": 5, "x": 2.5, "s": [true]}));
    let map = value.as_mapping().expect("mapping");
    assert_eq!(map.get("n"), Some(&Value::Integer(5)));
    assert_eq!(map.get("x"), Some(&Value::Float(2.5)));
    assert_eq!(
        map.get("s").and_then(Value::as_sequence),
        Some(&[Value::Bool(true)][..])
    );
}

#[cfg(feature = "yaml")]
#[test]
fn yaml_non_string_keys_are_stringified() {
    let value: Value = serde_saphyr::from_str("1: one\ntrue: yes-key\nname: x\n").expect("yaml");
    let map = value.into_mapping().expect("mapping");
    let keys: Vec<&str> = map.keys().map(String::as_str).collect();
    assert_eq!(keys, ["1", "name", "true"]);
}

#[cfg(feature = "toml")]
#[test]
fn toml_datetimes_become_strings() {
    let value: Value = toml::from_str("at = 2024-01-02T03:04:05Z\n").expect("toml");
    let map = value.into_mapping().expect("mapping");
    assert_eq!(map.get("at"), Some(&Value::from("2024-01-02T03:04:05Z")));
}

#[test]
fn serialisation_round_trips_through_json() {
    let source = serde_json::json!({"a": [1, "two", null], "b": {"c": false}});
    let value = Value::from(source.clone());
    assert_eq!(serde_json::to_value(&value).expect("serialise"), source);
    let back: Value = serde_json::from_value(source).expect("deserialise");
    assert_eq!(back, value);
}

#[rstest]
#[case(Value::Null, "null")]
#[case(Value::Sequence(Vec::new()), "sequence")]
#[case(Value::Mapping(Mapping::new()), "mapping")]
fn kinds_name_the_variant(#[case] value: Value, #[case] kind: &str) {
    assert_eq!(value.kind(), kind);
}
