//! Unit tests for scalar and sequence coercion.

use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};
use rstest::rstest;

use super::{
    CoercionError, RFC3339, format_duration, lossy_seq, parse_duration, string_seq, to_bool,
    to_duration, to_float, to_integer, to_text, to_timestamp,
};
use crate::value::Value;

#[rstest]
#[case(Value::from("42"), Some(42))]
#[case(Value::from("-7"), Some(-7))]
#[case(Value::from("+7"), Some(7))]
#[case(Value::from("abc"), None)]
#[case(Value::from(" 1"), None)]
#[case(Value::Float(3.9), Some(3))]
#[case(Value::Float(-3.9), Some(-3))]
#[case(Value::Bool(true), Some(1))]
#[case(Value::Integer(i64::from(i32::MAX) + 1), None)]
#[case(Value::Float(f64::NAN), None)]
#[case(Value::Null, None)]
fn coerces_signed_integers(#[case] input: Value, #[case] expected: Option<i32>) {
    assert_eq!(to_integer::<i32>(&input).ok(), expected);
}

#[rstest]
#[case(Value::Integer(-1))]
#[case(Value::Float(-0.5))]
#[case(Value::from("-3"))]
fn unsigned_targets_reject_negatives(#[case] input: Value) {
    let err = to_integer::<u16>(&input).expect_err("negative");
    assert!(matches!(err, CoercionError::Negative { .. }), "{err}");
}

#[test]
fn unsigned_targets_reject_booleans() {
    assert!(to_integer::<u8>(&Value::Bool(true)).is_err());
}

#[rstest]
#[case(Value::Integer(300))]
#[case(Value::from("256"))]
#[case(Value::Float(1e10))]
#[case(Value::from("340282366920938463463374607431768211456"))]
fn narrowing_overflow_is_an_error(#[case] input: Value) {
    let err = to_integer::<u8>(&input).expect_err("overflow");
    assert!(matches!(err, CoercionError::Overflow { .. }), "{err}");
}

#[rstest]
#[case(Value::Float(2.5), Some(2.5))]
#[case(Value::Integer(3), Some(3.0))]
#[case(Value::from("1e3"), Some(1000.0))]
#[case(Value::from("x"), None)]
#[case(Value::Bool(true), None)]
fn coerces_floats(#[case] input: Value, #[case] expected: Option<f64>) {
    assert_eq!(to_float::<f64>(&input).ok(), expected);
}

#[test]
fn f32_targets_reject_wide_values() {
    assert!(to_float::<f32>(&Value::Float(1e300)).is_err());
    assert_eq!(to_float::<f32>(&Value::Float(0.5)).ok(), Some(0.5));
}

#[rstest]
#[case("true", true)]
#[case("YES", true)]
#[case("on", true)]
#[case("y", true)]
#[case("1", true)]
#[case("False", false)]
#[case("off", false)]
#[case("n", false)]
#[case("0", false)]
fn coerces_boolean_words(#[case] word: &str, #[case] expected: bool) {
    assert_eq!(to_bool(&Value::from(word)).ok(), Some(expected));
}

#[rstest]
#[case(Value::Integer(0), Some(false))]
#[case(Value::Integer(-4), Some(true))]
#[case(Value::Float(0.1), Some(true))]
#[case(Value::from("maybe"), None)]
#[case(Value::Null, None)]
fn coerces_other_booleans(#[case] input: Value, #[case] expected: Option<bool>) {
    assert_eq!(to_bool(&input).ok(), expected);
}

#[rstest]
#[case(Value::from("hi"), "hi")]
#[case(Value::Null, "")]
#[case(Value::Integer(5), "5")]
#[case(Value::Bool(false), "false")]
fn renders_text(#[case] input: Value, #[case] expected: &str) {
    assert_eq!(to_text(&input), expected);
}

#[rstest]
#[case("5s", Duration::from_secs(5))]
#[case("1h30m", Duration::from_secs(5_400))]
#[case("1.5s", Duration::from_millis(1_500))]
#[case("300ms", Duration::from_millis(300))]
#[case("2us", Duration::from_micros(2))]
#[case("2µs", Duration::from_micros(2))]
#[case("7ns", Duration::from_nanos(7))]
#[case(".5m", Duration::from_secs(30))]
#[case("0", Duration::ZERO)]
#[case("+1m", Duration::from_secs(60))]
fn parses_durations(#[case] text: &str, #[case] expected: Duration) {
    assert_eq!(parse_duration(text).expect("duration"), expected);
}

#[rstest]
#[case("")]
#[case("10")]
#[case("5 s")]
#[case("1d")]
#[case(".s")]
#[case("-5s")]
#[case("1.2.3s")]
fn rejects_malformed_durations(#[case] text: &str) {
    assert!(parse_duration(text).is_err(), "{text} should be rejected");
}

#[rstest]
#[case(Duration::ZERO, "0s")]
#[case(Duration::from_nanos(12), "12ns")]
#[case(Duration::from_nanos(1_500), "1.5µs")]
#[case(Duration::from_millis(300), "300ms")]
#[case(Duration::from_millis(1_500), "1.5s")]
#[case(Duration::from_secs(90), "1m30s")]
#[case(Duration::from_secs(5_400), "1h30m0s")]
#[case(Duration::from_millis(60_500), "1m0.5s")]
fn formats_durations(#[case] duration: Duration, #[case] expected: &str) {
    assert_eq!(format_duration(duration), expected);
    assert_eq!(parse_duration(expected).ok(), Some(duration));
}

#[rstest]
#[case(Value::Integer(250), Some(Duration::from_millis(250)))]
#[case(Value::Float(2.0), Some(Duration::from_millis(2)))]
#[case(Value::Integer(-1), None)]
#[case(Value::Bool(true), None)]
fn numbers_are_milliseconds(#[case] input: Value, #[case] expected: Option<Duration>) {
    assert_eq!(to_duration(&input).ok(), expected);
}

#[test]
fn parses_rfc3339_timestamps() {
    let parsed =
        to_timestamp(&Value::from("2024-05-01T12:30:00+02:00"), RFC3339).expect("timestamp");
    let expected = Utc
        .with_ymd_and_hms(2024, 5, 1, 10, 30, 0)
        .single()
        .expect("valid");
    assert_eq!(parsed, expected);
}

#[rstest]
#[case("2024-05-01 08:15:00", "%Y-%m-%d %H:%M:%S", (2024, 5, 1, 8, 15, 0))]
#[case("01/02/2023", "%d/%m/%Y", (2023, 2, 1, 0, 0, 0))]
fn parses_custom_layouts(
    #[case] text: &str,
    #[case] layout: &str,
    #[case] parts: (i32, u32, u32, u32, u32, u32),
) {
    let (y, mo, d, h, mi, s) = parts;
    let expected = Utc
        .with_ymd_and_hms(y, mo, d, h, mi, s)
        .single()
        .expect("valid");
    assert_eq!(to_timestamp(&Value::from(text), layout).ok(), Some(expected));
}

#[test]
fn timestamps_require_text() {
    assert!(to_timestamp(&Value::Integer(1), RFC3339).is_err());
    assert!(to_timestamp(&Value::from("yesterday"), RFC3339).is_err());
    assert_eq!(DateTime::<Utc>::default().timestamp(), 0);
}

#[test]
fn splits_scalar_strings() {
    assert_eq!(string_seq(&Value::from("a, b ,c"), None), ["a", "b", "c"]);
    assert_eq!(string_seq(&Value::from("a|b"), Some("|")), ["a", "b"]);
    assert_eq!(string_seq(&Value::Integer(3), None), ["3"]);
    assert!(string_seq(&Value::Null, None).is_empty());
}

#[test]
fn renders_heterogeneous_sequences() {
    let value = Value::Sequence(vec![
        Value::from("x"),
        Value::Integer(2),
        Value::Sequence(Vec::new()),
        Value::Bool(true),
    ]);
    assert_eq!(string_seq(&value, None), ["x", "2", "true"]);
}

#[test]
fn lossy_sequences_drop_bad_elements() {
    let value = Value::Sequence(vec![
        Value::Integer(1),
        Value::from("two"),
        Value::from("3"),
        Value::Float(5.1),
        Value::Float(6.9),
    ]);
    assert_eq!(lossy_seq::<i64>(&value), [1, 3, 5, 6]);
    assert!(lossy_seq::<i64>(&Value::from("1,2")).is_empty());
}
