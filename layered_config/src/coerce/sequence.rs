//! Tolerant sequence conversion used by the accessor layer.

use super::{FromValue, to_text};
use crate::value::Value;

/// Separator used when none is supplied.
pub const DEFAULT_SEPARATOR: &str = ",";

/// Read `value` as a list of strings.
///
/// Sequence elements are rendered as text with nested sequences and mappings
/// dropped. A string is split on `separator` (default `,`) with each part
/// trimmed. Any other scalar yields a one-element list; null yields none.
#[must_use]
pub fn string_seq(value: &Value, separator: Option<&str>) -> Vec<String> {
    match value {
        Value::Null => Vec::new(),
        Value::Sequence(items) => items
            .iter()
            .filter(|item| !matches!(item, Value::Sequence(_) | Value::Mapping(_)))
            .map(to_text)
            .collect(),
        Value::String(text) => split_trimmed(text, separator)
            .map(str::to_owned)
            .collect(),
        other => vec![to_text(other)],
    }
}

/// Read `value` as a list of `T`, dropping elements that do not convert.
///
/// Values that are not sequences produce an empty list.
#[must_use]
pub fn lossy_seq<T: FromValue>(value: &Value) -> Vec<T> {
    value
        .as_sequence()
        .map(|items| items.iter().filter_map(T::from_value).collect())
        .unwrap_or_default()
}

/// Split `text` on `separator` and trim each part.
///
/// An empty separator falls back to [`DEFAULT_SEPARATOR`].
pub fn split_trimmed<'a>(
    text: &'a str,
    separator: Option<&'a str>,
) -> impl Iterator<Item = &'a str> + 'a {
    let separator = separator
        .filter(|sep| !sep.is_empty())
        .unwrap_or(DEFAULT_SEPARATOR);
    text.split(separator).map(str::trim)
}
