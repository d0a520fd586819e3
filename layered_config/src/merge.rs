//! Right-biased structural merge of configuration trees.

use crate::value::{Mapping, Value};

/// Merge `source` into `destination`.
///
/// For each key in `source`: when both sides hold a mapping the merge
/// recurses; otherwise the source value replaces the destination value
/// wholesale. Sequences are never concatenated.
///
/// # Examples
///
/// ```rust
/// use layered_config::{Value, merge::merge, path::expand_dot_keys};
///
/// let mut base = expand_dot_keys([("a.b", Value::Integer(1)), ("a.c", Value::Integer(2))]);
/// let layer = expand_dot_keys([("a.b", Value::Integer(10)), ("a.d", Value::Integer(3))]);
/// merge(&mut base, layer);
///
/// let expected = expand_dot_keys([
///     ("a.b", Value::Integer(10)),
///     ("a.c", Value::Integer(2)),
///     ("a.d", Value::Integer(3)),
/// ]);
/// assert_eq!(base, expected);
/// ```
pub fn merge(destination: &mut Mapping, source: Mapping) {
    for (key, value) in source {
        match destination.get_mut(&key) {
            Some(existing) => merge_value(existing, value),
            None => {
                destination.insert(key, value);
            }
        }
    }
}

/// Overlay `layer` onto `target` in place.
///
/// A mapping layer merges into a mapping target; any other combination
/// replaces `target` with `layer`.
pub fn merge_value(target: &mut Value, layer: Value) {
    match (target, layer) {
        (Value::Mapping(existing), Value::Mapping(incoming)) => merge(existing, incoming),
        (slot, other) => *slot = other,
    }
}
