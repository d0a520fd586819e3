//! Dotted-path addressing over a [`Mapping`].
//!
//! Every segment of a path is a literal mapping key. There is no escape for a
//! key that itself contains a dot; such keys are reachable only by walking the
//! tree by hand.

use crate::value::{Mapping, Value};

/// Resolve `path` against `root`.
///
/// Returns `None` when any segment is missing or when an intermediate node is
/// not a mapping. A key that is present but null resolves to
/// `Some(&Value::Null)`.
///
/// # Examples
///
/// ```rust
/// use layered_config::{Mapping, Value, path::find};
///
/// let mut server = Mapping::new();
/// server.insert("port".into(), Value::Integer(8080));
/// let mut root = Mapping::new();
/// root.insert("server".into(), Value::Mapping(server));
///
/// assert_eq!(find(&root, "server.port"), Some(&Value::Integer(8080)));
/// assert_eq!(find(&root, "server.missing"), None);
/// ```
#[must_use]
pub fn find<'a>(root: &'a Mapping, path: &str) -> Option<&'a Value> {
    let mut segments = path.split('.');
    let first = segments.next()?;
    let mut current = root.get(first)?;
    for segment in segments {
        current = current.as_mapping()?.get(segment)?;
    }
    Some(current)
}

/// Insert `value` at `path`, creating intermediate mappings as required.
///
/// An intermediate segment that holds a non-mapping value is replaced with a
/// fresh mapping; the last write wins.
pub fn set_nested(root: &mut Mapping, path: &str, value: Value) {
    let (parents, leaf) = path.rsplit_once('.').map_or((None, path), |(p, l)| (Some(p), l));
    let mut current = root;
    for segment in parents.into_iter().flat_map(|p| p.split('.')) {
        let slot = current
            .entry(segment.to_owned())
            .or_insert_with(|| Value::Mapping(Mapping::new()));
        if !matches!(slot, Value::Mapping(_)) {
            *slot = Value::Mapping(Mapping::new());
        }
        let Value::Mapping(next) = slot else {
            return;
        };
        current = next;
    }
    current.insert(leaf.to_owned(), value);
}

/// Expand flat `(dotted key, value)` pairs into a nested mapping.
///
/// Pairs are applied in iteration order, so a later pair overwrites an
/// earlier one addressing the same or an enclosing key.
#[must_use]
pub fn expand_dot_keys<I, K>(flat: I) -> Mapping
where
    I: IntoIterator<Item = (K, Value)>,
    K: AsRef<str>,
{
    let mut out = Mapping::new();
    for (key, value) in flat {
        set_nested(&mut out, key.as_ref(), value);
    }
    out
}
