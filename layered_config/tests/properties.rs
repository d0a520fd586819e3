//! Property tests for the merge engine, path resolver and duration codec.

use std::time::Duration;

use layered_config::coerce::{format_duration, parse_duration, to_integer};
use layered_config::merge::merge;
use layered_config::path::{find, set_nested};
use layered_config::{Config, Mapping, Value};
use proptest::prelude::*;

fn scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::Integer),
        (-1.0e9..1.0e9_f64).prop_map(Value::Float),
        "[a-z]{0,6}".prop_map(Value::String),
    ]
}

fn value() -> impl Strategy<Value = Value> {
    scalar().prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Sequence),
            prop::collection::btree_map("[a-c]{1,2}", inner, 0..4).prop_map(Value::Mapping),
        ]
    })
}

fn mapping() -> impl Strategy<Value = Mapping> {
    prop::collection::btree_map("[a-c]{1,2}", value(), 0..5)
}

/// Dotted paths of every non-mapping value and every empty mapping.
fn leaves(root: &Mapping, prefix: &str, out: &mut Vec<(String, Value)>) {
    for (key, value) in root {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match value {
            Value::Mapping(child) if !child.is_empty() => leaves(child, &path, out),
            other => out.push((path, other.clone())),
        }
    }
}

/// Dotted paths of every node, mappings included.
fn paths(root: &Mapping, prefix: &str, out: &mut Vec<String>) {
    for (key, value) in root {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        if let Value::Mapping(child) = value {
            paths(child, &path, out);
        }
        out.push(path);
    }
}

fn merged(mut base: Mapping, layer: Mapping) -> Mapping {
    merge(&mut base, layer);
    base
}

proptest! {
    #[test]
    fn empty_layers_are_identities(a in mapping()) {
        prop_assert_eq!(merged(a.clone(), Mapping::new()), a.clone());
        prop_assert_eq!(merged(Mapping::new(), a.clone()), a);
    }

    #[test]
    fn merging_is_idempotent(a in mapping()) {
        prop_assert_eq!(merged(a.clone(), a.clone()), a);
    }

    #[test]
    fn the_right_side_wins(a in mapping(), b in mapping()) {
        let result = merged(a, b.clone());
        let mut expected = Vec::new();
        leaves(&b, "", &mut expected);
        for (path, value) in expected {
            match value {
                // An empty mapping layer leaves the destination's mapping in place.
                Value::Mapping(_) => prop_assert!(find(&result, &path).is_some()),
                other => prop_assert_eq!(find(&result, &path), Some(&other)),
            }
        }
    }

    #[test]
    fn rebuilding_from_all_resolves_the_same(root in mapping()) {
        let config = Config::from_mapping(root.clone());
        let rebuilt = Config::from_mapping(config.all());
        let mut every = Vec::new();
        paths(&root, "", &mut every);
        for path in every {
            prop_assert!(rebuilt.has(&path));
            prop_assert_eq!(rebuilt.get(&path), config.get(&path));
            prop_assert_eq!(rebuilt.get_string(&path), config.get_string(&path));
        }
        prop_assert_eq!(rebuilt, config);
    }

    #[test]
    fn set_then_find(
        mut root in mapping(),
        segments in prop::collection::vec("[a-c]{1,2}", 1..4),
        leaf in scalar(),
    ) {
        let path = segments.join(".");
        set_nested(&mut root, &path, leaf.clone());
        prop_assert_eq!(find(&root, &path), Some(&leaf));
    }

    #[test]
    fn durations_round_trip(nanos in 0_u64..10_000_000_000_000) {
        let duration = Duration::from_nanos(nanos);
        let text = format_duration(duration);
        prop_assert_eq!(parse_duration(&text).ok(), Some(duration), "{}", text);
    }

    #[test]
    fn integer_strings_parse_like_integers(n in any::<i64>()) {
        prop_assert_eq!(to_integer::<i64>(&Value::from(n.to_string())).ok(), Some(n));
        prop_assert_eq!(to_integer::<i64>(&Value::Integer(n)).ok(), Some(n));
    }
}
