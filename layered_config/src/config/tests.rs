use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};
use rstest::{fixture, rstest};

use super::Config;
use crate::error::ConfigError;
use crate::path::expand_dot_keys;
use crate::value::{Mapping, Value};
use crate::{Bind, EnvSnapshot};

#[fixture]
fn config() -> Config {
    Config::from_mapping(expand_dot_keys([
        ("app.name", Value::from("demo")),
        ("app.port", Value::from("8080")),
        ("app.ratio", Value::Float(0.25)),
        ("app.debug", Value::from("yes")),
        ("app.timeout", Value::from("1m30s")),
        ("app.poll", Value::Integer(250)),
        ("app.started", Value::from("2024-05-01T12:00:00Z")),
        ("app.day", Value::from("2024-05-01")),
        ("app.nothing", Value::Null),
        ("app.negative", Value::Integer(-3)),
        ("list.words", Value::from("a, b ,c")),
        (
            "list.numbers",
            Value::Sequence(vec![Value::Integer(1), Value::from("x"), Value::from("3")]),
        ),
        ("list.floats", Value::Sequence(vec![Value::Float(1.5), Value::Integer(2)])),
    ]))
}

#[rstest]
fn raw_lookups_distinguish_null_from_absent(config: Config) {
    assert!(config.has("app.nothing"));
    assert_eq!(config.get("app.nothing"), Some(&Value::Null));
    assert!(!config.has("app.missing"));
    assert!(!config.has("app.name.deeper"));
}

#[rstest]
fn scalar_accessors_coerce(config: Config) {
    assert_eq!(config.get_string("app.name"), "demo");
    assert_eq!(config.get_int("app.port"), 8080);
    assert_eq!(config.get_uint("app.port"), 8080);
    assert!((config.get_float("app.ratio") - 0.25).abs() < f64::EPSILON);
    assert!(config.get_bool("app.debug"));
    assert_eq!(config.get_duration("app.timeout"), Duration::from_secs(90));
    assert_eq!(config.get_duration("app.poll"), Duration::from_millis(250));
}

#[rstest]
fn accessors_fall_back_to_zero_values(config: Config) {
    assert_eq!(config.get_string("app.nothing"), "");
    assert_eq!(config.get_string("app.missing"), "");
    assert_eq!(config.get_int("app.name"), 0);
    assert_eq!(config.get_uint("app.negative"), 0);
    assert!(!config.get_bool("app.missing"));
    assert_eq!(config.get_duration("app.name"), Duration::ZERO);
    assert_eq!(config.get_or("app.missing", 7_u8), 7);
    assert_eq!(config.get_or("app.nothing", "x".to_owned()), "");
    assert_eq!(config.get_or("app.missing", "x".to_owned()), "x");
    assert_eq!(config.try_get::<i64>("app.name"), None);
}

#[rstest]
fn timestamps_use_layouts(config: Config) {
    let noon = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).single();
    assert_eq!(Some(config.get_time("app.started", crate::coerce::RFC3339)), noon);
    let midnight = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).single();
    assert_eq!(Some(config.get_time("app.day", "%Y-%m-%d")), midnight);
    assert_eq!(config.get_time("app.name", "%Y"), DateTime::<Utc>::default());
    let fallback = Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).single().unwrap_or_default();
    assert_eq!(config.get_time_or("app.missing", "%Y", fallback), fallback);
}

#[rstest]
fn sequence_accessors(config: Config) {
    assert_eq!(config.get_string_seq("list.words", None), ["a", "b", "c"]);
    assert_eq!(config.get_string_seq("list.words", Some(";")), ["a, b ,c"]);
    assert_eq!(config.get_int_seq("list.numbers"), [1, 3]);
    assert_eq!(config.get_float_seq("list.floats"), [1.5, 2.0]);
    assert!(config.get_string_seq("app.nothing", None).is_empty());
    assert!(config.get_int_seq("app.missing").is_empty());
}

#[rstest]
fn sub_configs_are_independent(config: Config) {
    let sub = config.get_sub("app").expect("app mapping");
    assert_eq!(sub.get_string("name"), "demo");
    assert!(config.get_sub("app.name").is_none());
    let mut copy = config.get_map("list").expect("list mapping");
    copy.clear();
    assert!(config.has("list.words"));
}

#[rstest]
fn overrides_leave_the_source_untouched(config: Config) {
    let updated = config.with_overrides([
        ("app.port", Value::Integer(9090)),
        ("app.extra.flag", Value::Bool(true)),
    ]);
    assert_eq!(updated.get_int("app.port"), 9090);
    assert!(updated.get_bool("app.extra.flag"));
    assert_eq!(updated.get_string("app.name"), "demo");
    assert_eq!(config.get_int("app.port"), 8080);
    assert!(!config.has("app.extra"));
}

#[derive(Bind, Debug, Default, PartialEq)]
struct App {
    name: String,
    port: u16,
    timeout: Duration,
    #[layered_config(default = "info")]
    level: String,
}

#[rstest]
fn binding_targets_subtrees(config: Config) {
    let app: App = config.bind("app").expect("bind");
    assert_eq!(
        app,
        App {
            name: "demo".to_owned(),
            port: 8080,
            timeout: Duration::from_secs(90),
            level: "info".to_owned(),
        }
    );
}

#[rstest]
fn binding_requires_a_mapping(config: Config) {
    let mut app = App::default();
    assert!(matches!(
        config.unmarshal("app.absent", &mut app),
        Err(ConfigError::KeyNotFound { key }) if key == "app.absent"
    ));
    assert!(matches!(
        config.unmarshal("app.name", &mut app),
        Err(ConfigError::NotAMapping { found: "string", .. })
    ));
}

#[test]
fn empty_key_binds_the_root() {
    let cfg = Config::from_mapping(expand_dot_keys([("name", Value::from("root"))]));
    let mut app = App {
        port: 1,
        ..App::default()
    };
    cfg.unmarshal("", &mut app).expect("bind root");
    assert_eq!(app.name, "root");
    assert_eq!(app.port, 1);
}

#[test]
fn builder_merges_in_order_and_renders() {
    let first: Mapping = expand_dot_keys([
        ("a", Value::Integer(1)),
        ("home", Value::from("{{ .HOME }}")),
    ]);
    let second: Mapping = expand_dot_keys([("a", Value::Integer(2))]);
    let cfg = Config::builder()
        .env(EnvSnapshot::from_pairs([("HOME", "/root")]))
        .loader(first)
        .loader(second)
        .build()
        .expect("build");
    assert_eq!(cfg.get_int("a"), 2);
    assert_eq!(cfg.get_string("home"), "/root");
}

#[test]
fn templates_can_be_disabled() {
    let raw = expand_dot_keys([("home", Value::from("{{ .HOME }}"))]);
    let cfg = Config::builder()
        .env(EnvSnapshot::new())
        .loader(raw)
        .without_templates()
        .build()
        .expect("build");
    assert_eq!(cfg.get_string("home"), "{{ .HOME }}");
}

#[test]
fn config_is_shareable() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Config>();
}
