use std::error::Error as _;

use rstest::rstest;

use super::{ConfigError, LoadError};
use crate::bind::BindError;
use crate::coerce::CoercionError;
use crate::loader::Format;
use crate::template::RenderError;
use crate::validate::{ValidationErrors, Violation};
use crate::{Config, validate::required};

#[test]
fn load_errors_list_each_candidate() {
    let err = LoadError::new("no readable configuration file")
        .with_detail("a.yaml", "not found")
        .with_detail("/etc/b.yaml", "outside base directory .");
    assert_eq!(
        err.to_string(),
        "no readable configuration file\n  - a.yaml: not found\n  - /etc/b.yaml: outside base directory ."
    );
    let wrapped = ConfigError::from(err.clone());
    assert_eq!(wrapped.to_string(), err.to_string());
}

#[rstest]
#[case(
    ConfigError::parse(Format::Toml, "app.toml", "expected `=`"),
    "failed to parse TOML from 'app.toml': expected `=`"
)]
#[case(
    ConfigError::KeyNotFound { key: "db".to_owned() },
    "key \"db\" not found"
)]
#[case(
    ConfigError::NotAMapping { key: "db".to_owned(), found: "integer" },
    "key \"db\" holds a integer, not a mapping"
)]
#[case(
    ConfigError::Render { path: "a.b".to_owned(), source: RenderError::new("boom") },
    "template error at key \"a.b\": boom"
)]
fn messages_are_descriptive(#[case] err: ConfigError, #[case] expected: &str) {
    assert_eq!(err.to_string(), expected);
}

#[test]
fn source_errors_keep_their_cause() {
    let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
    let err = ConfigError::from_source("file:app.yaml", io);
    assert_eq!(err.to_string(), "loader file:app.yaml failed: denied");
    assert!(err.source().is_some());
}

#[test]
fn bind_errors_pass_through() {
    let err = ConfigError::from(BindError::Field {
        field: "port",
        source: CoercionError::Overflow {
            value: "70000".to_owned(),
            target: "u16",
        },
    });
    assert!(matches!(err, ConfigError::Bind(_)));
    assert!(err.to_string().contains("port"), "{err}");
}

#[test]
fn validation_errors_pass_through() {
    let violations: ValidationErrors = Config::empty()
        .validate(&[&required("host")])
        .expect_err("missing host");
    let err = ConfigError::from(violations);
    assert_eq!(
        err.to_string(),
        format!("validation failed\n  - {}", Violation::new("host", "is required"))
    );
}

#[test]
fn errors_stay_small() {
    assert!(size_of::<ConfigError>() <= 128);
}

#[test]
fn figment_errors_carry_the_message() {
    let err: figment::Error = ConfigError::KeyNotFound { key: "x".to_owned() }.into();
    assert!(err.to_string().contains("key \"x\" not found"));
}
