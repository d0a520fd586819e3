//! Binding configuration mappings onto typed records.
//!
//! Records opt in with `#[derive(Bind)]`. The derive generates a
//! [`Bind::bind_mapping`] body that calls [`bind_field`] once per field, in
//! declaration order, with a [`FieldSpec`] describing the field's key, default
//! literal and conversion options. Field types convert through [`BindField`],
//! which is implemented for every scalar the coercion layer understands, for
//! `Option`, `Vec` and string-keyed maps of those, and for derived records.
//!
//! ```rust
//! use std::time::Duration;
//! use layered_config::{Bind, Config, path::expand_dot_keys, Value};
//!
//! #[derive(Bind, Default)]
//! struct Server {
//!     host: String,
//!     #[layered_config(default = "8080")]
//!     port: u16,
//!     #[layered_config(key = "read_timeout", default = "5s")]
//!     timeout: Duration,
//! }
//!
//! let config = Config::from_mapping(expand_dot_keys([("server.host", Value::from("example"))]));
//! let server: Server = config.bind("server")?;
//! assert_eq!(server.host, "example");
//! assert_eq!(server.port, 8080);
//! assert_eq!(server.timeout, Duration::from_secs(5));
//! # Ok::<(), layered_config::ConfigError>(())
//! ```

mod error;
mod impls;

use tracing::trace;

pub use error::BindError;

use crate::coerce::{CoercionError, RFC3339};
use crate::value::{Mapping, Value};

/// Records that can be populated from a [`Mapping`].
///
/// Implemented by `#[derive(Bind)]`; hand-written implementations should
/// follow the same contract: fields without a value keep their current
/// contents unless a default applies.
pub trait Bind: Default {
    /// Populate `self` from `mapping`.
    ///
    /// # Errors
    ///
    /// Returns [`BindError`] naming the first field that failed.
    fn bind_mapping(&mut self, mapping: &Mapping) -> Result<(), BindError>;
}

/// Types that can be produced from a single field value.
pub trait BindField: Sized {
    /// Convert `value` into a fresh instance.
    ///
    /// # Errors
    ///
    /// Returns [`CoercionError`] when the value has no reading as `Self`.
    fn bind_field(value: &Value, options: &FieldOptions) -> Result<Self, CoercionError>;

    /// Convert `value` into `self`, reusing existing contents where the type
    /// allows it (records and optional records).
    ///
    /// # Errors
    ///
    /// Returns [`CoercionError`] when the value has no reading as `Self`.
    fn bind_field_in_place(
        &mut self,
        value: &Value,
        options: &FieldOptions,
    ) -> Result<(), CoercionError> {
        *self = Self::bind_field(value, options)?;
        Ok(())
    }

    /// Parse a default literal declared on a field.
    ///
    /// # Errors
    ///
    /// Returns [`CoercionError`] when the literal does not parse.
    fn parse_default(literal: &str, options: &FieldOptions) -> Result<Self, CoercionError> {
        Self::bind_field(&Value::from(literal), options)
    }
}

/// Per-field conversion options declared through attributes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FieldOptions {
    separator: Option<&'static str>,
    layout: Option<&'static str>,
}

impl FieldOptions {
    /// Options with no overrides.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            separator: None,
            layout: None,
        }
    }

    /// Separator for splitting a string into a sequence field.
    #[must_use]
    pub const fn separator(mut self, separator: &'static str) -> Self {
        self.separator = Some(separator);
        self
    }

    /// Layout for parsing a timestamp field.
    #[must_use]
    pub const fn layout(mut self, layout: &'static str) -> Self {
        self.layout = Some(layout);
        self
    }

    /// Declared separator, if any.
    #[must_use]
    pub const fn separator_override(&self) -> Option<&'static str> {
        self.separator
    }

    /// Declared timestamp layout, or [`RFC3339`].
    #[must_use]
    pub fn timestamp_layout(&self) -> &'static str {
        self.layout.unwrap_or(RFC3339)
    }
}

/// Static description of one record field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldSpec {
    name: &'static str,
    key: &'static str,
    default: Option<&'static str>,
    options: FieldOptions,
}

impl FieldSpec {
    /// Describe field `name` resolved under `key`.
    #[must_use]
    pub const fn new(name: &'static str, key: &'static str) -> Self {
        Self {
            name,
            key,
            default: None,
            options: FieldOptions::new(),
        }
    }

    /// Literal applied when the key is absent or null.
    #[must_use]
    pub const fn default(mut self, literal: &'static str) -> Self {
        self.default = Some(literal);
        self
    }

    /// Conversion options for the field.
    #[must_use]
    pub const fn options(mut self, options: FieldOptions) -> Self {
        self.options = options;
        self
    }

    /// Field name as written in the record.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Mapping key the field reads.
    #[must_use]
    pub const fn key(&self) -> &'static str {
        self.key
    }
}

/// Populate `target` from the entry `spec` names in `mapping`.
///
/// A present, non-null value is converted into `target`. Otherwise the
/// default literal, when declared, is parsed and assigned; it is only
/// evaluated on this path. With neither, `target` is left untouched.
///
/// # Errors
///
/// Returns [`BindError::Field`] when the value does not convert and
/// [`BindError::InvalidDefault`] when the default literal does not parse.
pub fn bind_field<T: BindField>(
    mapping: &Mapping,
    spec: &FieldSpec,
    target: &mut T,
) -> Result<(), BindError> {
    match mapping.get(spec.key) {
        Some(value) if !value.is_null() => {
            trace!(field = spec.name, key = spec.key, kind = value.kind(), "binding field");
            target
                .bind_field_in_place(value, &spec.options)
                .map_err(|source| BindError::Field {
                    field: spec.name,
                    source,
                })
        }
        _ => {
            let Some(literal) = spec.default else {
                return Ok(());
            };
            trace!(field = spec.name, key = spec.key, literal, "applying default");
            *target = T::parse_default(literal, &spec.options).map_err(|source| {
                BindError::InvalidDefault {
                    field: spec.name,
                    literal,
                    source,
                }
            })?;
            Ok(())
        }
    }
}

/// Bind a nested record from `value`, which must be a mapping.
///
/// Used by derived [`BindField`] implementations.
///
/// # Errors
///
/// Returns [`CoercionError::ExpectedMapping`] for non-mapping values and
/// wraps any failure inside the nested record.
pub fn bind_record<T: Bind>(target: &mut T, value: &Value) -> Result<(), CoercionError> {
    let mapping = value
        .as_mapping()
        .ok_or(CoercionError::ExpectedMapping { found: value.kind() })?;
    target.bind_mapping(mapping)?;
    Ok(())
}
