//! The immutable configuration handle.

mod builder;

use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::debug;

pub use builder::ConfigBuilder;

use crate::bind::Bind;
use crate::coerce::{FromValue, lossy_seq, string_seq, to_timestamp};
use crate::error::{ConfigError, ConfigResult};
use crate::loader::Loader;
use crate::merge::merge;
use crate::path::{expand_dot_keys, find};
use crate::validate::{Rule, ValidationErrors, Violation, collect_violations, validate};
use crate::value::{Mapping, Value};

/// A resolved configuration tree.
///
/// A `Config` never changes after construction. Reads are plain borrows of
/// the tree, so a handle can be shared across threads freely; operations that
/// hand out owned data ([`all`](Self::all), [`get_map`](Self::get_map),
/// [`get_sub`](Self::get_sub)) return deep copies, and
/// [`with_overrides`](Self::with_overrides) returns a new handle.
///
/// Typed accessors never fail: a missing key or a value that does not
/// convert yields the caller's default, or the type's zero value.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Config {
    root: Mapping,
}

impl Config {
    /// Wrap `root` without running any loaders or templates.
    #[must_use]
    pub const fn from_mapping(root: Mapping) -> Self {
        Self { root }
    }

    /// A configuration with no keys.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            root: Mapping::new(),
        }
    }

    /// Start assembling a configuration from loaders.
    #[must_use]
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Run `loaders` in order with the default pipeline settings.
    ///
    /// # Errors
    ///
    /// Returns the first loader or template failure.
    pub fn load<I>(loaders: I) -> ConfigResult<Self>
    where
        I: IntoIterator,
        I::Item: Loader + 'static,
    {
        loaders
            .into_iter()
            .fold(Self::builder(), ConfigBuilder::loader)
            .build()
    }

    /// Whether `path` resolves to a value (including null).
    #[must_use]
    pub fn has(&self, path: &str) -> bool {
        find(&self.root, path).is_some()
    }

    /// Borrow the raw value at `path`.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&Value> {
        find(&self.root, path)
    }

    /// Borrow the whole tree.
    #[must_use]
    pub const fn as_mapping(&self) -> &Mapping {
        &self.root
    }

    /// Deep copy of the whole tree.
    #[must_use]
    pub fn all(&self) -> Mapping {
        self.root.clone()
    }

    /// Deep copy of the mapping at `path`; `None` when absent or not a
    /// mapping.
    #[must_use]
    pub fn get_map(&self, path: &str) -> Option<Mapping> {
        self.get(path).and_then(Value::as_mapping).cloned()
    }

    /// Independent handle over the mapping at `path`.
    #[must_use]
    pub fn get_sub(&self, path: &str) -> Option<Self> {
        self.get_map(path).map(Self::from_mapping)
    }

    /// Convert the value at `path`, or `None` when absent or unconvertible.
    #[must_use]
    pub fn try_get<T: FromValue>(&self, path: &str) -> Option<T> {
        self.get(path).and_then(T::from_value)
    }

    /// Convert the value at `path`, falling back to `default`.
    #[must_use]
    pub fn get_or<T: FromValue>(&self, path: &str, default: T) -> T {
        self.try_get(path).unwrap_or(default)
    }

    /// Convert the value at `path`, falling back to `T::default()`.
    #[must_use]
    pub fn get_as<T: FromValue + Default>(&self, path: &str) -> T {
        self.try_get(path).unwrap_or_default()
    }

    /// Text at `path`; a present null reads as the empty string.
    #[must_use]
    pub fn get_string(&self, path: &str) -> String {
        self.get_as(path)
    }

    /// Signed integer at `path`, or `0`.
    #[must_use]
    pub fn get_int(&self, path: &str) -> i64 {
        self.get_as(path)
    }

    /// Unsigned integer at `path`, or `0`. Negative values read as `0`.
    #[must_use]
    pub fn get_uint(&self, path: &str) -> u64 {
        self.get_as(path)
    }

    /// Float at `path`, or `0.0`.
    #[must_use]
    pub fn get_float(&self, path: &str) -> f64 {
        self.get_as(path)
    }

    /// Boolean at `path`, or `false`.
    #[must_use]
    pub fn get_bool(&self, path: &str) -> bool {
        self.get_as(path)
    }

    /// Duration at `path`, or zero. Bare numbers are milliseconds.
    #[must_use]
    pub fn get_duration(&self, path: &str) -> Duration {
        self.get_as(path)
    }

    /// Timestamp at `path` parsed with `layout`, or the Unix epoch.
    #[must_use]
    pub fn get_time(&self, path: &str, layout: &str) -> DateTime<Utc> {
        self.get_time_or(path, layout, DateTime::<Utc>::default())
    }

    /// Timestamp at `path` parsed with `layout`, or `default`.
    #[must_use]
    pub fn get_time_or(&self, path: &str, layout: &str, default: DateTime<Utc>) -> DateTime<Utc> {
        self.get(path)
            .and_then(|value| to_timestamp(value, layout).ok())
            .unwrap_or(default)
    }

    /// Strings at `path`.
    ///
    /// A sequence yields each element's text; a string is split on
    /// `separator` (default `,`) and trimmed; absent or null yields none.
    #[must_use]
    pub fn get_string_seq(&self, path: &str, separator: Option<&str>) -> Vec<String> {
        self.get(path)
            .map(|value| string_seq(value, separator))
            .unwrap_or_default()
    }

    /// Integers at `path`; elements that do not convert are dropped.
    #[must_use]
    pub fn get_int_seq(&self, path: &str) -> Vec<i64> {
        self.get_seq(path)
    }

    /// Floats at `path`; elements that do not convert are dropped.
    #[must_use]
    pub fn get_float_seq(&self, path: &str) -> Vec<f64> {
        self.get_seq(path)
    }

    /// Sequence at `path` converted element by element, dropping failures.
    #[must_use]
    pub fn get_seq<T: FromValue>(&self, path: &str) -> Vec<T> {
        self.get(path).map(lossy_seq).unwrap_or_default()
    }

    /// A new handle with `overrides` merged over a copy of this one.
    ///
    /// Keys are dotted paths expanded in iteration order.
    #[must_use]
    pub fn with_overrides<I, K, V>(&self, overrides: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        let expanded = expand_dot_keys(overrides.into_iter().map(|(key, value)| {
            debug!(key = key.as_ref(), "applying override");
            (key, value.into())
        }));
        let mut root = self.root.clone();
        merge(&mut root, expanded);
        Self { root }
    }

    /// Bind the mapping at `key` (the root when empty) into `target`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::KeyNotFound`] or [`ConfigError::NotAMapping`]
    /// when `key` does not address a mapping, and [`ConfigError::Bind`] when
    /// a field fails.
    pub fn unmarshal<T: Bind>(&self, key: &str, target: &mut T) -> ConfigResult<()> {
        let mapping = if key.is_empty() {
            &self.root
        } else {
            let value = self.get(key).ok_or_else(|| ConfigError::KeyNotFound {
                key: key.to_owned(),
            })?;
            value.as_mapping().ok_or_else(|| ConfigError::NotAMapping {
                key: key.to_owned(),
                found: value.kind(),
            })?
        };
        debug!(key, "binding record");
        target.bind_mapping(mapping)?;
        Ok(())
    }

    /// Bind the mapping at `key` into a fresh `T::default()`.
    ///
    /// # Errors
    ///
    /// As for [`unmarshal`](Self::unmarshal).
    pub fn bind<T: Bind>(&self, key: &str) -> ConfigResult<T> {
        let mut target = T::default();
        self.unmarshal(key, &mut target)?;
        Ok(target)
    }

    /// Evaluate every rule, failing with all violations together.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationErrors`] when any rule fails.
    pub fn validate(&self, rules: &[&dyn Rule]) -> Result<(), ValidationErrors> {
        validate(self, rules)
    }

    /// Evaluate every rule and return the violations found.
    #[must_use]
    pub fn violations(&self, rules: &[&dyn Rule]) -> Vec<Violation> {
        collect_violations(self, rules)
    }
}

impl From<Mapping> for Config {
    fn from(root: Mapping) -> Self {
        Self::from_mapping(root)
    }
}

#[cfg(test)]
mod tests;
