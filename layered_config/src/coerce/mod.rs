//! Scalar coercion between [`Value`] and Rust types.
//!
//! Each `to_*` function is strict and reports why a conversion failed. The
//! accessor layer on [`Config`](crate::Config) calls them through
//! [`FromValue`] and falls back to defaults; the struct binder propagates the
//! errors with the failing field's name attached.

mod duration;
mod error;
mod integer;
mod sequence;
mod timestamp;

use std::time::Duration;

use chrono::{DateTime, Utc};

pub use duration::{format_duration, parse_duration, to_duration};
pub use error::CoercionError;
pub use integer::{Integer, to_integer};
pub use sequence::{DEFAULT_SEPARATOR, lossy_seq, split_trimmed, string_seq};
pub use timestamp::{RFC3339, parse_timestamp, to_timestamp};

use crate::value::Value;

/// Canonical text of `value`.
///
/// Strings pass through, null is the empty string and everything else uses
/// the [`Display`](std::fmt::Display) form of [`Value`].
#[must_use]
pub fn to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Read `value` as a boolean.
///
/// Accepts booleans, the case-insensitive words `true`, `1`, `on`, `yes`,
/// `y` and `false`, `0`, `off`, `no`, `n`, and numbers (non-zero is true).
///
/// # Errors
///
/// Returns [`CoercionError`] for unrecognised words and composite values.
pub fn to_bool(value: &Value) -> Result<bool, CoercionError> {
    const TARGET: &str = "bool";
    match value {
        Value::Bool(b) => Ok(*b),
        Value::Integer(i) => Ok(*i != 0),
        Value::Float(f) => Ok(*f != 0.0),
        Value::String(s) => match s.to_ascii_lowercase().as_str() {
            "true" | "1" | "on" | "yes" | "y" => Ok(true),
            "false" | "0" | "off" | "no" | "n" => Ok(false),
            _ => Err(CoercionError::parse(s, TARGET, "not a boolean word")),
        },
        other => Err(CoercionError::unsupported(other.kind(), TARGET)),
    }
}

mod sealed {
    pub trait Sealed {}
    impl Sealed for f32 {}
    impl Sealed for f64 {}
}

/// Floating point targets understood by [`to_float`].
pub trait Float: Copy + sealed::Sealed {
    /// Type name used in diagnostics.
    const NAME: &'static str;

    /// Narrow an `f64`, returning `None` when a finite value does not fit.
    fn narrow(wide: f64) -> Option<Self>;
}

impl Float for f64 {
    const NAME: &'static str = "f64";

    fn narrow(wide: f64) -> Option<Self> {
        Some(wide)
    }
}

impl Float for f32 {
    const NAME: &'static str = "f32";

    #[expect(
        clippy::cast_possible_truncation,
        reason = "range is checked before narrowing"
    )]
    fn narrow(wide: f64) -> Option<Self> {
        (!wide.is_finite() || wide.abs() <= f64::from(Self::MAX)).then_some(wide as Self)
    }
}

/// Read `value` as a floating point number.
///
/// # Errors
///
/// Returns [`CoercionError`] for non-numeric values and finite values outside
/// the range of `T`.
pub fn to_float<T: Float>(value: &Value) -> Result<T, CoercionError> {
    let wide = match value {
        Value::Float(f) => *f,
        Value::Integer(i) => widen(*i),
        Value::String(s) => s
            .parse::<f64>()
            .map_err(|e| CoercionError::parse(s, T::NAME, e))?,
        other => return Err(CoercionError::unsupported(other.kind(), T::NAME)),
    };
    T::narrow(wide).ok_or_else(|| CoercionError::overflow(wide, T::NAME))
}

#[expect(
    clippy::cast_precision_loss,
    reason = "integers beyond 2^53 lose precision as floats by nature"
)]
fn widen(i: i64) -> f64 {
    i as f64
}

/// Types the accessor layer can produce from a [`Value`].
///
/// `None` means "no sensible reading"; callers substitute a default.
pub trait FromValue: Sized {
    /// Attempt the conversion.
    fn from_value(value: &Value) -> Option<Self>;
}

impl FromValue for Value {
    fn from_value(value: &Value) -> Option<Self> {
        Some(value.clone())
    }
}

impl FromValue for String {
    fn from_value(value: &Value) -> Option<Self> {
        Some(to_text(value))
    }
}

impl FromValue for bool {
    fn from_value(value: &Value) -> Option<Self> {
        to_bool(value).ok()
    }
}

macro_rules! from_value_via {
    ($convert:ident: $($ty:ty),*) => {
        $(
            impl FromValue for $ty {
                fn from_value(value: &Value) -> Option<Self> {
                    $convert::<$ty>(value).ok()
                }
            }
        )*
    };
}

from_value_via!(to_integer: i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);
from_value_via!(to_float: f32, f64);

impl FromValue for Duration {
    fn from_value(value: &Value) -> Option<Self> {
        to_duration(value).ok()
    }
}

/// Parsed with the [`RFC3339`] layout.
impl FromValue for DateTime<Utc> {
    fn from_value(value: &Value) -> Option<Self> {
        to_timestamp(value, RFC3339).ok()
    }
}

#[cfg(test)]
mod tests;
