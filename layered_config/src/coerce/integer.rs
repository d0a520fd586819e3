//! Checked conversion into the fixed-width integer family.

use std::num::IntErrorKind;

use super::CoercionError;
use crate::value::Value;

mod sealed {
    pub trait Sealed {}
}

/// Fixed-width integer targets understood by [`to_integer`].
///
/// This trait is sealed; it is implemented for every primitive integer type
/// except `i128` and `u128`.
pub trait Integer: Copy + TryFrom<i128> + sealed::Sealed {
    /// Type name used in diagnostics.
    const NAME: &'static str;
    /// Whether the type can hold negative values.
    const SIGNED: bool;
}

macro_rules! integer {
    ($($ty:ty => $signed:literal),* $(,)?) => {
        $(
            impl sealed::Sealed for $ty {}

            impl Integer for $ty {
                const NAME: &'static str = stringify!($ty);
                const SIGNED: bool = $signed;
            }
        )*
    };
}

integer!(
    i8 => true,
    i16 => true,
    i32 => true,
    i64 => true,
    isize => true,
    u8 => false,
    u16 => false,
    u32 => false,
    u64 => false,
    usize => false,
);

/// Convert `value` into the integer type `T`.
///
/// Integers are range-checked, finite floats are truncated toward zero and
/// then range-checked, booleans map to `1`/`0` for signed targets and numeric
/// strings are parsed in base 10. Out-of-range input is an error; nothing is
/// clamped or wrapped.
///
/// # Errors
///
/// Returns [`CoercionError`] when the value has no integer reading, does not
/// fit `T`, or is negative while `T` is unsigned.
pub fn to_integer<T: Integer>(value: &Value) -> Result<T, CoercionError> {
    let wide = match value {
        Value::Integer(i) => i128::from(*i),
        Value::Float(f) => from_float::<T>(*f)?,
        Value::Bool(b) if T::SIGNED => i128::from(*b),
        Value::String(s) => from_text::<T>(s)?,
        other => return Err(CoercionError::unsupported(other.kind(), T::NAME)),
    };
    if !T::SIGNED && wide < 0 {
        return Err(CoercionError::negative(wide, T::NAME));
    }
    T::try_from(wide).map_err(|_| CoercionError::overflow(wide, T::NAME))
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "saturation is caught by the range check that follows"
)]
fn from_float<T: Integer>(f: f64) -> Result<i128, CoercionError> {
    if !f.is_finite() {
        return Err(CoercionError::overflow(f, T::NAME));
    }
    if !T::SIGNED && f < 0.0 {
        return Err(CoercionError::negative(f, T::NAME));
    }
    Ok(f.trunc() as i128)
}

fn from_text<T: Integer>(text: &str) -> Result<i128, CoercionError> {
    if !T::SIGNED && text.starts_with('-') {
        return Err(CoercionError::negative(text, T::NAME));
    }
    text.parse::<i128>().map_err(|e| match e.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
            CoercionError::overflow(text, T::NAME)
        }
        _ => CoercionError::parse(text, T::NAME, e),
    })
}
