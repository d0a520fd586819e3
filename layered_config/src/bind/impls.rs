//! [`BindField`] implementations for scalars and collections.

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;
use std::time::Duration;

use chrono::{DateTime, Utc};

use super::{BindField, FieldOptions};
use crate::coerce::{
    CoercionError, split_trimmed, to_bool, to_duration, to_float, to_integer, to_text,
    to_timestamp,
};
use crate::value::Value;

impl BindField for Value {
    fn bind_field(value: &Value, _: &FieldOptions) -> Result<Self, CoercionError> {
        Ok(value.clone())
    }

    fn parse_default(literal: &str, _: &FieldOptions) -> Result<Self, CoercionError> {
        Ok(Self::from(literal))
    }
}

impl BindField for String {
    fn bind_field(value: &Value, _: &FieldOptions) -> Result<Self, CoercionError> {
        Ok(to_text(value))
    }
}

impl BindField for bool {
    fn bind_field(value: &Value, _: &FieldOptions) -> Result<Self, CoercionError> {
        to_bool(value)
    }
}

macro_rules! bind_via {
    ($convert:ident: $($ty:ty),*) => {
        $(
            impl BindField for $ty {
                fn bind_field(value: &Value, _: &FieldOptions) -> Result<Self, CoercionError> {
                    $convert::<$ty>(value)
                }
            }
        )*
    };
}

bind_via!(to_integer: i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);
bind_via!(to_float: f32, f64);

impl BindField for Duration {
    fn bind_field(value: &Value, _: &FieldOptions) -> Result<Self, CoercionError> {
        to_duration(value)
    }
}

impl BindField for DateTime<Utc> {
    fn bind_field(value: &Value, options: &FieldOptions) -> Result<Self, CoercionError> {
        to_timestamp(value, options.timestamp_layout())
    }
}

/// Allocated only when a value or default exists.
impl<T: BindField> BindField for Option<T> {
    fn bind_field(value: &Value, options: &FieldOptions) -> Result<Self, CoercionError> {
        T::bind_field(value, options).map(Some)
    }

    fn bind_field_in_place(
        &mut self,
        value: &Value,
        options: &FieldOptions,
    ) -> Result<(), CoercionError> {
        match self {
            Some(inner) => inner.bind_field_in_place(value, options),
            None => {
                *self = Some(T::bind_field(value, options)?);
                Ok(())
            }
        }
    }

    fn parse_default(literal: &str, options: &FieldOptions) -> Result<Self, CoercionError> {
        T::parse_default(literal, options).map(Some)
    }
}

/// Sequence elements convert strictly; the first failure aborts with its
/// index. A string is split on the field separator and each trimmed part is
/// converted; any other scalar becomes a single element.
impl<T: BindField> BindField for Vec<T> {
    fn bind_field(value: &Value, options: &FieldOptions) -> Result<Self, CoercionError> {
        match value {
            Value::Null => Ok(Self::new()),
            Value::Sequence(items) => items
                .iter()
                .enumerate()
                .map(|(index, item)| element(index, item, options))
                .collect(),
            Value::String(text) => split_trimmed(text, options.separator_override())
                .enumerate()
                .map(|(index, part)| element(index, &Value::from(part), options))
                .collect(),
            Value::Mapping(_) => Err(CoercionError::unsupported(value.kind(), "sequence")),
            scalar => element(0, scalar, options).map(|item| vec![item]),
        }
    }
}

fn element<T: BindField>(
    index: usize,
    item: &Value,
    options: &FieldOptions,
) -> Result<T, CoercionError> {
    T::bind_field(item, options).map_err(|source| CoercionError::Index {
        index,
        source: Box::new(source),
    })
}

fn entries<T, C>(value: &Value, options: &FieldOptions) -> Result<C, CoercionError>
where
    T: BindField,
    C: FromIterator<(String, T)>,
{
    let mapping = value
        .as_mapping()
        .ok_or(CoercionError::ExpectedMapping { found: value.kind() })?;
    mapping
        .iter()
        .map(|(key, item)| {
            T::bind_field(item, options)
                .map(|converted| (key.clone(), converted))
                .map_err(|source| CoercionError::Entry {
                    key: key.clone(),
                    source: Box::new(source),
                })
        })
        .collect()
}

impl<T: BindField> BindField for BTreeMap<String, T> {
    fn bind_field(value: &Value, options: &FieldOptions) -> Result<Self, CoercionError> {
        entries(value, options)
    }
}

impl<T: BindField, S: BuildHasher + Default> BindField for HashMap<String, T, S> {
    fn bind_field(value: &Value, options: &FieldOptions) -> Result<Self, CoercionError> {
        entries(value, options)
    }
}
