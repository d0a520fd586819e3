//! Errors raised while binding a mapping onto a record.

use thiserror::Error;

use crate::coerce::CoercionError;

/// A record field could not be populated.
///
/// Binding stops at the first failure; the target must be treated as being
/// in an indeterminate state afterwards.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BindError {
    /// The value present for a field did not convert to its type.
    #[error("field {field}: {source}")]
    Field {
        /// Name of the record field.
        field: &'static str,
        /// Conversion failure.
        source: CoercionError,
    },

    /// A field's default literal does not parse as the field's type.
    #[error("field {field}: invalid default {literal:?}: {source}")]
    InvalidDefault {
        /// Name of the record field.
        field: &'static str,
        /// The literal declared on the field.
        literal: &'static str,
        /// Conversion failure.
        source: CoercionError,
    },
}

impl BindError {
    /// Name of the field that failed.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::Field { field, .. } | Self::InvalidDefault { field, .. } => field,
        }
    }
}
