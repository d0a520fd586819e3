//! Failure modes of strict value conversion.

use thiserror::Error;

use crate::bind::BindError;

/// Why a [`Value`](crate::Value) could not be converted into a target type.
///
/// The accessor layer never surfaces these; it falls back to defaults. The
/// struct binder wraps them in [`BindError`] with the offending field name.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CoercionError {
    /// The value's variant has no conversion into the target.
    #[error("cannot convert {found} to {target}")]
    Unsupported {
        /// Variant name of the offending value.
        found: &'static str,
        /// Name of the requested type.
        target: &'static str,
    },

    /// Text could not be parsed into the target.
    #[error("cannot parse {input:?} as {target}: {reason}")]
    Parse {
        /// The rejected text.
        input: String,
        /// Name of the requested type.
        target: &'static str,
        /// Parser diagnostic.
        reason: String,
    },

    /// A numeric value does not fit the target.
    #[error("{value} is out of range for {target}")]
    Overflow {
        /// Rendering of the rejected number.
        value: String,
        /// Name of the requested type.
        target: &'static str,
    },

    /// A negative value was offered to an unsigned target.
    #[error("negative value {value} cannot be stored in {target}")]
    Negative {
        /// Rendering of the rejected number.
        value: String,
        /// Name of the requested type.
        target: &'static str,
    },

    /// A record or map target received a non-mapping value.
    #[error("expected mapping, found {found}")]
    ExpectedMapping {
        /// Variant name of the offending value.
        found: &'static str,
    },

    /// A sequence element failed to convert.
    #[error("index {index}: {source}")]
    Index {
        /// Position of the element.
        index: usize,
        /// Element failure.
        source: Box<CoercionError>,
    },

    /// A map entry failed to convert.
    #[error("map key {key:?}: {source}")]
    Entry {
        /// Key of the entry.
        key: String,
        /// Entry failure.
        source: Box<CoercionError>,
    },

    /// A nested record failed to bind.
    #[error(transparent)]
    Nested(Box<BindError>),
}

impl CoercionError {
    pub(crate) fn parse(
        input: &str,
        target: &'static str,
        reason: impl std::fmt::Display,
    ) -> Self {
        Self::Parse {
            input: input.to_owned(),
            target,
            reason: reason.to_string(),
        }
    }

    pub(crate) fn overflow(value: impl std::fmt::Display, target: &'static str) -> Self {
        Self::Overflow {
            value: value.to_string(),
            target,
        }
    }

    pub(crate) fn negative(value: impl std::fmt::Display, target: &'static str) -> Self {
        Self::Negative {
            value: value.to_string(),
            target,
        }
    }

    pub(crate) const fn unsupported(found: &'static str, target: &'static str) -> Self {
        Self::Unsupported { found, target }
    }
}

impl From<BindError> for CoercionError {
    fn from(err: BindError) -> Self {
        Self::Nested(Box::new(err))
    }
}
