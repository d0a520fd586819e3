//! Primary error enum for configuration pipelines.

use camino::Utf8PathBuf;
use thiserror::Error;

use super::LoadError;
use crate::bind::BindError;
use crate::loader::Format;
use crate::template::RenderError;
use crate::validate::ValidationErrors;

/// Errors that can occur while building, binding or validating a
/// configuration.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// A loader could not produce data.
    #[error("loader {loader} failed: {source}")]
    Source {
        /// Name of the failing loader.
        loader: String,
        /// Underlying failure.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// None of a loader's candidate files could be read.
    #[error(transparent)]
    NoSource(Box<LoadError>),

    /// File contents did not decode into a configuration tree.
    #[error("failed to parse {format} from '{path}': {reason}")]
    Parse {
        /// Format the file was decoded as.
        format: Format,
        /// File that failed to decode.
        path: Utf8PathBuf,
        /// Decoder diagnostic.
        reason: String,
    },

    /// A template expression in a string value failed to render.
    #[error("template error at key {path:?}: {source}")]
    Render {
        /// Dotted path of the offending value.
        path: String,
        /// Renderer diagnostic.
        #[source]
        source: RenderError,
    },

    /// Binding a subtree onto a record failed.
    #[error(transparent)]
    Bind(Box<BindError>),

    /// The key addressed for binding does not exist.
    #[error("key {key:?} not found")]
    KeyNotFound {
        /// Requested dotted path.
        key: String,
    },

    /// The key addressed for binding does not hold a mapping.
    #[error("key {key:?} holds a {found}, not a mapping")]
    NotAMapping {
        /// Requested dotted path.
        key: String,
        /// Variant name of the value found.
        found: &'static str,
    },

    /// One or more validation rules failed.
    #[error(transparent)]
    Validation(ValidationErrors),
}
