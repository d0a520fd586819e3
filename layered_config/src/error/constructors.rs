//! Convenience constructors for `ConfigError`.

use camino::Utf8PathBuf;

use super::{ConfigError, LoadError};
use crate::loader::Format;

impl ConfigError {
    /// Wrap an arbitrary loader failure.
    #[must_use]
    pub fn from_source<E>(loader: impl Into<String>, err: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self::Source {
            loader: loader.into(),
            source: err.into(),
        }
    }

    /// Report a decode failure for `path`.
    #[must_use]
    pub fn parse(format: Format, path: impl Into<Utf8PathBuf>, reason: impl ToString) -> Self {
        Self::Parse {
            format,
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Report that no candidate source could be read.
    #[must_use]
    pub fn no_source(err: LoadError) -> Self {
        Self::NoSource(Box::new(err))
    }
}
