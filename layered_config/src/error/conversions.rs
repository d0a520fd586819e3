//! Conversions between component errors and `ConfigError`.

use figment::Error as FigmentError;

use super::{ConfigError, LoadError};
use crate::bind::BindError;
use crate::validate::ValidationErrors;

impl From<BindError> for ConfigError {
    fn from(err: BindError) -> Self {
        Self::Bind(Box::new(err))
    }
}

impl From<ValidationErrors> for ConfigError {
    fn from(err: ValidationErrors) -> Self {
        Self::Validation(err)
    }
}

impl From<LoadError> for ConfigError {
    fn from(err: LoadError) -> Self {
        Self::no_source(err)
    }
}

impl From<ConfigError> for FigmentError {
    /// Allow using `?` in code that returns `figment::Error`.
    fn from(err: ConfigError) -> Self {
        Self::from(err.to_string())
    }
}
