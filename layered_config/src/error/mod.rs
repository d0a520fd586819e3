//! Error types produced while assembling and querying configuration.

mod constructors;
mod conversions;
mod load;
mod types;

pub use load::{LoadDetail, LoadError};
pub use types::ConfigError;

/// Result alias used throughout the pipeline.
pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests;
