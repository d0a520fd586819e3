//! Running provider tests inside a `figment::Jail`.
//!
//! A jail gives each test a scratch working directory and restores any
//! environment variables it sets. [`with_jail`] threads the closure's value
//! back out as an `anyhow::Result` so tests can use `?` throughout.

use anyhow::{Result, anyhow};

/// Executes `f` inside a [`figment::Jail`], returning the closure's output.
///
/// # Errors
///
/// Returns an error if the jail cannot be created or the closure fails.
pub fn with_jail<F, T>(f: F) -> Result<T>
where
    F: FnOnce(&mut figment::Jail) -> figment::error::Result<T>,
{
    let mut output = None;
    figment::Jail::try_with(|jail| {
        output = Some(f(jail)?);
        Ok(())
    })
    .map_err(|err| anyhow!(err.to_string()))?;
    output.ok_or_else(|| anyhow!("jail closure did not return a value"))
}

/// Converts a displayable error into a [`figment::Error`] so `?` works inside
/// jail closures.
#[expect(
    clippy::needless_pass_by_value,
    reason = "callers hand over owned errors from `map_err`"
)]
pub fn figment_error<E: ToString>(err: E) -> figment::Error {
    figment::Error::from(err.to_string())
}
