//! Sources that produce raw configuration mappings.
//!
//! A [`Loader`] turns some external source into a [`Mapping`]. The builder
//! runs loaders in registration order and merges each result over the
//! previous ones, so later loaders win on conflict. Any loader failure aborts
//! the pipeline.

mod env;
mod file;
mod profile;
mod provider;

use camino::Utf8Path;

pub use env::EnvLoader;
pub use file::{FileLoader, Format};
pub use profile::ProfileLoader;
pub use provider::ProviderLoader;

use crate::EnvSnapshot;
use crate::error::ConfigResult;
use crate::value::Mapping;

/// Inputs shared by every loader in one pipeline run.
#[derive(Clone, Copy, Debug)]
pub struct LoadContext<'a> {
    env: &'a EnvSnapshot,
    base_dir: &'a Utf8Path,
}

impl<'a> LoadContext<'a> {
    /// Create a context reading `env` and resolving files under `base_dir`.
    #[must_use]
    pub const fn new(env: &'a EnvSnapshot, base_dir: &'a Utf8Path) -> Self {
        Self { env, base_dir }
    }

    /// Environment visible to loaders.
    #[must_use]
    pub const fn env(&self) -> &'a EnvSnapshot {
        self.env
    }

    /// Directory that file loaders are confined to.
    #[must_use]
    pub const fn base_dir(&self) -> &'a Utf8Path {
        self.base_dir
    }
}

/// A source of configuration data.
pub trait Loader {
    /// Short description used in logs and errors.
    fn name(&self) -> String;

    /// Produce this source's mapping.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`](crate::ConfigError) when the source cannot
    /// be read or decoded.
    fn load(&self, ctx: &LoadContext<'_>) -> ConfigResult<Mapping>;
}

/// A literal mapping is a static source.
impl Loader for Mapping {
    fn name(&self) -> String {
        "static".to_owned()
    }

    fn load(&self, _: &LoadContext<'_>) -> ConfigResult<Mapping> {
        Ok(self.clone())
    }
}

impl<L: Loader + ?Sized> Loader for Box<L> {
    fn name(&self) -> String {
        (**self).name()
    }

    fn load(&self, ctx: &LoadContext<'_>) -> ConfigResult<Mapping> {
        (**self).load(ctx)
    }
}
