//! Adapter for `figment` providers.

use figment::{Figment, Provider};

use super::{LoadContext, Loader};
use crate::error::{ConfigError, ConfigResult};
use crate::value::{Mapping, Value};

/// Wraps any [`figment::Provider`] as a loader.
///
/// The provider is extracted through a fresh [`Figment`] using its default
/// profile selection.
#[derive(Clone, Debug)]
pub struct ProviderLoader<P> {
    provider: P,
}

impl<P: Provider> ProviderLoader<P> {
    /// Wrap `provider`.
    #[must_use]
    pub const fn new(provider: P) -> Self {
        Self { provider }
    }
}

impl<P: Provider> Loader for ProviderLoader<P> {
    fn name(&self) -> String {
        format!("figment:{}", self.provider.metadata().name)
    }

    fn load(&self, _: &LoadContext<'_>) -> ConfigResult<Mapping> {
        let value: Value = Figment::from(&self.provider)
            .extract()
            .map_err(|err| ConfigError::from_source(self.name(), err))?;
        match value {
            Value::Null => Ok(Mapping::new()),
            Value::Mapping(root) => Ok(root),
            other => Err(ConfigError::from_source(
                self.name(),
                format!("provider produced a {}, expected a mapping", other.kind()),
            )),
        }
    }
}
