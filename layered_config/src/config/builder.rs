//! Assembles a [`Config`] from ordered loaders.
//!
//! The builder collects loaders and pipeline settings, then
//! [`build`](ConfigBuilder::build) runs every loader in registration order,
//! merges the results (later loaders win), renders templates and freezes the
//! tree.

use std::fmt;

use camino::Utf8PathBuf;
use tracing::debug;

use super::Config;
use crate::EnvSnapshot;
use crate::error::ConfigResult;
use crate::loader::{LoadContext, Loader, ProfileLoader};
use crate::merge::merge;
use crate::template::{Render, TemplateRenderer, render_tree};
use crate::value::Mapping;

enum Templates {
    Default,
    Custom(Box<dyn Render>),
    Disabled,
}

/// Builder for [`Config`].
///
/// # Examples
///
/// ```rust,no_run
/// use layered_config::{Config, loader::{EnvLoader, FileLoader}};
///
/// # fn run() -> layered_config::ConfigResult<()> {
/// let config = Config::builder()
///     .loader(FileLoader::detect(["config.yaml"]).optional())
///     .loader(EnvLoader::new("APP_"))
///     .build()?;
/// let port: u16 = config.get_or("server.port", 8080);
/// assert!(port > 0);
/// # Ok(())
/// # }
/// ```
#[must_use]
pub struct ConfigBuilder {
    loaders: Vec<Box<dyn Loader>>,
    env: Option<EnvSnapshot>,
    base_dir: Option<Utf8PathBuf>,
    templates: Templates,
}

impl ConfigBuilder {
    /// An empty pipeline reading the process environment and the current
    /// directory.
    pub fn new() -> Self {
        Self {
            loaders: Vec::new(),
            env: None,
            base_dir: None,
            templates: Templates::Default,
        }
    }

    /// Append `loader`; it overrides every loader added before it.
    pub fn loader<L: Loader + 'static>(mut self, loader: L) -> Self {
        self.loaders.push(Box::new(loader));
        self
    }

    /// Use `env` instead of capturing the process environment.
    pub fn env(mut self, env: EnvSnapshot) -> Self {
        self.env = Some(env);
        self
    }

    /// Confine file loaders to `dir` instead of the current directory.
    pub fn base_dir(mut self, dir: impl Into<Utf8PathBuf>) -> Self {
        self.base_dir = Some(dir.into());
        self
    }

    /// Append a [`ProfileLoader`] with the fixed profile `name`.
    pub fn profile(self, base: impl Into<Utf8PathBuf>, name: impl Into<String>) -> Self {
        self.loader(ProfileLoader::new(base, name))
    }

    /// Append a [`ProfileLoader`] reading its profile from `var`.
    pub fn profile_from_env(self, base: impl Into<Utf8PathBuf>, var: impl Into<String>) -> Self {
        self.loader(ProfileLoader::from_env(base, var))
    }

    /// Render templates with `renderer` instead of [`TemplateRenderer`].
    pub fn renderer(mut self, renderer: impl Render + 'static) -> Self {
        self.templates = Templates::Custom(Box::new(renderer));
        self
    }

    /// Leave `{{ ... }}` text untouched.
    pub fn without_templates(mut self) -> Self {
        self.templates = Templates::Disabled;
        self
    }

    /// Run the pipeline.
    ///
    /// # Errors
    ///
    /// Returns the first loader failure, or a template failure naming the
    /// offending key. Nothing is merged past a failing loader.
    pub fn build(self) -> ConfigResult<Config> {
        let env = self.env.unwrap_or_else(EnvSnapshot::capture);
        let base_dir = self.base_dir.unwrap_or_else(|| Utf8PathBuf::from("."));
        let ctx = LoadContext::new(&env, &base_dir);

        let mut root = Mapping::new();
        for loader in &self.loaders {
            let layer = loader.load(&ctx)?;
            debug!(loader = %loader.name(), keys = layer.len(), "applied loader");
            merge(&mut root, layer);
        }

        match self.templates {
            Templates::Default => render_tree(&mut root, &TemplateRenderer::new(env))?,
            Templates::Custom(renderer) => render_tree(&mut root, renderer.as_ref())?,
            Templates::Disabled => {}
        }
        Ok(Config::from_mapping(root))
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ConfigBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let loaders: Vec<String> = self.loaders.iter().map(|l| l.name()).collect();
        let templates = match self.templates {
            Templates::Default => "default",
            Templates::Custom(_) => "custom",
            Templates::Disabled => "disabled",
        };
        f.debug_struct("ConfigBuilder")
            .field("loaders", &loaders)
            .field("env", &self.env.as_ref().map(EnvSnapshot::len))
            .field("base_dir", &self.base_dir)
            .field("templates", &templates)
            .finish()
    }
}
