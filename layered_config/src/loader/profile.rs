//! Base file plus an optional profile overlay.

use camino::{Utf8Path, Utf8PathBuf};
use tracing::debug;

use super::{FileLoader, LoadContext, Loader};
use crate::error::ConfigResult;
use crate::merge::merge;
use crate::value::Mapping;

#[derive(Clone, Debug)]
enum ProfileSource {
    Fixed(String),
    Env(String),
}

/// Loads `config.yaml` and then, when a profile is active, merges
/// `config.<profile>.yaml` over it.
///
/// The base file is required; the profile file is optional. An empty
/// profile name loads the base file only.
#[derive(Clone, Debug)]
pub struct ProfileLoader {
    base: Utf8PathBuf,
    profile: ProfileSource,
}

impl ProfileLoader {
    /// Use the fixed profile `name`.
    #[must_use]
    pub fn new(base: impl Into<Utf8PathBuf>, name: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            profile: ProfileSource::Fixed(name.into()),
        }
    }

    /// Read the profile name from the environment variable `var`.
    #[must_use]
    pub fn from_env(base: impl Into<Utf8PathBuf>, var: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            profile: ProfileSource::Env(var.into()),
        }
    }

    fn active<'a>(&'a self, ctx: &LoadContext<'a>) -> &'a str {
        match &self.profile {
            ProfileSource::Fixed(name) => name,
            ProfileSource::Env(var) => ctx.env().get(var).unwrap_or_default(),
        }
    }
}

/// `dir/app.yaml` with profile `dev` becomes `dir/app.dev.yaml`.
fn profile_path(base: &Utf8Path, profile: &str) -> Utf8PathBuf {
    let stem = base.file_stem().unwrap_or_default();
    let name = match base.extension() {
        Some(ext) => format!("{stem}.{profile}.{ext}"),
        None => format!("{stem}.{profile}"),
    };
    base.with_file_name(name)
}

impl Loader for ProfileLoader {
    fn name(&self) -> String {
        format!("profile:{}", self.base)
    }

    fn load(&self, ctx: &LoadContext<'_>) -> ConfigResult<Mapping> {
        let mut root = FileLoader::detect([self.base.clone()]).load(ctx)?;
        let profile = self.active(ctx);
        if profile.is_empty() {
            return Ok(root);
        }
        let overlay_path = profile_path(&self.base, profile);
        debug!(profile, path = %overlay_path, "applying profile overlay");
        let overlay = FileLoader::detect([overlay_path]).optional().load(ctx)?;
        merge(&mut root, overlay);
        Ok(root)
    }
}
