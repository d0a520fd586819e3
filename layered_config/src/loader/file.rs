//! Configuration files confined to the base directory.

use std::fmt;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8::Dir};
use tracing::debug;

use super::{LoadContext, Loader};
use crate::error::{ConfigError, ConfigResult, LoadError};
use crate::value::{Mapping, Value};

/// File formats understood by [`FileLoader`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Format {
    /// JSON documents.
    Json,
    /// YAML 1.2 documents.
    Yaml,
    /// TOML documents.
    Toml,
}

impl Format {
    /// Guess the format from the extension of `path`.
    #[must_use]
    pub fn from_path(path: &Utf8Path) -> Option<Self> {
        let ext = path.extension()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            "toml" => Some(Self::Toml),
            _ => None,
        }
    }

    /// Decode `contents` into a root mapping.
    ///
    /// Blank documents and a null root produce an empty mapping; any other
    /// non-mapping root is rejected.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] naming `path` when the text does not
    /// decode, the root is not a mapping, or the format is compiled out.
    pub fn parse(self, path: &Utf8Path, contents: &str) -> ConfigResult<Mapping> {
        if contents.trim().is_empty() {
            return Ok(Mapping::new());
        }
        match self.decode(contents) {
            Ok(Value::Null) => Ok(Mapping::new()),
            Ok(Value::Mapping(root)) => Ok(root),
            Ok(other) => Err(ConfigError::parse(
                self,
                path,
                format!("document root is a {}, expected a mapping", other.kind()),
            )),
            Err(reason) => Err(ConfigError::parse(self, path, reason)),
        }
    }

    fn decode(self, contents: &str) -> Result<Value, String> {
        match self {
            Self::Json => serde_json::from_str(contents).map_err(|e| e.to_string()),
            Self::Yaml => decode_yaml(contents),
            Self::Toml => decode_toml(contents),
        }
    }
}

#[cfg(feature = "yaml")]
fn decode_yaml(contents: &str) -> Result<Value, String> {
    use serde_saphyr::Options;

    serde_saphyr::from_str_with_options(
        contents,
        Options {
            strict_booleans: true,
            ..Options::default()
        },
    )
    .map_err(|e| e.to_string())
}

#[cfg(not(feature = "yaml"))]
fn decode_yaml(_: &str) -> Result<Value, String> {
    Err("YAML support requires the `yaml` feature".to_owned())
}

#[cfg(feature = "toml")]
fn decode_toml(contents: &str) -> Result<Value, String> {
    toml::from_str(contents).map_err(|e| e.to_string())
}

#[cfg(not(feature = "toml"))]
fn decode_toml(_: &str) -> Result<Value, String> {
    Err("TOML support requires the `toml` feature".to_owned())
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Json => "JSON",
            Self::Yaml => "YAML",
            Self::Toml => "TOML",
        })
    }
}

/// Reads the first available file from an ordered candidate list.
///
/// Candidates are opened through a directory capability rooted at the
/// pipeline's base directory, so absolute paths outside it and `..`
/// traversal never reach the filesystem.
#[derive(Clone, Debug)]
pub struct FileLoader {
    paths: Vec<Utf8PathBuf>,
    format: Option<Format>,
    optional: bool,
}

impl FileLoader {
    fn with_format<I, P>(paths: I, format: Option<Format>) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Utf8PathBuf>,
    {
        Self {
            paths: paths.into_iter().map(Into::into).collect(),
            format,
            optional: false,
        }
    }

    /// Read candidates as JSON.
    #[must_use]
    pub fn json<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Utf8PathBuf>,
    {
        Self::with_format(paths, Some(Format::Json))
    }

    /// Read candidates as YAML.
    #[must_use]
    pub fn yaml<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Utf8PathBuf>,
    {
        Self::with_format(paths, Some(Format::Yaml))
    }

    /// Read candidates as TOML.
    #[must_use]
    pub fn toml<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Utf8PathBuf>,
    {
        Self::with_format(paths, Some(Format::Toml))
    }

    /// Choose each candidate's format from its extension, defaulting to YAML.
    #[must_use]
    pub fn detect<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Utf8PathBuf>,
    {
        Self::with_format(paths, None)
    }

    /// Yield an empty mapping instead of failing when no candidate is
    /// readable.
    #[must_use]
    pub const fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    fn format_for(&self, path: &Utf8Path) -> Format {
        self.format
            .or_else(|| Format::from_path(path))
            .unwrap_or(Format::Yaml)
    }
}

/// Express `candidate` relative to `base`, or explain why it cannot be.
fn scoped_path(base: &Utf8Path, candidate: &Utf8Path) -> Result<Utf8PathBuf, String> {
    if candidate.is_relative() {
        return Ok(candidate.to_owned());
    }
    if let Ok(rest) = candidate.strip_prefix(base) {
        return Ok(rest.to_owned());
    }
    base.canonicalize_utf8()
        .ok()
        .and_then(|canonical| candidate.strip_prefix(&canonical).ok().map(Utf8Path::to_path_buf))
        .ok_or_else(|| format!("outside base directory {base}"))
}

impl Loader for FileLoader {
    fn name(&self) -> String {
        let names: Vec<&str> = self
            .paths
            .iter()
            .map(Utf8PathBuf::as_path)
            .map(Utf8Path::as_str)
            .collect();
        format!("file:{}", names.join(","))
    }

    fn load(&self, ctx: &LoadContext<'_>) -> ConfigResult<Mapping> {
        let base = ctx.base_dir();
        let dir = Dir::open_ambient_dir(base, ambient_authority())
            .map_err(|err| ConfigError::from_source(self.name(), err))?;
        let mut report = LoadError::new("no readable configuration file");
        for candidate in &self.paths {
            let relative = match scoped_path(base, candidate) {
                Ok(relative) => relative,
                Err(reason) => {
                    debug!(path = %candidate, %reason, "skipping configuration file");
                    report = report.with_detail(candidate.clone(), reason);
                    continue;
                }
            };
            match dir.read_to_string(&relative) {
                Ok(contents) => {
                    debug!(path = %candidate, "reading configuration file");
                    return self.format_for(candidate).parse(candidate, &contents);
                }
                Err(err) => {
                    debug!(path = %candidate, error = %err, "skipping configuration file");
                    report = report.with_detail(candidate.clone(), err.to_string());
                }
            }
        }
        if self.optional {
            Ok(Mapping::new())
        } else {
            Err(ConfigError::no_source(report))
        }
    }
}

#[cfg(test)]
mod tests {
    use anyhow::{Result, ensure};
    use camino::{Utf8Path, Utf8PathBuf};
    use rstest::rstest;

    use super::{FileLoader, Format};
    use crate::EnvSnapshot;
    use crate::error::ConfigError;
    use crate::loader::{LoadContext, Loader};
    use crate::path::find;
    use crate::value::Value;

    fn temp_base() -> Result<(tempfile::TempDir, Utf8PathBuf)> {
        let dir = tempfile::tempdir()?;
        let base = Utf8PathBuf::from_path_buf(dir.path().to_path_buf())
            .map_err(|p| anyhow::anyhow!("non UTF-8 temp dir {}", p.display()))?;
        Ok((dir, base))
    }

    #[rstest]
    #[case("app.json", Some(Format::Json))]
    #[case("app.YML", Some(Format::Yaml))]
    #[case("app.yaml", Some(Format::Yaml))]
    #[case("app.toml", Some(Format::Toml))]
    #[case("app.ini", None)]
    #[case("app", None)]
    fn formats_follow_extensions(#[case] path: &str, #[case] expected: Option<Format>) {
        assert_eq!(Format::from_path(Utf8Path::new(path)), expected);
    }

    #[rstest]
    #[case(Format::Json, "null")]
    #[case(Format::Json, "  \n")]
    #[case(Format::Yaml, "")]
    fn null_roots_are_empty(#[case] format: Format, #[case] text: &str) -> Result<()> {
        ensure!(format.parse(Utf8Path::new("x"), text)?.is_empty());
        Ok(())
    }

    #[test]
    fn scalar_roots_are_rejected() {
        let err = Format::Json
            .parse(Utf8Path::new("x.json"), "[1, 2]")
            .expect_err("sequence root");
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("sequence"), "{err}");
    }

    #[cfg(feature = "yaml")]
    #[test]
    fn yaml_booleans_are_strict() -> Result<()> {
        let root = Format::Yaml.parse(Utf8Path::new("x.yaml"), "flag: yes\nenabled: true\n")?;
        ensure!(root.get("flag") == Some(&Value::from("yes")));
        ensure!(root.get("enabled") == Some(&Value::Bool(true)));
        Ok(())
    }

    #[test]
    fn first_readable_candidate_wins() -> Result<()> {
        let (_guard, base) = temp_base()?;
        std::fs::write(base.join("b.json"), r#"{"name": "b"}"#)?;
        std::fs::write(base.join("c.json"), r#"{"name": "c"}"#)?;
        let env = EnvSnapshot::new();
        let ctx = LoadContext::new(&env, &base);
        let map = FileLoader::json(["a.json", "b.json", "c.json"]).load(&ctx)?;
        ensure!(find(&map, "name") == Some(&Value::from("b")));
        Ok(())
    }

    #[test]
    fn absolute_paths_inside_base_are_allowed() -> Result<()> {
        let (_guard, base) = temp_base()?;
        std::fs::write(base.join("app.toml"), "port = 80\n")?;
        let env = EnvSnapshot::new();
        let ctx = LoadContext::new(&env, &base);
        let map = FileLoader::detect([base.join("app.toml")]).load(&ctx)?;
        ensure!(find(&map, "port") == Some(&Value::Integer(80)));
        Ok(())
    }

    #[test]
    fn escaping_candidates_are_skipped() -> Result<()> {
        let (_outer_guard, outer) = temp_base()?;
        std::fs::write(outer.join("secret.json"), r#"{"leak": true}"#)?;
        let inner = outer.join("inner");
        std::fs::create_dir(&inner)?;
        let env = EnvSnapshot::new();
        let ctx = LoadContext::new(&env, &inner);
        let loader = FileLoader::json(["../secret.json".into(), outer.join("secret.json")]);
        let Err(ConfigError::NoSource(report)) = loader.load(&ctx) else {
            anyhow::bail!("escaping paths must not load");
        };
        ensure!(report.details.len() == 2);
        Ok(())
    }

    #[test]
    fn optional_loaders_tolerate_absence() -> Result<()> {
        let (_guard, base) = temp_base()?;
        let env = EnvSnapshot::new();
        let ctx = LoadContext::new(&env, &base);
        ensure!(FileLoader::yaml(["missing.yaml"]).optional().load(&ctx)?.is_empty());
        let err = FileLoader::yaml(["missing.yaml"])
            .load(&ctx)
            .expect_err("required file");
        ensure!(err.to_string().contains("missing.yaml"), "{err}");
        Ok(())
    }

    #[test]
    fn names_list_every_candidate() {
        let loader = FileLoader::detect(["app.yaml", "conf/app.toml"]);
        assert_eq!(loader.name(), "file:app.yaml,conf/app.toml");
    }

    #[test]
    fn parse_failures_are_fatal() -> Result<()> {
        let (_guard, base) = temp_base()?;
        std::fs::write(base.join("bad.json"), "{ nope")?;
        std::fs::write(base.join("good.json"), "{}")?;
        let env = EnvSnapshot::new();
        let ctx = LoadContext::new(&env, &base);
        let err = FileLoader::json(["bad.json", "good.json"])
            .load(&ctx)
            .expect_err("malformed file");
        ensure!(matches!(err, ConfigError::Parse { .. }));
        Ok(())
    }
}
