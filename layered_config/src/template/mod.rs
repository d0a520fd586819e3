//! Template expansion for string values.
//!
//! After loading, every string in the tree containing both `{{` and `}}` is
//! passed through a [`Render`] implementation. The bundled
//! [`TemplateRenderer`] understands a small action language:
//!
//! - literals: `"text"`, `` `raw` ``, `42`, `1.5`, `true`
//! - `.NAME` reads `NAME` from the environment snapshot (empty when unset)
//! - calls with space-separated arguments, optionally parenthesised
//! - pipelines: `a | f` passes `a` as the final argument of `f`
//! - `{{-` and `-}}` trim surrounding whitespace
//! - functions `env`, `default`, `upper`, `lower` and `trimSpace`
//!
//! ```
//! use layered_config::EnvSnapshot;
//! use layered_config::template::{Render, TemplateRenderer};
//!
//! let renderer = TemplateRenderer::new(EnvSnapshot::from_pairs([("USER", "ada")]));
//! let out = renderer.render(r#"{{ env "USER" | upper }}@{{ .HOST | default "localhost" }}"#)?;
//! assert_eq!(out, "ADA@localhost");
//! # Ok::<(), layered_config::template::RenderError>(())
//! ```

mod eval;
mod lexer;

use thiserror::Error;
use tracing::debug;

use crate::EnvSnapshot;
use crate::error::{ConfigError, ConfigResult};
use crate::value::{Mapping, Value};

/// A template failed to parse or execute.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct RenderError {
    message: String,
}

impl RenderError {
    /// Create an error with `message`.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The diagnostic text.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Expands template text.
pub trait Render {
    /// Render `input` to its final text.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] when the template is malformed or a function
    /// fails.
    fn render(&self, input: &str) -> Result<String, RenderError>;
}

impl<F> Render for F
where
    F: Fn(&str) -> Result<String, RenderError>,
{
    fn render(&self, input: &str) -> Result<String, RenderError> {
        self(input)
    }
}

/// The default [`Render`] implementation.
#[derive(Clone, Debug, Default)]
pub struct TemplateRenderer {
    env: EnvSnapshot,
}

impl TemplateRenderer {
    /// Resolve `.NAME` and `env` lookups against `env`.
    #[must_use]
    pub const fn new(env: EnvSnapshot) -> Self {
        Self { env }
    }
}

impl Render for TemplateRenderer {
    fn render(&self, input: &str) -> Result<String, RenderError> {
        let mut out = String::with_capacity(input.len());
        for segment in lexer::segments(input)? {
            match segment {
                lexer::Segment::Text(text) => out.push_str(&text),
                lexer::Segment::Action(tokens) => {
                    out.push_str(&eval::evaluate(&tokens, &self.env)?.to_string());
                }
            }
        }
        Ok(out)
    }
}

/// Whether `text` looks like it carries a template action.
#[must_use]
pub fn is_template(text: &str) -> bool {
    text.contains("{{") && text.contains("}}")
}

/// Render every templated string in `root` in place.
///
/// # Errors
///
/// Returns [`ConfigError::Render`] naming the dotted path (with `[i]` for
/// sequence indices) of the first value that fails.
pub fn render_tree(root: &mut Mapping, renderer: &dyn Render) -> ConfigResult<()> {
    for (key, value) in root.iter_mut() {
        render_value(value, key, renderer)?;
    }
    Ok(())
}

fn render_value(value: &mut Value, path: &str, renderer: &dyn Render) -> ConfigResult<()> {
    match value {
        Value::String(text) if is_template(text) => {
            let rendered = renderer
                .render(text)
                .map_err(|source| ConfigError::Render {
                    path: path.to_owned(),
                    source,
                })?;
            debug!(path, "rendered template");
            *text = rendered;
        }
        Value::Mapping(children) => {
            for (key, child) in children.iter_mut() {
                render_value(child, &format!("{path}.{key}"), renderer)?;
            }
        }
        Value::Sequence(items) => {
            for (index, item) in items.iter_mut().enumerate() {
                render_value(item, &format!("{path}[{index}]"), renderer)?;
            }
        }
        _ => {}
    }
    Ok(())
}
