//! Environment variable loader.

use tracing::debug;

use super::{LoadContext, Loader};
use crate::error::ConfigResult;
use crate::path::set_nested;
use crate::value::{Mapping, Value};

/// Loads variables that start with a prefix.
///
/// The prefix (matched case-sensitively) is stripped, the remainder is
/// lower-cased and `__` separates nesting levels, so with prefix `APP_` the
/// variable `APP_DB__HOST` becomes `db.host`.
#[derive(Clone, Debug)]
pub struct EnvLoader {
    prefix: String,
    auto_type_parse: bool,
}

impl EnvLoader {
    /// Select variables starting with `prefix`.
    #[must_use]
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            auto_type_parse: false,
        }
    }

    /// Store `true`/`false`, integers and floats as typed values instead of
    /// strings.
    #[must_use]
    pub const fn auto_type_parse(mut self) -> Self {
        self.auto_type_parse = true;
        self
    }

    fn convert(&self, raw: &str) -> Value {
        if self.auto_type_parse {
            parse_scalar(raw)
        } else {
            Value::from(raw)
        }
    }
}

fn parse_scalar(raw: &str) -> Value {
    if raw.eq_ignore_ascii_case("true") {
        return Value::Bool(true);
    }
    if raw.eq_ignore_ascii_case("false") {
        return Value::Bool(false);
    }
    if let Ok(i) = raw.parse::<i64>() {
        return Value::Integer(i);
    }
    match raw.parse::<f64>() {
        Ok(f) if f.is_finite() => Value::Float(f),
        _ => Value::from(raw),
    }
}

impl Loader for EnvLoader {
    fn name(&self) -> String {
        format!("env:{}", self.prefix)
    }

    fn load(&self, ctx: &LoadContext<'_>) -> ConfigResult<Mapping> {
        let mut out = Mapping::new();
        for (name, raw) in ctx.env().iter() {
            let Some(rest) = name.strip_prefix(self.prefix.as_str()) else {
                continue;
            };
            if rest.is_empty() {
                continue;
            }
            let path = rest.to_lowercase().replace("__", ".");
            set_nested(&mut out, &path, self.convert(raw));
        }
        debug!(prefix = %self.prefix, keys = out.len(), "loaded environment variables");
        Ok(out)
    }
}
