//! Declarative rules evaluated against a resolved [`Config`].
//!
//! Every rule runs; violations are collected rather than short-circuited.
//! Only [`required`] treats an absent key as a failure. Range, membership
//! and pattern rules pass when the key is absent so optional settings are
//! checked only when supplied.

use std::fmt;

use regex_lite::Regex;

use crate::Config;
use crate::coerce::{to_float, to_text};
use crate::value::Value;

/// A failed rule.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Violation {
    /// Dotted path the rule inspected.
    pub key: String,
    /// Description of the failure.
    pub message: String,
}

impl Violation {
    /// Create a violation for `key`.
    #[must_use]
    pub fn new(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.key, self.message)
    }
}

/// Every violation reported by one validation pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationErrors {
    violations: Vec<Violation>,
}

impl ValidationErrors {
    /// The collected violations in rule order.
    #[must_use]
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Consume the error, returning the violations.
    #[must_use]
    pub fn into_violations(self) -> Vec<Violation> {
        self.violations
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("validation failed")?;
        for violation in &self.violations {
            write!(f, "\n  - {violation}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// A predicate over a configuration.
pub trait Rule {
    /// Check `config`, describing the failure when the rule does not hold.
    ///
    /// # Errors
    ///
    /// Returns the [`Violation`] this rule detected.
    fn check(&self, config: &Config) -> Result<(), Violation>;
}

impl<F> Rule for F
where
    F: Fn(&Config) -> Result<(), Violation>,
{
    fn check(&self, config: &Config) -> Result<(), Violation> {
        self(config)
    }
}

/// Run `rules` against `config`, collecting every violation.
#[must_use]
pub fn collect_violations(config: &Config, rules: &[&dyn Rule]) -> Vec<Violation> {
    rules
        .iter()
        .filter_map(|rule| rule.check(config).err())
        .collect()
}

/// Run `rules` against `config`.
///
/// # Errors
///
/// Returns [`ValidationErrors`] holding every violation when any rule fails.
pub fn validate(config: &Config, rules: &[&dyn Rule]) -> Result<(), ValidationErrors> {
    let violations = collect_violations(config, rules);
    if violations.is_empty() {
        Ok(())
    } else {
        Err(ValidationErrors { violations })
    }
}

/// See [`required`].
#[derive(Clone, Debug)]
pub struct Required {
    key: String,
}

/// The key must be present. A present null value satisfies the rule.
#[must_use]
pub fn required(key: impl Into<String>) -> Required {
    Required { key: key.into() }
}

impl Rule for Required {
    fn check(&self, config: &Config) -> Result<(), Violation> {
        if config.has(&self.key) {
            Ok(())
        } else {
            Err(Violation::new(&self.key, "is required"))
        }
    }
}

/// See [`in_range`].
#[derive(Clone, Debug)]
pub struct InRange {
    key: String,
    min: f64,
    max: f64,
}

/// When present, the value must be numeric and within `[min, max]`.
#[must_use]
pub fn in_range(key: impl Into<String>, min: f64, max: f64) -> InRange {
    InRange {
        key: key.into(),
        min,
        max,
    }
}

impl Rule for InRange {
    fn check(&self, config: &Config) -> Result<(), Violation> {
        let Some(value) = config.get(&self.key) else {
            return Ok(());
        };
        let Ok(number) = to_float::<f64>(value) else {
            return Err(Violation::new(
                &self.key,
                format!("value {value} is not a number"),
            ));
        };
        if (self.min..=self.max).contains(&number) {
            Ok(())
        } else {
            Err(Violation::new(
                &self.key,
                format!("value {value} out of range [{}, {}]", self.min, self.max),
            ))
        }
    }
}

/// See [`one_of`].
#[derive(Clone, Debug)]
pub struct OneOf {
    key: String,
    allowed: Vec<String>,
}

/// When present, the value's text must equal one of `allowed`.
#[must_use]
pub fn one_of<I, S>(key: impl Into<String>, allowed: I) -> OneOf
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    OneOf {
        key: key.into(),
        allowed: allowed.into_iter().map(Into::into).collect(),
    }
}

impl Rule for OneOf {
    fn check(&self, config: &Config) -> Result<(), Violation> {
        let Some(value) = config.get(&self.key) else {
            return Ok(());
        };
        let text = to_text(value);
        if self.allowed.iter().any(|candidate| *candidate == text) {
            Ok(())
        } else {
            Err(Violation::new(
                &self.key,
                format!("value {text:?} not in [{}]", self.allowed.join(", ")),
            ))
        }
    }
}

/// See [`matches`].
#[derive(Clone, Debug)]
pub struct Matches {
    key: String,
    pattern: String,
    compiled: Result<Regex, String>,
}

/// When present, the value's text must match the regular expression
/// `pattern`. A malformed pattern is itself reported as a violation.
#[must_use]
pub fn matches(key: impl Into<String>, pattern: impl Into<String>) -> Matches {
    let pattern = pattern.into();
    let compiled = Regex::new(&pattern).map_err(|e| e.to_string());
    Matches {
        key: key.into(),
        pattern,
        compiled,
    }
}

impl Rule for Matches {
    fn check(&self, config: &Config) -> Result<(), Violation> {
        let Some(value) = config.get(&self.key) else {
            return Ok(());
        };
        let regex = self.compiled.as_ref().map_err(|reason| {
            Violation::new(
                &self.key,
                format!("invalid pattern {:?}: {reason}", self.pattern),
            )
        })?;
        let text = to_text(value);
        if regex.is_match(&text) {
            Ok(())
        } else {
            Err(Violation::new(
                &self.key,
                format!("value {text:?} does not match pattern {:?}", self.pattern),
            ))
        }
    }
}

/// See [`custom`].
pub struct Custom<F> {
    key: String,
    predicate: F,
}

impl<F> fmt::Debug for Custom<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Custom").field("key", &self.key).finish_non_exhaustive()
    }
}

/// Apply `predicate` to the raw value at `key` (`None` when absent). An
/// `Err` message becomes the violation.
#[must_use]
pub fn custom<F>(key: impl Into<String>, predicate: F) -> Custom<F>
where
    F: Fn(Option<&Value>) -> Result<(), String>,
{
    Custom {
        key: key.into(),
        predicate,
    }
}

impl<F> Rule for Custom<F>
where
    F: Fn(Option<&Value>) -> Result<(), String>,
{
    fn check(&self, config: &Config) -> Result<(), Violation> {
        (self.predicate)(config.get(&self.key)).map_err(|message| Violation::new(&self.key, message))
    }
}
