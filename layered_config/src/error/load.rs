//! Structured report for sources that could not be read.

use std::fmt;

use camino::Utf8PathBuf;

/// Why one candidate file was passed over.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadDetail {
    /// Candidate path as supplied to the loader.
    pub path: Utf8PathBuf,
    /// Reason the candidate was skipped.
    pub reason: String,
}

/// A loader found no usable source among its candidates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadError {
    /// Summary of the failure.
    pub message: String,
    /// One entry per candidate tried.
    pub details: Vec<LoadDetail>,
}

impl LoadError {
    /// Create an error with no candidate details.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            details: Vec::new(),
        }
    }

    /// Record a skipped candidate.
    #[must_use]
    pub fn with_detail(mut self, path: impl Into<Utf8PathBuf>, reason: impl Into<String>) -> Self {
        self.details.push(LoadDetail {
            path: path.into(),
            reason: reason.into(),
        });
        self
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)?;
        for detail in &self.details {
            write!(f, "\n  - {}: {}", detail.path, detail.reason)?;
        }
        Ok(())
    }
}

impl std::error::Error for LoadError {}
