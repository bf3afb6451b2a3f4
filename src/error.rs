use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::config::PrimaryFailure;
use crate::rule::Rule;

/// A rule that was not satisfied, with its localized messages.
///
/// Failures are expected results, not errors: a field with no failures passed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationFailure {
    pub message: Option<String>,
    pub short_message: Option<String>,
    pub rule: Rule,
}

impl ValidationFailure {
    /// Failure for `rule` without any resolved messages.
    pub fn bare(rule: Rule) -> Self {
        Self {
            message: None,
            short_message: None,
            rule,
        }
    }

    /// Message key of the failed rule.
    pub fn key(&self) -> &str {
        self.rule.key()
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.message, &self.short_message) {
            (Some(msg), _) => write!(f, "{}", msg),
            (None, Some(short)) => write!(f, "{}", short),
            (None, None) => write!(f, "Validation failed: {}", self.rule.key()),
        }
    }
}

/// Every failure of one field in evaluation order, plus the one to surface.
///
/// # Example
/// ```
/// use textvld::error::{FieldReport, ValidationFailure};
/// use textvld::config::PrimaryFailure;
/// use textvld::rule::Rule;
///
/// let report = FieldReport::new(
///     vec![ValidationFailure::bare(Rule::Required), ValidationFailure::bare(Rule::Email)],
///     PrimaryFailure::Last,
/// );
/// assert_eq!(report.failures().len(), 2);
/// assert_eq!(report.primary().unwrap().rule, Rule::Email);
/// assert_eq!(report.first().unwrap().rule, Rule::Required);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldReport {
    failures: Vec<ValidationFailure>,
    primary: Option<usize>,
}

impl FieldReport {
    pub fn new(failures: Vec<ValidationFailure>, policy: PrimaryFailure) -> Self {
        let primary = match policy {
            _ if failures.is_empty() => None,
            PrimaryFailure::First => Some(0),
            PrimaryFailure::Last => Some(failures.len() - 1),
        };
        Self { failures, primary }
    }

    /// Report of a field that passed every rule.
    pub fn valid() -> Self {
        Self {
            failures: vec![],
            primary: None,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn failures(&self) -> &[ValidationFailure] {
        &self.failures
    }

    /// The failure chosen for single-error display.
    pub fn primary(&self) -> Option<&ValidationFailure> {
        self.primary.and_then(|i| self.failures.get(i))
    }

    pub fn first(&self) -> Option<&ValidationFailure> {
        self.failures.first()
    }

    pub fn last(&self) -> Option<&ValidationFailure> {
        self.failures.last()
    }

    pub fn into_failures(self) -> Vec<ValidationFailure> {
        self.failures
    }
}

/// Misconfiguration detected while setting up validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A custom pattern does not compile; no input could ever satisfy it.
    #[error("invalid pattern /{pattern}/ for rule `{key}`: {source}")]
    InvalidPattern {
        key: String,
        pattern: String,
        #[source]
        source: regex_lite::Error,
    },
    /// Validator options could not be deserialized.
    #[error("invalid validator options: {0}")]
    Options(#[from] serde_json::Error),
}

/// Failure to produce catalog data from a [`MessageSource`](crate::catalog::MessageSource).
///
/// Never crosses the evaluation contract: the catalog logs it and serves no messages.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("malformed message catalog: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("message catalog unavailable: {0}")]
    Unavailable(String),
}
