//! Validator configuration.
//!
//! [`ValidatorOptions`] can be built in code or loaded from JSON:
//!
//! ```
//! use textvld::config::{AggregateMode, PrimaryFailure, ValidatorOptions};
//!
//! let opts = ValidatorOptions::from_json(
//!     r#"{"locale": "pt-BR", "primaryFailure": "first", "aggregateMode": "scanAll"}"#,
//! ).unwrap();
//! assert_eq!(opts.locale, "pt-BR");
//! assert_eq!(opts.primary_failure, PrimaryFailure::First);
//! assert_eq!(opts.aggregate_mode, AggregateMode::ScanAll);
//! assert_eq!(opts.fallback_locale, None);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Locale used when none is configured.
pub const DEFAULT_LOCALE: &str = "en-US";

/// Which failure of a field is surfaced for single-error display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PrimaryFailure {
    First,
    /// Last failing rule in declared order.
    #[default]
    Last,
}

/// How form-level validity is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AggregateMode {
    /// Stop at the first binding with a failure. Later fields keep their state.
    #[default]
    ShortCircuit,
    /// Evaluate every binding and update every field's state.
    ScanAll,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ValidatorOptions {
    pub locale: String,
    /// Consulted when the active locale has no entry for a key.
    pub fallback_locale: Option<String>,
    pub primary_failure: PrimaryFailure,
    pub aggregate_mode: AggregateMode,
}

impl ValidatorOptions {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl Default for ValidatorOptions {
    fn default() -> Self {
        Self {
            locale: DEFAULT_LOCALE.to_string(),
            fallback_locale: None,
            primary_failure: PrimaryFailure::default(),
            aggregate_mode: AggregateMode::default(),
        }
    }
}
