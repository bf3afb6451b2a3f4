//! # textvld — Rule-based validation for text fields
//!
//! `textvld` attaches ordered validation rules to input fields, runs them when
//! a field changes, and reports per-field and form-level validity to an
//! observer. Failure messages come from a localized catalog.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use textvld::prelude::*;
//!
//! let catalog = MessageCatalog::from_json(r#"{
//!     "en-US": { "required": { "message": "Required" } },
//!     "pt-BR": { "required": { "message": "Obrigatório" } }
//! }"#);
//!
//! let name = Rc::new(RefCell::new(String::new()));
//! let mut form = FormValidator::new(catalog);
//! form.register(&name, [textvld::required(), textvld::max_length(20)]).unwrap();
//!
//! let report = form.on_field_changed(&name).unwrap();
//! assert_eq!(report.primary().unwrap().message.as_deref(), Some("Required"));
//!
//! form.set_locale("pt-BR");
//! let report = form.on_field_changed(&name).unwrap();
//! assert_eq!(report.primary().unwrap().message.as_deref(), Some("Obrigatório"));
//! ```

pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;
pub mod evaluate;
pub mod format;
pub mod input;
pub mod observer;
pub mod registry;
pub mod rule;

// ---------------------------------------------------------------------------
// Convenience constructors
// ---------------------------------------------------------------------------

/// Rule: whole text must be an email address.
pub fn email() -> rule::Rule {
    rule::Rule::Email
}

/// Rule: text must be present and non-empty.
pub fn required() -> rule::Rule {
    rule::Rule::Required
}

/// Rule: text must have at most `limit` characters.
pub fn max_length(limit: usize) -> rule::Rule {
    rule::Rule::MaxLength(limit)
}

/// Rule: whole text must match `pattern`. Failures use `key` for messages.
///
/// Patterns use `regex-lite` syntax: `.` also matches newlines and the
/// Perl classes `\d`, `\w`, `\s` are ASCII-only, so `\D` accepts non-ASCII
/// digits such as `'\u{0663}'`. Spell out explicit ranges when that matters.
///
/// ```
/// let rule = textvld::pattern(r"\D+", "onlyLetters");
/// assert_eq!(rule.key(), "onlyLetters");
/// assert!(rule.check(Some("abc")).unwrap());
/// assert!(!rule.check(Some("abc1")).unwrap());
/// assert!(rule.check(Some("abc\u{0663}")).unwrap());
/// ```
pub fn pattern(pattern: impl Into<String>, key: impl Into<String>) -> rule::Rule {
    rule::Rule::CustomPattern {
        pattern: pattern.into(),
        key: key.into(),
    }
}

// ---------------------------------------------------------------------------
// Prelude
// ---------------------------------------------------------------------------

/// Common imports for working with `textvld`.
pub mod prelude {
    pub use crate::catalog::{
        CatalogData, FnSource, JsonSource, MessageCatalog, MessageEntry, MessageSource,
    };
    pub use crate::config::{AggregateMode, PrimaryFailure, ValidatorOptions};
    pub use crate::engine::FormValidator;
    pub use crate::error::{CatalogError, ConfigError, FieldReport, ValidationFailure};
    pub use crate::evaluate::evaluate;
    pub use crate::format::{flatten_reports, prettify_report};
    pub use crate::input::TextInput;
    pub use crate::observer::ValidationObserver;
    pub use crate::registry::FieldState;
    pub use crate::rule::{CompiledRule, Rule};
}
