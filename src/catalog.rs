//! Localized message catalog.
//!
//! Messages live in a nested mapping `locale → key → entry`, supplied by a
//! [`MessageSource`]. The catalog loads it lazily on first lookup and serves
//! no messages at all if the source fails.
//!
//! # Example
//!
//! ```
//! use textvld::catalog::MessageCatalog;
//!
//! let catalog = MessageCatalog::from_json(r#"{
//!     "en-US": { "required": { "message": "Required", "shortMessage": "Req." } },
//!     "pt-BR": { "required": { "message": "Obrigatório" } }
//! }"#);
//!
//! assert_eq!(catalog.lookup("en-US", "required").unwrap().short_message.as_deref(), Some("Req."));
//! assert_eq!(catalog.lookup("pt-BR", "required").unwrap().message.as_deref(), Some("Obrigatório"));
//! assert!(catalog.lookup("pt-BR", "email").is_none());
//! ```

use std::cell::OnceCell;
use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// Message pair for one `(locale, key)`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageEntry {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub short_message: Option<String>,
}

impl MessageEntry {
    pub fn new(message: impl Into<String>, short_message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            short_message: Some(short_message.into()),
        }
    }
}

/// Messages of a single locale, by key.
pub type LocaleMessages = HashMap<String, MessageEntry>;

/// Messages of every locale.
pub type CatalogData = HashMap<String, LocaleMessages>;

/// Provider of catalog data.
///
/// Where the data comes from (a bundled file, an embedded string, a remote
/// config) is up to the embedding application.
pub trait MessageSource {
    fn load(&self) -> Result<CatalogData, CatalogError>;
}

impl MessageSource for CatalogData {
    fn load(&self) -> Result<CatalogData, CatalogError> {
        Ok(self.clone())
    }
}

/// [`MessageSource`] parsing serialized JSON text.
pub struct JsonSource {
    json: String,
}

impl JsonSource {
    pub fn new(json: impl Into<String>) -> Self {
        Self { json: json.into() }
    }
}

impl MessageSource for JsonSource {
    fn load(&self) -> Result<CatalogData, CatalogError> {
        Ok(serde_json::from_str(&self.json)?)
    }
}

/// [`MessageSource`] that delegates to a closure.
///
/// # Example
/// ```
/// use textvld::catalog::{FnSource, MessageCatalog};
/// use textvld::error::CatalogError;
///
/// let catalog = MessageCatalog::new(FnSource::new(|| {
///     Err(CatalogError::Unavailable("Validations.json not bundled".into()))
/// }));
/// assert!(catalog.lookup("en-US", "email").is_none());
/// ```
pub struct FnSource<F: Fn() -> Result<CatalogData, CatalogError>> {
    f: F,
}

impl<F: Fn() -> Result<CatalogData, CatalogError>> FnSource<F> {
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F: Fn() -> Result<CatalogData, CatalogError>> MessageSource for FnSource<F> {
    fn load(&self) -> Result<CatalogData, CatalogError> {
        (self.f)()
    }
}

/// Lazily loaded, read-only view over a [`MessageSource`].
pub struct MessageCatalog {
    source: Box<dyn MessageSource>,
    data: OnceCell<CatalogData>,
}

impl MessageCatalog {
    pub fn new(source: impl MessageSource + 'static) -> Self {
        Self {
            source: Box::new(source),
            data: OnceCell::new(),
        }
    }

    /// Catalog without any messages. Failures carry no text.
    pub fn empty() -> Self {
        Self::new(CatalogData::new())
    }

    pub fn from_json(json: impl Into<String>) -> Self {
        Self::new(JsonSource::new(json))
    }

    /// Entry for `key` in `locale`, if any.
    pub fn lookup(&self, locale: &str, key: &str) -> Option<&MessageEntry> {
        self.data().get(locale)?.get(key)
    }

    /// Whether the source has been loaded (successfully or not).
    pub fn is_loaded(&self) -> bool {
        self.data.get().is_some()
    }

    /// Drop the cached data. The next lookup asks the source again.
    pub fn reload(&mut self) {
        self.data = OnceCell::new();
    }

    /// Locales with at least one entry, in no particular order.
    pub fn locales(&self) -> impl Iterator<Item = &str> {
        self.data().keys().map(String::as_str)
    }

    fn data(&self) -> &CatalogData {
        self.data.get_or_init(|| match self.source.load() {
            Ok(data) => {
                tracing::debug!(locales = data.len(), "Loaded message catalog");
                data
            }
            Err(error) => {
                tracing::warn!(%error, "Message catalog unavailable, messages disabled");
                CatalogData::new()
            }
        })
    }
}

impl Default for MessageCatalog {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Debug for MessageCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MessageCatalog")
            .field("loaded", &self.is_loaded())
            .finish()
    }
}

/// Replace `{name}` placeholders in `template` with values from `params`.
pub(crate) fn apply_params(template: &str, params: &[(&str, String)]) -> String {
    let mut result = template.to_string();
    for (key, value) in params {
        result = result.replace(&format!("{{{}}}", key), value);
    }
    result
}

// ---------------------------------------------------------------------------
// Built-in messages
// ---------------------------------------------------------------------------

/// Built-in `en-US` and `pt-BR` messages for the built-in rule keys.
///
/// A starting point for applications that do not ship their own catalog:
///
/// ```
/// use textvld::catalog::{defaults, MessageCatalog};
///
/// let catalog = MessageCatalog::new(defaults());
/// assert!(catalog.lookup("en-US", "maxCharacters").is_some());
/// ```
pub fn defaults() -> CatalogData {
    let mut data = CatalogData::new();
    data.insert("en-US".into(), english());
    data.insert("pt-BR".into(), portuguese());
    data
}

fn english() -> LocaleMessages {
    let mut m = LocaleMessages::new();
    m.insert(
        "email".into(),
        MessageEntry::new("Please enter a valid email address", "Invalid email"),
    );
    m.insert(
        "required".into(),
        MessageEntry::new("This field is required", "Required"),
    );
    m.insert(
        "maxCharacters".into(),
        MessageEntry::new("Use at most {limit} characters", "Too long"),
    );
    m
}

fn portuguese() -> LocaleMessages {
    let mut m = LocaleMessages::new();
    m.insert(
        "email".into(),
        MessageEntry::new("Informe um e-mail válido", "E-mail inválido"),
    );
    m.insert(
        "required".into(),
        MessageEntry::new("Este campo é obrigatório", "Obrigatório"),
    );
    m.insert(
        "maxCharacters".into(),
        MessageEntry::new("Use no máximo {limit} caracteres", "Muito longo"),
    );
    m
}
