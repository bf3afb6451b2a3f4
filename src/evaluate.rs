//! Rule evaluation and message resolution.

use crate::catalog::{apply_params, MessageCatalog, MessageEntry};
use crate::error::ValidationFailure;
use crate::rule::{CompiledRule, Rule};

/// Check `text` against `rule`, resolving messages for `locale` on failure.
///
/// Returns `None` when the rule passes. A missing catalog entry yields a
/// failure without messages.
///
/// # Example
/// ```
/// use textvld::catalog::MessageCatalog;
/// use textvld::evaluate::evaluate;
/// use textvld::rule::{CompiledRule, Rule};
///
/// let catalog = MessageCatalog::from_json(r#"{"en-US": {"required": {"message": "Required"}}}"#);
/// let rule = CompiledRule::new(Rule::Required).unwrap();
///
/// let failure = evaluate(&rule, Some(""), &catalog, "en-US").unwrap();
/// assert_eq!(failure.message.as_deref(), Some("Required"));
/// assert!(evaluate(&rule, Some("x"), &catalog, "en-US").is_none());
/// ```
pub fn evaluate(
    rule: &CompiledRule,
    text: Option<&str>,
    catalog: &MessageCatalog,
    locale: &str,
) -> Option<ValidationFailure> {
    evaluate_with_fallback(rule, text, catalog, locale, None)
}

/// Like [`evaluate`], consulting `fallback` when `locale` has no entry.
pub fn evaluate_with_fallback(
    rule: &CompiledRule,
    text: Option<&str>,
    catalog: &MessageCatalog,
    locale: &str,
    fallback: Option<&str>,
) -> Option<ValidationFailure> {
    if rule.passes(text) {
        return None;
    }
    tracing::trace!(rule = %rule.rule(), locale, "Rule failed");
    Some(resolve(rule.rule(), catalog, locale, fallback))
}

/// Run every rule in declared order, collecting all failures.
pub fn evaluate_all<'a, I>(
    rules: I,
    text: Option<&str>,
    catalog: &MessageCatalog,
    locale: &str,
    fallback: Option<&str>,
) -> Vec<ValidationFailure>
where
    I: IntoIterator<Item = &'a CompiledRule>,
{
    rules
        .into_iter()
        .filter_map(|rule| evaluate_with_fallback(rule, text, catalog, locale, fallback))
        .collect()
}

/// Build the failure for `rule` with messages looked up in `catalog`.
fn resolve(
    rule: &Rule,
    catalog: &MessageCatalog,
    locale: &str,
    fallback: Option<&str>,
) -> ValidationFailure {
    let entry = catalog
        .lookup(locale, rule.key())
        .or_else(|| fallback.and_then(|fb| catalog.lookup(fb, rule.key())));

    let Some(MessageEntry {
        message,
        short_message,
    }) = entry
    else {
        return ValidationFailure::bare(rule.clone());
    };

    let params = rule.params();
    let fill = |text: &Option<String>| text.as_deref().map(|t| apply_params(t, &params));
    ValidationFailure {
        message: fill(message),
        short_message: fill(short_message),
        rule: rule.clone(),
    }
}
