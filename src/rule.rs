use std::fmt;
use std::sync::OnceLock;

use regex_lite::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Catalog key of [`Rule::Email`].
pub const EMAIL_KEY: &str = "email";
/// Catalog key of [`Rule::Required`].
pub const REQUIRED_KEY: &str = "required";
/// Catalog key of [`Rule::MaxLength`].
pub const MAX_LENGTH_KEY: &str = "maxCharacters";

const EMAIL_PATTERN: &str = r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,64}";

/// A single validation check attached to a field.
///
/// Rules carry data only. Checking and key lookup dispatch on the variant,
/// which keeps rules comparable and serializable:
///
/// ```
/// use textvld::rule::Rule;
///
/// let rules: Vec<Rule> = serde_json::from_str(
///     r#"["required", {"maxLength": 5}, {"customPattern": {"pattern": "[a-z]+", "key": "lower"}}]"#,
/// ).unwrap();
/// assert_eq!(rules[1], Rule::MaxLength(5));
/// assert_eq!(rules[2].key(), "lower");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Rule {
    Email,
    Required,
    MaxLength(usize),
    CustomPattern { pattern: String, key: String },
}

impl Rule {
    /// Stable message key used for catalog lookup.
    pub fn key(&self) -> &str {
        match self {
            Rule::Email => EMAIL_KEY,
            Rule::Required => REQUIRED_KEY,
            Rule::MaxLength(_) => MAX_LENGTH_KEY,
            Rule::CustomPattern { key, .. } => key,
        }
    }

    /// Parameters available to message templates as `{name}` placeholders.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        match self {
            Rule::MaxLength(limit) => vec![("limit", limit.to_string())],
            Rule::CustomPattern { pattern, .. } => vec![("pattern", pattern.clone())],
            Rule::Email | Rule::Required => vec![],
        }
    }

    /// Check `text` against this rule, compiling a custom pattern on the fly.
    ///
    /// Prefer [`CompiledRule`] when the same rule runs repeatedly.
    ///
    /// ```
    /// use textvld::rule::Rule;
    ///
    /// assert_eq!(Rule::Required.check(Some("x")).unwrap(), true);
    /// assert_eq!(Rule::MaxLength(2).check(Some("abc")).unwrap(), false);
    /// assert!(Rule::CustomPattern { pattern: "(".into(), key: "k".into() }.check(None).is_err());
    /// ```
    pub fn check(&self, text: Option<&str>) -> Result<bool, ConfigError> {
        Ok(CompiledRule::new(self.clone())?.passes(text))
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::Email => write!(f, "email"),
            Rule::Required => write!(f, "required"),
            Rule::MaxLength(limit) => write!(f, "maxLength({})", limit),
            Rule::CustomPattern { pattern, key } => write!(f, "pattern({}: /{}/)", key, pattern),
        }
    }
}

// ---------------------------------------------------------------------------
// Predicates
// ---------------------------------------------------------------------------

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        Regex::new(&anchored(EMAIL_PATTERN)).expect("EMAIL_PATTERN: invalid regex pattern")
    })
}

/// Wrap a pattern so it must match the whole input.
fn anchored(pattern: &str) -> String {
    format!(r"(?s)^(?:{})$", pattern)
}

/// Whole-string email match. Absent text never matches.
pub fn is_email(text: Option<&str>) -> bool {
    text.map_or(false, |s| email_regex().is_match(s))
}

/// Non-empty check. Whitespace counts as content.
pub fn is_present(text: Option<&str>) -> bool {
    text.map_or(false, |s| !s.is_empty())
}

/// Length check in Unicode scalar values. Absent text counts as empty.
pub fn is_within(text: Option<&str>, limit: usize) -> bool {
    text.unwrap_or("").chars().count() <= limit
}

// ---------------------------------------------------------------------------
// CompiledRule
// ---------------------------------------------------------------------------

/// A [`Rule`] with its custom pattern compiled, ready for repeated checks.
#[derive(Debug, Clone)]
pub struct CompiledRule {
    rule: Rule,
    matcher: Option<Regex>,
}

impl CompiledRule {
    /// Compile `rule`. Fails only for a malformed [`Rule::CustomPattern`].
    pub fn new(rule: Rule) -> Result<Self, ConfigError> {
        let matcher = match &rule {
            Rule::CustomPattern { pattern, key } => Some(
                Regex::new(&anchored(pattern)).map_err(|source| ConfigError::InvalidPattern {
                    key: key.clone(),
                    pattern: pattern.clone(),
                    source,
                })?,
            ),
            _ => None,
        };
        Ok(Self { rule, matcher })
    }

    pub fn rule(&self) -> &Rule {
        &self.rule
    }

    /// Whether `text` satisfies the rule.
    pub fn passes(&self, text: Option<&str>) -> bool {
        match (&self.rule, &self.matcher) {
            (Rule::Email, _) => is_email(text),
            (Rule::Required, _) => is_present(text),
            (Rule::MaxLength(limit), _) => is_within(text, *limit),
            (Rule::CustomPattern { .. }, Some(re)) => text.map_or(false, |s| re.is_match(s)),
            // `new` always compiles custom patterns
            (Rule::CustomPattern { .. }, None) => false,
        }
    }
}

impl PartialEq for CompiledRule {
    fn eq(&self, other: &Self) -> bool {
        self.rule == other.rule
    }
}

impl TryFrom<Rule> for CompiledRule {
    type Error = ConfigError;

    fn try_from(rule: Rule) -> Result<Self, Self::Error> {
        CompiledRule::new(rule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anchoring_rejects_partial_matches() {
        let rule = CompiledRule::new(Rule::CustomPattern {
            pattern: "[0-9]+".into(),
            key: "digits".into(),
        })
        .unwrap();
        assert!(rule.passes(Some("123")));
        assert!(!rule.passes(Some("a123")));
        assert!(!rule.passes(Some("123a")));
    }

    #[test]
    fn alternation_is_grouped_by_anchors() {
        let rule = CompiledRule::new(Rule::CustomPattern {
            pattern: "a|b".into(),
            key: "ab".into(),
        })
        .unwrap();
        assert!(rule.passes(Some("a")));
        assert!(!rule.passes(Some("ab")));
    }

    #[test]
    fn max_length_counts_chars_not_bytes() {
        assert!(is_within(Some("ção"), 3));
        assert!(!is_within(Some("ções"), 3));
    }

    #[test]
    fn required_accepts_newline() {
        assert!(is_present(Some("\n")));
    }
}
