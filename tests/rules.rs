use textvld::prelude::*;

fn passes(rule: Rule, text: Option<&str>) -> bool {
    CompiledRule::new(rule).unwrap().passes(text)
}

// -----------------------------------------------------------------------
// Required
// -----------------------------------------------------------------------

#[test]
fn required_fails_for_absent_and_empty() {
    assert!(!passes(Rule::Required, None));
    assert!(!passes(Rule::Required, Some("")));
}

#[test]
fn required_passes_for_whitespace() {
    assert!(passes(Rule::Required, Some(" ")));
    assert!(passes(Rule::Required, Some("\t  ")));
    assert!(passes(Rule::Required, Some("x")));
}

// -----------------------------------------------------------------------
// MaxLength
// -----------------------------------------------------------------------

#[test]
fn max_length_boundaries() {
    for len in 0..=5 {
        assert!(passes(Rule::MaxLength(5), Some("a".repeat(len).as_str())), "len {}", len);
    }
    assert!(!passes(Rule::MaxLength(5), Some("abcdef")));
    assert!(!passes(Rule::MaxLength(5), Some("a".repeat(40).as_str())));
}

#[test]
fn max_length_absent_text_counts_as_empty() {
    assert!(passes(Rule::MaxLength(0), None));
    assert!(passes(Rule::MaxLength(5), None));
}

#[test]
fn max_length_zero_only_accepts_empty() {
    assert!(passes(Rule::MaxLength(0), Some("")));
    assert!(!passes(Rule::MaxLength(0), Some("a")));
}

// -----------------------------------------------------------------------
// Email
// -----------------------------------------------------------------------

#[test]
fn email_samples() {
    assert!(passes(Rule::Email, Some("a@b.co")));
    assert!(passes(Rule::Email, Some("first.last+tag@sub.example.com")));
    assert!(!passes(Rule::Email, Some("a@b")));
    assert!(!passes(Rule::Email, Some("a@@b.com")));
    assert!(!passes(Rule::Email, Some("not-an-email")));
    assert!(!passes(Rule::Email, Some("")));
    assert!(!passes(Rule::Email, None));
}

#[test]
fn email_is_anchored() {
    assert!(!passes(Rule::Email, Some(" a@b.co")));
    assert!(!passes(Rule::Email, Some("a@b.co ")));
    assert!(!passes(Rule::Email, Some("a@b.co\n")));
}

#[test]
fn email_tld_length() {
    assert!(!passes(Rule::Email, Some("a@b.c")));
    assert!(passes(Rule::Email, Some(format!("a@b.{}", "x".repeat(64)).as_str())));
    assert!(!passes(Rule::Email, Some(format!("a@b.{}", "x".repeat(65)).as_str())));
}

// -----------------------------------------------------------------------
// CustomPattern
// -----------------------------------------------------------------------

#[test]
fn custom_pattern_only_letters() {
    let rule = textvld::pattern(r"^\D+$", "onlyLetters");
    assert!(passes(rule.clone(), Some("abc")));
    assert!(!passes(rule.clone(), Some("abc1")));
    assert_eq!(rule.key(), "onlyLetters");
}

#[test]
fn custom_pattern_perl_classes_are_ascii_only() {
    let rule = textvld::pattern(r"^\D+$", "onlyLetters");
    assert!(passes(rule.clone(), Some("abc\u{0663}")));
    assert!(!passes(rule, Some("abc3")));

    let explicit = textvld::pattern(r"[^0-9\u{0660}-\u{0669}]+", "onlyLetters");
    assert!(!passes(explicit, Some("abc\u{0663}")));
}

#[test]
fn custom_pattern_is_case_sensitive() {
    let rule = textvld::pattern("[a-z]+", "lower");
    assert!(passes(rule.clone(), Some("abc")));
    assert!(!passes(rule, Some("ABC")));
}

#[test]
fn custom_pattern_absent_text_fails() {
    assert!(!passes(textvld::pattern(".*", "any"), None));
    assert!(passes(textvld::pattern(".*", "any"), Some("")));
}

#[test]
fn malformed_pattern_is_config_error() {
    let err = CompiledRule::new(textvld::pattern("([a-z]", "broken")).unwrap_err();
    match &err {
        ConfigError::InvalidPattern { key, pattern, .. } => {
            assert_eq!(key, "broken");
            assert_eq!(pattern, "([a-z]");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(err.to_string().contains("broken"));
}

// -----------------------------------------------------------------------
// Keys, params, serde
// -----------------------------------------------------------------------

#[test]
fn message_keys() {
    assert_eq!(Rule::Email.key(), "email");
    assert_eq!(Rule::Required.key(), "required");
    assert_eq!(Rule::MaxLength(3).key(), "maxCharacters");
    assert_eq!(textvld::pattern("x", "custom").key(), "custom");
}

#[test]
fn params() {
    assert!(Rule::Email.params().is_empty());
    assert_eq!(Rule::MaxLength(7).params(), vec![("limit", "7".to_string())]);
    assert_eq!(
        textvld::pattern("x+", "k").params(),
        vec![("pattern", "x+".to_string())]
    );
}

#[test]
fn rules_serialize_camel_case() {
    let rules = vec![
        Rule::Email,
        Rule::MaxLength(5),
        textvld::pattern("a", "onlyA"),
    ];
    let json = serde_json::to_value(&rules).unwrap();
    assert_eq!(
        json,
        serde_json::json!([
            "email",
            {"maxLength": 5},
            {"customPattern": {"pattern": "a", "key": "onlyA"}}
        ])
    );
    let back: Vec<Rule> = serde_json::from_value(json).unwrap();
    assert_eq!(back, rules);
}

// -----------------------------------------------------------------------
// Evaluation
// -----------------------------------------------------------------------

#[test]
fn evaluate_is_deterministic() {
    let catalog = MessageCatalog::from_json(r#"{"en-US": {"email": {"message": "Bad email"}}}"#);
    let rule = CompiledRule::new(Rule::Email).unwrap();
    let a = evaluate(&rule, Some("nope"), &catalog, "en-US");
    let b = evaluate(&rule, Some("nope"), &catalog, "en-US");
    assert_eq!(a, b);
    assert_eq!(a.unwrap().key(), "email");
}

#[test]
fn custom_failure_uses_caller_key() {
    let catalog = MessageCatalog::from_json(
        r#"{"en-US": {"onlyLetters": {"message": "Letters only", "shortMessage": "Letters"}}}"#,
    );
    let rule = CompiledRule::new(textvld::pattern(r"^\D+$", "onlyLetters")).unwrap();
    let failure = evaluate(&rule, Some("abc1"), &catalog, "en-US").unwrap();
    assert_eq!(failure.key(), "onlyLetters");
    assert_eq!(failure.message.as_deref(), Some("Letters only"));
    assert_eq!(failure.short_message.as_deref(), Some("Letters"));
}

#[test]
fn missing_entry_yields_empty_messages() {
    let catalog = MessageCatalog::from_json(r#"{"en-US": {}}"#);
    let rule = CompiledRule::new(Rule::Required).unwrap();
    let failure = evaluate(&rule, None, &catalog, "en-US").unwrap();
    assert_eq!(failure.message, None);
    assert_eq!(failure.short_message, None);
    assert_eq!(failure.rule, Rule::Required);
}
