use std::collections::HashMap;

use serde::Serialize;

use crate::error::FieldReport;

/// Failure messages grouped by field name, useful for form rendering or
/// serializing to a client.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FlatReport {
    pub field_errors: HashMap<String, Vec<String>>,
}

impl FlatReport {
    pub fn is_valid(&self) -> bool {
        self.field_errors.is_empty()
    }
}

/// Flatten named field reports. Valid fields are omitted.
///
/// # Example
/// ```
/// use textvld::config::PrimaryFailure;
/// use textvld::error::{FieldReport, ValidationFailure};
/// use textvld::format::flatten_reports;
/// use textvld::rule::Rule;
///
/// let name = FieldReport::new(vec![ValidationFailure::bare(Rule::Required)], PrimaryFailure::Last);
/// let email = FieldReport::valid();
/// let flat = flatten_reports([("name", &name), ("email", &email)]);
/// assert_eq!(flat.field_errors["name"], vec!["Validation failed: required"]);
/// assert!(!flat.field_errors.contains_key("email"));
/// ```
pub fn flatten_reports<'a, I>(reports: I) -> FlatReport
where
    I: IntoIterator<Item = (&'a str, &'a FieldReport)>,
{
    let mut field_errors: HashMap<String, Vec<String>> = HashMap::new();
    for (name, report) in reports {
        if report.is_valid() {
            continue;
        }
        field_errors
            .entry(name.to_string())
            .or_default()
            .extend(report.failures().iter().map(|f| f.to_string()));
    }
    FlatReport { field_errors }
}

/// Format a report into a human-readable string.
///
/// # Example output
/// ```text
/// ✖ This field is required
///   → rule required
/// ✖ Use at most 5 characters
///   → rule maxLength(5)
/// ```
pub fn prettify_report(report: &FieldReport) -> String {
    let mut lines = Vec::new();
    for failure in report.failures() {
        lines.push(format!("✖ {}", failure));
        lines.push(format!("  → rule {}", failure.rule));
    }
    lines.join("\n")
}
