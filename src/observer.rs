use std::rc::Rc;

use crate::error::{FieldReport, ValidationFailure};

/// Receiver of validation results, typically the UI glue that shows messages
/// and toggles a submit button.
///
/// The validator holds observers weakly; an observer dropped by its owner is
/// simply no longer notified.
pub trait ValidationObserver<F: ?Sized> {
    /// Result of validating `field`: its primary failure, or `None` if it passed.
    fn on_field_result(&self, field: &Rc<F>, failure: Option<&ValidationFailure>);

    /// Form-level validity after a field change or a full re-validation.
    fn on_aggregate_validity(&self, is_valid: bool);

    /// Full report of `field`. Forwards the primary failure by default;
    /// override to display every failure.
    fn on_field_report(&self, field: &Rc<F>, report: &FieldReport) {
        self.on_field_result(field, report.primary());
    }
}
