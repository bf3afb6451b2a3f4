//! The form validator: registration, per-field and form-level validation.

use std::fmt;
use std::rc::{Rc, Weak};

use crate::catalog::MessageCatalog;
use crate::config::{AggregateMode, PrimaryFailure, ValidatorOptions};
use crate::error::{ConfigError, FieldReport, ValidationFailure};
use crate::evaluate::evaluate_all;
use crate::input::TextInput;
use crate::observer::ValidationObserver;
use crate::registry::{FieldBinding, FieldState, Registry};
use crate::rule::{CompiledRule, Rule};

/// Validates a set of text fields and reports results to an observer.
///
/// Fields are shared with their UI owner through `Rc`; the validator keeps
/// only weak references and identifies fields by pointer. Validation runs when
/// the owner calls [`on_field_changed`](Self::on_field_changed) or
/// [`revalidate_all`](Self::revalidate_all).
///
/// # Example
/// ```
/// use std::cell::RefCell;
/// use std::rc::Rc;
/// use textvld::prelude::*;
///
/// let name = Rc::new(RefCell::new(String::new()));
/// let email = Rc::new(RefCell::new(String::from("x@y.co")));
///
/// let mut form = FormValidator::new(MessageCatalog::from_json(
///     r#"{"en-US": {"required": {"message": "Required"}}}"#,
/// ));
/// form.register(&name, [Rule::Required]).unwrap();
/// form.register(&email, [Rule::Email]).unwrap();
/// assert!(!form.revalidate_all());
///
/// let report = form.on_field_changed(&name).unwrap();
/// assert_eq!(report.primary().unwrap().message.as_deref(), Some("Required"));
///
/// name.borrow_mut().push_str("Ana");
/// assert!(form.on_field_changed(&name).unwrap().is_valid());
/// assert!(form.revalidate_all());
/// ```
pub struct FormValidator<F: TextInput + ?Sized> {
    registry: Registry<F>,
    catalog: MessageCatalog,
    options: ValidatorOptions,
    observer: Option<Weak<dyn ValidationObserver<F>>>,
}

impl<F: TextInput + ?Sized> FormValidator<F> {
    pub fn new(catalog: MessageCatalog) -> Self {
        Self {
            registry: Registry::new(),
            catalog,
            options: ValidatorOptions::default(),
            observer: None,
        }
    }

    pub fn with_options(mut self, options: ValidatorOptions) -> Self {
        self.options = options;
        self
    }

    // -----------------------------------------------------------------------
    // Observer
    // -----------------------------------------------------------------------

    /// Notify `observer` without keeping it alive.
    pub fn observe<O>(&mut self, observer: &Rc<O>)
    where
        O: ValidationObserver<F> + 'static,
    {
        let weak: Weak<O> = Rc::downgrade(observer);
        self.observer = Some(weak);
    }

    pub fn set_observer(&mut self, observer: Weak<dyn ValidationObserver<F>>) {
        self.observer = Some(observer);
    }

    pub fn clear_observer(&mut self) {
        self.observer = None;
    }

    fn observer(&self) -> Option<Rc<dyn ValidationObserver<F>>> {
        let observer = self.observer.as_ref()?.upgrade();
        if observer.is_none() {
            tracing::debug!("Observer dropped, skipping notification");
        }
        observer
    }

    // -----------------------------------------------------------------------
    // Registration
    // -----------------------------------------------------------------------

    /// Bind `rules` to `field`, in order. Does not validate.
    ///
    /// Registering a field again replaces its rules and resets it to
    /// [`FieldState::Untouched`]. Malformed custom patterns are rejected here
    /// and leave any previous binding untouched.
    pub fn register<I>(&mut self, field: &Rc<F>, rules: I) -> Result<(), ConfigError>
    where
        I: IntoIterator<Item = Rule>,
    {
        let compiled = rules
            .into_iter()
            .map(CompiledRule::new)
            .collect::<Result<Vec<_>, _>>()?;
        let count = compiled.len();
        let replaced = self.registry.upsert(field, compiled);
        tracing::debug!(rules = count, replaced, "Registered field");
        Ok(())
    }

    /// Remove `field`'s binding. Returns whether it was registered.
    pub fn unregister(&mut self, field: &Rc<F>) -> bool {
        self.registry.remove(field)
    }

    pub fn is_registered(&self, field: &Rc<F>) -> bool {
        self.registry.find(field).is_some()
    }

    pub fn field_state(&self, field: &Rc<F>) -> Option<FieldState> {
        self.registry.find(field).map(FieldBinding::state)
    }

    /// Number of registered fields, including any whose owner dropped them
    /// since the last validation pass.
    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    /// Validate `field` after its value changed.
    ///
    /// Notifies the observer with the field's report, then recomputes
    /// form-level validity and notifies that too. Returns `None` without
    /// notifying if `field` is not registered.
    ///
    /// # Panics
    ///
    /// Panics if `field` is a `RefCell` that is mutably borrowed while
    /// its text is read. Release the borrow before validating.
    pub fn on_field_changed(&mut self, field: &Rc<F>) -> Option<FieldReport> {
        let Some(binding) = self.registry.find_mut(field) else {
            tracing::warn!("Change on unregistered field ignored");
            return None;
        };
        let failures = check(binding, &**field, &self.catalog, &self.options);
        binding.set_state(state_of(&failures));
        let report = FieldReport::new(failures, self.options.primary_failure);

        if let Some(observer) = self.observer() {
            observer.on_field_report(field, &report);
        }
        let is_valid = self.aggregate(self.options.aggregate_mode);
        if let Some(observer) = self.observer() {
            observer.on_aggregate_validity(is_valid);
        }
        Some(report)
    }

    /// Recompute form-level validity with the configured [`AggregateMode`]
    /// and notify the observer.
    pub fn revalidate_all(&mut self) -> bool {
        self.revalidate_all_with(self.options.aggregate_mode)
    }

    /// Recompute form-level validity with an explicit mode and notify the observer.
    pub fn revalidate_all_with(&mut self, mode: AggregateMode) -> bool {
        let is_valid = self.aggregate(mode);
        if let Some(observer) = self.observer() {
            observer.on_aggregate_validity(is_valid);
        }
        is_valid
    }

    /// Report for `field` without changing its state or notifying anyone.
    pub fn report(&self, field: &Rc<F>) -> Option<FieldReport> {
        let binding = self.registry.find(field)?;
        let failures = check(binding, &**field, &self.catalog, &self.options);
        Some(FieldReport::new(failures, self.options.primary_failure))
    }

    /// The form is valid iff no live binding has a failure.
    fn aggregate(&mut self, mode: AggregateMode) -> bool {
        let pruned = self.registry.prune();
        if pruned > 0 {
            tracing::debug!(pruned, "Dropped bindings of released fields");
        }

        let mut is_valid = true;
        for binding in self.registry.iter_mut() {
            let Some(field) = binding.field() else {
                continue;
            };
            let failures = check(binding, &*field, &self.catalog, &self.options);
            let state = state_of(&failures);
            binding.set_state(state);
            if state == FieldState::Invalid {
                is_valid = false;
                if mode == AggregateMode::ShortCircuit {
                    break;
                }
            }
        }
        is_valid
    }

    // -----------------------------------------------------------------------
    // Settings
    // -----------------------------------------------------------------------

    /// Switch the message locale. Affects later validations only.
    pub fn set_locale(&mut self, locale: impl Into<String>) {
        self.options.locale = locale.into();
    }

    pub fn locale(&self) -> &str {
        &self.options.locale
    }

    pub fn set_fallback_locale(&mut self, locale: Option<String>) {
        self.options.fallback_locale = locale;
    }

    pub fn set_primary_failure(&mut self, policy: PrimaryFailure) {
        self.options.primary_failure = policy;
    }

    pub fn set_aggregate_mode(&mut self, mode: AggregateMode) {
        self.options.aggregate_mode = mode;
    }

    pub fn options(&self) -> &ValidatorOptions {
        &self.options
    }

    pub fn catalog(&self) -> &MessageCatalog {
        &self.catalog
    }

    pub fn catalog_mut(&mut self) -> &mut MessageCatalog {
        &mut self.catalog
    }
}

fn check<F: TextInput + ?Sized>(
    binding: &FieldBinding<F>,
    field: &F,
    catalog: &MessageCatalog,
    options: &ValidatorOptions,
) -> Vec<ValidationFailure> {
    evaluate_all(
        binding.rules(),
        field.text().as_deref(),
        catalog,
        &options.locale,
        options.fallback_locale.as_deref(),
    )
}

fn state_of(failures: &[ValidationFailure]) -> FieldState {
    if failures.is_empty() {
        FieldState::Valid
    } else {
        FieldState::Invalid
    }
}

impl<F: TextInput + ?Sized> Default for FormValidator<F> {
    fn default() -> Self {
        Self::new(MessageCatalog::empty())
    }
}

impl<F: TextInput + ?Sized> fmt::Debug for FormValidator<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormValidator")
            .field("fields", &self.registry.len())
            .field("catalog", &self.catalog)
            .field("options", &self.options)
            .field("observed", &self.observer.is_some())
            .finish()
    }
}
