//! Field bindings: which rules run for which field.

use std::rc::{Rc, Weak};

use crate::rule::CompiledRule;

/// Validation state of a registered field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldState {
    /// Registered but not validated yet.
    #[default]
    Untouched,
    Valid,
    Invalid,
}

/// One field and its ordered rules.
#[derive(Debug)]
pub struct FieldBinding<F: ?Sized> {
    field: Weak<F>,
    rules: Vec<CompiledRule>,
    state: FieldState,
}

impl<F: ?Sized> FieldBinding<F> {
    pub fn new(field: &Rc<F>, rules: Vec<CompiledRule>) -> Self {
        Self {
            field: Rc::downgrade(field),
            rules,
            state: FieldState::Untouched,
        }
    }

    /// The field, if its owner still holds it.
    pub fn field(&self) -> Option<Rc<F>> {
        self.field.upgrade()
    }

    pub fn rules(&self) -> &[CompiledRule] {
        &self.rules
    }

    pub fn state(&self) -> FieldState {
        self.state
    }

    pub(crate) fn set_state(&mut self, state: FieldState) {
        self.state = state;
    }

    /// Identity check. A binding whose field is gone matches nothing.
    pub fn is_bound_to(&self, field: &Rc<F>) -> bool {
        self.is_alive() && self.field.as_ptr().cast::<()>() == Rc::as_ptr(field).cast::<()>()
    }

    pub fn is_alive(&self) -> bool {
        self.field.strong_count() > 0
    }
}

/// Bindings in registration order, at most one per field.
#[derive(Debug)]
pub struct Registry<F: ?Sized> {
    bindings: Vec<FieldBinding<F>>,
}

impl<F: ?Sized> Registry<F> {
    pub fn new() -> Self {
        Self { bindings: vec![] }
    }

    /// Bind `rules` to `field`. An existing binding keeps its position,
    /// takes the new rules and goes back to [`FieldState::Untouched`].
    ///
    /// Returns `true` if the field was already registered.
    pub fn upsert(&mut self, field: &Rc<F>, rules: Vec<CompiledRule>) -> bool {
        match self.find_mut(field) {
            Some(binding) => {
                *binding = FieldBinding::new(field, rules);
                true
            }
            None => {
                self.bindings.push(FieldBinding::new(field, rules));
                false
            }
        }
    }

    pub fn remove(&mut self, field: &Rc<F>) -> bool {
        let before = self.bindings.len();
        self.bindings.retain(|b| !b.is_bound_to(field));
        self.bindings.len() != before
    }

    pub fn find(&self, field: &Rc<F>) -> Option<&FieldBinding<F>> {
        self.bindings.iter().find(|b| b.is_bound_to(field))
    }

    pub fn find_mut(&mut self, field: &Rc<F>) -> Option<&mut FieldBinding<F>> {
        self.bindings.iter_mut().find(|b| b.is_bound_to(field))
    }

    /// Drop bindings whose field no longer exists. Returns how many were dropped.
    pub fn prune(&mut self) -> usize {
        let before = self.bindings.len();
        self.bindings.retain(FieldBinding::is_alive);
        before - self.bindings.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldBinding<F>> {
        self.bindings.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut FieldBinding<F>> {
        self.bindings.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl<F: ?Sized> Default for Registry<F> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::Rule;

    fn required() -> Vec<CompiledRule> {
        vec![CompiledRule::new(Rule::Required).unwrap()]
    }

    #[test]
    fn identity_is_pointer_based() {
        let a: Rc<str> = Rc::from("same");
        let b: Rc<str> = Rc::from("same");
        let mut registry = Registry::new();
        registry.upsert(&a, required());
        assert!(registry.find(&a).is_some());
        assert!(registry.find(&b).is_none());
    }

    #[test]
    fn upsert_replaces_in_place() {
        let a: Rc<str> = Rc::from("a");
        let b: Rc<str> = Rc::from("b");
        let mut registry = Registry::new();
        assert!(!registry.upsert(&a, required()));
        assert!(!registry.upsert(&b, required()));
        registry.find_mut(&a).unwrap().set_state(FieldState::Invalid);

        assert!(registry.upsert(&a, vec![CompiledRule::new(Rule::Email).unwrap()]));
        assert_eq!(registry.len(), 2);
        let first = registry.iter().next().unwrap();
        assert!(first.is_bound_to(&a));
        assert_eq!(first.rules()[0].rule(), &Rule::Email);
        assert_eq!(first.state(), FieldState::Untouched);
    }

    #[test]
    fn prune_drops_dead_fields() {
        let a: Rc<str> = Rc::from("a");
        let mut registry = Registry::new();
        {
            let gone: Rc<str> = Rc::from("gone");
            registry.upsert(&gone, required());
        }
        registry.upsert(&a, required());
        assert_eq!(registry.prune(), 1);
        assert_eq!(registry.len(), 1);
        assert!(registry.remove(&a));
        assert!(registry.is_empty());
    }
}
