use std::cell::RefCell;

/// Read access to the current value of an input field.
///
/// The validator never owns or mutates fields; it only reads their text when
/// asked to validate. Implemented for plain strings (fixed values, handy in
/// tests) and for `RefCell` wrappers that a UI owner updates in place.
///
/// # Panics
///
/// The `RefCell` impl panics if the cell is mutably borrowed while the text
/// is read, so the owner must release its `borrow_mut()` before validating.
///
/// ```
/// use std::cell::RefCell;
/// use textvld::input::TextInput;
///
/// let field = RefCell::new(String::from("abc"));
/// field.borrow_mut().push('d');
/// assert_eq!(field.text().as_deref(), Some("abcd"));
/// ```
pub trait TextInput {
    /// Current text, or `None` when the field has no value at all.
    fn text(&self) -> Option<String>;
}

impl TextInput for str {
    fn text(&self) -> Option<String> {
        Some(self.to_string())
    }
}

impl TextInput for String {
    fn text(&self) -> Option<String> {
        Some(self.clone())
    }
}

impl TextInput for Option<String> {
    fn text(&self) -> Option<String> {
        self.clone()
    }
}

impl<T: TextInput + ?Sized> TextInput for RefCell<T> {
    fn text(&self) -> Option<String> {
        self.borrow().text()
    }
}
