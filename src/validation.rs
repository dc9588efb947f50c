//! Client-side form checks. These are syntax checks only; the backend remains the
//! authority on whether an email is taken or a password is acceptable.

use crate::ui::{Field, Label};
use regex::Regex;
use std::collections::BTreeMap;

/// Minimum password length, counted in characters.
pub const MIN_PASSWORD_CHARS: usize = 6;

/// `local@domain.tld`, compared case-insensitively.
#[must_use]
pub fn validate_email(email: &str) -> bool {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$")
        .is_ok_and(|re| re.is_match(&email.to_lowercase()))
}

#[must_use]
pub fn validate_password(password: &str) -> bool {
    !password.is_empty() && password.chars().count() >= MIN_PASSWORD_CHARS
}

/// Exactly a first and a last name. Middle names and single names are rejected.
#[must_use]
pub fn validate_full_name(name: &str) -> bool {
    name.split_whitespace().count() == 2
}

/// Error targets of a form, one per field.
#[derive(Clone, Debug, Default)]
pub struct FieldErrors {
    labels: BTreeMap<Field, Label>,
}

impl FieldErrors {
    pub fn show_field_error(&mut self, field: Field, message: impl Into<String>) {
        self.labels.entry(field).or_default().show(message);
    }

    pub fn clear_all_field_errors(&mut self) {
        for label in self.labels.values_mut() {
            label.clear();
        }
    }

    /// Text currently shown for `field`, if any.
    #[must_use]
    pub fn message(&self, field: Field) -> Option<&str> {
        self.labels
            .get(&field)
            .filter(|label| label.is_shown())
            .map(|label| label.text.as_str())
    }

    /// Fields with a visible error, in declaration order.
    #[must_use]
    pub fn failing(&self) -> Vec<Field> {
        self.labels
            .iter()
            .filter(|(_, label)| label.is_shown())
            .map(|(field, _)| *field)
            .collect()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.failing().is_empty()
    }
}
