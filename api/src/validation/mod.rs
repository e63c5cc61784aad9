//! Input validation and sanitization for the contact form.
//!
//! Validation is total: every field is checked and every violation is
//! collected, so the caller can report all problems in a single pass.
//! The pieces:
//!
//! 1. **`form`**: the raw flat text mapping received from the client and
//!    its conversion into a typed [`shared::ContactDraft`]
//! 2. **`validators`**: reusable per-field checks (length, email, phone)
//! 3. **`sanitizers`**: markup stripping applied to free-text fields after
//!    validation and before persistence

pub mod form;
pub mod sanitizers;
pub mod validators;

use std::collections::BTreeMap;

pub use form::ContactForm;

/// A field-level validation error
#[derive(Debug, Clone, serde::Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Builder for accumulating validation errors
#[derive(Debug, Default)]
pub struct ValidationBuilder {
    errors: Vec<FieldError>,
}

impl ValidationBuilder {
    pub fn new() -> Self {
        Self { errors: vec![] }
    }

    /// Add an error if the result is Err
    pub fn check<F>(&mut self, field: &str, validator: F) -> &mut Self
    where
        F: FnOnce() -> Result<(), String>,
    {
        if let Err(message) = validator() {
            self.errors.push(FieldError::new(field, message));
        }
        self
    }

    /// Add an error directly
    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) -> &mut Self {
        self.errors.push(FieldError::new(field, message));
        self
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Finish building and return Result
    pub fn build(self) -> Result<(), Vec<FieldError>> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}

/// Group accumulated errors by field, preserving per-field message order.
pub fn errors_by_field(errors: Vec<FieldError>) -> BTreeMap<String, Vec<String>> {
    let mut map: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for error in errors {
        map.entry(error.field).or_default().push(error.message);
    }
    map
}
