//! Request validation schemas.
//!
//! Each submodule validates one raw request body into a normalized, typed
//! record, or a structured list of field-level error messages. Validation is
//! pure: no I/O, no side effects. All free text passes through
//! [`sanitize_text`] and format fields are canonicalized via the core
//! newtypes before anything else looks at them.

pub mod confirmation;
pub mod contact;
pub mod payment;

use serde::Serialize;
use sky_brasil_core::sanitize_text;

pub use confirmation::{ConfirmationItem, ConfirmationRequest, RawConfirmationRequest};
pub use contact::{ContactRequest, RawContactRequest, Source};
pub use payment::{BillingAddress, Customer, LineItem, PaymentRequest, RawPaymentRequest};

/// A single field-level validation failure, returned verbatim to the caller.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub(crate) fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Accumulates field errors so one pass reports every failing field.
#[derive(Debug, Default)]
pub(crate) struct ErrorList(Vec<FieldError>);

impl ErrorList {
    pub(crate) fn push(&mut self, field: &str, message: impl Into<String>) {
        self.0.push(FieldError::new(field, message));
    }

    /// Resolve to the validated value if no field failed.
    pub(crate) fn into_result<T>(self, value: T) -> Result<T, Vec<FieldError>> {
        if self.0.is_empty() {
            Ok(value)
        } else {
            Err(self.0)
        }
    }

    pub(crate) fn into_errors(self) -> Vec<FieldError> {
        self.0
    }
}

/// Sanitize a free-text field and enforce character-count bounds.
///
/// Returns `None` (after recording the error) when the sanitized text falls
/// outside `min..=max` characters.
pub(crate) fn checked_text(
    field: &str,
    raw: &str,
    min: usize,
    max: usize,
    errors: &mut ErrorList,
) -> Option<String> {
    let clean = sanitize_text(raw);
    let len = clean.chars().count();
    if len < min || len > max {
        errors.push(
            field,
            format!("deve ter entre {min} e {max} caracteres"),
        );
        return None;
    }
    Some(clean)
}

/// Sanitize an optional free-text field, enforcing only an upper bound.
///
/// Empty-after-sanitization values collapse to `None`.
pub(crate) fn checked_optional_text(
    field: &str,
    raw: Option<&str>,
    max: usize,
    errors: &mut ErrorList,
) -> Option<String> {
    let clean = sanitize_text(raw?);
    if clean.is_empty() {
        return None;
    }
    if clean.chars().count() > max {
        errors.push(field, format!("deve ter no máximo {max} caracteres"));
        return None;
    }
    Some(clean)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checked_text_bounds() {
        let mut errors = ErrorList::default();
        assert_eq!(
            checked_text("name", "  Ana  ", 2, 100, &mut errors),
            Some("Ana".to_string())
        );
        assert!(checked_text("name", "A", 2, 100, &mut errors).is_none());
        assert!(errors.into_result(()).is_err());
    }

    #[test]
    fn test_checked_text_sanitizes_before_measuring() {
        let mut errors = ErrorList::default();
        // "<b></b>" alone sanitizes to empty, below the minimum
        assert!(checked_text("name", "<b></b>", 2, 100, &mut errors).is_none());
    }

    #[test]
    fn test_checked_optional_text_collapses_empty() {
        let mut errors = ErrorList::default();
        assert_eq!(checked_optional_text("channel", None, 100, &mut errors), None);
        assert_eq!(
            checked_optional_text("channel", Some("   "), 100, &mut errors),
            None
        );
        assert_eq!(
            checked_optional_text("channel", Some("Twitch"), 100, &mut errors),
            Some("Twitch".to_string())
        );
        assert!(errors.into_result(()).is_ok());
    }
}
