//! Form validation
//!
//! Forms collect every failing field before answering, so a guest sees all
//! problems at once instead of fixing them one by one.

pub mod extractor;
pub mod validators;

pub use extractor::FormJson;

use crate::core::error::{FieldValidationError, ValidationError};

/// Collects field errors while a form is being checked
#[derive(Debug, Default)]
pub struct FieldChecks {
    errors: Vec<FieldValidationError>,
}

impl FieldChecks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the outcome of a validator for `field`
    pub fn check(&mut self, field: &str, result: Result<(), String>) -> &mut Self {
        if let Err(message) = result {
            self.errors.push(FieldValidationError::new(field, message));
        }
        self
    }

    /// Whether any check has failed so far
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Finish checking
    pub fn finish(self) -> Result<(), ValidationError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collects_all_errors() {
        let mut checks = FieldChecks::new();
        checks
            .check("guest_name", validators::min_chars("A", 2))
            .check("email", validators::email("nope"))
            .check("plus_ones", validators::in_range(1, 0, 5));

        assert!(checks.has_errors());
        match checks.finish() {
            Err(ValidationError::FieldErrors(errors)) => {
                assert_eq!(errors.len(), 2);
                assert_eq!(errors[0].field, "guest_name");
                assert_eq!(errors[1].field, "email");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_clean_form_passes() {
        let mut checks = FieldChecks::new();
        checks.check("guest_name", validators::min_chars("Ana", 2));
        assert!(checks.finish().is_ok());
    }
}
