//! Field validation for registration forms.
//!
//! Every rule runs on every submission; there is no short-circuiting. The
//! result is a [`ValidationReport`] listing each failing field together with
//! the message to show the participant, in a fixed order.
//!
//! # Example
//!
//! ```
//! use regdesk::registration::RegistrationForm;
//! use regdesk::validation::validate;
//!
//! let form = RegistrationForm {
//!     full_name: "Ana Lee".to_string(),
//!     email: "ana.at.x".to_string(),
//!     student_id: "S123".to_string(),
//!     phone: "0123456789".to_string(),
//!     year_of_study: "2".to_string(),
//!     faculty: "Faculty of Computing".to_string(),
//! };
//!
//! let report = validate(&form);
//! assert_eq!(report.messages(), vec!["Invalid email format."]);
//! ```

mod rules;

use std::sync::OnceLock;

use tracing::{debug, trace};

use crate::error::Error;
use crate::registration::{Field, Registration, RegistrationForm};

pub use rules::{builtin_rules, Check, FieldRule, EMAIL_PATTERN, PHONE_PATTERN};

/// A single failed field check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// The field that failed.
    pub field: Field,
    /// Message to show the participant.
    pub message: &'static str,
}

/// The outcome of validating one form.
///
/// Empty means the form is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    errors: Vec<FieldError>,
}

impl ValidationReport {
    /// Whether every check passed.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// The failed checks, in check order.
    #[must_use]
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// The failure messages, in check order.
    #[must_use]
    pub fn messages(&self) -> Vec<&'static str> {
        self.errors.iter().map(|e| e.message).collect()
    }

    /// Whether the given field failed.
    #[must_use]
    pub fn has_error(&self, field: Field) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }
}

impl From<ValidationReport> for Error {
    fn from(report: ValidationReport) -> Self {
        Self::Rejected {
            messages: report
                .errors
                .into_iter()
                .map(|e| e.message.to_string())
                .collect(),
        }
    }
}

/// Runs the field rules against registration forms.
#[derive(Debug)]
pub struct Validator {
    rules: Vec<FieldRule>,
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator {
    /// Create a validator with the built-in rules.
    #[must_use]
    pub fn new() -> Self {
        Self::with_rules(builtin_rules())
    }

    /// Create a validator with a custom rule set.
    #[must_use]
    pub fn with_rules(rules: Vec<FieldRule>) -> Self {
        Self { rules }
    }

    /// Check every field of the form.
    #[must_use]
    pub fn validate(&self, form: &RegistrationForm) -> ValidationReport {
        let errors: Vec<FieldError> = self
            .rules
            .iter()
            .filter(|rule| {
                let accepted = rule.accepts(form.value(rule.field));
                trace!(field = %rule.field, accepted, "Checked field");
                !accepted
            })
            .map(|rule| FieldError {
                field: rule.field,
                message: rule.message,
            })
            .collect();

        if !errors.is_empty() {
            debug!(failures = errors.len(), "Registration form failed validation");
        }

        ValidationReport { errors }
    }

    /// Validate the form and, if it passes, turn it into a [`Registration`].
    ///
    /// # Errors
    ///
    /// Returns the full report if any check fails.
    pub fn accept(
        &self,
        form: RegistrationForm,
    ) -> std::result::Result<Registration, ValidationReport> {
        let report = self.validate(&form);
        if report.is_valid() {
            Ok(Registration::from_form_unchecked(form))
        } else {
            Err(report)
        }
    }
}

fn default_validator() -> &'static Validator {
    static VALIDATOR: OnceLock<Validator> = OnceLock::new();
    VALIDATOR.get_or_init(Validator::new)
}

/// Validate a form with the built-in rules.
#[must_use]
pub fn validate(form: &RegistrationForm) -> ValidationReport {
    default_validator().validate(form)
}

impl TryFrom<RegistrationForm> for Registration {
    type Error = ValidationReport;

    fn try_from(form: RegistrationForm) -> std::result::Result<Self, Self::Error> {
        default_validator().accept(form)
    }
}
