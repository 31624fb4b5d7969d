//! The validate-then-persist flow for one submitted form.

use tracing::{info, info_span};

use crate::config::Config;
use crate::registration::{Registration, RegistrationForm};
use crate::storage::{PersistReport, Persistence, StorageNotice};
use crate::validation::{ValidationReport, Validator};

/// What happened to a submitted form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// At least one field check failed; nothing was written.
    Rejected(ValidationReport),
    /// Every check passed and both writes were attempted.
    Accepted {
        /// The accepted record.
        registration: Registration,
        /// Per-store results.
        persisted: PersistReport,
    },
}

impl SubmitOutcome {
    /// Whether the form was accepted.
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }

    /// Storage notices to show, empty if rejected or fully stored.
    #[must_use]
    pub fn notices(&self) -> &[StorageNotice] {
        match self {
            Self::Rejected(_) => &[],
            Self::Accepted { persisted, .. } => &persisted.notices,
        }
    }
}

/// Application-wide services shared by every session: the validator and
/// the two stores.
#[derive(Debug)]
pub struct RegistrationDesk {
    validator: Validator,
    persistence: Persistence,
}

impl RegistrationDesk {
    /// Create a desk with the built-in rules and the given stores.
    #[must_use]
    pub fn new(persistence: Persistence) -> Self {
        Self::with_validator(Validator::new(), persistence)
    }

    /// Create a desk with a custom validator.
    #[must_use]
    pub fn with_validator(validator: Validator, persistence: Persistence) -> Self {
        Self {
            validator,
            persistence,
        }
    }

    /// Create a desk using the store paths from the configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(Persistence::from_config(config))
    }

    /// Prepare the stores. Call once at startup.
    #[must_use]
    pub fn start(&self) -> Vec<StorageNotice> {
        self.persistence.prepare()
    }

    /// Validate a form and, if it passes, write it to both stores.
    #[must_use]
    pub fn submit(&self, form: RegistrationForm) -> SubmitOutcome {
        let span = info_span!("submit", student_id = %form.student_id);
        let _guard = span.enter();

        match self.validator.accept(form) {
            Err(report) => {
                info!(failures = report.errors().len(), "Registration rejected");
                SubmitOutcome::Rejected(report)
            }
            Ok(registration) => {
                let persisted = self.persistence.persist(&registration);
                info!(
                    complete = persisted.is_complete(),
                    row_id = ?persisted.row_id(),
                    "Registration accepted"
                );
                SubmitOutcome::Accepted {
                    registration,
                    persisted,
                }
            }
        }
    }
}
