//! Core registration types for regdesk.
//!
//! A [`RegistrationForm`] holds the raw values a participant typed in. A
//! [`Registration`] is a form that passed every field check; it can only be
//! produced by the validator (or read back from a store), so a partial
//! record never reaches persistence.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// The fixed set of faculties a participant can register under, in the
/// order they are offered.
pub const FACULTIES: [&str; 6] = [
    "Faculty of Chemical and Process Engineering Technology",
    "Faculty of Civil Engineering Technology",
    "Faculty of Electrical and Electronics Engineering Technology",
    "Faculty of Manufacturing and Mechatronic Engineering Technology",
    "Faculty of Mechanical and Automotive Engineering Technology",
    "Faculty of Computing",
];

/// Display labels for the six fields, in column order.
///
/// These double as the CSV header.
pub const FIELD_LABELS: [&str; 6] = [
    "Full Name",
    "Email",
    "Student ID",
    "Phone Number",
    "Year of Study",
    "Faculty",
];

/// One of the six registration fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    /// Participant's full name.
    FullName,
    /// Contact email address.
    Email,
    /// Institutional student identifier.
    StudentId,
    /// Phone number, digits only.
    Phone,
    /// Current year of study.
    YearOfStudy,
    /// Faculty the participant belongs to.
    Faculty,
}

impl Field {
    /// All fields in column order.
    pub const ALL: [Self; 6] = [
        Self::FullName,
        Self::Email,
        Self::StudentId,
        Self::Phone,
        Self::YearOfStudy,
        Self::Faculty,
    ];

    /// Human-readable label for the field.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::FullName => FIELD_LABELS[0],
            Self::Email => FIELD_LABELS[1],
            Self::StudentId => FIELD_LABELS[2],
            Self::Phone => FIELD_LABELS[3],
            Self::YearOfStudy => FIELD_LABELS[4],
            Self::Faculty => FIELD_LABELS[5],
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Resolve a faculty selection to its canonical name.
///
/// Accepts either the exact faculty name (case-insensitive) or its 1-based
/// position in [`FACULTIES`].
///
/// # Errors
///
/// Returns [`Error::UnknownFaculty`] if the input names no faculty.
pub fn resolve_faculty(input: &str) -> Result<&'static str> {
    let trimmed = input.trim();

    if let Ok(index) = trimmed.parse::<usize>() {
        return index
            .checked_sub(1)
            .and_then(|i| FACULTIES.get(i))
            .copied()
            .ok_or_else(|| Error::UnknownFaculty(trimmed.to_string()));
    }

    FACULTIES
        .iter()
        .find(|name| name.eq_ignore_ascii_case(trimmed))
        .copied()
        .ok_or_else(|| Error::UnknownFaculty(trimmed.to_string()))
}

/// Raw, unvalidated field values as collected from the UI.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationForm {
    /// Participant's full name.
    pub full_name: String,
    /// Contact email address.
    pub email: String,
    /// Institutional student identifier.
    pub student_id: String,
    /// Phone number.
    pub phone: String,
    /// Current year of study.
    pub year_of_study: String,
    /// Selected faculty.
    pub faculty: String,
}

impl RegistrationForm {
    /// Get the raw value of a field.
    #[must_use]
    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::FullName => &self.full_name,
            Field::Email => &self.email,
            Field::StudentId => &self.student_id,
            Field::Phone => &self.phone,
            Field::YearOfStudy => &self.year_of_study,
            Field::Faculty => &self.faculty,
        }
    }
}

/// A registration whose six fields passed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Registration {
    full_name: String,
    email: String,
    student_id: String,
    phone: String,
    year_of_study: String,
    faculty: String,
}

impl Registration {
    /// Build a registration without running the field checks.
    ///
    /// Only the validator and the stores (reading back rows that were valid
    /// when written) may do this.
    pub(crate) fn from_form_unchecked(form: RegistrationForm) -> Self {
        Self {
            full_name: form.full_name,
            email: form.email,
            student_id: form.student_id,
            phone: form.phone,
            year_of_study: form.year_of_study,
            faculty: form.faculty,
        }
    }

    /// Participant's full name.
    #[must_use]
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// Contact email address.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Institutional student identifier.
    #[must_use]
    pub fn student_id(&self) -> &str {
        &self.student_id
    }

    /// Phone number.
    #[must_use]
    pub fn phone(&self) -> &str {
        &self.phone
    }

    /// Current year of study.
    #[must_use]
    pub fn year_of_study(&self) -> &str {
        &self.year_of_study
    }

    /// Selected faculty.
    #[must_use]
    pub fn faculty(&self) -> &str {
        &self.faculty
    }

    /// The six values in column order.
    #[must_use]
    pub fn values(&self) -> [&str; 6] {
        [
            &self.full_name,
            &self.email,
            &self.student_id,
            &self.phone,
            &self.year_of_study,
            &self.faculty,
        ]
    }

    /// Label/value pairs in column order, for display.
    pub fn labelled(&self) -> impl Iterator<Item = (&'static str, &str)> {
        FIELD_LABELS.into_iter().zip(self.values())
    }
}

/// A registration read back from the relational store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredRegistration {
    /// Surrogate identifier assigned on insert.
    pub id: i64,
    /// The stored record.
    #[serde(flatten)]
    pub registration: Registration,
}
