//! `regdesk` - Registration desk for the FutureTech2025 workshop
//!
//! This library validates participant registrations and records each
//! accepted one in two independent stores: an append-only CSV file and a
//! `SQLite` table. A [`Session`] tracks which page a participant is on and
//! the last registration they completed.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod registration;
pub mod session;
pub mod storage;
pub mod submission;
pub mod ui;
pub mod validation;

pub use config::Config;
pub use error::{Error, Result};
pub use logging::init_logging;
pub use registration::{Registration, RegistrationForm, StoredRegistration, FACULTIES};
pub use session::{Page, Session};
pub use storage::{Persistence, RelationalStore, StorageNotice, TabularStore};
pub use submission::{RegistrationDesk, SubmitOutcome};
pub use validation::{validate, ValidationReport, Validator};
