//! Per-session page state.
//!
//! A [`Session`] is created when a participant starts interacting and
//! dropped when they leave. It holds the current page and the last accepted
//! registration, and is passed explicitly to whatever drives the views.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Error;
use crate::registration::{Registration, RegistrationForm};
use crate::submission::{RegistrationDesk, SubmitOutcome};

/// Message shown when the confirmation page is opened with nothing to show.
pub const NO_REGISTRATION_MESSAGE: &str =
    "No registration data found. Please complete your registration.";

/// The three views.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Page {
    /// Landing page.
    #[default]
    Home,
    /// The registration form.
    Registration,
    /// Details of the last accepted registration.
    Confirmation,
}

impl Page {
    /// All pages in navigation order.
    pub const ALL: [Self; 3] = [Self::Home, Self::Registration, Self::Confirmation];
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Home => write!(f, "Home"),
            Self::Registration => write!(f, "Registration"),
            Self::Confirmation => write!(f, "Confirmation"),
        }
    }
}

impl FromStr for Page {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|page| page.to_string().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::internal(format!("unknown page: {s}")))
    }
}

/// One participant's interaction state.
#[derive(Debug, Default)]
pub struct Session {
    page: Page,
    last_registration: Option<Registration>,
}

impl Session {
    /// Start a session on the Home page with nothing cached.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The page currently shown.
    #[must_use]
    pub fn page(&self) -> Page {
        self.page
    }

    /// Jump to any page.
    pub fn navigate(&mut self, page: Page) {
        if page != self.page {
            debug!(from = %self.page, to = %page, "Navigating");
        }
        self.page = page;
    }

    /// The Home page call to action.
    pub fn register_now(&mut self) {
        self.navigate(Page::Registration);
    }

    /// The Confirmation page "register another" action.
    pub fn register_another(&mut self) {
        self.navigate(Page::Registration);
    }

    /// Submit a form through the desk.
    ///
    /// On acceptance the record replaces the cached one and the session
    /// moves to the Confirmation page. On rejection nothing changes.
    pub fn submit(&mut self, desk: &RegistrationDesk, form: RegistrationForm) -> SubmitOutcome {
        let outcome = desk.submit(form);
        if let SubmitOutcome::Accepted { registration, .. } = &outcome {
            self.last_registration = Some(registration.clone());
            self.navigate(Page::Confirmation);
        }
        outcome
    }

    /// The record to show on the Confirmation page.
    ///
    /// # Errors
    ///
    /// Returns [`NO_REGISTRATION_MESSAGE`] if nothing was accepted in this
    /// session yet.
    pub fn confirmation(&self) -> Result<&Registration, &'static str> {
        self.last_registration
            .as_ref()
            .ok_or(NO_REGISTRATION_MESSAGE)
    }
}
