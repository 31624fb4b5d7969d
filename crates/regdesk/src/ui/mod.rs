//! Interactive terminal front end.
//!
//! [`Terminal`] hosts one [`Session`] over a line-oriented input and an
//! output stream. Each loop iteration renders the current page, reads one
//! command, and applies it. Submissions run to completion before the next
//! command is read. End of input or `q` ends the session.

pub mod views;

use std::io::{BufRead, Write};

use tracing::{debug, warn};

use crate::config::EventConfig;
use crate::error::Result;
use crate::registration::{resolve_faculty, Field, RegistrationForm, FACULTIES};
use crate::session::{Page, Session};
use crate::submission::{RegistrationDesk, SubmitOutcome};

/// Shown when an input line cannot be decoded.
const INVALID_INPUT_MESSAGE: &str = "Input was not valid text. Please try again.";

/// A command typed at the navigation prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Go(Page),
    RegisterNow,
    FillForm,
    RegisterAnother,
    Quit,
    Unknown,
}

impl Command {
    fn parse(input: &str, page: Page) -> Self {
        match (input.trim().to_ascii_lowercase().as_str(), page) {
            ("1", _) => Self::Go(Page::Home),
            ("2", _) => Self::Go(Page::Registration),
            ("3", _) => Self::Go(Page::Confirmation),
            ("q" | "quit", _) => Self::Quit,
            ("r", Page::Home) => Self::RegisterNow,
            ("s" | "", Page::Registration) => Self::FillForm,
            ("a", Page::Confirmation) => Self::RegisterAnother,
            _ => Self::Unknown,
        }
    }
}

/// Runs one interactive session.
#[derive(Debug)]
pub struct Terminal<'a, R, W> {
    desk: &'a RegistrationDesk,
    event: &'a EventConfig,
    input: R,
    output: W,
    session: Session,
}

impl<'a, R: BufRead, W: Write> Terminal<'a, R, W> {
    /// Create a terminal with a fresh session.
    pub fn new(desk: &'a RegistrationDesk, event: &'a EventConfig, input: R, output: W) -> Self {
        Self {
            desk,
            event,
            input,
            output,
            session: Session::new(),
        }
    }

    /// The session driven by this terminal.
    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Consume the terminal, returning its output stream.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Run until the participant quits or input ends.
    ///
    /// # Errors
    ///
    /// Returns an error if reading input or writing output fails.
    pub fn run(&mut self) -> Result<()> {
        loop {
            self.render()?;

            let Some(line) = self.prompt("Choose")? else {
                break;
            };

            match Command::parse(&line, self.session.page()) {
                Command::Go(page) => self.session.navigate(page),
                Command::RegisterNow => self.session.register_now(),
                Command::RegisterAnother => self.session.register_another(),
                Command::FillForm => {
                    if !self.fill_and_submit()? {
                        break;
                    }
                }
                Command::Quit => break,
                Command::Unknown => {
                    writeln!(self.output, "Unknown choice: {}", line.trim())?;
                }
            }
        }

        debug!("Session ended");
        Ok(())
    }

    fn render(&mut self) -> Result<()> {
        let page = self.session.page();
        views::header(&mut self.output, self.event, page)?;
        match page {
            Page::Home => views::home(&mut self.output)?,
            Page::Registration => views::registration(&mut self.output)?,
            Page::Confirmation => {
                views::confirmation(&mut self.output, self.session.confirmation())?;
            }
        }
        views::footer(&mut self.output, self.event)?;
        Ok(())
    }

    /// Collect a form and submit it. Returns `false` if input ended.
    fn fill_and_submit(&mut self) -> Result<bool> {
        let Some(form) = self.read_form()? else {
            return Ok(false);
        };

        let outcome = self.session.submit(self.desk, form);
        match &outcome {
            SubmitOutcome::Rejected(report) => {
                views::validation_errors(&mut self.output, report)?;
            }
            SubmitOutcome::Accepted { .. } => {
                views::storage_notices(&mut self.output, outcome.notices())?;
                writeln!(self.output, "{}", views::SUBMITTED_MESSAGE)?;
            }
        }
        Ok(true)
    }

    fn read_form(&mut self) -> Result<Option<RegistrationForm>> {
        let mut form = RegistrationForm::default();

        let text_fields = [
            (Field::FullName, &mut form.full_name),
            (Field::Email, &mut form.email),
            (Field::StudentId, &mut form.student_id),
            (Field::Phone, &mut form.phone),
            (Field::YearOfStudy, &mut form.year_of_study),
        ];
        for (field, slot) in text_fields {
            let Some(value) = self.prompt(field.label())? else {
                return Ok(None);
            };
            *slot = value;
        }

        let Some(faculty) = self.read_faculty()? else {
            return Ok(None);
        };
        form.faculty = faculty.to_string();

        Ok(Some(form))
    }

    /// Single-select over the fixed faculty list; blank picks the first.
    fn read_faculty(&mut self) -> Result<Option<&'static str>> {
        writeln!(self.output, "{}:", Field::Faculty.label())?;
        views::faculty_choices(&mut self.output)?;

        loop {
            let label = format!("Select 1-{} [1]", FACULTIES.len());
            let Some(choice) = self.prompt(&label)? else {
                return Ok(None);
            };
            if choice.trim().is_empty() {
                return Ok(Some(FACULTIES[0]));
            }
            match resolve_faculty(&choice) {
                Ok(faculty) => return Ok(Some(faculty)),
                Err(e) => writeln!(self.output, "{e}")?,
            }
        }
    }

    /// Print a label and read one line without its line ending.
    ///
    /// A line that is not valid UTF-8 is reported and the label is shown
    /// again.
    fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        loop {
            write!(self.output, "{label}: ")?;
            self.output.flush()?;

            let mut bytes = Vec::new();
            if self.input.read_until(b'\n', &mut bytes)? == 0 {
                return Ok(None);
            }
            match String::from_utf8(bytes) {
                Ok(line) => return Ok(Some(line.trim_end_matches(['\r', '\n']).to_string())),
                Err(e) => {
                    warn!(error = %e, "Discarding input line that is not valid UTF-8");
                    writeln!(self.output, "{INVALID_INPUT_MESSAGE}")?;
                }
            }
        }
    }
}
