//! Text rendering for the three views.

use std::io::{self, Write};

use crate::config::EventConfig;
use crate::registration::{Registration, FACULTIES, FIELD_LABELS};
use crate::session::Page;
use crate::storage::StorageNotice;
use crate::validation::ValidationReport;

const HOME_HEADLINE: &str = "Shape the Future with AI & Innovation";

const HOME_PITCH: &str = "Join leading experts and passionate minds at FutureTech2025 to explore \
the transformative power of Artificial Intelligence and emerging technologies.";

const HOME_BULLETS: [&str; 4] = [
    "Discover the latest breakthroughs in AI and their real-world applications.",
    "Engage in interactive sessions and gain practical insights.",
    "Network with fellow innovators, researchers, and industry leaders.",
    "Be inspired by visionary talks and future-forward discussions.",
];

/// Message printed after an accepted submission.
pub const SUBMITTED_MESSAGE: &str = "Registration submitted successfully!";

/// Header of the value column in the confirmation table.
const VALUE_HEADER: &str = "Your Info";

/// Write the page header and navigation line.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn header<W: Write>(out: &mut W, event: &EventConfig, current: Page) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", event.title)?;
    writeln!(out, "{}", "=".repeat(event.title.chars().count()))?;

    write!(out, "Navigate:")?;
    for (i, page) in Page::ALL.iter().enumerate() {
        let marker = if *page == current { "*" } else { " " };
        write!(out, "  {marker}{}) {page}", i + 1)?;
    }
    writeln!(out, "   q) Quit")?;
    writeln!(out)
}

/// Write the page footer.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn footer<W: Write>(out: &mut W, event: &EventConfig) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", event.footer)
}

/// Write the landing page.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn home<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "{HOME_HEADLINE}")?;
    writeln!(out)?;
    writeln!(out, "{HOME_PITCH}")?;
    writeln!(out)?;
    for bullet in HOME_BULLETS {
        writeln!(out, "  - {bullet}")?;
    }
    writeln!(out)?;
    writeln!(out, "  r) Register Now!")
}

/// Write the registration page intro.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn registration<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "Event Registration Form")?;
    writeln!(out)?;
    writeln!(out, "  s) Fill in and submit the form")
}

/// Write the numbered faculty choices.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn faculty_choices<W: Write>(out: &mut W) -> io::Result<()> {
    for (i, faculty) in FACULTIES.iter().enumerate() {
        writeln!(out, "  {}) {faculty}", i + 1)?;
    }
    Ok(())
}

/// Write the confirmation page.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn confirmation<W: Write>(
    out: &mut W,
    last: Result<&Registration, &'static str>,
) -> io::Result<()> {
    writeln!(out, "Confirmation Details")?;
    writeln!(out)?;
    match last {
        Ok(registration) => {
            writeln!(out, "Thank you for registering! Here's your information:")?;
            writeln!(out)?;
            registration_table(out, registration)?;
            writeln!(out)?;
            writeln!(out, "  a) Register Another Participant")
        }
        Err(message) => writeln!(out, "{message}"),
    }
}

/// Write a registration as a label/value table.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn registration_table<W: Write>(out: &mut W, registration: &Registration) -> io::Result<()> {
    let width = FIELD_LABELS
        .iter()
        .map(|label| label.chars().count())
        .max()
        .unwrap_or_default();

    writeln!(out, "{:width$}  {VALUE_HEADER}", "")?;
    for (label, value) in registration.labelled() {
        writeln!(out, "{label:width$}  {value}")?;
    }
    Ok(())
}

/// Write every validation failure, one per line.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn validation_errors<W: Write>(out: &mut W, report: &ValidationReport) -> io::Result<()> {
    for message in report.messages() {
        writeln!(out, "Error: {message}")?;
    }
    Ok(())
}

/// Write storage notices as warnings.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn storage_notices<W: Write>(out: &mut W, notices: &[StorageNotice]) -> io::Result<()> {
    for notice in notices {
        writeln!(out, "Warning: {notice}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registration::RegistrationForm;

    fn render(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_header_marks_current_page() {
        let text = render(|out| header(out, &EventConfig::default(), Page::Registration));
        assert!(text.contains("FutureTech2025: Innovation & AI Workshop"));
        assert!(text.contains("*2) Registration"));
        assert!(text.contains(" 1) Home"));
    }

    #[test]
    fn test_home_has_call_to_action() {
        let text = render(|out| home(out));
        assert!(text.contains("Shape the Future"));
        assert!(text.contains("r) Register Now!"));
    }

    #[test]
    fn test_faculty_choices_numbered() {
        let text = render(|out| faculty_choices(out));
        assert!(text.contains("6) Faculty of Computing"));
        assert_eq!(text.lines().count(), 6);
    }

    #[test]
    fn test_confirmation_without_registration() {
        let text = render(|out| confirmation(out, Err("nothing here")));
        assert!(text.contains("nothing here"));
        assert!(!text.contains("Register Another"));
    }

    #[test]
    fn test_registration_table_aligns_values() {
        let registration = Registration::from_form_unchecked(RegistrationForm {
            full_name: "Ana Lee".to_string(),
            email: "ana@x.edu".to_string(),
            student_id: "S123".to_string(),
            phone: "0123456789".to_string(),
            year_of_study: "2".to_string(),
            faculty: "Faculty of Computing".to_string(),
        });

        let text = render(|out| registration_table(out, &registration));
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 7);
        assert_eq!(lines[0], "               Your Info");
        assert_eq!(lines[1], "Full Name      Ana Lee");
        assert_eq!(lines[5], "Year of Study  2");
    }
}
