//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::registration::RegistrationForm;

/// One-shot registration arguments.
///
/// Every field is optional on the command line so that missing values reach
/// the validator and are reported with the same messages as the form.
#[derive(Debug, Args)]
pub struct RegisterCommand {
    /// Participant's full name
    #[arg(long, default_value = "")]
    pub full_name: String,

    /// Contact email address
    #[arg(long, default_value = "")]
    pub email: String,

    /// Institutional student ID
    #[arg(long, default_value = "")]
    pub student_id: String,

    /// Phone number (10-12 digits)
    #[arg(long, default_value = "")]
    pub phone: String,

    /// Current year of study
    #[arg(long, default_value = "")]
    pub year_of_study: String,

    /// Faculty name or its number from `regdesk faculties`
    #[arg(long, default_value = "1")]
    pub faculty: String,

    /// Output the stored record as JSON
    #[arg(short, long)]
    pub json: bool,
}

impl RegisterCommand {
    /// Turn the arguments into a form, with the faculty already resolved.
    #[must_use]
    pub fn to_form(&self, faculty: &str) -> RegistrationForm {
        RegistrationForm {
            full_name: self.full_name.clone(),
            email: self.email.clone(),
            student_id: self.student_id.clone(),
            phone: self.phone.clone(),
            year_of_study: self.year_of_study.clone(),
            faculty: faculty.to_string(),
        }
    }
}

/// List command arguments.
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Maximum number of registrations to show
    #[arg(short, long, default_value = "20")]
    pub limit: usize,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Status command arguments.
#[derive(Debug, Args)]
pub struct StatusCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_command_to_form() {
        let cmd = RegisterCommand {
            full_name: "Ana Lee".to_string(),
            email: "ana@x.edu".to_string(),
            student_id: "S123".to_string(),
            phone: "0123456789".to_string(),
            year_of_study: "2".to_string(),
            faculty: "6".to_string(),
            json: false,
        };

        let form = cmd.to_form("Faculty of Computing");
        assert_eq!(form.full_name, "Ana Lee");
        assert_eq!(form.faculty, "Faculty of Computing");
    }

    #[test]
    fn test_list_command_debug() {
        let cmd = ListCommand {
            limit: 5,
            json: true,
        };
        let debug_str = format!("{cmd:?}");
        assert!(debug_str.contains("limit"));
    }

    #[test]
    fn test_config_command_debug() {
        let cmd = ConfigCommand::Show { json: false };
        let debug_str = format!("{cmd:?}");
        assert!(debug_str.contains("Show"));
    }
}
