//! `SQLite` schema definitions for regdesk.
//!
//! This module contains the SQL statements for creating and querying the
//! `registrations` table.

use rusqlite::Connection;

use crate::error::Result;

/// SQL statement to create the registrations table.
///
/// Every participant column is plain text; `id` is the surrogate key.
pub const CREATE_REGISTRATIONS_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS registrations (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    full_name TEXT,
    email TEXT,
    student_id TEXT,
    phone TEXT,
    year_of_study TEXT,
    faculty TEXT
)
";

/// SQL statement to insert one registration, bound positionally.
pub const INSERT_REGISTRATION: &str = r"
INSERT INTO registrations (full_name, email, student_id, phone, year_of_study, faculty)
VALUES (?1, ?2, ?3, ?4, ?5, ?6)
";

/// Column list used when reading registrations back.
pub const SELECT_COLUMNS: &str =
    "id, full_name, email, student_id, phone, year_of_study, faculty";

/// All schema creation statements in order.
pub const SCHEMA_STATEMENTS: &[&str] = &[CREATE_REGISTRATIONS_TABLE];

/// Create the schema if it does not exist yet.
///
/// Safe to call on every connection.
///
/// # Errors
///
/// Returns an error if a statement fails.
pub fn initialize_schema(conn: &Connection) -> Result<()> {
    for statement in SCHEMA_STATEMENTS {
        conn.execute(statement, [])?;
    }
    Ok(())
}
