//! `SQLite`-backed registration table.

use std::path::{Path, PathBuf};

use rusqlite::{params, Connection, OpenFlags, OptionalExtension};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::registration::{Registration, RegistrationForm, StoredRegistration};

use super::schema::{self, INSERT_REGISTRATION, SELECT_COLUMNS};
use super::{ensure_parent_dir, RegistrationSink, StoreKind, WriteReceipt};

/// The `registrations` table in a `SQLite` database file.
///
/// Holds only the path: every operation opens its own connection, ensures
/// the schema, does its work and drops the connection. Inserts autocommit.
#[derive(Debug, Clone)]
pub struct RelationalStore {
    path: PathBuf,
}

impl RelationalStore {
    /// Create a store backed by the database file at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Get the path to the database file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open a connection with the schema in place.
    fn connect(&self) -> Result<Connection> {
        ensure_parent_dir(&self.path)?;

        debug!("Opening database at {}", self.path.display());
        let conn = Connection::open(&self.path).map_err(|source| Error::DatabaseOpen {
            path: self.path.clone(),
            source,
        })?;
        schema::initialize_schema(&conn)?;
        Ok(conn)
    }

    /// Create the table if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or the schema
    /// statement fails.
    pub fn ensure_schema(&self) -> Result<()> {
        self.connect().map(drop)
    }

    /// Insert one registration and return its assigned id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn insert(&self, registration: &Registration) -> Result<i64> {
        let conn = self.connect()?;
        conn.execute(INSERT_REGISTRATION, registration.values())?;

        let id = conn.last_insert_rowid();
        debug!("Inserted registration with id {}", id);
        Ok(id)
    }

    /// Get a registration by its id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn get(&self, id: i64) -> Result<Option<StoredRegistration>> {
        let conn = self.connect()?;
        let sql = format!("SELECT {SELECT_COLUMNS} FROM registrations WHERE id = ?1");
        let result = conn
            .query_row(&sql, [id], Self::row_to_registration)
            .optional()?;
        Ok(result)
    }

    /// Get the most recent registrations, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn list(&self, limit: usize) -> Result<Vec<StoredRegistration>> {
        let conn = self.connect()?;
        let sql = format!("SELECT {SELECT_COLUMNS} FROM registrations ORDER BY id DESC LIMIT ?1");
        let mut stmt = conn.prepare(&sql)?;

        let limit_i64 = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows = stmt
            .query_map(params![limit_i64], Self::row_to_registration)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(rows)
    }

    /// Count stored registrations.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn count(&self) -> Result<i64> {
        let conn = self.connect()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM registrations", [], |row| {
            row.get(0)
        })?;
        Ok(count)
    }

    /// Count stored registrations without creating anything on disk.
    ///
    /// A missing database file or a missing table counts as zero. The
    /// connection is opened read-only.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be opened or queried.
    pub fn stored_count(&self) -> Result<i64> {
        if !self.path.exists() {
            return Ok(0);
        }

        let conn = Connection::open_with_flags(&self.path, OpenFlags::SQLITE_OPEN_READ_ONLY)
            .map_err(|source| Error::DatabaseOpen {
                path: self.path.clone(),
                source,
            })?;
        let has_table: bool = conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'registrations')",
            [],
            |row| row.get(0),
        )?;
        if !has_table {
            return Ok(0);
        }

        let count: i64 = conn.query_row("SELECT COUNT(*) FROM registrations", [], |row| {
            row.get(0)
        })?;
        Ok(count)
    }

    /// Whether the table holds at least one registration.
    ///
    /// Database errors are logged and read as `false`. Nothing is created
    /// on disk.
    #[must_use]
    pub fn is_populated(&self) -> bool {
        match self.stored_count() {
            Ok(count) => count > 0,
            Err(e) => {
                warn!(error = %e, "Could not count registrations");
                false
            }
        }
    }

    /// Convert a database row to a stored registration.
    fn row_to_registration(row: &rusqlite::Row) -> rusqlite::Result<StoredRegistration> {
        let id: i64 = row.get(0)?;
        let text = |i: usize| -> rusqlite::Result<String> {
            Ok(row.get::<_, Option<String>>(i)?.unwrap_or_default())
        };

        let form = RegistrationForm {
            full_name: text(1)?,
            email: text(2)?,
            student_id: text(3)?,
            phone: text(4)?,
            year_of_study: text(5)?,
            faculty: text(6)?,
        };

        Ok(StoredRegistration {
            id,
            registration: Registration::from_form_unchecked(form),
        })
    }
}

impl RegistrationSink for RelationalStore {
    fn kind(&self) -> StoreKind {
        StoreKind::Relational
    }

    fn prepare(&self) -> Result<()> {
        self.ensure_schema()
    }

    fn write(&self, registration: &Registration) -> Result<WriteReceipt> {
        let id = self.insert(registration)?;
        Ok(WriteReceipt::Inserted { id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_store() -> (tempfile::TempDir, RelationalStore) {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let store = RelationalStore::new(dir.path().join("registrations.db"));
        (dir, store)
    }

    fn registration(student_id: &str) -> Registration {
        Registration::from_form_unchecked(RegistrationForm {
            full_name: "Ana Lee".to_string(),
            email: "ana@x.edu".to_string(),
            student_id: student_id.to_string(),
            phone: "0123456789".to_string(),
            year_of_study: "2".to_string(),
            faculty: "Faculty of Computing".to_string(),
        })
    }

    #[test]
    fn test_ensure_schema_creates_file() {
        let (_dir, store) = create_test_store();
        assert!(!store.path().exists());

        store.ensure_schema().unwrap();
        store.ensure_schema().unwrap();
        assert!(store.path().exists());
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn test_insert_and_get() {
        let (_dir, store) = create_test_store();

        let id = store.insert(&registration("S123")).unwrap();
        let stored = store.get(id).unwrap().unwrap();

        assert_eq!(stored.id, id);
        assert_eq!(stored.registration, registration("S123"));
    }

    #[test]
    fn test_get_nonexistent() {
        let (_dir, store) = create_test_store();
        assert!(store.get(99_999).unwrap().is_none());
    }

    #[test]
    fn test_ids_strictly_increase() {
        let (_dir, store) = create_test_store();

        let ids: Vec<i64> = (0..5)
            .map(|i| store.insert(&registration(&format!("S{i}"))).unwrap())
            .collect();

        assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn test_duplicates_are_kept() {
        let (_dir, store) = create_test_store();

        let first = store.insert(&registration("S123")).unwrap();
        let second = store.insert(&registration("S123")).unwrap();

        assert_ne!(first, second);
        assert_eq!(store.count().unwrap(), 2);
    }

    #[test]
    fn test_list_newest_first_with_limit() {
        let (_dir, store) = create_test_store();
        for i in 0..4 {
            store.insert(&registration(&format!("S{i}"))).unwrap();
        }

        let listed = store.list(3).unwrap();
        let ids: Vec<&str> = listed
            .iter()
            .map(|s| s.registration.student_id())
            .collect();
        assert_eq!(ids, vec!["S3", "S2", "S1"]);
    }

    #[test]
    fn test_is_populated() {
        let (_dir, store) = create_test_store();
        assert!(!store.is_populated());

        store.insert(&registration("S123")).unwrap();
        assert!(store.is_populated());
    }

    #[test]
    fn test_stored_count_leaves_disk_untouched() {
        let (_dir, store) = create_test_store();

        assert_eq!(store.stored_count().unwrap(), 0);
        assert!(!store.is_populated());
        assert!(!store.path().exists());

        store.insert(&registration("S123")).unwrap();
        store.insert(&registration("S124")).unwrap();
        assert_eq!(store.stored_count().unwrap(), 2);
    }

    #[test]
    fn test_stored_count_without_table_is_zero() {
        let (_dir, store) = create_test_store();
        Connection::open(store.path())
            .unwrap()
            .execute_batch("CREATE TABLE unrelated (x INTEGER)")
            .unwrap();
        assert!(store.path().exists());

        assert_eq!(store.stored_count().unwrap(), 0);
        assert!(!store.is_populated());
    }

    #[test]
    fn test_stored_count_on_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let store = RelationalStore::new(dir.path());
        assert!(store.stored_count().is_err());
    }

    #[test]
    fn test_is_populated_false_on_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = RelationalStore::new(dir.path());
        assert!(!store.is_populated());
    }

    #[test]
    fn test_insert_into_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let store = RelationalStore::new(dir.path());

        let err = store.insert(&registration("S123")).unwrap_err();
        assert!(err.is_storage_error());
    }

    #[test]
    fn test_sink_receipt_carries_id() {
        let (_dir, store) = create_test_store();

        assert_eq!(store.kind(), StoreKind::Relational);
        store.prepare().unwrap();
        let receipt = store.write(&registration("S123")).unwrap();
        assert_eq!(receipt, WriteReceipt::Inserted { id: 1 });
    }
}
