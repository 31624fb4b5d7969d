//! Append-only CSV store.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, WriterBuilder};
use tracing::debug;

use crate::error::{Error, Result};
use crate::registration::{Registration, RegistrationForm, FIELD_LABELS};

use super::{ensure_parent_dir, RegistrationSink, StoreKind, WriteReceipt};

/// A CSV file holding one row per accepted registration.
///
/// The header row is written only when the file is created. The file handle
/// is opened and closed inside each call.
#[derive(Debug, Clone)]
pub struct TabularStore {
    path: PathBuf,
}

impl TabularStore {
    /// Create a store backed by the file at `path`.
    ///
    /// Nothing is touched on disk until the first append.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Get the path to the CSV file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one registration.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or written.
    pub fn append(&self, registration: &Registration) -> Result<()> {
        ensure_parent_dir(&self.path)?;

        let is_new = !self.path.exists();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|source| Error::CsvOpen {
                path: self.path.clone(),
                source,
            })?;

        let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);
        if is_new {
            debug!("Creating CSV file at {}", self.path.display());
            writer.write_record(FIELD_LABELS)?;
        }
        writer.write_record(registration.values())?;
        writer.flush()?;

        Ok(())
    }

    /// Read every data row back.
    ///
    /// A missing file reads as empty. The first line is skipped only when it
    /// is the header row, since a file that existed before the first append
    /// holds data rows only.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be parsed.
    pub fn read_all(&self) -> Result<Vec<Registration>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(&self.path)?;

        let mut rows = Vec::new();
        for (index, record) in reader.records().enumerate() {
            let record = record?;
            if index == 0 && record.iter().eq(FIELD_LABELS) {
                continue;
            }
            let field = |i: usize| record.get(i).unwrap_or_default().to_string();
            rows.push(Registration::from_form_unchecked(RegistrationForm {
                full_name: field(0),
                email: field(1),
                student_id: field(2),
                phone: field(3),
                year_of_study: field(4),
                faculty: field(5),
            }));
        }
        Ok(rows)
    }

    /// Count data rows.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be parsed.
    pub fn count(&self) -> Result<usize> {
        Ok(self.read_all()?.len())
    }
}

impl RegistrationSink for TabularStore {
    fn kind(&self) -> StoreKind {
        StoreKind::Tabular
    }

    fn write(&self, registration: &Registration) -> Result<WriteReceipt> {
        self.append(registration)?;
        Ok(WriteReceipt::Appended)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registration(name: &str) -> Registration {
        Registration::from_form_unchecked(RegistrationForm {
            full_name: name.to_string(),
            email: "ana@x.edu".to_string(),
            student_id: "S123".to_string(),
            phone: "0123456789".to_string(),
            year_of_study: "2".to_string(),
            faculty: "Faculty of Computing".to_string(),
        })
    }

    #[test]
    fn test_missing_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = TabularStore::new(dir.path().join("registrations.csv"));
        assert!(store.read_all().unwrap().is_empty());
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn test_first_append_writes_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("registrations.csv");
        let store = TabularStore::new(&path);

        store.append(&registration("Ana Lee")).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = contents.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Full Name,Email,Student ID,Phone Number,Year of Study,Faculty",
                "Ana Lee,ana@x.edu,S123,0123456789,2,Faculty of Computing",
            ]
        );
    }

    #[test]
    fn test_n_appends_yield_one_header_and_n_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("registrations.csv");
        let store = TabularStore::new(&path);

        for i in 0..5 {
            store.append(&registration(&format!("Person {i}"))).unwrap();
        }

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = contents.lines().collect();
        assert_eq!(lines.len(), 6);
        assert_eq!(
            lines.iter().filter(|l| l.starts_with("Full Name,")).count(),
            1
        );

        let rows = store.read_all().unwrap();
        assert_eq!(rows.len(), 5);
        for (i, row) in rows.iter().enumerate() {
            assert_eq!(row.full_name(), format!("Person {i}"));
            assert_eq!(row.faculty(), "Faculty of Computing");
        }
    }

    #[test]
    fn test_existing_empty_file_gets_no_header_and_keeps_every_row() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("registrations.csv");
        std::fs::write(&path, "").unwrap();
        let store = TabularStore::new(&path);

        store.append(&registration("Ana Lee")).unwrap();
        store.append(&registration("Ben Ong")).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(!contents.contains("Full Name,"));
        assert_eq!(contents.lines().count(), 2);

        let rows = store.read_all().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].full_name(), "Ana Lee");
        assert_eq!(rows[1].full_name(), "Ben Ong");
        assert_eq!(store.count().unwrap(), 2);
    }

    #[test]
    fn test_values_with_commas_are_quoted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("registrations.csv");
        let store = TabularStore::new(&path);

        store.append(&registration("Lee, Ana")).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("\"Lee, Ana\""));
        assert_eq!(store.read_all().unwrap()[0].full_name(), "Lee, Ana");
    }

    #[test]
    fn test_append_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("out").join("registrations.csv");
        let store = TabularStore::new(&path);

        store.append(&registration("Ana Lee")).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_append_into_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let store = TabularStore::new(dir.path());

        let err = store.append(&registration("Ana Lee")).unwrap_err();
        assert!(err.is_storage_error());
    }

    #[test]
    fn test_sink_kind_and_receipt() {
        let dir = tempfile::tempdir().unwrap();
        let store = TabularStore::new(dir.path().join("registrations.csv"));

        assert_eq!(store.kind(), StoreKind::Tabular);
        let receipt = store.write(&registration("Ana Lee")).unwrap();
        assert_eq!(receipt, WriteReceipt::Appended);
    }
}
