//! Storage layer for regdesk.
//!
//! An accepted registration is written to two stores:
//!
//! - a [`TabularStore`]: an append-only CSV file with a header row, and
//! - a [`RelationalStore`]: a `SQLite` table that assigns a surrogate id.
//!
//! [`Persistence`] drives both writes in a fixed order (file, then database).
//! Each write is independent: a failure is logged, turned into a
//! [`StorageNotice`] for the participant, and the next write still runs.
//! The two writes are not transactional with each other, so a failure
//! between them leaves the record in one store only. Nothing is retried and
//! nothing is deduplicated.

pub mod relational;
pub mod schema;
pub mod tabular;

use std::fmt;
use std::path::Path;

use tracing::{error, info};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::registration::Registration;

pub use relational::RelationalStore;
pub use tabular::TabularStore;

/// Which of the two stores a write went to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreKind {
    /// The CSV file.
    Tabular,
    /// The `SQLite` table.
    Relational,
}

impl StoreKind {
    /// Prefix for the message shown to the participant when this store fails.
    #[must_use]
    pub fn notice_prefix(self) -> &'static str {
        match self {
            Self::Tabular => "Error saving to CSV",
            Self::Relational => "Database error",
        }
    }
}

impl fmt::Display for StoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tabular => write!(f, "csv"),
            Self::Relational => write!(f, "sqlite"),
        }
    }
}

/// What a successful write produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteReceipt {
    /// A row was appended to the CSV file.
    Appended,
    /// A row was inserted with the given surrogate id.
    Inserted {
        /// Id assigned by the database.
        id: i64,
    },
}

/// A destination for accepted registrations.
pub trait RegistrationSink: fmt::Debug {
    /// Which store this is.
    fn kind(&self) -> StoreKind;

    /// One-time setup run at startup. Must be idempotent.
    ///
    /// # Errors
    ///
    /// Returns an error if setup fails.
    fn prepare(&self) -> Result<()> {
        Ok(())
    }

    /// Write one registration.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn write(&self, registration: &Registration) -> Result<WriteReceipt>;
}

/// A non-fatal storage failure, ready to show to the participant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageNotice {
    /// The store that failed.
    pub store: StoreKind,
    /// Message text.
    pub message: String,
}

impl StorageNotice {
    fn from_error(store: StoreKind, err: &Error) -> Self {
        Self {
            store,
            message: format!("{}: {err}", store.notice_prefix()),
        }
    }
}

impl fmt::Display for StorageNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Result of writing one registration to every store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersistReport {
    /// Successful writes, in write order.
    pub receipts: Vec<(StoreKind, WriteReceipt)>,
    /// Failed writes, in write order.
    pub notices: Vec<StorageNotice>,
}

impl PersistReport {
    /// Whether every store accepted the record.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.notices.is_empty()
    }

    /// The surrogate id from the relational store, if that write succeeded.
    #[must_use]
    pub fn row_id(&self) -> Option<i64> {
        self.receipts.iter().find_map(|(_, receipt)| match receipt {
            WriteReceipt::Inserted { id } => Some(*id),
            WriteReceipt::Appended => None,
        })
    }
}

/// Writes accepted registrations to every configured store.
#[derive(Debug)]
pub struct Persistence {
    sinks: Vec<Box<dyn RegistrationSink>>,
}

impl Persistence {
    /// Create a writer over a CSV file and a `SQLite` database.
    #[must_use]
    pub fn new(csv_path: impl AsRef<Path>, database_path: impl AsRef<Path>) -> Self {
        let tabular: Box<dyn RegistrationSink> = Box::new(TabularStore::new(csv_path.as_ref()));
        let relational: Box<dyn RegistrationSink> =
            Box::new(RelationalStore::new(database_path.as_ref()));
        Self::with_sinks(vec![tabular, relational])
    }

    /// Create a writer using the store paths from the configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.csv_path(), config.database_path())
    }

    /// Create a writer over arbitrary sinks, written in the given order.
    #[must_use]
    pub fn with_sinks(sinks: Vec<Box<dyn RegistrationSink>>) -> Self {
        Self { sinks }
    }

    /// Run every sink's one-time setup.
    ///
    /// Failures are logged and returned as notices; they do not stop the
    /// remaining sinks from being prepared.
    #[must_use]
    pub fn prepare(&self) -> Vec<StorageNotice> {
        self.sinks
            .iter()
            .filter_map(|sink| match sink.prepare() {
                Ok(()) => None,
                Err(e) => {
                    error!(store = %sink.kind(), error = %e, "Store setup failed");
                    Some(StorageNotice::from_error(sink.kind(), &e))
                }
            })
            .collect()
    }

    /// Write the registration to every sink.
    ///
    /// Each write is attempted regardless of earlier failures.
    #[must_use]
    pub fn persist(&self, registration: &Registration) -> PersistReport {
        let mut report = PersistReport::default();

        for sink in &self.sinks {
            let kind = sink.kind();
            match sink.write(registration) {
                Ok(receipt) => {
                    info!(store = %kind, ?receipt, "Registration stored");
                    report.receipts.push((kind, receipt));
                }
                Err(e) => {
                    error!(store = %kind, error = %e, "Failed to store registration");
                    report.notices.push(StorageNotice::from_error(kind, &e));
                }
            }
        }

        report
    }
}

/// Create the parent directory of a store file if it is missing.
pub(crate) fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }
    Ok(())
}
