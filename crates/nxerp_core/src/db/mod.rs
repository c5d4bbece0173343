//! SQLite storage bootstrap and schema entry points.
//!
//! # Responsibility
//! - Open and configure short-lived SQLite connections for one database file.
//! - Create and verify per-entity tables and indexes.
//!
//! # Invariants
//! - Storage failures surface as [`StorageError`] and are never retried here.
//! - Connections are owned by a single repository operation and dropped when
//!   it returns.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod open;
pub mod schema;

pub use open::open_db;

pub type StorageResult<T> = Result<T, StorageError>;

/// How an existing table differs from its required definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaIssue {
    MissingColumn,
    /// The key column compares case-sensitively.
    CaseSensitiveKey,
}

/// Storage-layer failure for repository operations.
#[derive(Debug)]
pub enum StorageError {
    /// Database directory could not be created.
    Io(std::io::Error),
    /// SQLite reported an error.
    Sqlite(rusqlite::Error),
    /// An existing table does not match the definition this build requires.
    SchemaMismatch {
        table: &'static str,
        column: &'static str,
        issue: SchemaIssue,
    },
    /// A persisted value cannot be decoded into its domain type.
    InvalidData(String),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "storage i/o failure: {err}"),
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::SchemaMismatch {
                table,
                column,
                issue: SchemaIssue::MissingColumn,
            } => write!(
                f,
                "table `{table}` exists but is missing required column `{column}`"
            ),
            Self::SchemaMismatch {
                table,
                column,
                issue: SchemaIssue::CaseSensitiveKey,
            } => write!(
                f,
                "table `{table}` exists but column `{column}` is not declared COLLATE NOCASE"
            ),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Sqlite(err) => Some(err),
            Self::SchemaMismatch { .. } => None,
            Self::InvalidData(_) => None,
        }
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

impl From<std::io::Error> for StorageError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}
