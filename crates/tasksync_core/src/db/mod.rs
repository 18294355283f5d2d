//! SQLite storage bootstrap for snapshot persistence.
//!
//! # Responsibility
//! - Open and configure SQLite connections backing the key-value store.
//! - Apply schema migrations in deterministic order.
//!
//! # Invariants
//! - Schema version is tracked via `PRAGMA user_version`.
//! - No key-value access happens before migrations succeed.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Failures of the SQLite layer under the key-value store.
#[derive(Debug)]
pub enum DbError {
    /// The database could not be opened at all.
    Open {
        mode: &'static str,
        source: rusqlite::Error,
    },
    /// Schema step `version` failed; nothing from this run was committed.
    Migration {
        version: u32,
        source: rusqlite::Error,
    },
    /// The file was last migrated by a newer build.
    SchemaTooNew { found: u32, supported: u32 },
    /// A key-value read or write failed on an open connection.
    Statement(rusqlite::Error),
}

impl DbError {
    /// Stable code used in `error_code=` log fields.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Open { .. } => "db_open_failed",
            Self::Migration { .. } => "db_migration_failed",
            Self::SchemaTooNew { .. } => "db_schema_too_new",
            Self::Statement(_) => "db_statement_failed",
        }
    }
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open { mode, source } => write!(f, "cannot open {mode} task store: {source}"),
            Self::Migration { version, source } => {
                write!(f, "task store migration {version} failed: {source}")
            }
            Self::SchemaTooNew { found, supported } => write!(
                f,
                "task store schema {found} was written by a newer build (this build reads up to {supported})"
            ),
            Self::Statement(source) => write!(f, "task store statement failed: {source}"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Open { source, .. }
            | Self::Migration { source, .. }
            | Self::Statement(source) => Some(source),
            Self::SchemaTooNew { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Statement(value)
    }
}
