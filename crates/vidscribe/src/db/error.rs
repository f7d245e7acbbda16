//! Storage error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the persistence layer.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Underlying SQLite failure.
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Filesystem failure while preparing the database location.
    #[error("IO error for path '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A schema migration could not be applied.
    #[error("Migration failed at version {version}: {reason}")]
    Migration { version: u32, reason: String },

    /// The connection lock was poisoned by a panicking holder.
    #[error("Database lock poisoned")]
    LockPoisoned,
}
