//! Error types for liftlog operations.
//!
//! This module provides the error hierarchy using `thiserror` for all
//! liftlog operations including storage, import/export, and CLI commands.

use crate::storage::{Collection, SecondaryIndex};
use thiserror::Error;

/// Result type alias for liftlog operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for liftlog operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Storage-related errors (database operations).
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Import/export errors (backup documents).
    #[error("import error: {0}")]
    Import(#[from] ImportError),

    /// CLI command errors.
    #[error("command error: {0}")]
    Command(#[from] CommandError),
}

/// Storage-specific errors for database operations.
#[derive(Error, Debug)]
pub enum StorageError {
    /// A record with the same id already exists in the collection.
    ///
    /// Raised only by `add`; the caller may recover by switching to `put`
    /// or minting a fresh id.
    #[error("duplicate id in {collection}: {id}")]
    Constraint {
        /// Collection that rejected the insert.
        collection: Collection,
        /// The duplicate record id.
        id: String,
    },

    /// The underlying engine could not be opened (blocked path, quota,
    /// corrupt file). Fatal to all operations until resolved externally.
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// Database connection or query error.
    #[error("database error: {0}")]
    Database(String),

    /// Storage not initialized (init command not run).
    #[error("database not initialized. Run: liftlog init")]
    NotInitialized,

    /// Schema version error. Only schema version 1 exists; anything newer
    /// was written by a different build.
    #[error("migration error: {0}")]
    Migration(String),

    /// Record serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// A secondary index was queried against the wrong record type.
    #[error("index {index} does not cover collection {collection}")]
    IndexMismatch {
        /// The index that was queried.
        index: SecondaryIndex,
        /// The collection the caller asked for.
        collection: Collection,
    },
}

/// Errors raised by bulk import of a backup document.
#[derive(Error, Debug)]
pub enum ImportError {
    /// The input document is not parseable JSON (or not the expected
    /// shape). Surfaced before any write.
    #[error("malformed import document: {0}")]
    Parse(String),

    /// The import transaction failed mid-flight. All changes were rolled
    /// back; the store's visible state is unchanged.
    #[error("import transaction failed, no changes applied: {0}")]
    Transaction(String),
}

/// CLI command-specific errors.
#[derive(Error, Debug)]
pub enum CommandError {
    /// Invalid argument provided.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A referenced record does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Command execution failed.
    #[error("command execution failed: {0}")]
    ExecutionFailed(String),

    /// User declined or skipped confirmation.
    #[error("operation cancelled by user")]
    Cancelled,
}

// Implement From traits for library errors

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        Self::Storage(StorageError::Database(err.to_string()))
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Command(CommandError::ExecutionFailed(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constraint_display() {
        let err = StorageError::Constraint {
            collection: Collection::Programs,
            id: "prog_abc".to_string(),
        };
        assert_eq!(err.to_string(), "duplicate id in programs: prog_abc");
    }

    #[test]
    fn test_storage_error_display() {
        let err = StorageError::NotInitialized;
        assert_eq!(
            err.to_string(),
            "database not initialized. Run: liftlog init"
        );

        let err = StorageError::Unavailable("disk full".to_string());
        assert!(err.to_string().contains("disk full"));

        let err = StorageError::Migration("schema version 9".to_string());
        assert!(err.to_string().contains("schema version 9"));
    }

    #[test]
    fn test_index_mismatch_display() {
        let err = StorageError::IndexMismatch {
            index: SecondaryIndex::WeeksByProgram,
            collection: Collection::Days,
        };
        assert!(err.to_string().contains("by_program"));
        assert!(err.to_string().contains("days"));
    }

    #[test]
    fn test_import_error_display() {
        let err = ImportError::Parse("expected value at line 1".to_string());
        assert!(err.to_string().contains("malformed"));

        let err = ImportError::Transaction("disk I/O error".to_string());
        assert!(err.to_string().contains("no changes applied"));
    }

    #[test]
    fn test_error_from_storage() {
        let err: Error = StorageError::NotInitialized.into();
        assert!(matches!(err, Error::Storage(_)));
    }

    #[test]
    fn test_error_from_import() {
        let err: Error = ImportError::Parse("bad".to_string()).into();
        assert!(matches!(err, Error::Import(_)));
    }

    #[test]
    fn test_error_from_command() {
        let err: Error = CommandError::Cancelled.into();
        assert!(matches!(err, Error::Command(_)));
    }

    #[test]
    fn test_from_rusqlite_error() {
        let err: StorageError = rusqlite::Error::InvalidQuery.into();
        assert!(matches!(err, StorageError::Database(_)));
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<i32>("oops").unwrap_err();
        let err: StorageError = json_err.into();
        assert!(matches!(err, StorageError::Serialization(_)));
    }
}
