//! Store trait and collection vocabulary.
//!
//! Defines the narrow interface the rest of the application consumes:
//! CRUD plus secondary-index lookup over a fixed set of collections, and
//! whole-database export/import. The trait keeps the storage engine
//! pluggable; `SqliteStore` is the only implementation today.

use crate::core::{Day, Exercise, LastWeight, Program, Session, SetEntry, Week};
use crate::error::Result;
use crate::storage::dump::Dump;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt;

/// The fixed set of record collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    /// Training plan roots.
    Programs,
    /// Ordered subdivisions of a program.
    Weeks,
    /// Workout days within a week.
    Days,
    /// Global exercise library.
    Exercises,
    /// Logged workout sessions.
    Sessions,
    /// Set log entries.
    Sets,
    /// Last-known-weight projection, keyed by exercise id.
    LastWeight,
}

impl Collection {
    /// All collections, parents before children.
    pub const ALL: [Self; 7] = [
        Self::Programs,
        Self::Weeks,
        Self::Days,
        Self::Exercises,
        Self::Sessions,
        Self::Sets,
        Self::LastWeight,
    ];

    /// The backing table name.
    #[must_use]
    pub const fn table(self) -> &'static str {
        match self {
            Self::Programs => "programs",
            Self::Weeks => "weeks",
            Self::Days => "days",
            Self::Exercises => "exercises",
            Self::Sessions => "sessions",
            Self::Sets => "sets",
            Self::LastWeight => "last_weight",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table())
    }
}

/// Secondary indexes available for equality lookup.
///
/// Each index belongs to exactly one collection; querying it with a
/// mismatched record type is a `StorageError::IndexMismatch`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecondaryIndex {
    /// Weeks by `programId`.
    WeeksByProgram,
    /// Days by `weekId`.
    DaysByWeek,
    /// Sessions by `dayId`.
    SessionsByDay,
    /// Sets by `sessionId`.
    SetsBySession,
    /// Sets by `exerciseId`.
    SetsByExercise,
}

impl SecondaryIndex {
    /// The collection this index covers.
    #[must_use]
    pub const fn collection(self) -> Collection {
        match self {
            Self::WeeksByProgram => Collection::Weeks,
            Self::DaysByWeek => Collection::Days,
            Self::SessionsByDay => Collection::Sessions,
            Self::SetsBySession | Self::SetsByExercise => Collection::Sets,
        }
    }

    /// JSON path of the indexed field inside the record body.
    #[must_use]
    pub(crate) const fn json_path(self) -> &'static str {
        match self {
            Self::WeeksByProgram => "$.programId",
            Self::DaysByWeek => "$.weekId",
            Self::SessionsByDay => "$.dayId",
            Self::SetsBySession => "$.sessionId",
            Self::SetsByExercise => "$.exerciseId",
        }
    }
}

impl fmt::Display for SecondaryIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::WeeksByProgram => "by_program",
            Self::DaysByWeek => "by_week",
            Self::SessionsByDay => "by_day",
            Self::SetsBySession => "by_session",
            Self::SetsByExercise => "by_exercise",
        };
        f.write_str(name)
    }
}

/// Binds a domain type to its collection and record key.
pub trait Record: Serialize + DeserializeOwned {
    /// The collection this record type lives in.
    const COLLECTION: Collection;

    /// The unique key of this record within its collection.
    fn key(&self) -> &str;
}

impl Record for Program {
    const COLLECTION: Collection = Collection::Programs;

    fn key(&self) -> &str {
        &self.id
    }
}

impl Record for Week {
    const COLLECTION: Collection = Collection::Weeks;

    fn key(&self) -> &str {
        &self.id
    }
}

impl Record for Day {
    const COLLECTION: Collection = Collection::Days;

    fn key(&self) -> &str {
        &self.id
    }
}

impl Record for Exercise {
    const COLLECTION: Collection = Collection::Exercises;

    fn key(&self) -> &str {
        &self.id
    }
}

impl Record for Session {
    const COLLECTION: Collection = Collection::Sessions;

    fn key(&self) -> &str {
        &self.id
    }
}

impl Record for SetEntry {
    const COLLECTION: Collection = Collection::Sets;

    fn key(&self) -> &str {
        &self.id
    }
}

impl Record for LastWeight {
    const COLLECTION: Collection = Collection::LastWeight;

    // Singleton per exercise; the exercise id is the record key.
    fn key(&self) -> &str {
        &self.exercise_id
    }
}

/// Trait for the local relational store.
///
/// All operations are atomic units with respect to the collections they
/// touch; `import_all` spans every collection in one transaction. No
/// operation is retried internally, and there is no cancellation — each
/// call runs to completion or failure.
pub trait Store {
    /// Initializes storage (creates tables and indexes, stamps the schema
    /// version).
    ///
    /// Idempotent: reopening an already-initialized store is a no-op. A
    /// stored schema version newer than this build fails with a migration
    /// error.
    ///
    /// # Errors
    ///
    /// Returns an error if schema creation fails or the version check
    /// rejects the existing database.
    fn init(&mut self) -> Result<()>;

    /// Checks if storage is initialized.
    ///
    /// # Errors
    ///
    /// Returns an error if the check cannot be performed.
    fn is_initialized(&self) -> Result<bool>;

    /// Deletes all records but preserves the schema.
    ///
    /// # Errors
    ///
    /// Returns an error if deletion fails.
    fn reset(&mut self) -> Result<()>;

    /// Inserts a new record.
    ///
    /// # Errors
    ///
    /// Fails with `StorageError::Constraint` if a record with the same id
    /// already exists in the collection.
    fn add<R: Record>(&mut self, record: &R) -> Result<()>;

    /// Inserts or fully replaces the record matching its id.
    ///
    /// The idempotent upsert path: never fails on duplicate, and replaces
    /// the whole record (no field merging).
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the database write fails.
    fn put<R: Record>(&mut self, record: &R) -> Result<()>;

    /// Retrieves a record by id.
    ///
    /// Returns `Ok(None)` for a missing key; a missing record is never an
    /// error.
    ///
    /// # Errors
    ///
    /// Returns an error if the query or deserialization fails.
    fn get<R: Record>(&self, id: &str) -> Result<Option<R>>;

    /// Removes the record with the given id if present.
    ///
    /// Succeeds as a no-op when the id is absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete statement fails.
    fn delete(&mut self, collection: Collection, id: &str) -> Result<()>;

    /// Returns every record in the collection. Order is not guaranteed.
    ///
    /// # Errors
    ///
    /// Returns an error if the query or deserialization fails.
    fn all<R: Record>(&self) -> Result<Vec<R>>;

    /// Returns every record whose indexed field equals `key`.
    ///
    /// Empty vec when nothing matches.
    ///
    /// # Errors
    ///
    /// Fails with `StorageError::IndexMismatch` if `index` does not cover
    /// `R`'s collection.
    fn query_by_index<R: Record>(&self, index: SecondaryIndex, key: &str) -> Result<Vec<R>>;

    /// Takes a snapshot of all collections for backup.
    ///
    /// # Errors
    ///
    /// Returns an error if any collection read fails.
    fn export_all(&self) -> Result<Dump>;

    /// Upserts every record from the dump inside one transaction spanning
    /// all collections.
    ///
    /// All-or-nothing: on failure everything is rolled back and partial
    /// application is never observable. Collections absent from the dump
    /// are left untouched.
    ///
    /// # Errors
    ///
    /// Fails with `ImportError::Transaction` on any mid-transaction
    /// failure.
    fn import_all(&mut self, dump: &Dump) -> Result<()>;

    /// Gets per-collection counts and schema info.
    ///
    /// # Errors
    ///
    /// Returns an error if a count query fails.
    fn stats(&self) -> Result<StoreStats>;
}

/// Store statistics, the `status` command surface.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StoreStats {
    /// Number of programs.
    pub programs: usize,
    /// Number of weeks.
    pub weeks: usize,
    /// Number of days.
    pub days: usize,
    /// Number of library exercises.
    pub exercises: usize,
    /// Number of logged sessions.
    pub sessions: usize,
    /// Number of logged sets.
    pub sets: usize,
    /// Number of last-weight cache entries.
    pub last_weights: usize,
    /// Schema version.
    pub schema_version: u32,
    /// Database file size in bytes (if file-backed).
    pub db_size: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_tables_unique() {
        let mut tables: Vec<_> = Collection::ALL.iter().map(|c| c.table()).collect();
        tables.sort_unstable();
        tables.dedup();
        assert_eq!(tables.len(), Collection::ALL.len());
    }

    #[test]
    fn test_index_collections() {
        assert_eq!(
            SecondaryIndex::WeeksByProgram.collection(),
            Collection::Weeks
        );
        assert_eq!(SecondaryIndex::SetsByExercise.collection(), Collection::Sets);
    }

    #[test]
    fn test_last_weight_keyed_by_exercise() {
        let lw = LastWeight {
            exercise_id: "ex_1".to_string(),
            weight: 80.0,
        };
        assert_eq!(lw.key(), "ex_1");
    }

    #[test]
    fn test_index_display() {
        assert_eq!(SecondaryIndex::WeeksByProgram.to_string(), "by_program");
        assert_eq!(SecondaryIndex::SetsBySession.to_string(), "by_session");
    }
}
