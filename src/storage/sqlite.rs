//! `SQLite` storage implementation.
//!
//! Each collection is a document table (`id`, `body`) holding the record's
//! JSON, with secondary indexes over `json_extract` expressions. rusqlite
//! serializes at the connection, so every operation — and the whole
//! `import_all` batch — is an atomic unit; readers never observe a
//! partially applied import.

use crate::error::{ImportError, Result, StorageError};
use crate::storage::dump::Dump;
use crate::storage::schema::{
    CHECK_SCHEMA_SQL, CURRENT_SCHEMA_VERSION, GET_VERSION_SQL, SCHEMA_SQL, SET_VERSION_SQL,
};
use crate::storage::traits::{Collection, Record, SecondaryIndex, Store, StoreStats};
use rusqlite::{Connection, OptionalExtension, params};
use std::path::{Path, PathBuf};

/// SQLite-backed store.
///
/// # Examples
///
/// ```no_run
/// use liftlog::storage::{SqliteStore, Store};
///
/// let mut store = SqliteStore::open("liftlog.db").unwrap();
/// store.init().unwrap();
/// ```
pub struct SqliteStore {
    /// `SQLite` connection.
    conn: Connection,
    /// Path to the database file (None for in-memory).
    path: Option<PathBuf>,
}

impl SqliteStore {
    /// Opens or creates a `SQLite` database at the given path.
    ///
    /// # Errors
    ///
    /// Fails with `StorageError::Unavailable` if the database cannot be
    /// opened — blocked path, exhausted quota, corrupt file. This is fatal
    /// to all operations until resolved externally; nothing is retried.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent)
                .map_err(|e| StorageError::Unavailable(e.to_string()))?;
        }

        let conn =
            Connection::open(&path).map_err(|e| StorageError::Unavailable(e.to_string()))?;

        // WAL mode for better concurrent access (returns a result row)
        let _: String = conn
            .query_row("PRAGMA journal_mode = WAL;", [], |row| row.get(0))
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;

        Ok(Self {
            conn,
            path: Some(path),
        })
    }

    /// Creates an in-memory database. Useful for testing.
    ///
    /// # Errors
    ///
    /// Fails with `StorageError::Unavailable` if the database cannot be
    /// created.
    pub fn in_memory() -> Result<Self> {
        let conn =
            Connection::open_in_memory().map_err(|e| StorageError::Unavailable(e.to_string()))?;
        Ok(Self { conn, path: None })
    }

    /// Returns the database path (None for in-memory).
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Gets the current schema version.
    fn schema_version(&self) -> Result<Option<u32>> {
        let version: Option<String> = self
            .conn
            .query_row(GET_VERSION_SQL, [], |row| row.get(0))
            .optional()
            .map_err(StorageError::from)?;

        Ok(version.and_then(|v| v.parse().ok()))
    }

    /// Stamps the schema version.
    fn set_schema_version(&self, version: u32) -> Result<()> {
        self.conn
            .execute(SET_VERSION_SQL, params![version.to_string()])
            .map_err(StorageError::from)?;
        Ok(())
    }

    /// Counts rows in a collection table.
    fn count(&self, collection: Collection) -> Result<usize> {
        let sql = format!("SELECT COUNT(*) FROM {}", collection.table());
        let count: i64 = self
            .conn
            .query_row(&sql, [], |row| row.get(0))
            .map_err(StorageError::from)?;
        usize::try_from(count).map_err(|e| StorageError::Database(e.to_string()).into())
    }
}

/// Runs a body-column query and deserializes each row into `R`.
fn collect_records<R: Record, P: rusqlite::Params>(
    conn: &Connection,
    sql: &str,
    query_params: P,
) -> Result<Vec<R>> {
    let mut stmt = conn.prepare(sql).map_err(StorageError::from)?;
    let bodies = stmt
        .query_map(query_params, |row| row.get::<_, String>(0))
        .map_err(StorageError::from)?
        .collect::<std::result::Result<Vec<String>, _>>()
        .map_err(StorageError::from)?;

    bodies
        .iter()
        .map(|body| {
            serde_json::from_str(body)
                .map_err(|e| StorageError::Serialization(e.to_string()).into())
        })
        .collect()
}

/// Reads a whole collection; used by `all` and `export_all`.
fn read_collection<R: Record>(conn: &Connection) -> Result<Vec<R>> {
    let sql = format!("SELECT body FROM {}", R::COLLECTION.table());
    collect_records(conn, &sql, [])
}

/// Upserts a batch of records inside an import transaction.
fn import_collection<R: Record>(conn: &Connection, records: &[R]) -> Result<()> {
    if records.is_empty() {
        return Ok(());
    }

    let sql = format!(
        "INSERT OR REPLACE INTO {} (id, body) VALUES (?, ?)",
        R::COLLECTION.table()
    );
    let mut stmt = conn
        .prepare(&sql)
        .map_err(|e| ImportError::Transaction(e.to_string()))?;

    for record in records {
        let body = serde_json::to_string(record)
            .map_err(|e| ImportError::Transaction(e.to_string()))?;
        stmt.execute(params![record.key(), body])
            .map_err(|e| ImportError::Transaction(e.to_string()))?;
    }

    Ok(())
}

impl Store for SqliteStore {
    fn init(&mut self) -> Result<()> {
        let is_init: i64 = self
            .conn
            .query_row(CHECK_SCHEMA_SQL, [], |row| row.get(0))
            .map_err(StorageError::from)?;

        if is_init == 0 {
            // Fresh database - create all tables and indexes
            self.conn
                .execute_batch(SCHEMA_SQL)
                .map_err(StorageError::from)?;
            self.set_schema_version(CURRENT_SCHEMA_VERSION)?;
            tracing::debug!(version = CURRENT_SCHEMA_VERSION, "schema created");
            return Ok(());
        }

        // Already initialized - only version 1 exists, so anything else
        // was written by a different build.
        match self.schema_version()? {
            Some(CURRENT_SCHEMA_VERSION) => Ok(()),
            Some(version) => Err(StorageError::Migration(format!(
                "unsupported schema version {version} (this build supports {CURRENT_SCHEMA_VERSION})"
            ))
            .into()),
            None => {
                self.set_schema_version(CURRENT_SCHEMA_VERSION)?;
                Ok(())
            }
        }
    }

    fn is_initialized(&self) -> Result<bool> {
        let count: i64 = self
            .conn
            .query_row(CHECK_SCHEMA_SQL, [], |row| row.get(0))
            .map_err(StorageError::from)?;
        Ok(count > 0)
    }

    fn reset(&mut self) -> Result<()> {
        // Children before parents
        for collection in Collection::ALL.iter().rev() {
            let sql = format!("DELETE FROM {}", collection.table());
            self.conn.execute(&sql, []).map_err(StorageError::from)?;
        }
        Ok(())
    }

    fn add<R: Record>(&mut self, record: &R) -> Result<()> {
        let body = serde_json::to_string(record).map_err(StorageError::from)?;
        let sql = format!(
            "INSERT INTO {} (id, body) VALUES (?, ?)",
            R::COLLECTION.table()
        );

        self.conn
            .execute(&sql, params![record.key(), body])
            .map_err(|e| match e {
                rusqlite::Error::SqliteFailure(f, _)
                    if f.code == rusqlite::ErrorCode::ConstraintViolation =>
                {
                    StorageError::Constraint {
                        collection: R::COLLECTION,
                        id: record.key().to_string(),
                    }
                }
                other => StorageError::Database(other.to_string()),
            })?;

        tracing::debug!(collection = %R::COLLECTION, id = record.key(), "add");
        Ok(())
    }

    fn put<R: Record>(&mut self, record: &R) -> Result<()> {
        let body = serde_json::to_string(record).map_err(StorageError::from)?;
        let sql = format!(
            "INSERT OR REPLACE INTO {} (id, body) VALUES (?, ?)",
            R::COLLECTION.table()
        );

        self.conn
            .execute(&sql, params![record.key(), body])
            .map_err(StorageError::from)?;

        tracing::debug!(collection = %R::COLLECTION, id = record.key(), "put");
        Ok(())
    }

    fn get<R: Record>(&self, id: &str) -> Result<Option<R>> {
        let sql = format!("SELECT body FROM {} WHERE id = ?", R::COLLECTION.table());
        let body: Option<String> = self
            .conn
            .query_row(&sql, params![id], |row| row.get(0))
            .optional()
            .map_err(StorageError::from)?;

        match body {
            Some(json) => {
                let record = serde_json::from_str(&json).map_err(StorageError::from)?;
                Ok(Some(record))
            }
            None => Ok(None),
        }
    }

    fn delete(&mut self, collection: Collection, id: &str) -> Result<()> {
        // No-op success when the id is absent
        let sql = format!("DELETE FROM {} WHERE id = ?", collection.table());
        self.conn
            .execute(&sql, params![id])
            .map_err(StorageError::from)?;

        tracing::debug!(collection = %collection, id, "delete");
        Ok(())
    }

    fn all<R: Record>(&self) -> Result<Vec<R>> {
        read_collection(&self.conn)
    }

    fn query_by_index<R: Record>(&self, index: SecondaryIndex, key: &str) -> Result<Vec<R>> {
        if index.collection() != R::COLLECTION {
            return Err(StorageError::IndexMismatch {
                index,
                collection: R::COLLECTION,
            }
            .into());
        }

        let sql = format!(
            "SELECT body FROM {} WHERE json_extract(body, '{}') = ?",
            R::COLLECTION.table(),
            index.json_path()
        );
        collect_records(&self.conn, &sql, params![key])
    }

    fn export_all(&self) -> Result<Dump> {
        // Read-only transaction so all seven collection dumps come from
        // one point in time; rolled back on drop.
        let tx = self
            .conn
            .unchecked_transaction()
            .map_err(StorageError::from)?;

        let dump = Dump {
            programs: read_collection(&tx)?,
            weeks: read_collection(&tx)?,
            days: read_collection(&tx)?,
            exercises: read_collection(&tx)?,
            sessions: read_collection(&tx)?,
            sets: read_collection(&tx)?,
            last_weight: read_collection(&tx)?,
        };

        Ok(dump)
    }

    fn import_all(&mut self, dump: &Dump) -> Result<()> {
        let tx = self
            .conn
            .transaction()
            .map_err(|e| ImportError::Transaction(e.to_string()))?;

        import_collection(&tx, &dump.programs)?;
        import_collection(&tx, &dump.weeks)?;
        import_collection(&tx, &dump.days)?;
        import_collection(&tx, &dump.exercises)?;
        import_collection(&tx, &dump.sessions)?;
        import_collection(&tx, &dump.sets)?;
        import_collection(&tx, &dump.last_weight)?;

        tx.commit()
            .map_err(|e| ImportError::Transaction(e.to_string()))?;

        tracing::debug!(records = dump.record_count(), "import committed");
        Ok(())
    }

    fn stats(&self) -> Result<StoreStats> {
        let schema_version = self.schema_version()?.unwrap_or(0);
        let db_size = self
            .path
            .as_ref()
            .and_then(|p| std::fs::metadata(p).ok().map(|m| m.len()));

        Ok(StoreStats {
            programs: self.count(Collection::Programs)?,
            weeks: self.count(Collection::Weeks)?,
            days: self.count(Collection::Days)?,
            exercises: self.count(Collection::Exercises)?,
            sessions: self.count(Collection::Sessions)?,
            sets: self.count(Collection::Sets)?,
            last_weights: self.count(Collection::LastWeight)?,
            schema_version,
            db_size,
        })
    }
}
