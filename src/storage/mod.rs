//! Storage layer for liftlog.
//!
//! The local relational store: durable, transactional CRUD over the
//! fixed set of record collections with secondary-index lookup, plus
//! whole-database export/import for backup and migration between
//! machines.

pub mod dump;
pub mod schema;
pub mod sqlite;
pub mod traits;

pub use dump::Dump;
pub use schema::CURRENT_SCHEMA_VERSION;
pub use sqlite::SqliteStore;
pub use traits::{Collection, Record, SecondaryIndex, Store, StoreStats};

/// Default database path relative to the working directory.
pub const DEFAULT_DB_PATH: &str = ".liftlog/liftlog.db";
