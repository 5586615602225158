//! # liftlog
//!
//! Local-first workout tracker.
//!
//! liftlog stores a training plan (programs, weeks, days, and an exercise
//! library), logs workout sessions and their sets, and keeps a per-exercise
//! last-weight cache that feeds a progressive-overload suggestion. All data
//! lives in one local `SQLite` file and can round-trip through a JSON backup.
//!
//! ## Features
//!
//! - **Plan modeling**: programs own weeks, weeks own days, days reference a
//!   shared exercise library
//! - **Session logging**: append-only sets with an optional weight
//! - **`SQLite` Storage**: durable CRUD with secondary-index lookup and
//!   atomic import
//! - **Backup**: whole-database JSON export/import

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
#![warn(unsafe_code)]

pub mod cli;
pub mod core;
pub mod error;
pub mod storage;

// Re-export commonly used types at crate root
pub use error::{Error, Result};

// Re-export core domain types
pub use core::{
    Day, Exercise, LastWeight, PROGRESSION_FACTOR, Program, Session, SetEntry, Week, new_id,
    suggest, suggested_next_weight,
};

// Re-export storage types
pub use storage::{
    Collection, DEFAULT_DB_PATH, Dump, Record, SecondaryIndex, SqliteStore, Store, StoreStats,
};

// Re-export CLI types
pub use cli::{Cli, Commands, OutputFormat, execute};
