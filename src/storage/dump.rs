//! Backup document for export/import.
//!
//! A `Dump` is the interchange format for backup and migration between
//! machines: one JSON object whose top-level keys are the collection names,
//! each holding an array of full records. Unknown top-level keys are
//! ignored on import; missing keys leave the corresponding collection
//! untouched.

use crate::core::{Day, Exercise, LastWeight, Program, Session, SetEntry, Week};
use crate::error::ImportError;
use serde::{Deserialize, Serialize};

/// Whole-database snapshot in the JSON backup shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dump {
    /// Program records.
    #[serde(default)]
    pub programs: Vec<Program>,
    /// Week records.
    #[serde(default)]
    pub weeks: Vec<Week>,
    /// Day records.
    #[serde(default)]
    pub days: Vec<Day>,
    /// Exercise library records.
    #[serde(default)]
    pub exercises: Vec<Exercise>,
    /// Session records.
    #[serde(default)]
    pub sessions: Vec<Session>,
    /// Set log records.
    #[serde(default)]
    pub sets: Vec<SetEntry>,
    /// Last-weight projection records.
    #[serde(default, rename = "lastWeight")]
    pub last_weight: Vec<LastWeight>,
}

impl Dump {
    /// Parses a backup document from JSON text.
    ///
    /// # Errors
    ///
    /// Fails with `ImportError::Parse` on malformed JSON or records that
    /// do not match the expected shape, before any write happens.
    pub fn from_json(text: &str) -> Result<Self, ImportError> {
        serde_json::from_str(text).map_err(|e| ImportError::Parse(e.to_string()))
    }

    /// Serializes the dump as pretty-printed JSON, the backup file format.
    #[must_use]
    pub fn to_json_pretty(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }

    /// Total number of records across all collections.
    #[must_use]
    pub fn record_count(&self) -> usize {
        self.programs.len()
            + self.weeks.len()
            + self.days.len()
            + self.exercises.len()
            + self.sessions.len()
            + self.sets.len()
            + self.last_weight.len()
    }

    /// Whether the dump holds no records at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.record_count() == 0
    }
}
