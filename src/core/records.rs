//! Record types for the training-plan hierarchy and logged history.
//!
//! The hierarchy is Program → Week → Day; Days reference Exercises from a
//! global library by id. Sessions and Sets form the append-only workout
//! history, and `LastWeight` is a derived per-exercise cache feeding the
//! suggestion rule. Serde field names follow the JSON backup format exactly
//! (`programId`, `createdAt`, `dateISO`, ...), which is also the on-disk
//! document shape inside the store.

use crate::core::id::new_id;
use serde::{Deserialize, Serialize};

/// A named training plan, root of the Week/Day hierarchy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Program {
    /// Unique identifier (`prog_` prefix).
    pub id: String,
    /// Display name.
    pub name: String,
    /// Free-form notes.
    #[serde(default)]
    pub notes: String,
    /// Creation time, Unix milliseconds.
    pub created_at: i64,
}

/// An ordered subdivision of a Program.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Week {
    /// Unique identifier (`week_` prefix).
    pub id: String,
    /// Owning Program id. The store does not enforce the reference.
    pub program_id: String,
    /// Display label, e.g. "Week 1".
    pub label: String,
    /// Sort key. Creation time in Unix milliseconds, so insertion order is
    /// display order.
    pub order: i64,
}

/// A workout day within a Week, carrying an ordered exercise list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Day {
    /// Unique identifier (`day_` prefix).
    pub id: String,
    /// Owning Week id.
    pub week_id: String,
    /// Display label, e.g. "Push".
    pub label: String,
    /// Sort key, creation time in Unix milliseconds.
    pub order: i64,
    /// Ordered Exercise ids, duplicates forbidden. May contain ids of
    /// since-deleted exercises; those are filtered at read time.
    #[serde(default)]
    pub exercise_ids: Vec<String>,
}

/// A reusable named movement in the global library.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    /// Unique identifier (`ex_` prefix).
    pub id: String,
    /// Display name.
    pub name: String,
    /// Free-form notes.
    #[serde(default)]
    pub notes: String,
}

/// One real-world workout occurrence.
///
/// The plan references are nullable: a session may be started without a
/// full Program/Week/Day selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Unique identifier (`sess_` prefix).
    pub id: String,
    /// Start time as an RFC 3339 timestamp.
    #[serde(rename = "dateISO")]
    pub date_iso: String,
    /// Program the session was logged against, if any.
    pub program_id: Option<String>,
    /// Week the session was logged against, if any.
    pub week_id: Option<String>,
    /// Day the session was logged against, if any.
    pub day_id: Option<String>,
}

/// One logged reps-and-weight entry within a Session. Append-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetEntry {
    /// Unique identifier (`set_` prefix).
    pub id: String,
    /// Owning Session id.
    pub session_id: String,
    /// Exercise performed.
    pub exercise_id: String,
    /// Repetition count.
    pub reps: u32,
    /// Weight used. Absent for bodyweight sets.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    /// Log time, Unix milliseconds.
    pub timestamp: i64,
}

/// Derived last-known-weight cache, one record per exercise.
///
/// Overwritten whenever a Set with strictly positive weight is recorded.
/// Not authoritative history; only feeds the suggestion hint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LastWeight {
    /// Exercise this cache entry belongs to. Doubles as the record key.
    pub exercise_id: String,
    /// Weight of the most recent positive-weight set.
    pub weight: f64,
}

impl Program {
    /// Creates a new program with a fresh id.
    #[must_use]
    pub fn new(name: impl Into<String>, notes: impl Into<String>) -> Self {
        Self {
            id: new_id("prog"),
            name: name.into(),
            notes: notes.into(),
            created_at: now_millis(),
        }
    }
}

impl Week {
    /// Creates a new week under the given program.
    #[must_use]
    pub fn new(program_id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: new_id("week"),
            program_id: program_id.into(),
            label: label.into(),
            order: now_millis(),
        }
    }
}

impl Day {
    /// Creates a new day under the given week, with an empty exercise list.
    #[must_use]
    pub fn new(week_id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: new_id("day"),
            week_id: week_id.into(),
            label: label.into(),
            order: now_millis(),
            exercise_ids: Vec::new(),
        }
    }

    /// Appends an exercise id, rejecting duplicates.
    ///
    /// Returns `false` (and leaves the list unchanged) if the id is
    /// already present.
    pub fn add_exercise(&mut self, exercise_id: impl Into<String>) -> bool {
        let exercise_id = exercise_id.into();
        if self.exercise_ids.contains(&exercise_id) {
            return false;
        }
        self.exercise_ids.push(exercise_id);
        true
    }

    /// Removes an exercise id if present. Returns whether it was removed.
    pub fn remove_exercise(&mut self, exercise_id: &str) -> bool {
        let before = self.exercise_ids.len();
        self.exercise_ids.retain(|id| id != exercise_id);
        self.exercise_ids.len() != before
    }

    /// Resolves the exercise list against the library, in day order.
    ///
    /// Dangling references (exercises deleted after being added to the
    /// day) are silently dropped.
    #[must_use]
    pub fn resolve_exercises<'a>(&self, library: &'a [Exercise]) -> Vec<&'a Exercise> {
        self.exercise_ids
            .iter()
            .filter_map(|id| library.iter().find(|ex| &ex.id == id))
            .collect()
    }
}

impl Exercise {
    /// Creates a new library exercise with a fresh id.
    #[must_use]
    pub fn new(name: impl Into<String>, notes: impl Into<String>) -> Self {
        Self {
            id: new_id("ex"),
            name: name.into(),
            notes: notes.into(),
        }
    }
}

impl Session {
    /// Starts a new session now, against an optional plan selection.
    #[must_use]
    pub fn start(
        program_id: Option<String>,
        week_id: Option<String>,
        day_id: Option<String>,
    ) -> Self {
        Self {
            id: new_id("sess"),
            date_iso: chrono::Utc::now().to_rfc3339(),
            program_id,
            week_id,
            day_id,
        }
    }
}

impl SetEntry {
    /// Creates a new set log entry timestamped now.
    #[must_use]
    pub fn new(
        session_id: impl Into<String>,
        exercise_id: impl Into<String>,
        reps: u32,
        weight: Option<f64>,
    ) -> Self {
        Self {
            id: new_id("set"),
            session_id: session_id.into(),
            exercise_id: exercise_id.into(),
            reps,
            weight,
            timestamp: now_millis(),
        }
    }

    /// Whether this set should overwrite the `LastWeight` cache.
    ///
    /// Only strictly positive weights count; zero, missing, and negative
    /// weights never touch the projection.
    #[must_use]
    pub fn counts_for_last_weight(&self) -> bool {
        self.weight.is_some_and(|w| w > 0.0)
    }
}

/// Current Unix timestamp in milliseconds.
fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
