//! Database schema definitions.
//!
//! Contains the SQL schema and version gating for the liftlog `SQLite`
//! database. Each collection is a two-column document table (`id`, `body`)
//! with secondary indexes over `json_extract` expressions, so the store
//! code stays uniform across collections.

/// Current schema version. Only version 1 exists; there is no migration
/// path.
pub const CURRENT_SCHEMA_VERSION: u32 = 1;

/// SQL schema for initial database setup.
pub const SCHEMA_SQL: &str = r"
-- Schema version tracking
CREATE TABLE IF NOT EXISTS schema_info (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
);

-- Training plan roots
CREATE TABLE IF NOT EXISTS programs (
    id TEXT PRIMARY KEY,
    body TEXT NOT NULL  -- JSON serialized Program
);

-- Weeks, indexed by owning program
CREATE TABLE IF NOT EXISTS weeks (
    id TEXT PRIMARY KEY,
    body TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_weeks_by_program
    ON weeks(json_extract(body, '$.programId'));

-- Days, indexed by owning week
CREATE TABLE IF NOT EXISTS days (
    id TEXT PRIMARY KEY,
    body TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_days_by_week
    ON days(json_extract(body, '$.weekId'));

-- Global exercise library
CREATE TABLE IF NOT EXISTS exercises (
    id TEXT PRIMARY KEY,
    body TEXT NOT NULL
);

-- Logged workout sessions, indexed by day
CREATE TABLE IF NOT EXISTS sessions (
    id TEXT PRIMARY KEY,
    body TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_sessions_by_day
    ON sessions(json_extract(body, '$.dayId'));

-- Set log entries, indexed by session and by exercise
CREATE TABLE IF NOT EXISTS sets (
    id TEXT PRIMARY KEY,
    body TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_sets_by_session
    ON sets(json_extract(body, '$.sessionId'));
CREATE INDEX IF NOT EXISTS idx_sets_by_exercise
    ON sets(json_extract(body, '$.exerciseId'));

-- Last-known-weight projection, keyed by exercise id
CREATE TABLE IF NOT EXISTS last_weight (
    id TEXT PRIMARY KEY,  -- exerciseId
    body TEXT NOT NULL
);
";

/// SQL to check if the schema is initialized.
pub const CHECK_SCHEMA_SQL: &str = r"
SELECT COUNT(*) FROM sqlite_master
WHERE type='table' AND name='schema_info';
";

/// SQL to get the schema version.
pub const GET_VERSION_SQL: &str = r"
SELECT value FROM schema_info WHERE key = 'version';
";

/// SQL to set the schema version.
pub const SET_VERSION_SQL: &str = r"
INSERT OR REPLACE INTO schema_info (key, value) VALUES ('version', ?);
";
