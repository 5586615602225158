//! Command-line argument parsing.
//!
//! Defines the CLI structure using clap derive macros.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// liftlog: local-first workout tracker.
///
/// Define training programs of weeks, days, and exercises, log sets
/// during a session, and get a progressive-overload suggestion from
/// prior weight. Everything lives in one local SQLite file.
#[derive(Parser, Debug)]
#[command(name = "liftlog")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the liftlog database file.
    ///
    /// Defaults to `.liftlog/liftlog.db` in the current directory.
    #[arg(short, long, env = "LIFTLOG_DB_PATH")]
    pub db_path: Option<PathBuf>,

    /// Enable verbose (tracing) output on stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format (text, json).
    #[arg(long, default_value = "text", global = true)]
    pub format: String,

    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize the liftlog database.
    Init {
        /// Force re-initialization (destroys existing data).
        #[arg(short, long)]
        force: bool,
    },

    /// Show per-collection counts and schema info.
    Status,

    /// Delete all data, keeping the schema.
    Reset {
        /// Skip confirmation prompt.
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Manage training programs.
    #[command(subcommand)]
    Program(ProgramCommands),

    /// Manage weeks within a program.
    #[command(subcommand)]
    Week(WeekCommands),

    /// Manage days within a week.
    #[command(subcommand)]
    Day(DayCommands),

    /// Manage the global exercise library.
    #[command(subcommand)]
    Exercise(ExerciseCommands),

    /// Manage logged workout sessions.
    #[command(subcommand)]
    Session(SessionCommands),

    /// Log sets against a session.
    #[command(subcommand)]
    Set(SetCommands),

    /// Show the suggested next weight for an exercise.
    Suggest {
        /// Exercise id.
        exercise: String,
    },

    /// Export the whole database as a JSON backup.
    Export {
        /// Output file path (stdout if not specified).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Import a JSON backup, upserting all records atomically.
    Import {
        /// Path to the backup file.
        file: PathBuf,
    },
}

/// Program subcommands.
#[derive(Subcommand, Debug)]
pub enum ProgramCommands {
    /// Create a new program.
    Create {
        /// Program name.
        name: String,

        /// Free-form notes.
        #[arg(long, default_value = "")]
        notes: String,
    },

    /// List all programs.
    #[command(name = "list", alias = "ls")]
    List,

    /// Rename a program.
    Rename {
        /// Program id.
        id: String,

        /// New name.
        name: String,
    },

    /// Delete a program and cascade-delete its weeks and days.
    #[command(name = "delete", alias = "rm")]
    Delete {
        /// Program id.
        id: String,

        /// Skip confirmation prompt.
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Week subcommands.
#[derive(Subcommand, Debug)]
pub enum WeekCommands {
    /// Add a week to a program.
    Add {
        /// Owning program id.
        #[arg(long)]
        program: String,

        /// Week label.
        #[arg(default_value = "Week")]
        label: String,
    },

    /// List weeks of a program.
    #[command(name = "list", alias = "ls")]
    List {
        /// Program id.
        #[arg(long)]
        program: String,
    },
}

/// Day subcommands.
#[derive(Subcommand, Debug)]
pub enum DayCommands {
    /// Add a day to a week.
    Add {
        /// Owning week id.
        #[arg(long)]
        week: String,

        /// Day label.
        #[arg(default_value = "Day")]
        label: String,
    },

    /// List days of a week.
    #[command(name = "list", alias = "ls")]
    List {
        /// Week id.
        #[arg(long)]
        week: String,
    },

    /// Show a day with its exercise list resolved against the library.
    Show {
        /// Day id.
        id: String,
    },

    /// Append a library exercise to a day.
    AddExercise {
        /// Day id.
        #[arg(long)]
        day: String,

        /// Exercise id (must exist in the library).
        #[arg(long)]
        exercise: String,
    },

    /// Remove an exercise from a day.
    RemoveExercise {
        /// Day id.
        #[arg(long)]
        day: String,

        /// Exercise id.
        #[arg(long)]
        exercise: String,
    },
}

/// Exercise library subcommands.
#[derive(Subcommand, Debug)]
pub enum ExerciseCommands {
    /// Add an exercise to the library.
    Add {
        /// Exercise name.
        name: String,

        /// Free-form notes.
        #[arg(long, default_value = "")]
        notes: String,
    },

    /// List the exercise library.
    #[command(name = "list", alias = "ls")]
    List,
}

/// Session subcommands.
#[derive(Subcommand, Debug)]
pub enum SessionCommands {
    /// Start (and persist) a new session.
    ///
    /// The plan selection is optional; a session may be started without
    /// a program, week, or day.
    Start {
        /// Program id.
        #[arg(long)]
        program: Option<String>,

        /// Week id.
        #[arg(long)]
        week: Option<String>,

        /// Day id.
        #[arg(long)]
        day: Option<String>,
    },

    /// List sessions, optionally filtered by day.
    #[command(name = "list", alias = "ls")]
    List {
        /// Only sessions logged against this day id.
        #[arg(long)]
        day: Option<String>,
    },

    /// Show the sets logged against a session.
    Sets {
        /// Session id.
        id: String,
    },
}

/// Set logging subcommands.
#[derive(Subcommand, Debug)]
pub enum SetCommands {
    /// Record a set against a session.
    ///
    /// A strictly positive --weight also updates the last-weight cache
    /// that feeds `suggest`.
    Record {
        /// Session id.
        #[arg(long)]
        session: String,

        /// Exercise id.
        #[arg(long)]
        exercise: String,

        /// Repetition count.
        #[arg(long)]
        reps: u32,

        /// Weight used (omit for bodyweight sets).
        #[arg(long)]
        weight: Option<f64>,
    },
}

impl Cli {
    /// Returns the database path, using the default if not specified.
    #[must_use]
    pub fn get_db_path(&self) -> PathBuf {
        self.db_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(crate::storage::DEFAULT_DB_PATH))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parse() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_default_db_path() {
        let cli = Cli {
            db_path: None,
            verbose: false,
            format: "text".to_string(),
            command: Commands::Status,
        };
        assert_eq!(
            cli.get_db_path(),
            PathBuf::from(crate::storage::DEFAULT_DB_PATH)
        );
    }

    #[test]
    fn test_custom_db_path() {
        let cli = Cli {
            db_path: Some(PathBuf::from("/custom/path.db")),
            verbose: false,
            format: "text".to_string(),
            command: Commands::Status,
        };
        assert_eq!(cli.get_db_path(), PathBuf::from("/custom/path.db"));
    }
}
