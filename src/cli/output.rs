//! Output formatting for CLI commands.
//!
//! Supports text and JSON output formats.

use crate::core::{Day, Exercise, LastWeight, Program, Session, SetEntry, Week, suggest};
use crate::error::Error;
use crate::storage::StoreStats;
use serde::Serialize;
use std::fmt::Write;

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// JSON output.
    Json,
}

impl OutputFormat {
    /// Parses format from string.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Text,
        }
    }
}

/// Formats a status response.
#[must_use]
pub fn format_status(stats: &StoreStats, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => format_status_text(stats),
        OutputFormat::Json => format_json(stats),
    }
}

fn format_status_text(stats: &StoreStats) -> String {
    let mut output = String::new();
    output.push_str("liftlog status\n");
    output.push_str("==============\n\n");
    let _ = writeln!(output, "  Programs:     {}", stats.programs);
    let _ = writeln!(output, "  Weeks:        {}", stats.weeks);
    let _ = writeln!(output, "  Days:         {}", stats.days);
    let _ = writeln!(output, "  Exercises:    {}", stats.exercises);
    let _ = writeln!(output, "  Sessions:     {}", stats.sessions);
    let _ = writeln!(output, "  Sets:         {}", stats.sets);
    let _ = writeln!(output, "  Last weights: {}", stats.last_weights);
    let _ = writeln!(output, "  Schema:       v{}", stats.schema_version);
    if let Some(size) = stats.db_size {
        let _ = writeln!(output, "  DB size:      {size} bytes");
    }
    output
}

/// Formats the program list.
#[must_use]
pub fn format_program_list(programs: &[Program], format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => {
            if programs.is_empty() {
                return "No programs yet.\n".to_string();
            }
            let mut output = String::new();
            output.push_str("Programs:\n");
            for p in programs {
                let _ = writeln!(output, "  {}  {}", p.id, truncate(&p.name, 40));
            }
            output
        }
        OutputFormat::Json => format_json(&programs),
    }
}

/// Formats the week list of a program.
#[must_use]
pub fn format_week_list(weeks: &[Week], format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => {
            if weeks.is_empty() {
                return "No weeks yet.\n".to_string();
            }
            let mut output = String::new();
            output.push_str("Weeks:\n");
            for w in weeks {
                let _ = writeln!(output, "  {}  {}", w.id, truncate(&w.label, 40));
            }
            output
        }
        OutputFormat::Json => format_json(&weeks),
    }
}

/// Formats the day list of a week.
#[must_use]
pub fn format_day_list(days: &[Day], format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => {
            if days.is_empty() {
                return "No days yet.\n".to_string();
            }
            let mut output = String::new();
            output.push_str("Days:\n");
            for d in days {
                let _ = writeln!(
                    output,
                    "  {}  {}  ({} exercises)",
                    d.id,
                    truncate(&d.label, 30),
                    d.exercise_ids.len()
                );
            }
            output
        }
        OutputFormat::Json => format_json(&days),
    }
}

/// Formats a single day with its exercise list resolved against the
/// library. Dangling references are already filtered by the caller.
#[must_use]
pub fn format_day_detail(day: &Day, exercises: &[&Exercise], format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => {
            let mut output = String::new();
            let _ = writeln!(output, "Day: {} ({})", day.label, day.id);
            if exercises.is_empty() {
                output.push_str("  No exercises in this day.\n");
            } else {
                for ex in exercises {
                    let _ = writeln!(output, "  {}  {}", ex.id, ex.name);
                }
            }
            output
        }
        OutputFormat::Json => {
            #[derive(Serialize)]
            struct DayDetail<'a> {
                day: &'a Day,
                exercises: &'a [&'a Exercise],
            }
            format_json(&DayDetail { day, exercises })
        }
    }
}

/// Formats the exercise library.
#[must_use]
pub fn format_exercise_list(exercises: &[Exercise], format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => {
            if exercises.is_empty() {
                return "No exercises in library.\n".to_string();
            }
            let mut output = String::new();
            output.push_str("Exercises:\n");
            for ex in exercises {
                let notes = if ex.notes.is_empty() {
                    String::new()
                } else {
                    format!("  - {}", truncate(&ex.notes, 40))
                };
                let _ = writeln!(output, "  {}  {}{}", ex.id, truncate(&ex.name, 30), notes);
            }
            output
        }
        OutputFormat::Json => format_json(&exercises),
    }
}

/// Formats a session list.
#[must_use]
pub fn format_session_list(sessions: &[Session], format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => {
            if sessions.is_empty() {
                return "No sessions logged.\n".to_string();
            }
            let mut output = String::new();
            output.push_str("Sessions:\n");
            for s in sessions {
                let day = s.day_id.as_deref().unwrap_or("-");
                let _ = writeln!(output, "  {}  {}  day: {}", s.id, s.date_iso, day);
            }
            output
        }
        OutputFormat::Json => format_json(&sessions),
    }
}

/// Formats the sets of a session, resolving exercise names where the
/// library still has them.
#[must_use]
pub fn format_set_list(sets: &[SetEntry], library: &[Exercise], format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => {
            if sets.is_empty() {
                return "No sets logged.\n".to_string();
            }
            let mut output = String::new();
            let _ = writeln!(output, "{:<26} {:<6} Weight", "Exercise", "Reps");
            output.push_str(&"-".repeat(44));
            output.push('\n');
            for set in sets {
                let name = library
                    .iter()
                    .find(|ex| ex.id == set.exercise_id)
                    .map_or(set.exercise_id.as_str(), |ex| ex.name.as_str());
                let weight = set
                    .weight
                    .map_or_else(|| "-".to_string(), |w| format!("{w}"));
                let _ = writeln!(output, "{:<26} {:<6} {}", truncate(name, 26), set.reps, weight);
            }
            output
        }
        OutputFormat::Json => format_json(&sets),
    }
}

/// Formats the suggested-weight hint for an exercise.
///
/// Mirrors the original hint text: last weight plus a +2.5% suggestion,
/// or a no-history message.
#[must_use]
pub fn format_suggestion(
    exercise_id: &str,
    last: Option<&LastWeight>,
    format: OutputFormat,
) -> String {
    let suggestion = suggest(last);
    match format {
        OutputFormat::Text => last.map_or_else(
            || "No history yet.\n".to_string(),
            |lw| {
                format!(
                    "Last: {}. Suggested next: {}\n",
                    lw.weight,
                    suggestion.unwrap_or(lw.weight)
                )
            },
        ),
        OutputFormat::Json => {
            #[derive(Serialize)]
            struct Suggestion<'a> {
                exercise_id: &'a str,
                last_weight: Option<f64>,
                suggested_next: Option<f64>,
            }
            format_json(&Suggestion {
                exercise_id,
                last_weight: last.map(|lw| lw.weight),
                suggested_next: suggestion,
            })
        }
    }
}

/// Formats an error for the chosen output format.
#[must_use]
pub fn format_error(error: &Error, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => error.to_string(),
        OutputFormat::Json => {
            #[derive(Serialize)]
            struct ErrorOutput {
                error: String,
            }
            format_json(&ErrorOutput {
                error: error.to_string(),
            })
        }
    }
}

/// Formats a value as JSON.
fn format_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}

/// Truncates a string to max length (in chars) with ellipsis.
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let prefix: String = s.chars().take(max_len - 3).collect();
        format!("{prefix}...")
    }
}
