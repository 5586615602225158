//! CLI command implementations.
//!
//! Contains the orchestration for each CLI command. Multi-record flows
//! that the store deliberately does not own live here: the program
//! cascade delete, the exercise-exists check when building a day, and
//! the last-weight side effect when recording a set.

use crate::cli::output::{
    OutputFormat, format_day_detail, format_day_list, format_exercise_list, format_program_list,
    format_session_list, format_set_list, format_status, format_suggestion, format_week_list,
};
use crate::cli::parser::{
    Cli, Commands, DayCommands, ExerciseCommands, ProgramCommands, SessionCommands, SetCommands,
    WeekCommands,
};
use crate::core::{Day, Exercise, LastWeight, Program, Session, SetEntry, Week};
use crate::error::{CommandError, Result, StorageError};
use crate::storage::{Collection, Dump, SecondaryIndex, SqliteStore, Store};

/// Executes the CLI command.
///
/// # Errors
///
/// Returns an error if the command fails to execute.
#[allow(clippy::too_many_lines)]
pub fn execute(cli: &Cli) -> Result<String> {
    let format = OutputFormat::parse(&cli.format);
    let db_path = cli.get_db_path();

    match &cli.command {
        Commands::Init { force } => cmd_init(&db_path, *force),
        Commands::Status => cmd_status(&db_path, format),
        Commands::Reset { yes } => cmd_reset(&db_path, *yes),
        Commands::Program(cmd) => match cmd {
            ProgramCommands::Create { name, notes } => cmd_program_create(&db_path, name, notes),
            ProgramCommands::List => cmd_program_list(&db_path, format),
            ProgramCommands::Rename { id, name } => cmd_program_rename(&db_path, id, name),
            ProgramCommands::Delete { id, yes } => cmd_program_delete(&db_path, id, *yes),
        },
        Commands::Week(cmd) => match cmd {
            WeekCommands::Add { program, label } => cmd_week_add(&db_path, program, label),
            WeekCommands::List { program } => cmd_week_list(&db_path, program, format),
        },
        Commands::Day(cmd) => match cmd {
            DayCommands::Add { week, label } => cmd_day_add(&db_path, week, label),
            DayCommands::List { week } => cmd_day_list(&db_path, week, format),
            DayCommands::Show { id } => cmd_day_show(&db_path, id, format),
            DayCommands::AddExercise { day, exercise } => {
                cmd_day_add_exercise(&db_path, day, exercise)
            }
            DayCommands::RemoveExercise { day, exercise } => {
                cmd_day_remove_exercise(&db_path, day, exercise)
            }
        },
        Commands::Exercise(cmd) => match cmd {
            ExerciseCommands::Add { name, notes } => cmd_exercise_add(&db_path, name, notes),
            ExerciseCommands::List => cmd_exercise_list(&db_path, format),
        },
        Commands::Session(cmd) => match cmd {
            SessionCommands::Start { program, week, day } => {
                cmd_session_start(&db_path, program.clone(), week.clone(), day.clone())
            }
            SessionCommands::List { day } => cmd_session_list(&db_path, day.as_deref(), format),
            SessionCommands::Sets { id } => cmd_session_sets(&db_path, id, format),
        },
        Commands::Set(cmd) => match cmd {
            SetCommands::Record {
                session,
                exercise,
                reps,
                weight,
            } => cmd_set_record(&db_path, session, exercise, *reps, *weight),
        },
        Commands::Suggest { exercise } => cmd_suggest(&db_path, exercise, format),
        Commands::Export { output } => cmd_export(&db_path, output.as_deref()),
        Commands::Import { file } => cmd_import(&db_path, file),
    }
}

/// Opens the store and ensures it's initialized.
fn open_store(db_path: &std::path::Path) -> Result<SqliteStore> {
    let store = SqliteStore::open(db_path)?;

    if !store.is_initialized()? {
        return Err(StorageError::NotInitialized.into());
    }

    Ok(store)
}

/// Deletes a program and cascades to its weeks and their days.
///
/// The store does not cascade; this is the caller-side orchestration the
/// data model requires. Sessions and sets are history and stay put.
///
/// Returns the number of deleted weeks and days.
pub(crate) fn delete_program_cascade(
    store: &mut SqliteStore,
    program_id: &str,
) -> Result<(usize, usize)> {
    let weeks: Vec<Week> = store.query_by_index(SecondaryIndex::WeeksByProgram, program_id)?;
    let mut days_deleted = 0;

    for week in &weeks {
        let days: Vec<Day> = store.query_by_index(SecondaryIndex::DaysByWeek, &week.id)?;
        for day in &days {
            store.delete(Collection::Days, &day.id)?;
            days_deleted += 1;
        }
        store.delete(Collection::Weeks, &week.id)?;
    }

    store.delete(Collection::Programs, program_id)?;
    tracing::debug!(program_id, weeks = weeks.len(), days = days_deleted, "cascade delete");
    Ok((weeks.len(), days_deleted))
}

/// Records a set and applies the last-weight side effect.
///
/// The projection is overwritten only for strictly positive weights;
/// zero, missing, and negative weights leave it untouched.
pub(crate) fn record_set(store: &mut SqliteStore, set: &SetEntry) -> Result<()> {
    store.put(set)?;

    if set.counts_for_last_weight()
        && let Some(weight) = set.weight
    {
        store.put(&LastWeight {
            exercise_id: set.exercise_id.clone(),
            weight,
        })?;
    }

    Ok(())
}

// ==================== Command Implementations ====================

fn cmd_init(db_path: &std::path::Path, force: bool) -> Result<String> {
    if db_path.exists() && !force {
        return Err(CommandError::ExecutionFailed(
            "Database already exists. Use --force to reinitialize.".to_string(),
        )
        .into());
    }

    if force && db_path.exists() {
        std::fs::remove_file(db_path).map_err(|e| {
            CommandError::ExecutionFailed(format!("Failed to remove existing database: {e}"))
        })?;
    }

    let mut store = SqliteStore::open(db_path)?;
    store.init()?;

    Ok(format!(
        "Initialized liftlog database at: {}\n",
        db_path.display()
    ))
}

fn cmd_status(db_path: &std::path::Path, format: OutputFormat) -> Result<String> {
    let store = open_store(db_path)?;
    let stats = store.stats()?;
    Ok(format_status(&stats, format))
}

fn cmd_reset(db_path: &std::path::Path, yes: bool) -> Result<String> {
    if !yes {
        return Err(CommandError::ExecutionFailed(
            "Use --yes to confirm reset. This will delete all data.".to_string(),
        )
        .into());
    }

    let mut store = open_store(db_path)?;
    store.reset()?;
    Ok("All data deleted.\n".to_string())
}

fn cmd_program_create(db_path: &std::path::Path, name: &str, notes: &str) -> Result<String> {
    let mut store = open_store(db_path)?;
    let program = Program::new(name, notes);
    store.add(&program)?;
    Ok(format!("Created program {} ({})\n", program.name, program.id))
}

fn cmd_program_list(db_path: &std::path::Path, format: OutputFormat) -> Result<String> {
    let store = open_store(db_path)?;
    let mut programs: Vec<Program> = store.all()?;
    programs.sort_by_key(|p| p.created_at);
    Ok(format_program_list(&programs, format))
}

fn cmd_program_rename(db_path: &std::path::Path, id: &str, name: &str) -> Result<String> {
    let mut store = open_store(db_path)?;
    let mut program: Program = store
        .get(id)?
        .ok_or_else(|| CommandError::NotFound(format!("program {id}")))?;
    program.name = name.to_string();
    store.put(&program)?;
    Ok(format!("Renamed program {id} to {name}\n"))
}

fn cmd_program_delete(db_path: &std::path::Path, id: &str, yes: bool) -> Result<String> {
    if !yes {
        return Err(CommandError::ExecutionFailed(
            "Use --yes to confirm deletion of the program and its weeks/days.".to_string(),
        )
        .into());
    }

    let mut store = open_store(db_path)?;
    if store.get::<Program>(id)?.is_none() {
        return Err(CommandError::NotFound(format!("program {id}")).into());
    }

    let (weeks, days) = delete_program_cascade(&mut store, id)?;
    Ok(format!(
        "Deleted program {id} ({weeks} weeks, {days} days)\n"
    ))
}

fn cmd_week_add(db_path: &std::path::Path, program_id: &str, label: &str) -> Result<String> {
    let mut store = open_store(db_path)?;
    if store.get::<Program>(program_id)?.is_none() {
        return Err(CommandError::NotFound(format!("program {program_id}")).into());
    }

    let week = Week::new(program_id, label);
    store.add(&week)?;
    Ok(format!("Added week {} ({})\n", week.label, week.id))
}

fn cmd_week_list(
    db_path: &std::path::Path,
    program_id: &str,
    format: OutputFormat,
) -> Result<String> {
    let store = open_store(db_path)?;
    let mut weeks: Vec<Week> = store.query_by_index(SecondaryIndex::WeeksByProgram, program_id)?;
    weeks.sort_by_key(|w| w.order);
    Ok(format_week_list(&weeks, format))
}

fn cmd_day_add(db_path: &std::path::Path, week_id: &str, label: &str) -> Result<String> {
    let mut store = open_store(db_path)?;
    if store.get::<Week>(week_id)?.is_none() {
        return Err(CommandError::NotFound(format!("week {week_id}")).into());
    }

    let day = Day::new(week_id, label);
    store.add(&day)?;
    Ok(format!("Added day {} ({})\n", day.label, day.id))
}

fn cmd_day_list(db_path: &std::path::Path, week_id: &str, format: OutputFormat) -> Result<String> {
    let store = open_store(db_path)?;
    let mut days: Vec<Day> = store.query_by_index(SecondaryIndex::DaysByWeek, week_id)?;
    days.sort_by_key(|d| d.order);
    Ok(format_day_list(&days, format))
}

fn cmd_day_show(db_path: &std::path::Path, day_id: &str, format: OutputFormat) -> Result<String> {
    let store = open_store(db_path)?;
    let day: Day = store
        .get(day_id)?
        .ok_or_else(|| CommandError::NotFound(format!("day {day_id}")))?;

    // Dangling exercise references are filtered here, at read time
    let library: Vec<Exercise> = store.all()?;
    let exercises = day.resolve_exercises(&library);
    Ok(format_day_detail(&day, &exercises, format))
}

fn cmd_day_add_exercise(
    db_path: &std::path::Path,
    day_id: &str,
    exercise_id: &str,
) -> Result<String> {
    let mut store = open_store(db_path)?;
    let mut day: Day = store
        .get(day_id)?
        .ok_or_else(|| CommandError::NotFound(format!("day {day_id}")))?;

    // The exercise must exist in the library at time of add
    let exercise: Exercise = store
        .get(exercise_id)?
        .ok_or_else(|| CommandError::NotFound(format!("exercise {exercise_id}")))?;

    if !day.add_exercise(exercise_id) {
        return Err(CommandError::InvalidArgument(format!(
            "exercise {exercise_id} is already in day {day_id}"
        ))
        .into());
    }

    store.put(&day)?;
    Ok(format!("Added {} to {}\n", exercise.name, day.label))
}

fn cmd_day_remove_exercise(
    db_path: &std::path::Path,
    day_id: &str,
    exercise_id: &str,
) -> Result<String> {
    let mut store = open_store(db_path)?;
    let mut day: Day = store
        .get(day_id)?
        .ok_or_else(|| CommandError::NotFound(format!("day {day_id}")))?;

    if !day.remove_exercise(exercise_id) {
        return Err(CommandError::NotFound(format!(
            "exercise {exercise_id} in day {day_id}"
        ))
        .into());
    }

    store.put(&day)?;
    Ok(format!("Removed {exercise_id} from {}\n", day.label))
}

fn cmd_exercise_add(db_path: &std::path::Path, name: &str, notes: &str) -> Result<String> {
    let mut store = open_store(db_path)?;
    let exercise = Exercise::new(name, notes);
    store.add(&exercise)?;
    Ok(format!(
        "Added exercise {} ({})\n",
        exercise.name, exercise.id
    ))
}

fn cmd_exercise_list(db_path: &std::path::Path, format: OutputFormat) -> Result<String> {
    let store = open_store(db_path)?;
    let mut exercises: Vec<Exercise> = store.all()?;
    exercises.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(format_exercise_list(&exercises, format))
}

fn cmd_session_start(
    db_path: &std::path::Path,
    program_id: Option<String>,
    week_id: Option<String>,
    day_id: Option<String>,
) -> Result<String> {
    let mut store = open_store(db_path)?;
    let session = Session::start(program_id, week_id, day_id);
    store.put(&session)?;
    Ok(format!("Started session {}\n", session.id))
}

fn cmd_session_list(
    db_path: &std::path::Path,
    day_id: Option<&str>,
    format: OutputFormat,
) -> Result<String> {
    let store = open_store(db_path)?;
    let mut sessions: Vec<Session> = match day_id {
        Some(day_id) => store.query_by_index(SecondaryIndex::SessionsByDay, day_id)?,
        None => store.all()?,
    };
    sessions.sort_by(|a, b| a.date_iso.cmp(&b.date_iso));
    Ok(format_session_list(&sessions, format))
}

fn cmd_session_sets(
    db_path: &std::path::Path,
    session_id: &str,
    format: OutputFormat,
) -> Result<String> {
    let store = open_store(db_path)?;
    if store.get::<Session>(session_id)?.is_none() {
        return Err(CommandError::NotFound(format!("session {session_id}")).into());
    }

    let mut sets: Vec<SetEntry> =
        store.query_by_index(SecondaryIndex::SetsBySession, session_id)?;
    sets.sort_by_key(|s| s.timestamp);
    let library: Vec<Exercise> = store.all()?;
    Ok(format_set_list(&sets, &library, format))
}

fn cmd_set_record(
    db_path: &std::path::Path,
    session_id: &str,
    exercise_id: &str,
    reps: u32,
    weight: Option<f64>,
) -> Result<String> {
    if reps == 0 {
        return Err(CommandError::InvalidArgument("reps must be at least 1".to_string()).into());
    }

    let mut store = open_store(db_path)?;
    if store.get::<Session>(session_id)?.is_none() {
        return Err(CommandError::NotFound(format!("session {session_id}")).into());
    }

    let set = SetEntry::new(session_id, exercise_id, reps, weight);
    record_set(&mut store, &set)?;
    Ok(format!("Recorded set {} ({} reps)\n", set.id, set.reps))
}

fn cmd_suggest(db_path: &std::path::Path, exercise_id: &str, format: OutputFormat) -> Result<String> {
    let store = open_store(db_path)?;
    let last: Option<LastWeight> = store.get(exercise_id)?;
    Ok(format_suggestion(exercise_id, last.as_ref(), format))
}

fn cmd_export(db_path: &std::path::Path, output: Option<&std::path::Path>) -> Result<String> {
    let store = open_store(db_path)?;
    let dump = store.export_all()?;
    let json = dump.to_json_pretty();

    match output {
        Some(path) => {
            std::fs::write(path, &json)?;
            Ok(format!(
                "Exported {} records to {}\n",
                dump.record_count(),
                path.display()
            ))
        }
        None => Ok(json),
    }
}

fn cmd_import(db_path: &std::path::Path, file: &std::path::Path) -> Result<String> {
    let mut store = open_store(db_path)?;
    let text = std::fs::read_to_string(file)?;

    // Parse failures surface before any write
    let dump = Dump::from_json(&text)?;
    store.import_all(&dump)?;

    Ok(format!("Imported {} records.\n", dump.record_count()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> SqliteStore {
        let mut store = SqliteStore::in_memory().unwrap();
        store.init().unwrap();
        store
    }

    #[test]
    fn test_cascade_delete_removes_weeks_and_days() {
        let mut store = setup();
        let program = Program::new("P", "");
        let week = Week::new(&program.id, "Week 1");
        let day1 = Day::new(&week.id, "Push");
        let day2 = Day::new(&week.id, "Pull");
        store.add(&program).unwrap();
        store.add(&week).unwrap();
        store.add(&day1).unwrap();
        store.add(&day2).unwrap();

        let (weeks, days) = delete_program_cascade(&mut store, &program.id).unwrap();
        assert_eq!((weeks, days), (1, 2));
        assert!(store.get::<Program>(&program.id).unwrap().is_none());
        assert!(store.get::<Week>(&week.id).unwrap().is_none());
        assert!(store.get::<Day>(&day1.id).unwrap().is_none());
    }

    #[test]
    fn test_cascade_delete_leaves_other_programs_alone() {
        let mut store = setup();
        let doomed = Program::new("Doomed", "");
        let kept = Program::new("Kept", "");
        let kept_week = Week::new(&kept.id, "Week 1");
        store.add(&doomed).unwrap();
        store.add(&kept).unwrap();
        store.add(&kept_week).unwrap();

        delete_program_cascade(&mut store, &doomed.id).unwrap();
        assert!(store.get::<Program>(&kept.id).unwrap().is_some());
        assert!(store.get::<Week>(&kept_week.id).unwrap().is_some());
    }

    #[test]
    fn test_record_set_positive_weight_updates_projection() {
        let mut store = setup();
        let set = SetEntry::new("sess_1", "ex_1", 5, Some(50.0));
        record_set(&mut store, &set).unwrap();

        let last: LastWeight = store.get("ex_1").unwrap().unwrap();
        assert_eq!(last.weight, 50.0);
    }

    #[test]
    fn test_record_set_negative_weight_leaves_projection() {
        let mut store = setup();
        store
            .put(&LastWeight {
                exercise_id: "ex_1".to_string(),
                weight: 50.0,
            })
            .unwrap();

        let set = SetEntry::new("sess_1", "ex_1", 5, Some(-5.0));
        record_set(&mut store, &set).unwrap();

        // The set itself is logged, the projection is untouched
        let last: LastWeight = store.get("ex_1").unwrap().unwrap();
        assert_eq!(last.weight, 50.0);
        let sets: Vec<SetEntry> = store.all().unwrap();
        assert_eq!(sets.len(), 1);
    }

    #[test]
    fn test_record_set_zero_or_missing_weight_leaves_projection() {
        let mut store = setup();
        record_set(&mut store, &SetEntry::new("sess_1", "ex_1", 8, Some(0.0))).unwrap();
        record_set(&mut store, &SetEntry::new("sess_1", "ex_1", 8, None)).unwrap();

        let last: Option<LastWeight> = store.get("ex_1").unwrap();
        assert!(last.is_none());
    }
}
