//! Timer command implementation.
//!
//! Reads and updates the persisted durations, stats, and history outside
//! the interactive timer.

use std::time::Duration;

use colored::Colorize;
use serde_json::json;

use crate::cli::args::{HistoryArgs, HistoryCommands, OutputFormat};
use crate::config::Paths;
use crate::error::PomoError;
use crate::features::focus::{
    parse_minutes, DurationKind, FocusReport, FocusStorage, ReportPeriod, SessionController,
    Timing,
};
use crate::features::notify::{NotificationCenter, Silent};
use crate::output::{format_history, format_status, to_json};
use crate::storage::Database;

fn open_storage(paths: &Paths) -> Result<FocusStorage<Database>, PomoError> {
    Ok(FocusStorage::new(Database::open_at(&paths.database)?))
}

/// Controller without sound or desktop notifications.
fn open_controller(
    paths: &Paths,
) -> Result<SessionController<Database, NotificationCenter>, PomoError> {
    Ok(SessionController::new(
        open_storage(paths)?,
        NotificationCenter::new(Duration::ZERO),
        Box::new(Silent),
        Timing::default(),
    ))
}

/// Show durations and cumulative stats.
///
/// # Errors
///
/// Returns an error if the database can't be opened or output formatting fails.
pub fn status(paths: &Paths, format: OutputFormat) -> Result<String, PomoError> {
    let storage = open_storage(paths)?;
    format_status(&storage.load_settings(), &storage.load_stats(), format)
}

/// Change the work or short break duration.
///
/// # Errors
///
/// Returns `PomoError::InvalidInput` for an unknown kind or a non-positive
/// or unparsable duration; the stored setting is left unchanged.
pub fn set_duration(
    paths: &Paths,
    kind: &str,
    minutes: &str,
    format: OutputFormat,
) -> Result<String, PomoError> {
    let kind = DurationKind::parse(kind).ok_or_else(|| {
        PomoError::InvalidInput(format!("Unknown duration '{kind}'. Use 'work' or 'break'."))
    })?;
    let minutes = parse_minutes(minutes)
        .ok_or_else(|| PomoError::InvalidInput(format!("Invalid duration: '{minutes}'")))?;

    let mut controller = open_controller(paths)?;
    controller.set_duration(minutes, kind)?;
    let settings = *controller.settings();

    match format {
        OutputFormat::Json => to_json(&settings),
        OutputFormat::Pretty => Ok(format!(
            "{} {} set to {} minutes",
            "✓".green(),
            kind,
            settings.minutes_for(kind)
        )),
    }
}

/// Show or clear history.
///
/// # Errors
///
/// Returns an error if the database can't be opened, or clearing without
/// `--force`.
pub fn history(paths: &Paths, args: HistoryArgs, format: OutputFormat) -> Result<String, PomoError> {
    match args.command {
        Some(HistoryCommands::Clear { force }) => clear_history(paths, force, format),
        None => show_history(paths, args.limit, format),
    }
}

fn show_history(paths: &Paths, limit: usize, format: OutputFormat) -> Result<String, PomoError> {
    let history = open_storage(paths)?.load_history();
    let shown = &history[..limit.min(history.len())];
    format_history(shown, history.len(), format)
}

fn clear_history(paths: &Paths, force: bool, format: OutputFormat) -> Result<String, PomoError> {
    if !force {
        return Err(PomoError::InvalidInput(
            "This will delete all completed session history.\nUse --force to confirm.".to_string(),
        ));
    }

    let mut controller = open_controller(paths)?;
    let removed = controller.history().len();
    controller.clear_history()?;

    match format {
        OutputFormat::Json => to_json(&json!({ "cleared": removed })),
        OutputFormat::Pretty => Ok(format!("History cleared ({removed} entries removed).")),
    }
}

/// Summarize completed sessions over a period.
///
/// # Errors
///
/// Returns `PomoError::InvalidInput` for an unknown period, or an error if
/// the database can't be opened.
pub fn report(paths: &Paths, period: &str, format: OutputFormat) -> Result<String, PomoError> {
    let period = ReportPeriod::parse(period).ok_or_else(|| {
        PomoError::InvalidInput(format!(
            "Unknown period '{period}'. Use today, week, month, or all."
        ))
    })?;

    let storage = open_storage(paths)?;
    let report = FocusReport::generate(&storage.load_history(), &storage.load_stats(), period);

    match format {
        OutputFormat::Json => to_json(&report),
        OutputFormat::Pretty => Ok(report.format()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::KeyValueStore;
    use tempfile::TempDir;

    fn paths() -> (TempDir, Paths) {
        let dir = TempDir::new().unwrap();
        let paths = Paths::with_root(dir.path().to_path_buf());
        (dir, paths)
    }

    #[test]
    fn test_set_duration_persists() {
        let (_dir, paths) = paths();
        set_duration(&paths, "work", "45", OutputFormat::Pretty).unwrap();

        let settings = open_storage(&paths).unwrap().load_settings();
        assert_eq!(settings.work_minutes, 45);
        assert_eq!(settings.break_minutes, 5);
    }

    #[test]
    fn test_set_duration_rejects_non_positive() {
        let (_dir, paths) = paths();
        set_duration(&paths, "break", "10", OutputFormat::Pretty).unwrap();

        for bad in ["0", "-5", "soon"] {
            let result = set_duration(&paths, "break", bad, OutputFormat::Pretty);
            assert!(matches!(result, Err(PomoError::InvalidInput(_))), "{bad}");
        }
        assert_eq!(open_storage(&paths).unwrap().load_settings().break_minutes, 10);
    }

    #[test]
    fn test_set_duration_unknown_kind() {
        let (_dir, paths) = paths();
        let result = set_duration(&paths, "lunch", "30", OutputFormat::Pretty);
        assert!(matches!(result, Err(PomoError::InvalidInput(_))));
    }

    #[test]
    fn test_history_limit_and_clear() {
        let (_dir, paths) = paths();
        let mut db = Database::open_at(&paths.database).unwrap();
        db.set(
            "history",
            r#"["2024/03/02 10:00 - work","2024/03/01 09:00 - work"]"#,
        )
        .unwrap();
        drop(db);

        let output = history(
            &paths,
            HistoryArgs {
                command: None,
                limit: 1,
            },
            OutputFormat::Json,
        )
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["count"], 1);
        assert_eq!(value["total"], 2);
        assert_eq!(value["items"][0], "2024/03/02 10:00 - work");

        let refused = clear_history(&paths, false, OutputFormat::Pretty);
        assert!(refused.is_err());

        clear_history(&paths, true, OutputFormat::Pretty).unwrap();
        assert!(open_storage(&paths).unwrap().load_history().is_empty());
    }

    #[test]
    fn test_report_unknown_period() {
        let (_dir, paths) = paths();
        assert!(report(&paths, "decade", OutputFormat::Pretty).is_err());
        assert!(report(&paths, "all", OutputFormat::Json).is_ok());
    }
}
