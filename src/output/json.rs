//! JSON output formatting for pomo.

use serde::Serialize;
use serde_json::json;

use crate::error::PomoError;
use crate::features::focus::{HistoryEntry, Settings, Stats, LONG_BREAK_MINUTES};
use crate::features::playlist::Playlist;

use super::sessions_until_long_break;

/// Format durations and stats as JSON
///
/// # Errors
///
/// Returns `PomoError::Parse` if JSON serialization fails.
pub fn format_status_json(settings: &Settings, stats: &Stats) -> Result<String, PomoError> {
    let output = json!({
        "settings": settings,
        "longBreakMinutes": LONG_BREAK_MINUTES,
        "stats": stats,
        "sessionsUntilLongBreak": sessions_until_long_break(stats),
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format history entries as JSON, in stored string form
///
/// # Errors
///
/// Returns `PomoError::Parse` if JSON serialization fails.
pub fn format_history_json(entries: &[HistoryEntry], total: usize) -> Result<String, PomoError> {
    let items: Vec<String> = entries.iter().map(HistoryEntry::to_line).collect();
    let output = json!({
        "count": entries.len(),
        "total": total,
        "items": items
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format the playlist as JSON
///
/// # Errors
///
/// Returns `PomoError::Parse` if JSON serialization fails.
pub fn format_tracks_json(playlist: &Playlist) -> Result<String, PomoError> {
    let output = json!({
        "mode": playlist.mode(),
        "count": playlist.len(),
        "items": playlist.tracks()
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Generic JSON formatter for any serializable type
///
/// # Errors
///
/// Returns `PomoError::Parse` if JSON serialization fails.
pub fn to_json<T: Serialize>(value: &T) -> Result<String, PomoError> {
    Ok(serde_json::to_string_pretty(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::playlist::{PlayMode, Track};
    use chrono::NaiveDate;
    use std::path::PathBuf;

    #[test]
    fn test_format_status_json() {
        let stats = Stats {
            completed_count: 6,
            total_work_seconds: 9000,
            total_break_seconds: 1800,
        };
        let output = format_status_json(&Settings::default(), &stats).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["settings"]["workMinutes"], 25);
        assert_eq!(value["stats"]["completedCount"], 6);
        assert_eq!(value["longBreakMinutes"], 15);
        assert_eq!(value["sessionsUntilLongBreak"], 2);
    }

    #[test]
    fn test_format_history_json() {
        let at = NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap();
        let output = format_history_json(&[HistoryEntry::work(at)], 4).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["count"], 1);
        assert_eq!(value["total"], 4);
        assert_eq!(value["items"][0], "2024/03/01 09:30 - work");
    }

    #[test]
    fn test_format_tracks_json() {
        let playlist = Playlist::new(
            vec![Track::from_path(PathBuf::from("/music/rain.ogg"))],
            PlayMode::Random,
        );
        let output = format_tracks_json(&playlist).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["mode"], "random");
        assert_eq!(value["items"][0]["name"], "rain");
    }

    #[test]
    fn test_to_json() {
        let output = to_json(&Settings::default()).unwrap();
        assert!(output.contains("\"breakMinutes\": 5"));
    }
}
