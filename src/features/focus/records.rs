//! Persisted records: settings, cumulative stats, and work history.

use chrono::{Local, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use super::session::{DurationKind, Mode, LONG_BREAK_MINUTES};

/// Default work session length in minutes.
pub const DEFAULT_WORK_MINUTES: u32 = 25;

/// Default short break length in minutes.
pub const DEFAULT_BREAK_MINUTES: u32 = 5;

const HISTORY_TIME_FORMAT: &str = "%Y/%m/%d %H:%M";
const HISTORY_SEPARATOR: &str = " - ";

/// User-chosen durations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Work session length in minutes
    pub work_minutes: u32,
    /// Short break length in minutes
    pub break_minutes: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            work_minutes: DEFAULT_WORK_MINUTES,
            break_minutes: DEFAULT_BREAK_MINUTES,
        }
    }
}

impl Settings {
    /// Full length of `mode` in seconds.
    #[must_use]
    pub const fn seconds_for(&self, mode: Mode) -> u32 {
        let minutes = match mode {
            Mode::Work => self.work_minutes,
            Mode::ShortBreak => self.break_minutes,
            Mode::LongBreak => LONG_BREAK_MINUTES,
        };
        minutes.saturating_mul(60)
    }

    /// Minutes configured for `kind`.
    #[must_use]
    pub const fn minutes_for(&self, kind: DurationKind) -> u32 {
        match kind {
            DurationKind::Work => self.work_minutes,
            DurationKind::Break => self.break_minutes,
        }
    }

    /// Replace zero durations with defaults.
    #[must_use]
    pub const fn sanitized(self) -> Self {
        Self {
            work_minutes: if self.work_minutes == 0 {
                DEFAULT_WORK_MINUTES
            } else {
                self.work_minutes
            },
            break_minutes: if self.break_minutes == 0 {
                DEFAULT_BREAK_MINUTES
            } else {
                self.break_minutes
            },
        }
    }
}

/// Cumulative counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Stats {
    /// Completed work sessions
    pub completed_count: u32,
    /// Seconds counted down in work mode
    pub total_work_seconds: u64,
    /// Seconds counted down in either break mode
    pub total_break_seconds: u64,
}

impl Stats {
    /// Credit one elapsed second to the counter for `mode`.
    pub fn record_second(&mut self, mode: Mode) {
        if mode.is_break() {
            self.total_break_seconds += 1;
        } else {
            self.total_work_seconds += 1;
        }
    }

    /// Whole minutes worked.
    #[must_use]
    pub const fn work_minutes(&self) -> u64 {
        self.total_work_seconds / 60
    }

    /// Whole minutes on break.
    #[must_use]
    pub const fn break_minutes(&self) -> u64 {
        self.total_break_seconds / 60
    }
}

/// One completed work session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Local completion time, minute precision
    pub timestamp: NaiveDateTime,
    /// Always "work"
    pub label: String,
}

impl HistoryEntry {
    /// Entry for a work session completed at `timestamp`.
    #[must_use]
    pub fn work(timestamp: NaiveDateTime) -> Self {
        Self {
            timestamp,
            label: "work".to_string(),
        }
    }

    /// Entry for a work session completed now, truncated to the minute.
    #[must_use]
    pub fn work_now() -> Self {
        let now = Local::now().naive_local();
        let minute = now
            .with_second(0)
            .and_then(|t| t.with_nanosecond(0))
            .unwrap_or(now);
        Self::work(minute)
    }

    /// Stored string form, e.g. `2024/03/01 09:30 - work`.
    #[must_use]
    pub fn to_line(&self) -> String {
        format!(
            "{}{HISTORY_SEPARATOR}{}",
            self.timestamp.format(HISTORY_TIME_FORMAT),
            self.label
        )
    }

    /// Parse the stored string form.
    #[must_use]
    pub fn parse_line(line: &str) -> Option<Self> {
        let (time, label) = line.split_once(HISTORY_SEPARATOR)?;
        let timestamp = NaiveDateTime::parse_from_str(time.trim(), HISTORY_TIME_FORMAT).ok()?;
        let label = label.trim();
        if label.is_empty() {
            return None;
        }

        Some(Self {
            timestamp,
            label: label.to_string(),
        })
    }
}

impl std::fmt::Display for HistoryEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_line())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn test_settings_seconds_for() {
        let settings = Settings {
            work_minutes: 45,
            break_minutes: 10,
        };
        assert_eq!(settings.seconds_for(Mode::Work), 2700);
        assert_eq!(settings.seconds_for(Mode::ShortBreak), 600);
        assert_eq!(settings.seconds_for(Mode::LongBreak), 900);
    }

    #[test]
    fn test_settings_sanitized() {
        let settings = Settings {
            work_minutes: 0,
            break_minutes: 10,
        }
        .sanitized();
        assert_eq!(settings.work_minutes, DEFAULT_WORK_MINUTES);
        assert_eq!(settings.break_minutes, 10);
    }

    #[test]
    fn test_settings_json_shape() {
        let json = serde_json::to_string(&Settings::default()).unwrap();
        assert_eq!(json, r#"{"workMinutes":25,"breakMinutes":5}"#);
    }

    #[test]
    fn test_stats_record_second() {
        let mut stats = Stats::default();
        stats.record_second(Mode::Work);
        stats.record_second(Mode::ShortBreak);
        stats.record_second(Mode::LongBreak);

        assert_eq!(stats.total_work_seconds, 1);
        assert_eq!(stats.total_break_seconds, 2);
    }

    #[test]
    fn test_stats_partial_json() {
        let stats: Stats = serde_json::from_str(r#"{"completedCount":3}"#).unwrap();
        assert_eq!(stats.completed_count, 3);
        assert_eq!(stats.total_work_seconds, 0);
    }

    #[test]
    fn test_history_line_roundtrip() {
        let entry = HistoryEntry::work(at(9, 30));
        assert_eq!(entry.to_line(), "2024/03/01 09:30 - work");
        assert_eq!(HistoryEntry::parse_line(&entry.to_line()), Some(entry));
    }

    #[test]
    fn test_work_now_matches_stored_form() {
        let entry = HistoryEntry::work_now();
        assert_eq!(entry.timestamp.second(), 0);
        assert_eq!(HistoryEntry::parse_line(&entry.to_line()), Some(entry));
    }

    #[test]
    fn test_history_line_rejects_garbage() {
        assert!(HistoryEntry::parse_line("yesterday - work").is_none());
        assert!(HistoryEntry::parse_line("2024/03/01 09:30").is_none());
        assert!(HistoryEntry::parse_line("2024/03/01 09:30 - ").is_none());
    }
}
