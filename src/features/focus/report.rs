//! Work session reports.
//!
//! Summarizes the completion history over a period, plus the
//! cumulative totals kept in stats.

use chrono::{Datelike, Duration, Local, NaiveDate, Timelike};
use serde::Serialize;
use std::collections::BTreeMap;

use super::records::{HistoryEntry, Stats};
use super::timer::format_duration;

/// Report time period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportPeriod {
    /// Today only
    Today,
    /// Last 7 days
    Week,
    /// Last 30 days
    Month,
    /// All time
    AllTime,
}

impl ReportPeriod {
    /// First day included when the report is made on `today`.
    #[must_use]
    pub fn start_date(&self, today: NaiveDate) -> Option<NaiveDate> {
        match self {
            Self::Today => Some(today),
            Self::Week => Some(today - Duration::days(6)),
            Self::Month => Some(today - Duration::days(29)),
            Self::AllTime => None,
        }
    }

    /// Parse period from string.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "today" | "t" | "d" => Some(Self::Today),
            "week" | "w" | "7d" => Some(Self::Week),
            "month" | "m" | "30d" => Some(Self::Month),
            "all" | "alltime" | "all-time" => Some(Self::AllTime),
            _ => None,
        }
    }

    /// Get display name.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Today => "Today",
            Self::Week => "Last 7 Days",
            Self::Month => "Last 30 Days",
            Self::AllTime => "All Time",
        }
    }
}

/// Completed work sessions on one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyCount {
    /// Date, `YYYY-MM-DD`
    pub date: String,
    /// Sessions completed that day
    pub sessions: u32,
}

/// Report data.
#[derive(Debug, Clone, Serialize)]
pub struct FocusReport {
    /// Report period name
    pub period: String,
    /// Work sessions completed in the period
    pub completed_sessions: u32,
    /// Completions per weekday, Monday first
    pub by_day_of_week: [u32; 7],
    /// Hour of day with the most completions
    pub busiest_hour: Option<u32>,
    /// Per-day counts, newest first
    pub daily: Vec<DailyCount>,
    /// Consecutive days with at least one completion, ending today or yesterday
    pub streak_days: u32,
    /// Cumulative stats, not limited to the period
    pub totals: Stats,
}

impl FocusReport {
    /// Generate a report for the given period as of today.
    #[must_use]
    pub fn generate(history: &[HistoryEntry], stats: &Stats, period: ReportPeriod) -> Self {
        Self::generate_at(history, stats, period, Local::now().date_naive())
    }

    /// Generate a report for the given period as of `today`.
    #[must_use]
    pub fn generate_at(
        history: &[HistoryEntry],
        stats: &Stats,
        period: ReportPeriod,
        today: NaiveDate,
    ) -> Self {
        let start = period.start_date(today);
        let in_period: Vec<&HistoryEntry> = history
            .iter()
            .filter(|entry| {
                let date = entry.timestamp.date();
                date <= today && !start.is_some_and(|start| date < start)
            })
            .collect();

        let mut by_day_of_week = [0u32; 7];
        let mut by_hour = [0u32; 24];
        let mut daily_map: BTreeMap<NaiveDate, u32> = BTreeMap::new();
        for entry in &in_period {
            let weekday = entry.timestamp.weekday().num_days_from_monday() as usize;
            by_day_of_week[weekday] += 1;
            by_hour[entry.timestamp.hour() as usize] += 1;
            *daily_map.entry(entry.timestamp.date()).or_insert(0) += 1;
        }

        let busiest_hour = by_hour
            .iter()
            .enumerate()
            .filter(|(_, count)| **count > 0)
            .max_by(|(ha, a), (hb, b)| a.cmp(b).then(hb.cmp(ha)))
            .and_then(|(hour, _)| u32::try_from(hour).ok());

        let daily = daily_map
            .into_iter()
            .rev()
            .map(|(date, sessions)| DailyCount {
                date: date.to_string(),
                sessions,
            })
            .collect();

        Self {
            period: period.display_name().to_string(),
            completed_sessions: u32::try_from(in_period.len()).unwrap_or(u32::MAX),
            by_day_of_week,
            busiest_hour,
            daily,
            streak_days: calculate_streak(history, today),
            totals: *stats,
        }
    }

    /// Format the report for display.
    #[must_use]
    pub fn format(&self) -> String {
        let mut lines = Vec::new();

        lines.push(format!("📊 Pomodoro Report: {}", self.period));
        lines.push("═".repeat(50));
        lines.push(String::new());

        lines.push("Summary".to_string());
        lines.push("─".repeat(40));
        lines.push(format!(
            "  Completed sessions:  {}",
            self.completed_sessions
        ));
        lines.push(format!("  Current streak:      {} days", self.streak_days));
        if let Some(hour) = self.busiest_hour {
            lines.push(format!("  Busiest hour:        {hour:02}:00"));
        }
        lines.push(String::new());

        lines.push("All Time".to_string());
        lines.push("─".repeat(40));
        lines.push(format!(
            "  Pomodoros:           {}",
            self.totals.completed_count
        ));
        lines.push(format!(
            "  Work time:           {}",
            format_duration(self.totals.total_work_seconds)
        ));
        lines.push(format!(
            "  Break time:          {}",
            format_duration(self.totals.total_break_seconds)
        ));
        lines.push(String::new());

        if self.completed_sessions > 0 {
            lines.push("By Day of Week".to_string());
            lines.push("─".repeat(40));
            let days = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];
            let max_day = self.by_day_of_week.iter().max().copied().unwrap_or(1).max(1);

            for (day, count) in days.iter().zip(self.by_day_of_week) {
                let bar_len = (count * 20 / max_day) as usize;
                lines.push(format!("  {day} {count:>4} {}", "█".repeat(bar_len)));
            }
            lines.push(String::new());
        }

        if !self.daily.is_empty() {
            lines.push("Recent Days".to_string());
            lines.push("─".repeat(40));

            for day in self.daily.iter().take(7) {
                lines.push(format!("  {} {:>4} sessions", day.date, day.sessions));
            }
        }

        lines.join("\n")
    }
}

/// Count consecutive days with a completion, ending today or yesterday.
fn calculate_streak(history: &[HistoryEntry], today: NaiveDate) -> u32 {
    let mut dates: Vec<NaiveDate> = history.iter().map(|e| e.timestamp.date()).collect();
    dates.sort_unstable();
    dates.dedup();

    let mut check_date = today;
    if dates.binary_search(&check_date).is_err() {
        check_date = today - Duration::days(1);
    }

    let mut streak = 0;
    while dates.binary_search(&check_date).is_ok() {
        streak += 1;
        check_date -= Duration::days(1);
    }

    streak
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    fn entry(d: u32, h: u32) -> HistoryEntry {
        HistoryEntry::work(day(d).and_hms_opt(h, 0, 0).unwrap())
    }

    #[test]
    fn test_report_period_parse() {
        assert_eq!(ReportPeriod::parse("today"), Some(ReportPeriod::Today));
        assert_eq!(ReportPeriod::parse("Week"), Some(ReportPeriod::Week));
        assert_eq!(ReportPeriod::parse("30d"), Some(ReportPeriod::Month));
        assert_eq!(ReportPeriod::parse("all"), Some(ReportPeriod::AllTime));
        assert_eq!(ReportPeriod::parse("fortnight"), None);
    }

    #[test]
    fn test_period_filters_history() {
        let history = vec![entry(20, 9), entry(15, 10), entry(1, 11)];
        let today = day(20);

        let report = FocusReport::generate_at(&history, &Stats::default(), ReportPeriod::Today, today);
        assert_eq!(report.completed_sessions, 1);

        let report = FocusReport::generate_at(&history, &Stats::default(), ReportPeriod::Week, today);
        assert_eq!(report.completed_sessions, 2);

        let report =
            FocusReport::generate_at(&history, &Stats::default(), ReportPeriod::AllTime, today);
        assert_eq!(report.completed_sessions, 3);
    }

    #[test]
    fn test_daily_newest_first() {
        let history = vec![entry(20, 9), entry(20, 10), entry(19, 9)];
        let report =
            FocusReport::generate_at(&history, &Stats::default(), ReportPeriod::Week, day(20));

        assert_eq!(report.daily.len(), 2);
        assert_eq!(report.daily[0].date, "2024-03-20");
        assert_eq!(report.daily[0].sessions, 2);
        assert_eq!(report.daily[1].sessions, 1);
    }

    #[test]
    fn test_busiest_hour() {
        let history = vec![entry(20, 9), entry(19, 14), entry(18, 14)];
        let report =
            FocusReport::generate_at(&history, &Stats::default(), ReportPeriod::Week, day(20));
        assert_eq!(report.busiest_hour, Some(14));

        let empty = FocusReport::generate_at(&[], &Stats::default(), ReportPeriod::Week, day(20));
        assert_eq!(empty.busiest_hour, None);
    }

    #[test]
    fn test_streak() {
        let history = vec![entry(20, 9), entry(19, 9), entry(18, 9), entry(16, 9)];
        assert_eq!(calculate_streak(&history, day(20)), 3);
        assert_eq!(calculate_streak(&history, day(21)), 3);
        assert_eq!(calculate_streak(&history, day(22)), 0);
        assert_eq!(calculate_streak(&[], day(20)), 0);
    }

    #[test]
    fn test_format_includes_totals() {
        let stats = Stats {
            completed_count: 4,
            total_work_seconds: 6000,
            total_break_seconds: 1200,
        };
        let report = FocusReport::generate_at(&[entry(20, 9)], &stats, ReportPeriod::Today, day(20));
        let text = report.format();

        assert!(text.contains("Pomodoro Report: Today"));
        assert!(text.contains("Pomodoros:           4"));
        assert!(text.contains("Busiest hour:        09:00"));
    }
}
