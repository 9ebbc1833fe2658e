use colored::Colorize;

use crate::features::focus::{
    format_duration, render_progress_bar, HistoryEntry, Settings, Stats, LONG_BREAK_INTERVAL,
    LONG_BREAK_MINUTES,
};
use crate::features::playlist::Playlist;

use super::sessions_until_long_break;

/// Format durations and cumulative stats
pub fn format_status_pretty(settings: &Settings, stats: &Stats) -> String {
    let mut lines = Vec::new();

    lines.push("🍅 pomo".bold().to_string());
    lines.push("─".repeat(40));
    lines.push(format!("  Work:          {} min", settings.work_minutes));
    lines.push(format!("  Short break:   {} min", settings.break_minutes));
    lines.push(format!("  Long break:    {LONG_BREAK_MINUTES} min"));
    lines.push(String::new());
    lines.push(format!(
        "  Pomodoros:     {}",
        stats.completed_count.to_string().green()
    ));
    lines.push(format!(
        "  Work time:     {}",
        format_duration(stats.total_work_seconds)
    ));
    lines.push(format!(
        "  Break time:    {}",
        format_duration(stats.total_break_seconds)
    ));

    let until = sessions_until_long_break(stats);
    let done = LONG_BREAK_INTERVAL - until;
    lines.push(format!(
        "  Long break:    {} {}",
        render_progress_bar(f64::from(done) / f64::from(LONG_BREAK_INTERVAL), 8),
        format!("{until} to go").dimmed()
    ));

    lines.join("\n")
}

/// Format history entries, newest first
pub fn format_history_pretty(entries: &[HistoryEntry], total: usize) -> String {
    if entries.is_empty() {
        return "No completed sessions yet.\n\nStart one with: pomo".to_string();
    }

    let mut output = format!(
        "{} ({} of {})\n",
        "📋 History".bold(),
        entries.len(),
        total
    );
    output.push_str(&"─".repeat(40));

    for entry in entries {
        output.push_str(&format!("\n  {} {}", "✓".green(), entry.to_line()));
    }

    output
}

/// Format the playlist with its play mode
pub fn format_tracks_pretty(playlist: &Playlist) -> String {
    let header = format!(
        "{} ({} tracks, {})",
        "🎵 Music".bold(),
        playlist.len(),
        playlist.mode().to_string().cyan()
    );

    if playlist.is_empty() {
        return format!("{header}\n  No tracks. Add some with: pomo music add <FILE>...");
    }

    let mut output = header;
    output.push('\n');
    output.push_str(&"─".repeat(40));

    for (i, track) in playlist.tracks().iter().enumerate() {
        output.push_str(&format!(
            "\n  {:>3}. {}  {}",
            i + 1,
            track.name,
            track.path.display().to_string().dimmed()
        ));
    }

    output
}
