//! Output formatting for pomo.
//!
//! This module provides formatters for displaying timer data in various formats.

mod json;
mod pretty;

use crate::cli::args::OutputFormat;
use crate::error::PomoError;
use crate::features::focus::{HistoryEntry, Settings, Stats, LONG_BREAK_INTERVAL};
use crate::features::playlist::Playlist;

pub use json::*;
pub use pretty::*;

/// Format durations and stats based on output format
///
/// # Errors
///
/// Returns `PomoError::Parse` if JSON serialization fails.
pub fn format_status(
    settings: &Settings,
    stats: &Stats,
    format: OutputFormat,
) -> Result<String, PomoError> {
    match format {
        OutputFormat::Pretty => Ok(format_status_pretty(settings, stats)),
        OutputFormat::Json => format_status_json(settings, stats),
    }
}

/// Format history entries based on output format
///
/// # Errors
///
/// Returns `PomoError::Parse` if JSON serialization fails.
pub fn format_history(
    entries: &[HistoryEntry],
    total: usize,
    format: OutputFormat,
) -> Result<String, PomoError> {
    match format {
        OutputFormat::Pretty => Ok(format_history_pretty(entries, total)),
        OutputFormat::Json => format_history_json(entries, total),
    }
}

/// Format the playlist based on output format
///
/// # Errors
///
/// Returns `PomoError::Parse` if JSON serialization fails.
pub fn format_tracks(playlist: &Playlist, format: OutputFormat) -> Result<String, PomoError> {
    match format {
        OutputFormat::Pretty => Ok(format_tracks_pretty(playlist)),
        OutputFormat::Json => format_tracks_json(playlist),
    }
}

/// Work sessions left before the next long break, 1 to 4.
fn sessions_until_long_break(stats: &Stats) -> u32 {
    LONG_BREAK_INTERVAL - stats.completed_count % LONG_BREAK_INTERVAL
}
