//! Pomodoro timer and session tracking.
//!
//! - Work, short break, and long break cycle
//! - Auto-started breaks and a "back to work?" prompt
//! - Persisted durations, stats, and completion history
//! - Reports over the history

pub mod controller;
pub mod records;
pub mod report;
pub mod session;
pub mod storage;
pub mod timer;

pub use controller::{ControllerEvent, Pending, SessionController, Timing};
pub use records::{HistoryEntry, Settings, Stats, DEFAULT_BREAK_MINUTES, DEFAULT_WORK_MINUTES};
pub use report::{DailyCount, FocusReport, ReportPeriod};
pub use session::{
    DurationKind, Mode, Session, BREAK_PRESETS, LONG_BREAK_INTERVAL, LONG_BREAK_MINUTES,
    WORK_PRESETS,
};
pub use storage::FocusStorage;
pub use timer::{
    format_duration, format_mmss, parse_minutes, progress, render_progress_bar, TickAccumulator,
};
