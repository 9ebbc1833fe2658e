//! Timer session state.
//!
//! A [`Session`] is the mode the timer is in plus the seconds left and
//! whether the countdown is running. Only the controller mutates it.

use serde::{Deserialize, Serialize};

/// Long break length in minutes. Not user-configurable.
pub const LONG_BREAK_MINUTES: u32 = 15;

/// Every this many completed work sessions, the next break is a long one.
pub const LONG_BREAK_INTERVAL: u32 = 4;

/// Work duration presets in minutes.
pub const WORK_PRESETS: [u32; 3] = [15, 25, 45];

/// Short break duration presets in minutes.
pub const BREAK_PRESETS: [u32; 3] = [5, 10, 15];

/// Phase of the Pomodoro cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Mode {
    /// Focused work
    Work,
    /// Short break between work sessions
    ShortBreak,
    /// Long break after every fourth work session
    LongBreak,
}

impl Mode {
    /// Get display name.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Work => "Work",
            Self::ShortBreak => "Short Break",
            Self::LongBreak => "Long Break",
        }
    }

    /// Check if this is a break mode.
    #[must_use]
    pub const fn is_break(&self) -> bool {
        matches!(self, Self::ShortBreak | Self::LongBreak)
    }

    /// Break mode that follows the given number of completed work sessions.
    #[must_use]
    pub const fn break_after(completed_count: u32) -> Self {
        if completed_count % LONG_BREAK_INTERVAL == 0 {
            Self::LongBreak
        } else {
            Self::ShortBreak
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Which user-configurable duration a setting change applies to.
///
/// The long break length is fixed, so it has no variant here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DurationKind {
    /// Work session length
    Work,
    /// Short break length
    Break,
}

impl DurationKind {
    /// Mode whose countdown this duration controls.
    #[must_use]
    pub const fn mode(&self) -> Mode {
        match self {
            Self::Work => Mode::Work,
            Self::Break => Mode::ShortBreak,
        }
    }

    /// Preset values offered for this kind.
    #[must_use]
    pub const fn presets(&self) -> [u32; 3] {
        match self {
            Self::Work => WORK_PRESETS,
            Self::Break => BREAK_PRESETS,
        }
    }

    /// Parse from a user-facing name.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "work" | "w" | "pomodoro" => Some(Self::Work),
            "break" | "b" | "short" | "short-break" => Some(Self::Break),
            _ => None,
        }
    }
}

impl std::fmt::Display for DurationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Work => write!(f, "work"),
            Self::Break => write!(f, "break"),
        }
    }
}

/// The single timer session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Current phase
    pub mode: Mode,
    /// Seconds left in the phase
    pub remaining_seconds: u32,
    /// Whether the countdown is active
    pub running: bool,
}

impl Session {
    /// Idle session in `mode` with `seconds` on the clock.
    #[must_use]
    pub const fn idle(mode: Mode, seconds: u32) -> Self {
        Self {
            mode,
            remaining_seconds: seconds,
            running: false,
        }
    }
}
