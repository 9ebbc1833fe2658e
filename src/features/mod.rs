//! Feature implementations for pomo.
//!
//! - Pomodoro timer with persisted stats and history
//! - In-app and desktop notifications with sound cues
//! - Background music playlist

pub mod focus;
pub mod notify;
pub mod playlist;
