//! Command implementations for pomo.
//!
//! Each command returns the text to print, formatted per `OutputFormat`.

mod completions;
mod music;
mod timer;

pub use completions::completions;
pub use music::music;
pub use timer::{history, report, set_duration, status};
