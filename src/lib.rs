//! pomo - a terminal Pomodoro timer
//!
//! This crate provides a work/break session timer with persisted stats and
//! history, completion notifications, and a background music playlist,
//! behind a ratatui interface and a scripting-friendly CLI.

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod features;
pub mod logging;
pub mod output;
pub mod storage;
pub mod tui;

pub use cli::args::{Cli, Commands, OutputFormat};
pub use error::PomoError;
pub use features::focus::SessionController;
