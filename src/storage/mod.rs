//! Storage layer for pomo.
//!
//! This module provides `SQLite`-based persistence for the key-value store
//! that holds:
//! - Timer settings and statistics
//! - Completed work session history
//! - Playlist play mode and added tracks

mod database;
mod migrations;

pub use database::Database;
