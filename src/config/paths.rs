//! Path resolution for pomo configuration and data files.
//!
//! All pomo data is stored in `~/.pomo/` unless `--data-dir` or `POMO_HOME`
//! points somewhere else:
//! - `config.yaml` - Main configuration file
//! - `pomo.db` - `SQLite` key-value store for settings, stats, history
//! - `pomo.log` - Log output (the TUI owns the terminal)
//! - `music/` - Default playlist directory

use std::path::PathBuf;

use crate::error::PomoError;

/// Paths to pomo configuration and data files.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Root directory: `~/.pomo/`
    pub root: PathBuf,
    /// Config file: `~/.pomo/config.yaml`
    pub config_file: PathBuf,
    /// Database file: `~/.pomo/pomo.db`
    pub database: PathBuf,
    /// Log file: `~/.pomo/pomo.log`
    pub log_file: PathBuf,
    /// Music directory: `~/.pomo/music/`
    pub music: PathBuf,
}

impl Paths {
    /// Create paths based on the user's home directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, PomoError> {
        let home = std::env::var("HOME")
            .map_err(|_| PomoError::Config("Could not determine home directory".to_string()))?;

        Ok(Self::with_root(PathBuf::from(home).join(".pomo")))
    }

    /// Use `root` when given, otherwise the home-based default.
    ///
    /// # Errors
    ///
    /// Returns an error if no root is given and the home directory cannot be
    /// determined.
    pub fn resolve(root: Option<PathBuf>) -> Result<Self, PomoError> {
        root.map_or_else(Self::new, |root| Ok(Self::with_root(root)))
    }

    /// Create paths with a custom root directory (useful for testing).
    #[must_use]
    pub fn with_root(root: PathBuf) -> Self {
        Self {
            config_file: root.join("config.yaml"),
            database: root.join("pomo.db"),
            log_file: root.join("pomo.log"),
            music: root.join("music"),
            root,
        }
    }

    /// Ensure the data directories exist, creating them if necessary.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation fails.
    pub fn ensure_dirs(&self) -> Result<(), PomoError> {
        for dir in [&self.root, &self.music] {
            if !dir.exists() {
                std::fs::create_dir_all(dir).map_err(|e| {
                    PomoError::Config(format!("Failed to create directory {}: {e}", dir.display()))
                })?;
            }
        }

        Ok(())
    }
}

impl Default for Paths {
    fn default() -> Self {
        Self::new().unwrap_or_else(|_| Self::with_root(PathBuf::from(".pomo")))
    }
}
