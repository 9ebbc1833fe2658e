//! Configuration settings for pomo.
//!
//! Settings are loaded from `~/.pomo/config.yaml`. User-chosen work and break
//! durations are not part of this file; they live in the key-value store
//! next to the stats so the TUI can change them at runtime.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::cli::args::OutputFormat;
use crate::error::PomoError;

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// General settings.
    pub general: GeneralConfig,
    /// Timer behaviour.
    pub timer: TimerConfig,
    /// Completion notifications and sounds.
    pub notifications: NotificationConfig,
    /// Playlist settings.
    pub music: MusicConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Default output format.
    #[serde(default = "default_output_format")]
    pub default_output: OutputFormat,
    /// Color output setting.
    #[serde(default = "default_color")]
    pub color: ColorSetting,
}

/// Color output setting.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ColorSetting {
    /// Auto-detect based on terminal.
    #[default]
    Auto,
    /// Always use colors.
    Always,
    /// Never use colors.
    Never,
}

impl ColorSetting {
    /// Apply this setting to the `colored` crate.
    pub fn apply(self) {
        match self {
            Self::Auto => colored::control::unset_override(),
            Self::Always => colored::control::set_override(true),
            Self::Never => colored::control::set_override(false),
        }
    }
}

/// Timer settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimerConfig {
    /// Delay before a break starts on its own after a work session.
    #[serde(default = "default_auto_start_delay_ms")]
    pub auto_start_delay_ms: u64,
    /// How long the "start a new work session?" prompt waits for an answer.
    #[serde(default = "default_confirm_timeout_secs")]
    pub confirm_timeout_secs: u64,
    /// How long an info notice stays on screen.
    #[serde(default = "default_notice_timeout_secs")]
    pub notice_timeout_secs: u64,
}

/// Notification settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    /// Enable desktop notifications.
    #[serde(default = "default_true")]
    pub desktop: bool,
    /// Play completion sounds.
    #[serde(default = "default_true")]
    pub sound: bool,
    /// Command used to play completion sounds.
    #[serde(default = "default_sound_player")]
    pub sound_player: String,
    /// Sound file for the end of a work session.
    #[serde(default)]
    pub work_complete_sound: Option<PathBuf>,
    /// Sound file for the end of a break.
    #[serde(default)]
    pub break_complete_sound: Option<PathBuf>,
}

/// Playlist settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MusicConfig {
    /// Directory scanned for tracks. Defaults to `~/.pomo/music`.
    #[serde(default)]
    pub directory: Option<PathBuf>,
    /// Command used to play tracks.
    #[serde(default = "default_music_player")]
    pub player: String,
    /// Arguments passed to the player before the track path.
    #[serde(default = "default_music_args")]
    pub args: Vec<String>,
}

// Default value functions for serde
const fn default_output_format() -> OutputFormat {
    OutputFormat::Pretty
}

const fn default_color() -> ColorSetting {
    ColorSetting::Auto
}

const fn default_auto_start_delay_ms() -> u64 {
    1500
}

const fn default_confirm_timeout_secs() -> u64 {
    10
}

const fn default_notice_timeout_secs() -> u64 {
    5
}

const fn default_true() -> bool {
    true
}

fn default_sound_player() -> String {
    "paplay".to_string()
}

fn default_music_player() -> String {
    "mpv".to_string()
}

fn default_music_args() -> Vec<String> {
    vec!["--no-video".to_string(), "--really-quiet".to_string()]
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_output: default_output_format(),
            color: default_color(),
        }
    }
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            auto_start_delay_ms: default_auto_start_delay_ms(),
            confirm_timeout_secs: default_confirm_timeout_secs(),
            notice_timeout_secs: default_notice_timeout_secs(),
        }
    }
}

impl TimerConfig {
    /// Auto-start delay as a `Duration`.
    #[must_use]
    pub const fn auto_start_delay(&self) -> Duration {
        Duration::from_millis(self.auto_start_delay_ms)
    }

    /// Confirmation timeout as a `Duration`.
    #[must_use]
    pub const fn confirm_timeout(&self) -> Duration {
        Duration::from_secs(self.confirm_timeout_secs)
    }

    /// Notice timeout as a `Duration`.
    #[must_use]
    pub const fn notice_timeout(&self) -> Duration {
        Duration::from_secs(self.notice_timeout_secs)
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            desktop: default_true(),
            sound: default_true(),
            sound_player: default_sound_player(),
            work_complete_sound: None,
            break_complete_sound: None,
        }
    }
}

impl Default for MusicConfig {
    fn default() -> Self {
        Self {
            directory: None,
            player: default_music_player(),
            args: default_music_args(),
        }
    }
}

impl Config {
    /// Load configuration from a specific path.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load_from_path(path: &Path) -> Result<Self, PomoError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            PomoError::Config(format!("Failed to read config file {}: {e}", path.display()))
        })?;

        serde_yaml::from_str(&contents).map_err(|e| {
            PomoError::Config(format!("Failed to parse config file {}: {e}", path.display()))
        })
    }

    /// Save configuration to a specific path.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be written.
    pub fn save_to_path(&self, path: &Path) -> Result<(), PomoError> {
        let contents = serde_yaml::to_string(self)
            .map_err(|e| PomoError::Config(format!("Failed to serialize config: {e}")))?;

        std::fs::write(path, contents).map_err(|e| {
            PomoError::Config(format!("Failed to write config file {}: {e}", path.display()))
        })
    }

    /// Directory scanned for playlist tracks.
    #[must_use]
    pub fn music_dir(&self, default: &Path) -> PathBuf {
        self.music
            .directory
            .clone()
            .unwrap_or_else(|| default.to_path_buf())
    }
}
