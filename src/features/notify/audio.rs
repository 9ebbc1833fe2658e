//! Completion sound cues.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::config::NotificationConfig;

/// Plays the cue for the end of a session. Fire-and-forget.
#[cfg_attr(test, mockall::automock)]
pub trait AudioCue {
    /// Cue for the end of a work session.
    fn play_work_complete(&self);

    /// Cue for the end of a break.
    fn play_break_complete(&self);
}

/// No sound at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl AudioCue for Silent {
    fn play_work_complete(&self) {}

    fn play_break_complete(&self) {}
}

/// Plays configured sound files with an external player, or rings the
/// terminal bell when no file is configured or the player can't start.
#[derive(Debug, Clone)]
pub struct SystemAudio {
    player: String,
    work_sound: Option<PathBuf>,
    break_sound: Option<PathBuf>,
}

impl SystemAudio {
    /// Build from notification config.
    #[must_use]
    pub fn from_config(config: &NotificationConfig) -> Self {
        Self {
            player: config.sound_player.clone(),
            work_sound: config.work_complete_sound.clone(),
            break_sound: config.break_complete_sound.clone(),
        }
    }

    fn play(&self, sound: Option<&Path>) {
        let Some(path) = sound.filter(|p| p.exists()) else {
            ring_bell();
            return;
        };

        let spawned = Command::new(&self.player)
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();

        if let Err(e) = spawned {
            tracing::debug!(player = %self.player, error = %e, "sound player failed to start");
            ring_bell();
        }
    }
}

impl AudioCue for SystemAudio {
    fn play_work_complete(&self) {
        self.play(self.work_sound.as_deref());
    }

    fn play_break_complete(&self) {
        self.play(self.break_sound.as_deref());
    }
}

/// Pick the cue player for the given settings.
#[must_use]
pub fn audio_for(config: &NotificationConfig) -> Box<dyn AudioCue> {
    if config.sound {
        Box::new(SystemAudio::from_config(config))
    } else {
        Box::new(Silent)
    }
}

fn ring_bell() {
    let mut stdout = std::io::stdout();
    let _ = stdout.write_all(b"\x07");
    let _ = stdout.flush();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_silent_does_nothing() {
        let cue = Silent;
        cue.play_work_complete();
        cue.play_break_complete();
    }

    #[test]
    fn test_system_audio_from_config() {
        let config = NotificationConfig {
            work_complete_sound: Some(PathBuf::from("/tmp/bell.oga")),
            ..NotificationConfig::default()
        };
        let audio = SystemAudio::from_config(&config);

        assert_eq!(audio.player, "paplay");
        assert_eq!(audio.work_sound.as_deref(), Some(Path::new("/tmp/bell.oga")));
        assert!(audio.break_sound.is_none());
    }

    #[test]
    fn test_missing_player_does_not_panic() {
        let dir = tempfile::TempDir::new().unwrap();
        let sound = dir.path().join("done.wav");
        std::fs::write(&sound, b"RIFF").unwrap();

        let audio = SystemAudio {
            player: "pomo-test-no-such-player".to_string(),
            work_sound: Some(sound),
            break_sound: None,
        };
        audio.play_work_complete();
    }
}
