//! Background music playback through an external player.

use std::path::Path;
use std::process::{Child, Command, Stdio};

use crate::config::MusicConfig;
use crate::error::PomoError;

/// Runs one player process at a time.
#[derive(Debug)]
pub struct MusicPlayer {
    program: String,
    args: Vec<String>,
    child: Option<Child>,
}

impl MusicPlayer {
    /// Player command from config.
    #[must_use]
    pub fn from_config(config: &MusicConfig) -> Self {
        Self::new(config.player.clone(), config.args.clone())
    }

    /// Player running `program args... <file>`.
    #[must_use]
    pub const fn new(program: String, args: Vec<String>) -> Self {
        Self {
            program,
            args,
            child: None,
        }
    }

    /// Play `path`, stopping whatever was playing.
    ///
    /// # Errors
    ///
    /// Returns an error if the player can't be started.
    pub fn play(&mut self, path: &Path) -> Result<(), PomoError> {
        self.stop();

        let child = Command::new(&self.program)
            .args(&self.args)
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| {
                PomoError::Config(format!(
                    "Failed to start music player '{}': {e}",
                    self.program
                ))
            })?;

        tracing::info!(player = %self.program, track = %path.display(), "playing");
        self.child = Some(child);
        Ok(())
    }

    /// Stop playback.
    pub fn stop(&mut self) {
        if let Some(mut child) = self.child.take() {
            let _ = child.kill();
            let _ = child.wait();
        }
    }

    /// Whether a player process is attached.
    #[must_use]
    pub const fn is_playing(&self) -> bool {
        self.child.is_some()
    }

    /// Reap the player if it exited. Returns true once per finished track.
    pub fn poll_finished(&mut self) -> bool {
        let Some(child) = self.child.as_mut() else {
            return false;
        };

        match child.try_wait() {
            Ok(Some(status)) => {
                tracing::debug!(%status, "track finished");
                self.child = None;
                true
            }
            Ok(None) => false,
            Err(e) => {
                tracing::warn!(error = %e, "lost track of music player");
                self.child = None;
                false
            }
        }
    }
}

impl Drop for MusicPlayer {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    #[test]
    fn test_missing_player_errors() {
        let mut player = MusicPlayer::new("pomo-test-no-such-player".to_string(), Vec::new());
        let result = player.play(Path::new("/music/a.mp3"));

        assert!(matches!(result, Err(PomoError::Config(_))));
        assert!(!player.is_playing());
    }

    #[cfg(unix)]
    #[test]
    fn test_finished_track_is_reported_once() {
        let mut player = MusicPlayer::new("sh".to_string(), vec!["-c".into(), "exit 0".into()]);
        player.play(Path::new("/music/a.mp3")).unwrap();
        assert!(player.is_playing());

        let deadline = Instant::now() + Duration::from_secs(5);
        let mut finished = false;
        while Instant::now() < deadline {
            if player.poll_finished() {
                finished = true;
                break;
            }
            std::thread::sleep(Duration::from_millis(20));
        }

        assert!(finished);
        assert!(!player.is_playing());
        assert!(!player.poll_finished());
    }

    #[cfg(unix)]
    #[test]
    fn test_stop_kills_player() {
        let mut player = MusicPlayer::new("sleep".to_string(), Vec::new());
        player.play(Path::new("30")).unwrap();

        player.stop();

        assert!(!player.is_playing());
        assert!(!player.poll_finished());
    }
}
