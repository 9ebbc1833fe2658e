//! Playlist persistence over the key-value store.

use std::path::PathBuf;

use super::tracks::PlayMode;
use crate::core::KeyValueStore;
use crate::error::PomoError;

/// Key for the play mode.
pub const PLAY_MODE_KEY: &str = "musicPlayMode";

/// Key for the user-added track paths.
pub const ADDED_TRACKS_KEY: &str = "localMusicHistory";

/// Reads and writes playlist state.
pub struct PlaylistStorage<S> {
    store: S,
}

impl<S: KeyValueStore> PlaylistStorage<S> {
    /// Wrap a store.
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Give back the store.
    pub fn into_inner(self) -> S {
        self.store
    }

    /// Stored play mode, or sequence when missing or unknown.
    pub fn load_mode(&self) -> PlayMode {
        let raw = match self.store.get(PLAY_MODE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return PlayMode::default(),
            Err(e) => {
                tracing::debug!(error = %e, "failed to read play mode");
                return PlayMode::default();
            }
        };

        // Accept both a JSON string and a bare word.
        let text = serde_json::from_str::<String>(&raw).unwrap_or(raw);
        PlayMode::parse(&text).unwrap_or_else(|| {
            tracing::debug!(value = %text, "unknown play mode, using sequence");
            PlayMode::default()
        })
    }

    /// Store the play mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the store write fails.
    pub fn save_mode(&mut self, mode: PlayMode) -> Result<(), PomoError> {
        self.store
            .set(PLAY_MODE_KEY, &serde_json::to_string(&mode)?)
    }

    /// User-added track paths in the order they were added.
    pub fn load_added(&self) -> Vec<PathBuf> {
        let raw = match self.store.get(ADDED_TRACKS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::debug!(error = %e, "failed to read added tracks");
                return Vec::new();
            }
        };

        serde_json::from_str(&raw).unwrap_or_else(|e| {
            tracing::debug!(error = %e, "discarding unreadable added tracks");
            Vec::new()
        })
    }

    /// Append paths not already present. Returns the ones newly added.
    ///
    /// # Errors
    ///
    /// Returns an error if the store write fails.
    pub fn add_tracks(&mut self, paths: &[PathBuf]) -> Result<Vec<PathBuf>, PomoError> {
        let mut all = self.load_added();
        let mut added = Vec::new();
        for path in paths {
            if !all.contains(path) {
                all.push(path.clone());
                added.push(path.clone());
            }
        }

        if !added.is_empty() {
            self.store
                .set(ADDED_TRACKS_KEY, &serde_json::to_string(&all)?)?;
        }
        Ok(added)
    }

    /// Forget all user-added tracks.
    ///
    /// # Errors
    ///
    /// Returns an error if the store write fails.
    pub fn clear_added(&mut self) -> Result<(), PomoError> {
        self.store.remove(ADDED_TRACKS_KEY)
    }
}
