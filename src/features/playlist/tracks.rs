//! Tracks, play modes, and playlist navigation.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File extensions treated as audio.
pub const AUDIO_EXTENSIONS: [&str; 6] = ["mp3", "ogg", "flac", "wav", "m4a", "opus"];

/// What happens when a track ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayMode {
    /// Next track, wrapping at the end
    #[default]
    Sequence,
    /// Same track again
    Loop,
    /// A different track at random
    Random,
}

impl PlayMode {
    /// Following mode in the sequence, loop, random cycle.
    #[must_use]
    pub const fn cycle(self) -> Self {
        match self {
            Self::Sequence => Self::Loop,
            Self::Loop => Self::Random,
            Self::Random => Self::Sequence,
        }
    }

    /// Parse a stored or typed mode name.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "sequence" | "seq" => Some(Self::Sequence),
            "loop" | "repeat" => Some(Self::Loop),
            "random" | "shuffle" => Some(Self::Random),
            _ => None,
        }
    }

    /// Lowercase name as stored.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Sequence => "sequence",
            Self::Loop => "loop",
            Self::Random => "random",
        }
    }
}

impl std::fmt::Display for PlayMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A playable file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Track {
    /// File name without extension
    pub name: String,
    /// Full path
    pub path: PathBuf,
}

impl Track {
    /// Track for `path`, named after its file stem.
    #[must_use]
    pub fn from_path(path: PathBuf) -> Self {
        let name = path
            .file_stem()
            .map_or_else(|| path.display().to_string(), |s| s.to_string_lossy().into_owned());
        Self { name, path }
    }
}

/// Whether `path` has an audio extension.
#[must_use]
pub fn is_audio_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| AUDIO_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
}

/// Audio files directly inside `dir`, sorted by name.
///
/// A missing or unreadable directory yields no tracks.
#[must_use]
pub fn scan_dir(dir: &Path) -> Vec<Track> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::debug!(dir = %dir.display(), error = %e, "music directory not readable");
            return Vec::new();
        }
    };

    let mut tracks: Vec<Track> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && is_audio_file(path))
        .map(Track::from_path)
        .collect();
    tracks.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
    tracks
}

/// Ordered tracks with a cursor and a now-playing marker.
#[derive(Debug, Clone, Default)]
pub struct Playlist {
    tracks: Vec<Track>,
    selected: usize,
    current: Option<usize>,
    mode: PlayMode,
}

impl Playlist {
    /// Playlist over `tracks`.
    #[must_use]
    pub const fn new(tracks: Vec<Track>, mode: PlayMode) -> Self {
        Self {
            tracks,
            selected: 0,
            current: None,
            mode,
        }
    }

    /// Directory tracks followed by user-added files that still exist.
    #[must_use]
    pub fn from_sources(dir: &Path, added: &[PathBuf], mode: PlayMode) -> Self {
        let mut tracks = scan_dir(dir);
        for path in added {
            if !path.is_file() {
                tracing::debug!(path = %path.display(), "skipping missing track");
                continue;
            }
            if tracks.iter().any(|t| &t.path == path) {
                continue;
            }
            tracks.push(Track::from_path(path.clone()));
        }
        Self::new(tracks, mode)
    }

    /// All tracks in order.
    #[must_use]
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Number of tracks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Whether there are no tracks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Cursor position.
    #[must_use]
    pub const fn selected(&self) -> usize {
        self.selected
    }

    /// Index of the playing track.
    #[must_use]
    pub const fn current(&self) -> Option<usize> {
        self.current
    }

    /// The playing track.
    #[must_use]
    pub fn current_track(&self) -> Option<&Track> {
        self.current.and_then(|i| self.tracks.get(i))
    }

    /// Play mode.
    #[must_use]
    pub const fn mode(&self) -> PlayMode {
        self.mode
    }

    /// Replace the play mode.
    pub fn set_mode(&mut self, mode: PlayMode) {
        self.mode = mode;
    }

    /// Advance to the next play mode and return it.
    pub fn cycle_mode(&mut self) -> PlayMode {
        self.mode = self.mode.cycle();
        self.mode
    }

    /// Move the cursor down, wrapping.
    pub fn select_next(&mut self) {
        if !self.tracks.is_empty() {
            self.selected = (self.selected + 1) % self.tracks.len();
        }
    }

    /// Move the cursor up, wrapping.
    pub fn select_previous(&mut self) {
        if !self.tracks.is_empty() {
            self.selected = self
                .selected
                .checked_sub(1)
                .unwrap_or(self.tracks.len() - 1);
        }
    }

    /// Mark the selected track as playing.
    pub fn play_selected(&mut self) -> Option<&Track> {
        let track = self.tracks.get(self.selected)?;
        self.current = Some(self.selected);
        Some(track)
    }

    /// Clear the now-playing marker.
    pub fn stop(&mut self) {
        self.current = None;
    }

    /// Pick what plays after the current track ends, per the play mode.
    ///
    /// Returns `None` when nothing was playing.
    pub fn next_after_end<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<&Track> {
        let current = self.current?;
        let len = self.tracks.len();
        if len == 0 {
            self.current = None;
            return None;
        }

        let next = match self.mode {
            PlayMode::Sequence => (current + 1) % len,
            PlayMode::Loop => current,
            PlayMode::Random if len > 1 => {
                let pick = rng.gen_range(0..len - 1);
                if pick >= current {
                    pick + 1
                } else {
                    pick
                }
            }
            PlayMode::Random => current,
        };

        self.current = Some(next);
        self.selected = next;
        self.tracks.get(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use tempfile::TempDir;

    fn playlist(names: &[&str], mode: PlayMode) -> Playlist {
        let tracks = names
            .iter()
            .map(|n| Track::from_path(PathBuf::from(format!("/music/{n}.mp3"))))
            .collect();
        Playlist::new(tracks, mode)
    }

    #[test]
    fn test_play_mode_cycle() {
        assert_eq!(PlayMode::Sequence.cycle(), PlayMode::Loop);
        assert_eq!(PlayMode::Loop.cycle(), PlayMode::Random);
        assert_eq!(PlayMode::Random.cycle(), PlayMode::Sequence);
    }

    #[test]
    fn test_play_mode_parse() {
        assert_eq!(PlayMode::parse("loop"), Some(PlayMode::Loop));
        assert_eq!(PlayMode::parse(" Random "), Some(PlayMode::Random));
        assert_eq!(PlayMode::parse("shuffle"), Some(PlayMode::Random));
        assert_eq!(PlayMode::parse("backwards"), None);
    }

    #[test]
    fn test_track_name() {
        let track = Track::from_path(PathBuf::from("/music/Rain Sounds.ogg"));
        assert_eq!(track.name, "Rain Sounds");
    }

    #[test]
    fn test_scan_dir_filters_audio() {
        let dir = TempDir::new().unwrap();
        for name in ["b.mp3", "a.FLAC", "notes.txt", "cover.jpg"] {
            std::fs::write(dir.path().join(name), b"").unwrap();
        }
        std::fs::create_dir(dir.path().join("sub.mp3")).unwrap();

        let names: Vec<String> = scan_dir(dir.path()).into_iter().map(|t| t.name).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_scan_missing_dir() {
        assert!(scan_dir(Path::new("/definitely/not/here")).is_empty());
    }

    #[test]
    fn test_from_sources_appends_existing_added() {
        let dir = TempDir::new().unwrap();
        let other = TempDir::new().unwrap();
        std::fs::write(dir.path().join("a.mp3"), b"").unwrap();
        let added = other.path().join("z.wav");
        std::fs::write(&added, b"").unwrap();

        let list = Playlist::from_sources(
            dir.path(),
            &[added.clone(), other.path().join("gone.mp3"), dir.path().join("a.mp3")],
            PlayMode::Sequence,
        );

        assert_eq!(list.len(), 2);
        assert_eq!(list.tracks()[1].path, added);
    }

    #[test]
    fn test_selection_wraps() {
        let mut list = playlist(&["a", "b", "c"], PlayMode::Sequence);
        list.select_previous();
        assert_eq!(list.selected(), 2);
        list.select_next();
        assert_eq!(list.selected(), 0);
    }

    #[test]
    fn test_sequence_wraps_at_end() {
        let mut list = playlist(&["a", "b"], PlayMode::Sequence);
        list.select_next();
        list.play_selected();

        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(list.next_after_end(&mut rng).unwrap().name, "a");
        assert_eq!(list.next_after_end(&mut rng).unwrap().name, "b");
    }

    #[test]
    fn test_loop_repeats() {
        let mut list = playlist(&["a", "b"], PlayMode::Loop);
        list.play_selected();

        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(list.next_after_end(&mut rng).unwrap().name, "a");
    }

    #[test]
    fn test_random_never_repeats_current() {
        let mut list = playlist(&["a", "b", "c", "d"], PlayMode::Random);
        list.play_selected();
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..50 {
            let before = list.current();
            list.next_after_end(&mut rng);
            assert_ne!(list.current(), before);
        }
    }

    #[test]
    fn test_random_single_track() {
        let mut list = playlist(&["only"], PlayMode::Random);
        list.play_selected();

        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(list.next_after_end(&mut rng).unwrap().name, "only");
    }

    #[test]
    fn test_nothing_playing() {
        let mut list = playlist(&["a"], PlayMode::Sequence);
        let mut rng = StdRng::seed_from_u64(1);
        assert!(list.next_after_end(&mut rng).is_none());

        list.play_selected();
        list.stop();
        assert!(list.current_track().is_none());
    }
}
