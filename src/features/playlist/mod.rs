//! Background music playlist.
//!
//! Tracks from the music directory plus user-added files, played one at a
//! time by an external player in sequence, loop, or random order.

pub mod player;
pub mod storage;
pub mod tracks;

pub use player::MusicPlayer;
pub use storage::{PlaylistStorage, ADDED_TRACKS_KEY, PLAY_MODE_KEY};
pub use tracks::{is_audio_file, scan_dir, PlayMode, Playlist, Track, AUDIO_EXTENSIONS};
