//! Notifications and sound cues.
//!
//! - In-app notices and confirmation prompts
//! - Desktop notifications with a cached permission
//! - Completion sounds

pub mod audio;
pub mod desktop;
pub mod sink;

pub use audio::{audio_for, AudioCue, Silent, SystemAudio};
pub use desktop::{DesktopBackend, DesktopNotifier, Permission};
pub use sink::{Notice, NotificationCenter, NotificationSink, Prompt};
