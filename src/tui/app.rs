//! Application state for the TUI.

use std::path::Path;
use std::time::Duration;

use crate::core::KeyValueStore;
use crate::error::PomoError;
use crate::features::focus::{parse_minutes, ControllerEvent, DurationKind, SessionController};
use crate::features::notify::NotificationCenter;
use crate::features::playlist::{MusicPlayer, Playlist, PlaylistStorage};
use crate::tui::event::Action;

/// Longest accepted custom duration entry.
const MAX_INPUT_LEN: usize = 8;

/// Custom duration being typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DurationInput {
    /// Which duration is being set
    pub kind: DurationKind,
    /// Text typed so far
    pub buffer: String,
}

/// Application state.
pub struct App<S> {
    controller: SessionController<S, NotificationCenter>,
    playlist: Playlist,
    playlist_storage: PlaylistStorage<S>,
    player: MusicPlayer,
    input: Option<DurationInput>,
    /// Whether the key help overlay is shown.
    pub show_help: bool,
    /// Status message to display.
    pub status: Option<String>,
    /// Whether the app should quit.
    pub should_quit: bool,
}

impl<S: KeyValueStore> App<S> {
    /// Create a new app instance.
    pub fn new(
        controller: SessionController<S, NotificationCenter>,
        playlist: Playlist,
        playlist_storage: PlaylistStorage<S>,
        player: MusicPlayer,
    ) -> Self {
        Self {
            controller,
            playlist,
            playlist_storage,
            player,
            input: None,
            show_help: false,
            status: Some("Press ? for help".to_string()),
            should_quit: false,
        }
    }

    /// The session controller.
    pub const fn controller(&self) -> &SessionController<S, NotificationCenter> {
        &self.controller
    }

    /// The playlist.
    pub const fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    /// Custom duration entry, when open.
    pub const fn input(&self) -> Option<&DurationInput> {
        self.input.as_ref()
    }

    /// Let wall-clock time pass.
    pub fn advance(&mut self, elapsed: Duration) {
        self.controller.advance(elapsed);
        self.process_events();

        if self.player.poll_finished() {
            self.play_next();
        }
    }

    /// Carry out a user action.
    pub fn apply(&mut self, action: Action) {
        match action {
            Action::Quit => {
                self.player.stop();
                self.should_quit = true;
            }
            Action::Start => self.controller.start(),
            Action::Pause => self.controller.pause(),
            Action::Toggle => {
                if self.controller.session().running {
                    self.controller.pause();
                } else {
                    self.controller.start();
                }
            }
            Action::Reset => self.controller.reset(),
            Action::Preset(kind, minutes) => self.set_duration(i64::from(minutes), kind),
            Action::BeginInput(kind) => {
                self.input = Some(DurationInput {
                    kind,
                    buffer: String::new(),
                });
            }
            Action::InputChar(c) => {
                if let Some(input) = self.input.as_mut() {
                    if input.buffer.len() < MAX_INPUT_LEN {
                        input.buffer.push(c);
                    }
                }
            }
            Action::InputBackspace => {
                if let Some(input) = self.input.as_mut() {
                    input.buffer.pop();
                }
            }
            Action::InputSubmit => self.submit_input(),
            Action::InputCancel => self.input = None,
            Action::Confirm(accepted) => {
                self.controller.respond_confirm(accepted);
            }
            Action::Enter => {
                if !self.controller.notifier_mut().acknowledge() {
                    self.play_selected();
                }
            }
            Action::SelectNext => self.playlist.select_next(),
            Action::SelectPrevious => self.playlist.select_previous(),
            Action::CycleMode => self.cycle_play_mode(),
            Action::StopMusic => {
                self.player.stop();
                self.playlist.stop();
                self.status = Some("Music stopped".to_string());
            }
            Action::ClearHistory => {
                let result = self.controller.clear_history();
                self.report_failure(result);
            }
            Action::ToggleHelp => self.show_help = !self.show_help,
        }

        self.process_events();
    }

    fn process_events(&mut self) {
        for event in self.controller.drain_events() {
            let message = match event {
                ControllerEvent::Started(mode) => format!("{mode} started"),
                ControllerEvent::Paused => "Paused".to_string(),
                ControllerEvent::Reset => "Timer reset".to_string(),
                ControllerEvent::Completed { mode, next } => {
                    format!("{mode} complete, next up: {next}")
                }
                ControllerEvent::SettingsChanged(settings) => format!(
                    "Work {} min, break {} min",
                    settings.work_minutes, settings.break_minutes
                ),
                ControllerEvent::HistoryCleared => "History cleared".to_string(),
                ControllerEvent::Ticked { .. }
                | ControllerEvent::ConfirmRequested
                | ControllerEvent::ConfirmResolved { .. } => continue,
            };
            self.status = Some(message);
        }
    }

    fn set_duration(&mut self, minutes: i64, kind: DurationKind) {
        let result = self.controller.set_duration(minutes, kind);
        self.report_failure(result);
    }

    /// Show an error in the status line, over any event message.
    fn report_failure(&mut self, result: Result<(), PomoError>) {
        self.process_events();
        if let Err(e) = result {
            self.status = Some(e.to_string());
        }
    }

    fn submit_input(&mut self) {
        let Some(input) = self.input.take() else {
            return;
        };

        match parse_minutes(&input.buffer) {
            Some(minutes) => self.set_duration(minutes, input.kind),
            None => self.status = Some(format!("Invalid duration: '{}'", input.buffer)),
        }
    }

    fn play_selected(&mut self) {
        let Some(track) = self.playlist.play_selected() else {
            self.status = Some("No tracks. Add some with 'pomo music add'".to_string());
            return;
        };
        let path = track.path.clone();
        self.start_track(&path);
    }

    fn play_next(&mut self) {
        let mut rng = rand::thread_rng();
        if let Some(track) = self.playlist.next_after_end(&mut rng) {
            let path = track.path.clone();
            self.start_track(&path);
        }
    }

    fn start_track(&mut self, path: &Path) {
        match self.player.play(path) {
            Ok(()) => {
                if let Some(track) = self.playlist.current_track() {
                    self.status = Some(format!("♪ {}", track.name));
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "playback failed");
                self.playlist.stop();
                self.status = Some(e.to_string());
            }
        }
    }

    fn cycle_play_mode(&mut self) {
        let mode = self.playlist.cycle_mode();
        if let Err(e) = self.playlist_storage.save_mode(mode) {
            tracing::warn!(error = %e, label = e.label(), "failed to save play mode");
        }
        self.status = Some(format!("Play mode: {mode}"));
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::core::MemoryStore;
    use crate::features::focus::{FocusStorage, Mode, Timing};
    use crate::features::notify::Silent;
    use crate::features::playlist::{PlayMode, Track};
    use std::path::PathBuf;

    pub(crate) fn test_app() -> App<MemoryStore> {
        let controller = SessionController::new(
            FocusStorage::new(MemoryStore::new()),
            NotificationCenter::new(Duration::from_secs(5)),
            Box::new(Silent),
            Timing::default(),
        );
        let tracks = ["a", "b"]
            .iter()
            .map(|n| Track::from_path(PathBuf::from(format!("/music/{n}.mp3"))))
            .collect();

        App::new(
            controller,
            Playlist::new(tracks, PlayMode::Sequence),
            PlaylistStorage::new(MemoryStore::new()),
            MusicPlayer::new("pomo-test-no-such-player".to_string(), Vec::new()),
        )
    }

    /// Finish a work session and its break, leaving the prompt up.
    pub(crate) fn run_to_break_end(app: &mut App<MemoryStore>) {
        let controller = &mut app.controller;
        controller.start();
        while controller.session().running {
            controller.tick();
        }
        controller.advance(Duration::from_secs(2));
        while controller.session().running {
            controller.tick();
        }
        app.process_events();
    }

    #[test]
    fn test_toggle() {
        let mut app = test_app();
        app.apply(Action::Toggle);
        assert!(app.controller().session().running);
        assert_eq!(app.status.as_deref(), Some("Work started"));

        app.apply(Action::Toggle);
        assert!(!app.controller().session().running);
    }

    #[test]
    fn test_preset() {
        let mut app = test_app();
        app.apply(Action::Preset(DurationKind::Work, 45));

        assert_eq!(app.controller().session().remaining_seconds, 2700);
        assert_eq!(app.status.as_deref(), Some("Work 45 min, break 5 min"));
    }

    #[test]
    fn test_custom_duration_entry() {
        let mut app = test_app();
        app.apply(Action::BeginInput(DurationKind::Work));
        for c in "530".chars() {
            app.apply(Action::InputChar(c));
        }
        app.apply(Action::InputBackspace);
        app.apply(Action::InputSubmit);

        assert!(app.input().is_none());
        assert_eq!(app.controller().settings().work_minutes, 53);
    }

    #[test]
    fn test_custom_duration_rejected() {
        let mut app = test_app();
        app.apply(Action::BeginInput(DurationKind::Break));
        app.apply(Action::InputChar('0'));
        app.apply(Action::InputSubmit);

        assert_eq!(app.controller().settings().break_minutes, 5);
        assert!(app.status.as_deref().unwrap_or_default().contains("positive"));

        app.apply(Action::BeginInput(DurationKind::Break));
        app.apply(Action::InputChar('x'));
        app.apply(Action::InputSubmit);
        assert_eq!(app.status.as_deref(), Some("Invalid duration: 'x'"));
    }

    #[test]
    fn test_confirm_accept() {
        let mut app = test_app();
        run_to_break_end(&mut app);
        assert!(app.controller().is_awaiting_confirmation());

        app.apply(Action::Confirm(true));

        assert_eq!(app.controller().session().mode, Mode::Work);
        assert!(app.controller().session().running);
    }

    #[test]
    fn test_enter_acknowledges_notice_first() {
        let mut app = test_app();
        app.apply(Action::ClearHistory);
        assert!(app.controller().notifier().current_notice().is_some());

        app.apply(Action::Enter);

        assert!(app.controller().notifier().current_notice().is_none());
        assert!(app.playlist().current().is_none());
    }

    #[test]
    fn test_play_failure_reported() {
        let mut app = test_app();
        app.apply(Action::Enter);

        assert!(app.playlist().current().is_none());
        assert!(app
            .status
            .as_deref()
            .unwrap_or_default()
            .contains("Failed to start music player"));
    }

    #[test]
    fn test_cycle_mode_persists() {
        let mut app = test_app();
        app.apply(Action::CycleMode);

        assert_eq!(app.playlist().mode(), PlayMode::Loop);
        assert_eq!(app.playlist_storage.load_mode(), PlayMode::Loop);
    }

    #[test]
    fn test_quit() {
        let mut app = test_app();
        app.apply(Action::Quit);
        assert!(app.should_quit);
    }
}
