//! Terminal User Interface (TUI) for pomo.
//!
//! Full-screen Pomodoro timer with stats, history, and a music playlist.
//! Built with ratatui and crossterm.

mod app;
mod event;
mod ui;

pub use app::{App, DurationInput};
pub use event::{map_key, Action};

use std::io;
use std::time::Instant;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;

use crate::config::{Config, Paths};
use crate::core::KeyValueStore;
use crate::error::PomoError;
use crate::features::focus::{FocusStorage, SessionController, Timing};
use crate::features::notify::{audio_for, DesktopNotifier, NotificationCenter};
use crate::features::playlist::{MusicPlayer, Playlist, PlaylistStorage};
use crate::storage::Database;

/// Run the TUI application.
///
/// # Errors
///
/// Returns an error if the database can't be opened or the terminal fails
/// to initialize or draw.
pub fn run(paths: &Paths, config: &Config) -> Result<(), PomoError> {
    let timer_db = Database::open_at(&paths.database)?;
    let playlist_db = Database::open_at(&paths.database)?;

    let notifier = NotificationCenter::new(config.timer.notice_timeout())
        .with_desktop(Box::new(DesktopNotifier::probe(config.notifications.desktop)));
    let controller = SessionController::new(
        FocusStorage::new(timer_db),
        notifier,
        audio_for(&config.notifications),
        Timing::from(&config.timer),
    );

    let playlist_storage = PlaylistStorage::new(playlist_db);
    let playlist = Playlist::from_sources(
        &config.music_dir(&paths.music),
        &playlist_storage.load_added(),
        playlist_storage.load_mode(),
    );
    tracing::info!(tracks = playlist.len(), mode = %playlist.mode(), "playlist loaded");

    let mut app = App::new(
        controller,
        playlist,
        playlist_storage,
        MusicPlayer::from_config(&config.music),
    );

    enable_raw_mode().map_err(|e| PomoError::Config(format!("Failed to enable raw mode: {e}")))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)
        .map_err(|e| PomoError::Config(format!("Failed to setup terminal: {e}")))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)
        .map_err(|e| PomoError::Config(format!("Failed to create terminal: {e}")))?;

    let result = run_app(&mut terminal, &mut app);

    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    result
}

/// Run the main application loop.
fn run_app<B: Backend, S: KeyValueStore>(
    terminal: &mut Terminal<B>,
    app: &mut App<S>,
) -> Result<(), PomoError> {
    let mut last = Instant::now();

    loop {
        terminal
            .draw(|frame| ui::render(frame, app))
            .map_err(|e| PomoError::Config(format!("Failed to draw: {e}")))?;

        if let Some(action) = event::handle_events(app)? {
            app.apply(action);
        }
        if app.should_quit {
            break;
        }

        let now = Instant::now();
        app.advance(now - last);
        last = now;
    }

    Ok(())
}
