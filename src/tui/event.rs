//! Event handling for the TUI.

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::core::KeyValueStore;
use crate::error::PomoError;
use crate::features::focus::{DurationKind, BREAK_PRESETS, WORK_PRESETS};
use crate::tui::app::App;

/// How long to wait for input before letting time advance.
pub const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Action to take after handling an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Quit the application.
    Quit,
    /// Start or resume the countdown.
    Start,
    /// Pause the countdown.
    Pause,
    /// Start when paused, pause when running.
    Toggle,
    /// Refill the current mode.
    Reset,
    /// Apply a preset duration in minutes.
    Preset(DurationKind, u32),
    /// Open the custom duration entry.
    BeginInput(DurationKind),
    /// Type into the duration entry.
    InputChar(char),
    /// Delete from the duration entry.
    InputBackspace,
    /// Apply the duration entry.
    InputSubmit,
    /// Close the duration entry.
    InputCancel,
    /// Answer the "start working?" prompt.
    Confirm(bool),
    /// Dismiss a notice, or play the selected track.
    Enter,
    /// Move down the playlist.
    SelectNext,
    /// Move up the playlist.
    SelectPrevious,
    /// Next play mode.
    CycleMode,
    /// Stop the music.
    StopMusic,
    /// Remove all history entries.
    ClearHistory,
    /// Show or hide the key help.
    ToggleHelp,
}

/// Handle terminal events.
///
/// Returns an action to take, or None if no action is needed.
///
/// # Errors
///
/// Returns an error if event polling fails.
pub fn handle_events<S: KeyValueStore>(app: &App<S>) -> Result<Option<Action>, PomoError> {
    if event::poll(POLL_INTERVAL)
        .map_err(|e| PomoError::Config(format!("Event poll failed: {e}")))?
    {
        if let Event::Key(key) =
            event::read().map_err(|e| PomoError::Config(format!("Event read failed: {e}")))?
        {
            if key.kind == KeyEventKind::Press {
                return Ok(map_key(app, key));
            }
        }
    }

    Ok(None)
}

/// Map a key press to an action, given what is on screen.
pub fn map_key<S: KeyValueStore>(app: &App<S>, key: KeyEvent) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    if app.input().is_some() {
        return match key.code {
            KeyCode::Enter => Some(Action::InputSubmit),
            KeyCode::Esc => Some(Action::InputCancel),
            KeyCode::Backspace => Some(Action::InputBackspace),
            KeyCode::Char(c) => Some(Action::InputChar(c)),
            _ => None,
        };
    }

    if app.controller().is_awaiting_confirmation() {
        match key.code {
            KeyCode::Char('y' | 'Y') => return Some(Action::Confirm(true)),
            KeyCode::Char('n' | 'N') | KeyCode::Esc => return Some(Action::Confirm(false)),
            _ => {}
        }
    }

    match key.code {
        KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Esc if app.show_help => Some(Action::ToggleHelp),
        KeyCode::Esc => Some(Action::Quit),
        KeyCode::Char('s') => Some(Action::Start),
        KeyCode::Char(' ') => Some(Action::Toggle),
        KeyCode::Char('p') => Some(Action::Pause),
        KeyCode::Char('r') => Some(Action::Reset),
        KeyCode::Char(c @ '1'..='3') => {
            Some(Action::Preset(DurationKind::Work, WORK_PRESETS[preset_index(c, '1')]))
        }
        KeyCode::Char(c @ '4'..='6') => {
            Some(Action::Preset(DurationKind::Break, BREAK_PRESETS[preset_index(c, '4')]))
        }
        KeyCode::Char('w') => Some(Action::BeginInput(DurationKind::Work)),
        KeyCode::Char('b') => Some(Action::BeginInput(DurationKind::Break)),
        KeyCode::Enter => Some(Action::Enter),
        KeyCode::Char('j') | KeyCode::Down => Some(Action::SelectNext),
        KeyCode::Char('k') | KeyCode::Up => Some(Action::SelectPrevious),
        KeyCode::Char('m') => Some(Action::CycleMode),
        KeyCode::Char('x') => Some(Action::StopMusic),
        KeyCode::Char('H') => Some(Action::ClearHistory),
        KeyCode::Char('?') => Some(Action::ToggleHelp),
        _ => None,
    }
}

fn preset_index(c: char, first: char) -> usize {
    (u32::from(c) - u32::from(first)) as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::app::tests::{run_to_break_end, test_app};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_timer_keys() {
        let app = test_app();
        assert_eq!(map_key(&app, press(KeyCode::Char('s'))), Some(Action::Start));
        assert_eq!(map_key(&app, press(KeyCode::Char(' '))), Some(Action::Toggle));
        assert_eq!(map_key(&app, press(KeyCode::Char('p'))), Some(Action::Pause));
        assert_eq!(map_key(&app, press(KeyCode::Char('r'))), Some(Action::Reset));
        assert_eq!(map_key(&app, press(KeyCode::Char('q'))), Some(Action::Quit));
    }

    #[test]
    fn test_preset_keys() {
        let app = test_app();
        assert_eq!(
            map_key(&app, press(KeyCode::Char('1'))),
            Some(Action::Preset(DurationKind::Work, 15))
        );
        assert_eq!(
            map_key(&app, press(KeyCode::Char('3'))),
            Some(Action::Preset(DurationKind::Work, 45))
        );
        assert_eq!(
            map_key(&app, press(KeyCode::Char('5'))),
            Some(Action::Preset(DurationKind::Break, 10))
        );
    }

    #[test]
    fn test_ctrl_c_quits() {
        let app = test_app();
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(map_key(&app, key), Some(Action::Quit));
    }

    #[test]
    fn test_input_mode_captures_keys() {
        let mut app = test_app();
        app.apply(Action::BeginInput(DurationKind::Work));

        assert_eq!(map_key(&app, press(KeyCode::Char('q'))), Some(Action::InputChar('q')));
        assert_eq!(map_key(&app, press(KeyCode::Enter)), Some(Action::InputSubmit));
        assert_eq!(map_key(&app, press(KeyCode::Esc)), Some(Action::InputCancel));
    }

    #[test]
    fn test_confirm_keys_only_while_prompted() {
        let mut app = test_app();
        assert_eq!(map_key(&app, press(KeyCode::Char('y'))), None);

        run_to_break_end(&mut app);
        assert_eq!(map_key(&app, press(KeyCode::Char('y'))), Some(Action::Confirm(true)));
        assert_eq!(map_key(&app, press(KeyCode::Char('n'))), Some(Action::Confirm(false)));
        assert_eq!(map_key(&app, press(KeyCode::Char('s'))), Some(Action::Start));
    }
}
