//! The Pomodoro session controller.
//!
//! Owns the single [`Session`] together with settings, stats, and history.
//! All input arrives as method calls: user actions (`start`, `pause`,
//! `reset`, `set_duration`, `respond_confirm`, `clear_history`) and time
//! (`advance`, or `tick` for one second). The controller never renders;
//! it queues [`ControllerEvent`]s that the presentation layer drains.
//!
//! Mode cycle:
//! - Work ends: count it, log it, cue, notify, pick a short or long break,
//!   and start that break after the auto-start delay.
//! - A break ends: cue, notify, and ask whether to start working. Yes
//!   starts a work session; no or no answer before the timeout switches to
//!   work and stays paused.

use std::time::Duration;

use super::records::{HistoryEntry, Settings, Stats};
use super::session::{DurationKind, Mode, Session};
use super::storage::FocusStorage;
use super::timer::TickAccumulator;
use crate::config::TimerConfig;
use crate::core::KeyValueStore;
use crate::error::PomoError;
use crate::features::notify::{AudioCue, NotificationSink};

/// Delays for deferred actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    /// Pause between a work session ending and its break starting.
    pub auto_start_delay: Duration,
    /// How long the "start working?" prompt waits before counting as no.
    pub confirm_timeout: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            auto_start_delay: Duration::from_millis(1500),
            confirm_timeout: Duration::from_secs(10),
        }
    }
}

impl From<&TimerConfig> for Timing {
    fn from(config: &TimerConfig) -> Self {
        Self {
            auto_start_delay: config.auto_start_delay(),
            confirm_timeout: config.confirm_timeout(),
        }
    }
}

/// A deferred action waiting on time or on the user.
///
/// Only ever set while the countdown is stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pending {
    /// The next break starts when `remaining` runs out.
    AutoStart {
        /// Time left before starting
        remaining: Duration,
    },
    /// Waiting for an answer to "start a new work session?".
    Confirm {
        /// Time left before the prompt counts as declined
        remaining: Duration,
    },
}

impl Pending {
    /// Count down by `elapsed`. Once the deadline is reached, returns the
    /// part of `elapsed` past it.
    fn count_down(&mut self, elapsed: Duration) -> Option<Duration> {
        let (Self::AutoStart { remaining } | Self::Confirm { remaining }) = self;
        if elapsed < *remaining {
            *remaining -= elapsed;
            return None;
        }

        let overshoot = elapsed - *remaining;
        *remaining = Duration::ZERO;
        Some(overshoot)
    }
}

/// State changes reported to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerEvent {
    /// Countdown started in this mode.
    Started(Mode),
    /// Countdown stopped, time kept.
    Paused,
    /// Countdown stopped and refilled.
    Reset,
    /// One second elapsed.
    Ticked {
        /// Seconds left after the tick
        remaining_seconds: u32,
    },
    /// A phase ran out.
    Completed {
        /// Phase that finished
        mode: Mode,
        /// Phase now loaded
        next: Mode,
    },
    /// The "start working?" prompt is up.
    ConfirmRequested,
    /// The prompt was answered or timed out.
    ConfirmResolved {
        /// Whether a work session was started
        accepted: bool,
    },
    /// A duration setting changed.
    SettingsChanged(Settings),
    /// History was emptied.
    HistoryCleared,
}

/// The Pomodoro state machine.
pub struct SessionController<S, N> {
    session: Session,
    settings: Settings,
    stats: Stats,
    history: Vec<HistoryEntry>,
    storage: FocusStorage<S>,
    notifier: N,
    audio: Box<dyn AudioCue>,
    timing: Timing,
    pending: Option<Pending>,
    ticks: TickAccumulator,
    events: Vec<ControllerEvent>,
}

impl<S: KeyValueStore, N: NotificationSink> SessionController<S, N> {
    /// Load persisted state and start idle in work mode.
    pub fn new(
        storage: FocusStorage<S>,
        notifier: N,
        audio: Box<dyn AudioCue>,
        timing: Timing,
    ) -> Self {
        let settings = storage.load_settings();
        let stats = storage.load_stats();
        let history = storage.load_history();

        tracing::info!(
            completed = stats.completed_count,
            history = history.len(),
            work_minutes = settings.work_minutes,
            break_minutes = settings.break_minutes,
            "timer state loaded"
        );

        Self {
            session: Session::idle(Mode::Work, settings.seconds_for(Mode::Work)),
            settings,
            stats,
            history,
            storage,
            notifier,
            audio,
            timing,
            pending: None,
            ticks: TickAccumulator::new(),
            events: Vec::new(),
        }
    }

    /// Current session.
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Current durations.
    #[must_use]
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Cumulative stats.
    #[must_use]
    pub const fn stats(&self) -> &Stats {
        &self.stats
    }

    /// Completed work sessions, newest first.
    #[must_use]
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// Deferred action, if any.
    #[must_use]
    pub const fn pending(&self) -> Option<&Pending> {
        self.pending.as_ref()
    }

    /// Whether the "start working?" prompt is waiting for an answer.
    #[must_use]
    pub const fn is_awaiting_confirmation(&self) -> bool {
        matches!(self.pending, Some(Pending::Confirm { .. }))
    }

    /// Full length of the current mode in seconds.
    #[must_use]
    pub const fn full_seconds(&self) -> u32 {
        self.settings.seconds_for(self.session.mode)
    }

    /// Notification sink.
    pub const fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Notification sink, mutably (for acknowledging notices).
    pub fn notifier_mut(&mut self) -> &mut N {
        &mut self.notifier
    }

    /// Take the queued events.
    pub fn drain_events(&mut self) -> Vec<ControllerEvent> {
        std::mem::take(&mut self.events)
    }

    /// Give back the underlying store.
    pub fn into_store(self) -> S {
        self.storage.into_inner()
    }

    /// Start the countdown. No-op while running.
    ///
    /// Starting while the "start working?" prompt is up answers it with yes.
    /// Starting during the auto-start delay starts the break right away.
    pub fn start(&mut self) {
        if self.session.running {
            return;
        }

        if let Some(Pending::Confirm { .. }) = self.pending.take() {
            self.finish_confirmation(true);
            return;
        }

        if self.session.remaining_seconds == 0 {
            self.session.remaining_seconds = self.full_seconds();
        }

        self.session.running = true;
        self.ticks.clear();
        tracing::debug!(mode = %self.session.mode, remaining = self.session.remaining_seconds, "countdown started");
        self.emit(ControllerEvent::Started(self.session.mode));
    }

    /// Stop the countdown, keeping the remaining time.
    ///
    /// Also cancels a pending auto-start.
    pub fn pause(&mut self) {
        if matches!(self.pending, Some(Pending::AutoStart { .. })) {
            self.pending = None;
            self.emit(ControllerEvent::Paused);
            return;
        }

        if !self.session.running {
            return;
        }

        self.session.running = false;
        self.ticks.clear();
        self.emit(ControllerEvent::Paused);
    }

    /// Stop the countdown and refill the current mode.
    ///
    /// Resetting while the "start working?" prompt is up answers it with no.
    pub fn reset(&mut self) {
        if let Some(Pending::Confirm { .. }) = self.pending.take() {
            self.finish_confirmation(false);
        }

        self.session.running = false;
        self.ticks.clear();
        self.session.remaining_seconds = self.full_seconds();
        self.emit(ControllerEvent::Reset);
    }

    /// Let `elapsed` wall-clock time pass.
    ///
    /// Whole seconds become ticks while running; a pending action counts
    /// down while stopped. Time past an auto-start deadline counts toward
    /// the break it started.
    pub fn advance(&mut self, elapsed: Duration) {
        self.notifier.advance(elapsed);

        let mut elapsed = elapsed;
        if let Some(pending) = self.pending.as_mut() {
            let Some(overshoot) = pending.count_down(elapsed) else {
                return;
            };
            self.fire_pending();
            elapsed = overshoot;
        }

        if !self.session.running {
            return;
        }

        let due = self.ticks.add(elapsed);
        for _ in 0..due {
            if !self.session.running {
                break;
            }
            self.tick();
        }
    }

    /// Count down one second. No-op unless running.
    pub fn tick(&mut self) {
        if !self.session.running {
            return;
        }

        self.session.remaining_seconds = self.session.remaining_seconds.saturating_sub(1);
        self.stats.record_second(self.session.mode);
        self.persist_stats();
        self.emit(ControllerEvent::Ticked {
            remaining_seconds: self.session.remaining_seconds,
        });

        if self.session.remaining_seconds == 0 {
            self.complete();
        }
    }

    /// Answer the "start working?" prompt.
    ///
    /// Returns false if no prompt was waiting; late answers are ignored.
    pub fn respond_confirm(&mut self, accepted: bool) -> bool {
        if !self.is_awaiting_confirmation() {
            return false;
        }

        self.pending = None;
        self.finish_confirmation(accepted);
        true
    }

    /// Change the work or short break duration.
    ///
    /// When idle in the affected mode the clock is refilled right away;
    /// otherwise the new length applies from the next reset.
    ///
    /// # Errors
    ///
    /// Returns `PomoError::InvalidInput` for non-positive minutes. The
    /// previous setting is kept. A failed save is returned after the new
    /// value has been applied in memory.
    pub fn set_duration(&mut self, minutes: i64, kind: DurationKind) -> Result<(), PomoError> {
        let minutes = u32::try_from(minutes)
            .ok()
            .filter(|m| *m > 0)
            .ok_or_else(|| {
                PomoError::InvalidInput(format!(
                    "{kind} duration must be a positive number of minutes, got {minutes}"
                ))
            })?;

        match kind {
            DurationKind::Work => self.settings.work_minutes = minutes,
            DurationKind::Break => self.settings.break_minutes = minutes,
        }
        let saved = self.persist_settings();

        if !self.session.running && self.session.mode == kind.mode() {
            self.session.remaining_seconds = self.full_seconds();
        }

        tracing::info!(%kind, minutes, "duration changed");
        self.emit(ControllerEvent::SettingsChanged(self.settings));
        saved
    }

    /// Remove all history entries. Stats are kept.
    ///
    /// # Errors
    ///
    /// Returns the storage error if the stored history couldn't be removed.
    /// The in-memory history is empty either way.
    pub fn clear_history(&mut self) -> Result<(), PomoError> {
        self.history.clear();
        let cleared = self.storage.clear_history();
        if let Err(e) = &cleared {
            tracing::warn!(error = %e, label = e.label(), "failed to clear history");
        }
        self.notifier
            .show_info("History cleared", "All completed sessions were removed.");
        self.emit(ControllerEvent::HistoryCleared);
        cleared
    }

    fn complete(&mut self) {
        let finished = self.session.mode;
        self.session.running = false;
        self.ticks.clear();

        if finished == Mode::Work {
            self.complete_work();
        } else {
            self.complete_break(finished);
        }
    }

    fn complete_work(&mut self) {
        self.stats.completed_count += 1;
        self.history.insert(0, HistoryEntry::work_now());
        self.persist_stats();
        self.persist_history();

        self.audio.play_work_complete();
        self.notifier
            .show_info("Work session complete!", "Time to take a break!");
        self.notifier.show_system_notification(
            "🍅 Work session complete!",
            "You finished a pomodoro. Time for a break.",
            "work-complete",
        );

        let next = Mode::break_after(self.stats.completed_count);
        self.load_mode(next);

        tracing::info!(completed = self.stats.completed_count, next = %next, "work session complete");
        self.emit(ControllerEvent::Completed {
            mode: Mode::Work,
            next,
        });

        if self.timing.auto_start_delay.is_zero() {
            self.start();
        } else {
            self.pending = Some(Pending::AutoStart {
                remaining: self.timing.auto_start_delay,
            });
        }
    }

    fn complete_break(&mut self, finished: Mode) {
        self.audio.play_break_complete();
        self.notifier.show_system_notification(
            &format!("⏰ {finished} over!"),
            "Break time is up. Ready for another work session?",
            "break-complete",
        );
        self.notifier
            .show_confirm("Break is over!", "Start a new work session?");

        tracing::info!(mode = %finished, "break complete");
        self.emit(ControllerEvent::Completed {
            mode: finished,
            next: Mode::Work,
        });
        self.emit(ControllerEvent::ConfirmRequested);

        if self.timing.confirm_timeout.is_zero() {
            self.finish_confirmation(false);
        } else {
            self.pending = Some(Pending::Confirm {
                remaining: self.timing.confirm_timeout,
            });
        }
    }

    fn fire_pending(&mut self) {
        match self.pending.take() {
            Some(Pending::AutoStart { .. }) => self.start(),
            Some(Pending::Confirm { .. }) => {
                tracing::debug!("confirmation timed out");
                self.finish_confirmation(false);
            }
            None => {}
        }
    }

    /// Resolve the prompt. `self.pending` must already be cleared.
    fn finish_confirmation(&mut self, accepted: bool) {
        self.notifier.close_confirm();
        self.load_mode(Mode::Work);
        self.emit(ControllerEvent::ConfirmResolved { accepted });

        if accepted {
            self.start();
        }
    }

    fn load_mode(&mut self, mode: Mode) {
        self.session = Session::idle(mode, self.settings.seconds_for(mode));
    }

    fn emit(&mut self, event: ControllerEvent) {
        self.events.push(event);
    }

    fn persist_stats(&mut self) {
        if let Err(e) = self.storage.save_stats(&self.stats) {
            tracing::warn!(error = %e, label = e.label(), "failed to save stats");
        }
    }

    fn persist_history(&mut self) {
        if let Err(e) = self.storage.save_history(&self.history) {
            tracing::warn!(error = %e, label = e.label(), "failed to save history");
        }
    }

    fn persist_settings(&mut self) -> Result<(), PomoError> {
        let saved = self.storage.save_settings(&self.settings);
        if let Err(e) = &saved {
            tracing::warn!(error = %e, label = e.label(), "failed to save settings");
        }
        saved
    }
}
