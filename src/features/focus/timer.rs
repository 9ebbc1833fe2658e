//! Tick accounting and duration parsing/formatting.

use std::time::Duration;

/// Length of one countdown tick.
pub const TICK: Duration = Duration::from_secs(1);

/// Turns wall-clock deltas into whole ticks.
///
/// The remainder under one tick is carried into the next call.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickAccumulator {
    carry: Duration,
}

impl TickAccumulator {
    /// Create an empty accumulator.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            carry: Duration::ZERO,
        }
    }

    /// Add `elapsed` and return how many whole ticks are now due.
    pub fn add(&mut self, elapsed: Duration) -> u64 {
        self.carry += elapsed;
        let ticks = self.carry.as_secs();
        self.carry -= Duration::from_secs(ticks);
        ticks
    }

    /// Drop any partial tick.
    pub fn clear(&mut self) {
        self.carry = Duration::ZERO;
    }

    /// Partial tick carried so far.
    #[must_use]
    pub const fn carry(&self) -> Duration {
        self.carry
    }
}

/// Format seconds as MM:SS.
#[must_use]
pub fn format_mmss(total_seconds: u32) -> String {
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    format!("{minutes:02}:{seconds:02}")
}

/// Format seconds as a human-readable string.
#[must_use]
pub fn format_duration(total_seconds: u64) -> String {
    let total_minutes = total_seconds / 60;

    if total_minutes < 1 {
        return format!(
            "{} second{}",
            total_seconds,
            if total_seconds == 1 { "" } else { "s" }
        );
    }

    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;

    if hours > 0 {
        if minutes > 0 {
            format!(
                "{} hour{}, {} minute{}",
                hours,
                if hours == 1 { "" } else { "s" },
                minutes,
                if minutes == 1 { "" } else { "s" }
            )
        } else {
            format!("{} hour{}", hours, if hours == 1 { "" } else { "s" })
        }
    } else {
        format!("{} minute{}", minutes, if minutes == 1 { "" } else { "s" })
    }
}

/// Parse a custom duration entry into whole minutes.
///
/// Accepts a bare number of minutes ("25", "-5") or unit groups like
/// "1h30m" and "90m". Seconds round down. Sign and range are checked by the
/// caller. Totals that overflow are rejected.
#[must_use]
pub fn parse_minutes(s: &str) -> Option<i64> {
    let s = s.trim().to_lowercase();

    if let Ok(minutes) = s.parse::<i64>() {
        return Some(minutes);
    }

    let mut total_seconds: i64 = 0;
    let mut current_num = String::new();

    for c in s.chars() {
        if c.is_ascii_digit() {
            current_num.push(c);
        } else if c.is_whitespace() {
            continue;
        } else if current_num.is_empty() {
            return None;
        } else {
            let num: i64 = current_num.parse().ok()?;
            current_num.clear();

            let unit = match c {
                'h' => 3600,
                'm' => 60,
                's' => 1,
                _ => return None,
            };
            total_seconds = total_seconds.checked_add(num.checked_mul(unit)?)?;
        }
    }

    // Trailing number without unit counts as minutes
    if !current_num.is_empty() {
        let num: i64 = current_num.parse().ok()?;
        total_seconds = total_seconds.checked_add(num.checked_mul(60)?)?;
    }

    if total_seconds > 0 {
        Some(total_seconds / 60)
    } else {
        None
    }
}

/// Fraction of `total` already counted down, 0.0 - 1.0.
#[must_use]
pub fn progress(remaining: u32, total: u32) -> f64 {
    if total == 0 {
        return 1.0;
    }
    let remaining = f64::from(remaining.min(total));
    1.0 - remaining / f64::from(total)
}

/// Render a progress bar.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn render_progress_bar(progress: f64, width: usize) -> String {
    let filled = ((progress.clamp(0.0, 1.0)) * width as f64) as usize;
    let empty = width.saturating_sub(filled);

    format!("[{}{}]", "█".repeat(filled), "░".repeat(empty))
}
