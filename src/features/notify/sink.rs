//! In-app notices, confirmation prompts, and desktop notification fan-out.

use std::collections::VecDeque;
use std::time::Duration;

use super::desktop::{DesktopBackend, Permission};

/// Where the timer sends user-facing notifications.
pub trait NotificationSink {
    /// Show an informational notice.
    fn show_info(&mut self, title: &str, message: &str);

    /// Show a yes/no prompt. The caller owns the answer and its timeout.
    fn show_confirm(&mut self, title: &str, message: &str);

    /// Take down the prompt shown by `show_confirm`.
    fn close_confirm(&mut self);

    /// Best-effort OS-level notification.
    fn show_system_notification(&mut self, title: &str, body: &str, tag: &str);

    /// Let time pass for auto-dismissal.
    fn advance(&mut self, _elapsed: Duration) {}
}

/// An informational notice on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Heading
    pub title: String,
    /// Body text
    pub message: String,
    remaining: Duration,
}

impl Notice {
    /// Time left before the notice dismisses itself.
    #[must_use]
    pub const fn remaining(&self) -> Duration {
        self.remaining
    }
}

/// A yes/no prompt on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    /// Heading
    pub title: String,
    /// Question
    pub message: String,
}

/// Notification sink used by the terminal UI.
///
/// Notices queue up oldest first and each one expires on its own timer.
/// Desktop notifications go to the backend unless permission is denied;
/// a failed send downgrades the cached permission to denied.
pub struct NotificationCenter {
    notices: VecDeque<Notice>,
    prompt: Option<Prompt>,
    notice_timeout: Duration,
    desktop: Option<Box<dyn DesktopBackend>>,
    permission: Permission,
}

impl NotificationCenter {
    /// Create a center with no desktop backend.
    #[must_use]
    pub fn new(notice_timeout: Duration) -> Self {
        Self {
            notices: VecDeque::new(),
            prompt: None,
            notice_timeout,
            desktop: None,
            permission: Permission::Denied,
        }
    }

    /// Attach a desktop backend and cache its permission.
    #[must_use]
    pub fn with_desktop(mut self, backend: Box<dyn DesktopBackend>) -> Self {
        self.permission = backend.permission();
        self.desktop = Some(backend);
        self
    }

    /// Cached desktop permission.
    #[must_use]
    pub const fn permission(&self) -> Permission {
        self.permission
    }

    /// Oldest notice still on screen.
    #[must_use]
    pub fn current_notice(&self) -> Option<&Notice> {
        self.notices.front()
    }

    /// Number of notices on screen.
    #[must_use]
    pub fn notice_count(&self) -> usize {
        self.notices.len()
    }

    /// Active prompt, if any.
    #[must_use]
    pub const fn prompt(&self) -> Option<&Prompt> {
        self.prompt.as_ref()
    }

    /// Dismiss the oldest notice. Returns false if there was none.
    pub fn acknowledge(&mut self) -> bool {
        self.notices.pop_front().is_some()
    }
}

impl NotificationSink for NotificationCenter {
    fn show_info(&mut self, title: &str, message: &str) {
        self.notices.push_back(Notice {
            title: title.to_string(),
            message: message.to_string(),
            remaining: self.notice_timeout,
        });
    }

    fn show_confirm(&mut self, title: &str, message: &str) {
        self.prompt = Some(Prompt {
            title: title.to_string(),
            message: message.to_string(),
        });
    }

    fn close_confirm(&mut self) {
        self.prompt = None;
    }

    fn show_system_notification(&mut self, title: &str, body: &str, tag: &str) {
        if !self.permission.allows_sending() {
            return;
        }
        let Some(backend) = self.desktop.as_ref() else {
            return;
        };

        if let Err(e) = backend.notify(title, body, tag) {
            tracing::warn!(tag, error = %e, "desktop notification failed, using in-app notices only");
            self.permission = Permission::Denied;
        }
    }

    fn advance(&mut self, elapsed: Duration) {
        for notice in &mut self.notices {
            notice.remaining = notice.remaining.saturating_sub(elapsed);
        }
        self.notices.retain(|notice| !notice.remaining.is_zero());
    }
}
