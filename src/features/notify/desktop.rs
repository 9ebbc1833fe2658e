//! Desktop notifications through the OS notification service.

use notify_rust::Notification;

use crate::error::PomoError;

/// Whether desktop notifications may be shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Permission {
    /// A notification server answered.
    Granted,
    /// Disabled in config or no server is reachable.
    Denied,
    /// The platform gives no way to ask; sending is attempted anyway.
    Undetermined,
}

impl Permission {
    /// Whether a send should be attempted.
    #[must_use]
    pub const fn allows_sending(&self) -> bool {
        !matches!(self, Self::Denied)
    }
}

impl std::fmt::Display for Permission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Granted => write!(f, "granted"),
            Self::Denied => write!(f, "denied"),
            Self::Undetermined => write!(f, "undetermined"),
        }
    }
}

/// Something that can put a notification on the desktop.
#[cfg_attr(test, mockall::automock)]
pub trait DesktopBackend {
    /// Permission state probed at startup.
    fn permission(&self) -> Permission;

    /// Show a notification.
    ///
    /// # Errors
    ///
    /// Returns an error if the notification service rejects it.
    fn notify(&self, title: &str, body: &str, tag: &str) -> Result<(), PomoError>;
}

/// Desktop notifier backed by `notify-rust`.
#[derive(Debug, Clone)]
pub struct DesktopNotifier {
    app_name: String,
    permission: Permission,
}

impl DesktopNotifier {
    /// Probe the notification service once and cache the result.
    #[must_use]
    pub fn probe(enabled: bool) -> Self {
        let permission = if enabled {
            probe_server()
        } else {
            Permission::Denied
        };

        tracing::info!(%permission, "desktop_notification_permission");

        Self {
            app_name: "pomo".to_string(),
            permission,
        }
    }
}

#[cfg(all(unix, not(target_os = "macos")))]
fn probe_server() -> Permission {
    match notify_rust::get_server_information() {
        Ok(info) => {
            tracing::debug!(server = %info.name, "notification server found");
            Permission::Granted
        }
        Err(e) => {
            tracing::debug!(error = %e, "no notification server");
            Permission::Denied
        }
    }
}

#[cfg(not(all(unix, not(target_os = "macos"))))]
const fn probe_server() -> Permission {
    Permission::Undetermined
}

impl DesktopBackend for DesktopNotifier {
    fn permission(&self) -> Permission {
        self.permission
    }

    fn notify(&self, title: &str, body: &str, tag: &str) -> Result<(), PomoError> {
        let mut notification = Notification::new();
        notification.appname(&self.app_name).summary(title).body(body);

        // Same tag, same id: the server replaces the earlier notification.
        #[cfg(all(unix, not(target_os = "macos")))]
        notification.id(notification_id(tag));

        notification
            .show()
            .map(|_| ())
            .map_err(|e| PomoError::Config(format!("Failed to show {tag} notification: {e}")))
    }
}

/// Stable, non-zero notification id for a tag (FNV-1a).
#[must_use]
pub fn notification_id(tag: &str) -> u32 {
    let hash = tag.bytes().fold(0x811c_9dc5_u32, |hash, byte| {
        (hash ^ u32::from(byte)).wrapping_mul(0x0100_0193)
    });
    hash.max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_is_denied() {
        let notifier = DesktopNotifier::probe(false);
        assert_eq!(notifier.permission(), Permission::Denied);
    }

    #[test]
    fn test_notification_id_is_stable_per_tag() {
        assert_eq!(notification_id("work-complete"), notification_id("work-complete"));
        assert_ne!(notification_id("work-complete"), notification_id("break-complete"));
        assert_ne!(notification_id(""), 0);
    }

    #[test]
    fn test_permission_allows_sending() {
        assert!(Permission::Granted.allows_sending());
        assert!(Permission::Undetermined.allows_sending());
        assert!(!Permission::Denied.allows_sending());
    }
}
