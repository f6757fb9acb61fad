//! Desktop notifications for break reminders.

use notify_rust::Notification;
use studytimer_core::Notifier;

/// Shows reminders through the platform notification service.
///
/// There is no permission prompt on the desktop, so the `enabled` flag from
/// the config stands in for the user's permission.
pub struct DesktopNotifier {
    enabled: bool,
}

impl DesktopNotifier {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }
}

impl Notifier for DesktopNotifier {
    fn is_available(&self) -> bool {
        self.enabled
    }

    fn show(&self, title: &str, body: &str) {
        if let Err(e) = Notification::new()
            .summary(title)
            .body(body)
            .appname("studytimer")
            .icon("alarm-clock")
            .show()
        {
            tracing::debug!(error = %e, "desktop notification failed");
        }
    }
}
