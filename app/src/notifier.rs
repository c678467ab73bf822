//! Terminal toasts

use ibn_core::{Notification, Notifier, Severity};

/// Prints notifications on stderr, where a desktop host would show a toast
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notification: Notification) {
        tracing::debug!(severity = %notification.severity, "Showing notification");
        eprintln!("{}", render(&notification));
    }
}

fn render(notification: &Notification) -> String {
    let label = match notification.severity {
        Severity::Danger => "error",
        Severity::Warning => "warning",
        Severity::Success => "ok",
        Severity::Info => "info",
    };
    format!("[{}] {}", label, notification.message)
}
