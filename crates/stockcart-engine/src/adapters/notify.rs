//! Notification sinks.

use std::sync::Mutex;

use tracing::warn;

use crate::ports::NotificationSink;

/// Logs notices at `warn`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl NotificationSink for TracingNotifier {
    fn warn(&self, message: &str) {
        warn!(notice = %message, "Cart notice");
    }
}

/// Prints notices to stderr, for terminal front ends.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotifier;

impl NotificationSink for ConsoleNotifier {
    fn warn(&self, message: &str) {
        eprintln!("⚠ {}", message);
    }
}

/// Records notices so callers can inspect them afterwards.
#[derive(Debug, Default)]
pub struct CollectingNotifier {
    messages: Mutex<Vec<String>>,
}

impl CollectingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Notices received so far, oldest first.
    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Returns and clears the recorded notices.
    pub fn take(&self) -> Vec<String> {
        std::mem::take(
            &mut *self
                .messages
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner()),
        )
    }
}

impl NotificationSink for CollectingNotifier {
    fn warn(&self, message: &str) {
        self.messages
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collecting_notifier() {
        let sink = CollectingNotifier::new();
        sink.warn("first");
        sink.warn("second");

        assert_eq!(sink.messages(), vec!["first", "second"]);
        assert_eq!(sink.take().len(), 2);
        assert!(sink.messages().is_empty());
    }
}
