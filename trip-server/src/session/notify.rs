//! Notifications about session state changes.
//!
//! The session reports what happened (booking confirmed, flight delayed)
//! to a [`Notifier`]. Delivery is fire-and-forget: the session never
//! learns whether a notification was shown.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use serde::Serialize;

/// A short message for the traveller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub title: String,
    pub description: String,
}

impl Notification {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }
}

/// Receives notifications from the session.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}


/// Default number of notifications kept by a [`NotificationLog`].
const DEFAULT_LOG_CAPACITY: usize = 50;

/// Notifier that keeps the most recent notifications in memory.
///
/// Cloning shares the underlying buffer, so one handle can be given to
/// the session and another used to read the log.
#[derive(Debug, Clone)]
pub struct NotificationLog {
    inner: Arc<Mutex<VecDeque<Notification>>>,
    capacity: usize,
}

impl NotificationLog {
    /// Create a log holding at most `capacity` notifications.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(VecDeque::with_capacity(capacity))),
            capacity: capacity.max(1),
        }
    }

    /// Snapshot of the stored notifications, oldest first.
    pub fn recent(&self) -> Vec<Notification> {
        match self.inner.lock() {
            Ok(guard) => guard.iter().cloned().collect(),
            Err(poisoned) => poisoned.into_inner().iter().cloned().collect(),
        }
    }

    /// Remove and return every stored notification.
    pub fn drain(&self) -> Vec<Notification> {
        let mut guard = match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        guard.drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.recent().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for NotificationLog {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_LOG_CAPACITY)
    }
}

impl Notifier for NotificationLog {
    fn notify(&self, notification: Notification) {
        tracing::debug!(title = %notification.title, "notification");
        let mut guard = match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if guard.len() == self.capacity {
            guard.pop_front();
        }
        guard.push_back(notification);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_keeps_order() {
        let log = NotificationLog::default();
        log.notify(Notification::new("a", "first"));
        log.notify(Notification::new("b", "second"));

        let titles: Vec<String> = log.recent().into_iter().map(|n| n.title).collect();
        assert_eq!(titles, vec!["a", "b"]);
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn log_is_bounded() {
        let log = NotificationLog::with_capacity(2);
        log.notify(Notification::new("a", ""));
        log.notify(Notification::new("b", ""));
        log.notify(Notification::new("c", ""));

        let titles: Vec<String> = log.recent().into_iter().map(|n| n.title).collect();
        assert_eq!(titles, vec!["b", "c"]);
    }

    #[test]
    fn clones_share_buffer() {
        let log = NotificationLog::default();
        let handle = log.clone();
        handle.notify(Notification::new("shared", ""));
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn drain_empties() {
        let log = NotificationLog::default();
        log.notify(Notification::new("a", ""));
        assert_eq!(log.drain().len(), 1);
        assert!(log.is_empty());
    }
}
