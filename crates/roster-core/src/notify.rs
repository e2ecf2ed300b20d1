//! Notification sink — fire-and-forget toasts shared by both controllers.
//!
//! The panel never observes delivery: a dropped receiver simply means
//! nobody is showing toasts anymore, and sends become no-ops. That is
//! what lets an in-flight submit resolve safely after the UI is gone.

use tokio::sync::mpsc;

/// Notification severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A toast notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
}

impl Notification {
    pub fn success(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Success,
        }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Error,
        }
    }

    pub fn warn(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Warning,
        }
    }

    pub fn info(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Info,
        }
    }
}

/// Cheap cloneable handle for emitting notifications.
#[derive(Debug, Clone)]
pub struct Notifier {
    tx: mpsc::UnboundedSender<Notification>,
}

impl Notifier {
    /// Create a notifier plus the receiving end the UI drains.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Notification>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    pub fn send(&self, notification: Notification) {
        let _ = self.tx.send(notification);
    }

    pub fn success(&self, msg: impl Into<String>) {
        self.send(Notification::success(msg));
    }

    pub fn error(&self, msg: impl Into<String>) {
        self.send(Notification::error(msg));
    }

    pub fn warn(&self, msg: impl Into<String>) {
        self.send(Notification::warn(msg));
    }

    pub fn info(&self, msg: impl Into<String>) {
        self.send(Notification::info(msg));
    }
}
