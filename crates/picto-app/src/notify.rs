use std::fmt;

use parking_lot::Mutex;
use tracing::{error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl NotificationLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for NotificationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

/// User-facing toasts and haptic feedback.
pub trait Notifier: Send + Sync {
    fn notify(&self, level: NotificationLevel, message: &str);

    /// Vibration pattern in milliseconds (on, off, on, ...).
    fn vibrate(&self, _pattern: &[u32]) {}
}

/// Writes notifications to the log. Used by headless sessions.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, level: NotificationLevel, message: &str) {
        match level {
            NotificationLevel::Info | NotificationLevel::Success => {
                info!(%level, "{message}")
            }
            NotificationLevel::Warning => warn!(%level, "{message}"),
            NotificationLevel::Error => error!(%level, "{message}"),
        }
    }
}

/// Keeps every notification and vibration for later inspection.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notifications: Mutex<Vec<Notification>>,
    vibrations: Mutex<Vec<Vec<u32>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.notifications.lock().clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.notifications
            .lock()
            .iter()
            .map(|n| n.message.clone())
            .collect()
    }

    /// Whether any notification at `level` contains `needle`.
    pub fn contains(&self, level: NotificationLevel, needle: &str) -> bool {
        self.notifications
            .lock()
            .iter()
            .any(|n| n.level == level && n.message.contains(needle))
    }

    pub fn vibrations(&self) -> Vec<Vec<u32>> {
        self.vibrations.lock().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, level: NotificationLevel, message: &str) {
        self.notifications.lock().push(Notification {
            level,
            message: message.to_string(),
        });
    }

    fn vibrate(&self, pattern: &[u32]) {
        self.vibrations.lock().push(pattern.to_vec());
    }
}
