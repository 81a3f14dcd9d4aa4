use parking_lot::Mutex;

use crate::catalog::Achievement;

/// Receives each newly unlocked achievement exactly once.
///
/// The shell turns this into a notification, a chime and a vibration.
pub trait CelebrationSink: Send + Sync {
    fn celebrate(&self, achievement: &Achievement);
}

/// Discards celebrations.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl CelebrationSink for NullSink {
    fn celebrate(&self, _achievement: &Achievement) {}
}

/// Remembers the ids it was told about, in order.
#[derive(Debug, Default)]
pub struct RecordingSink {
    celebrated: Mutex<Vec<String>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn celebrated(&self) -> Vec<String> {
        self.celebrated.lock().clone()
    }
}

impl CelebrationSink for RecordingSink {
    fn celebrate(&self, achievement: &Achievement) {
        self.celebrated.lock().push(achievement.id.clone());
    }
}
