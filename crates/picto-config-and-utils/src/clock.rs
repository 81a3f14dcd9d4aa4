//! Wall-clock access behind a trait so time-dependent rules can be tested.

use std::sync::atomic::{AtomicI64, Ordering};

/// Source of the current time.
pub trait Clock: Send + Sync {
    /// Milliseconds since the Unix epoch.
    fn now_millis(&self) -> i64;

    /// Local `HH:MM` label stamped on chat messages.
    fn time_label(&self) -> String;
}

/// The real system clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }

    fn time_label(&self) -> String {
        chrono::Local::now().format("%H:%M").to_string()
    }
}

/// A clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
    millis: AtomicI64,
}

impl ManualClock {
    pub fn new(start_millis: i64) -> Self {
        Self {
            millis: AtomicI64::new(start_millis),
        }
    }

    pub fn advance(&self, millis: i64) {
        self.millis.fetch_add(millis, Ordering::SeqCst);
    }

    pub fn set(&self, millis: i64) {
        self.millis.store(millis, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> i64 {
        self.millis.load(Ordering::SeqCst)
    }

    /// UTC label so tests are independent of the host time zone.
    fn time_label(&self) -> String {
        chrono::DateTime::from_timestamp_millis(self.now_millis())
            .map(|t| t.format("%H:%M").to_string())
            .unwrap_or_else(|| "00:00".to_string())
    }
}
