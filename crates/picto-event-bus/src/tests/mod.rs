//! Behavioural tests for the event bus.
//!
//! - `delivery.rs`    - subscribe/publish/unsubscribe delivery counts and order
//! - `once.rs`        - single-shot subscriptions
//! - `reentrancy.rs`  - mutation and nested publish during dispatch
//! - `isolation.rs`   - panicking subscribers

mod once;
mod reentrancy;

use crate::BusEvent;
use parking_lot::Mutex;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum TestEvent {
    Chat(String),
    Presence(bool),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum TestKind {
    Chat,
    Presence,
}

impl BusEvent for TestEvent {
    type Kind = TestKind;

    fn kind(&self) -> TestKind {
        match self {
            TestEvent::Chat(_) => TestKind::Chat,
            TestEvent::Presence(_) => TestKind::Presence,
        }
    }
}

/// Shared log that callbacks append labels to.
pub(crate) type Log = Arc<Mutex<Vec<String>>>;

pub(crate) fn log() -> Log {
    Arc::new(Mutex::new(Vec::new()))
}

pub(crate) fn chat(text: &str) -> TestEvent {
    TestEvent::Chat(text.to_string())
}
