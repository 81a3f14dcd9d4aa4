//! Shell flow tests.
//!
//! Every test builds its own context over an in-memory store, a manual
//! wall clock and recording sinks. Delays run on tokio's paused clock.

mod auth;
mod shell;

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use picto_config_and_utils::{Config, ManualClock};
use picto_session_state::{AppEvent, AppState, AppSubscription, EventKind, Message};
use picto_storage::MemoryStore;
use tokio::time::Instant;
use user_settings::RecordingToneSink;

use crate::chat::{ChatHeader, ChatView};
use crate::context::AppContext;
use crate::notify::RecordingNotifier;
use crate::replies::CannedReplies;

/// 2024-01-01 10:30:00 UTC
pub(crate) const START_MILLIS: i64 = 1_704_105_000_000;

pub(crate) const REPLY: &str = "¡Genial! 🎉";

pub(crate) struct Harness {
    pub ctx: AppContext,
    pub notifier: Arc<RecordingNotifier>,
    pub tones: Arc<RecordingToneSink>,
    pub clock: Arc<ManualClock>,
    pub store: Arc<MemoryStore>,
}

/// Auto-replies arrive after exactly one second with a fixed text.
pub(crate) fn test_config() -> Config {
    Config {
        auto_reply_jitter_ms: 0,
        ..Config::default()
    }
}

pub(crate) fn harness() -> Harness {
    harness_with(MemoryStore::new())
}

pub(crate) fn harness_with(store: MemoryStore) -> Harness {
    let notifier = Arc::new(RecordingNotifier::new());
    let tones = Arc::new(RecordingToneSink::new());
    let clock = Arc::new(ManualClock::new(START_MILLIS));
    let store = Arc::new(store);

    let ctx = AppContext::builder(test_config())
        .state(AppState::seeded())
        .store(store.clone())
        .notifier(notifier.clone())
        .clock(clock.clone())
        .tone_sink(tones.clone())
        .replies(Arc::new(CannedReplies::with_replies(vec![REPLY.to_string()])))
        .build();

    Harness {
        ctx,
        notifier,
        tones,
        clock,
        store,
    }
}

/// Records every event of the given kinds, in publish order.
pub(crate) fn record(
    state: &AppState,
    kinds: &[EventKind],
) -> (Arc<Mutex<Vec<AppEvent>>>, Vec<AppSubscription>) {
    let events = Arc::new(Mutex::new(Vec::new()));
    let subs = kinds
        .iter()
        .map(|kind| {
            let sink = events.clone();
            state.subscribe(*kind, move |event| sink.lock().push(event.clone()))
        })
        .collect();
    (events, subs)
}

#[derive(Default)]
pub(crate) struct RecordingView {
    pub headers: Mutex<Vec<ChatHeader>>,
    pub conversations: Mutex<Vec<(String, usize)>>,
    pub appended: Mutex<Vec<Message>>,
}

impl ChatView for RecordingView {
    fn show_header(&self, header: &ChatHeader) {
        self.headers.lock().push(header.clone());
    }

    fn show_messages(&self, friend_name: &str, messages: &[Message]) {
        self.conversations
            .lock()
            .push((friend_name.to_string(), messages.len()));
    }

    fn append_message(&self, message: &Message) {
        self.appended.lock().push(message.clone());
    }
}

/// Paused time jumps straight to timer deadlines, give or take a tick.
pub(crate) fn assert_elapsed(started: Instant, expected: Duration) {
    let elapsed = started.elapsed();
    assert!(
        elapsed >= expected && elapsed < expected + Duration::from_millis(5),
        "elapsed {elapsed:?}, expected {expected:?}"
    );
}
