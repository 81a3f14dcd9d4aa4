use std::collections::HashSet;
use std::sync::Arc;

use parking_lot::Mutex;
use picto_config_and_utils::Clock;
use picto_session_state::{AppEvent, AppState, AppSubscription, EventKind};
use picto_storage::snapshot::{load_json, overlay, save_json};
use picto_storage::{KeyValueStore, StorageKeys};
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::catalog::{default_catalog, ids, Achievement};
use crate::celebration::CelebrationSink;

/// Two messages closer together than this count towards `speedTyper`.
pub const SPEED_WINDOW_MS: i64 = 60_000;

struct TrackerState {
    achievements: Vec<Achievement>,
    message_count: u64,
    last_message_at: i64,
    used_pictograms: HashSet<String>,
    chatted_friends: HashSet<String>,
}

impl TrackerState {
    fn find_mut(&mut self, id: &str) -> Option<&mut Achievement> {
        self.achievements.iter_mut().find(|a| a.id == id)
    }
}

struct Inner {
    store: Arc<dyn KeyValueStore>,
    sink: Arc<dyn CelebrationSink>,
    clock: Arc<dyn Clock>,
    state: Mutex<TrackerState>,
}

/// Shared handle to the achievement tracker.
///
/// Clones share state. Neither the store nor the sink is called while the
/// internal lock is held.
#[derive(Clone)]
pub struct AchievementSystem {
    inner: Arc<Inner>,
}

impl AchievementSystem {
    /// Loads saved progress from `store` over the built-in catalog.
    pub fn load(
        store: Arc<dyn KeyValueStore>,
        sink: Arc<dyn CelebrationSink>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let achievements = load_achievements(store.as_ref());
        let last_message_at = clock.now_millis();

        Self {
            inner: Arc::new(Inner {
                store,
                sink,
                clock,
                state: Mutex::new(TrackerState {
                    achievements,
                    message_count: 0,
                    last_message_at,
                    used_pictograms: HashSet::new(),
                    chatted_friends: HashSet::new(),
                }),
            }),
        }
    }

    /// All achievements in display order.
    pub fn achievements(&self) -> Vec<Achievement> {
        self.inner.state.lock().achievements.clone()
    }

    pub fn get(&self, id: &str) -> Option<Achievement> {
        self.inner
            .state
            .lock()
            .achievements
            .iter()
            .find(|a| a.id == id)
            .cloned()
    }

    pub fn is_unlocked(&self, id: &str) -> bool {
        self.get(id).is_some_and(|a| a.unlocked)
    }

    /// Messages seen since the tracker was attached.
    pub fn message_count(&self) -> u64 {
        self.inner.state.lock().message_count
    }

    /// Unlocks `id`. Returns `false` for unknown or already unlocked ids.
    pub fn unlock(&self, id: &str) -> bool {
        let (unlocked, snapshot) = {
            let mut state = self.inner.state.lock();
            let Some(achievement) = state.find_mut(id) else {
                debug!(id, "unlock ignored, unknown achievement");
                return false;
            };
            if achievement.unlocked {
                return false;
            }
            achievement.unlocked = true;
            let unlocked = achievement.clone();
            (unlocked, state.achievements.clone())
        };

        info!(id, title = %unlocked.title, "achievement unlocked");
        self.persist(&snapshot);
        self.inner.sink.celebrate(&unlocked);
        true
    }

    /// Adds `increment` to the progress of `id`, unlocking it once the
    /// target is reached. No-op for unknown or unlocked ids.
    pub fn update_progress(&self, id: &str, increment: u32) {
        let (reached, snapshot) = {
            let mut state = self.inner.state.lock();
            let Some(achievement) = state.find_mut(id) else {
                debug!(id, "progress ignored, unknown achievement");
                return;
            };
            if achievement.unlocked {
                return;
            }
            achievement.progress = Some(achievement.progress().saturating_add(increment));
            debug!(id, progress = achievement.progress(), target = ?achievement.target, "progress updated");
            let reached = achievement.target_reached();
            (reached, state.achievements.clone())
        };

        if reached {
            self.unlock(id);
        } else {
            self.persist(&snapshot);
        }
    }

    /// Counts `pictogram` towards `pictogramMaster` the first time it is used.
    pub fn track_pictogram_use(&self, pictogram: &str) {
        let first_use = self
            .inner
            .state
            .lock()
            .used_pictograms
            .insert(pictogram.to_string());
        if first_use {
            self.update_progress(ids::PICTOGRAM_MASTER, 1);
        }
    }

    /// Handles one sent message.
    pub fn record_message_sent(&self) {
        let now = self.inner.clock.now_millis();
        let (count, quick) = {
            let mut state = self.inner.state.lock();
            state.message_count += 1;
            let quick = now - state.last_message_at < SPEED_WINDOW_MS;
            state.last_message_at = now;
            (state.message_count, quick)
        };

        if count == 1 {
            self.unlock(ids::FIRST_MESSAGE);
        }
        if quick {
            self.update_progress(ids::SPEED_TYPER, 1);
        }
    }

    /// Handles a conversation being opened.
    pub fn record_friend_selected(&self, friend_name: &str) {
        let first_chat = self
            .inner
            .state
            .lock()
            .chatted_friends
            .insert(friend_name.to_string());
        if first_chat {
            self.update_progress(ids::SOCIAL_BUTTERFLY, 1);
        }
    }

    /// Subscribes to `MessageSent` and `FriendSelected` on `state`.
    ///
    /// The returned handles detach the tracker again.
    pub fn attach(&self, state: &AppState) -> Vec<AppSubscription> {
        let on_message = self.clone();
        let on_friend = self.clone();
        vec![
            state.subscribe(EventKind::MessageSent, move |_| {
                on_message.record_message_sent();
            }),
            state.subscribe(EventKind::FriendSelected, move |event| {
                if let AppEvent::FriendSelected(friend_name) = event {
                    on_friend.record_friend_selected(friend_name);
                }
            }),
        ]
    }

    /// One line per achievement, in display order.
    pub fn summary(&self) -> Vec<String> {
        self.inner
            .state
            .lock()
            .achievements
            .iter()
            .map(Achievement::summary_line)
            .collect()
    }

    fn persist(&self, achievements: &[Achievement]) {
        let snapshot: Map<String, Value> = achievements
            .iter()
            .filter_map(|a| serde_json::to_value(a).ok().map(|v| (a.id.clone(), v)))
            .collect();

        if let Err(err) = save_json(self.inner.store.as_ref(), StorageKeys::ACHIEVEMENTS, &snapshot) {
            warn!(error = %err, "failed to save achievements");
        }
    }
}

/// Merges each saved entry field by field over its catalog default.
///
/// Entries not in the catalog are dropped; catalog entries missing from the
/// snapshot keep their defaults.
fn load_achievements(store: &dyn KeyValueStore) -> Vec<Achievement> {
    let catalog = default_catalog();
    let Some(Value::Object(mut saved)) = load_json::<Value, _>(store, StorageKeys::ACHIEVEMENTS) else {
        return catalog;
    };

    catalog
        .into_iter()
        .map(|default| {
            let Some(entry) = saved.remove(&default.id) else {
                return default;
            };
            let base = match serde_json::to_value(&default) {
                Ok(base) => base,
                Err(_) => return default,
            };
            match serde_json::from_value::<Achievement>(overlay(base, entry)) {
                Ok(merged) => Achievement {
                    id: default.id,
                    ..merged
                },
                Err(err) => {
                    warn!(id = %default.id, error = %err, "ignoring malformed saved achievement");
                    default
                }
            }
        })
        .collect()
}
