//! Session state wrapper.
//!
//! # Write Path
//!
//! 1. Mutate the state under the write lock
//! 2. Release the lock
//! 3. Publish the matching event
//!
//! Subscribers therefore always observe the committed state and may call
//! back into [`AppState`] without deadlocking.

use std::collections::{BTreeMap, HashMap};

use parking_lot::RwLock;
use picto_event_bus::EventBus;
use tracing::debug;

use crate::events::{AppEvent, EventKind};
use crate::seed;
use crate::types::{FriendData, Message, User};
use crate::AppSubscription;

/// Plain session data.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    pub current_user: Option<User>,
    pub current_friend: String,
    pub messages: HashMap<String, Vec<Message>>,
    pub friends_data: BTreeMap<String, FriendData>,
}

impl SessionState {
    /// State with the demo friends and conversation history.
    pub fn seeded() -> Self {
        Self {
            current_user: None,
            current_friend: seed::DEFAULT_FRIEND.to_string(),
            messages: seed::messages(),
            friends_data: seed::friends(),
        }
    }

    /// State with no friends and no history.
    pub fn empty(current_friend: impl Into<String>) -> Self {
        Self {
            current_user: None,
            current_friend: current_friend.into(),
            messages: HashMap::new(),
            friends_data: BTreeMap::new(),
        }
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::seeded()
    }
}

/// Session state plus the event bus its changes are published on.
///
/// Constructed once per session and shared by reference (`Arc<AppState>`).
pub struct AppState {
    state: RwLock<SessionState>,
    events: EventBus<AppEvent>,
}

impl AppState {
    pub fn new(state: SessionState) -> Self {
        Self {
            state: RwLock::new(state),
            events: EventBus::new(),
        }
    }

    /// A state seeded with the demo friends.
    pub fn seeded() -> Self {
        Self::new(SessionState::seeded())
    }

    /// Copy of the whole session state.
    pub fn snapshot(&self) -> SessionState {
        self.state.read().clone()
    }

    pub fn events(&self) -> &EventBus<AppEvent> {
        &self.events
    }

    // ========================================================================
    // User
    // ========================================================================

    pub fn current_user(&self) -> Option<User> {
        self.state.read().current_user.clone()
    }

    /// Sets or clears the signed-in user and publishes `UserChanged`.
    pub fn set_current_user(&self, user: Option<User>) {
        self.state.write().current_user = user.clone();
        debug!(signed_in = user.is_some(), "current user changed");
        self.events.publish(AppEvent::UserChanged(user));
    }

    // ========================================================================
    // Friends
    // ========================================================================

    pub fn current_friend(&self) -> String {
        self.state.read().current_friend.clone()
    }

    /// Switches the open conversation and publishes `FriendChanged`.
    ///
    /// Unknown names are accepted; lookups for them return no data.
    pub fn set_current_friend(&self, friend_name: impl Into<String>) {
        let friend_name = friend_name.into();
        self.state.write().current_friend = friend_name.clone();
        debug!(friend = %friend_name, "current friend changed");
        self.events.publish(AppEvent::FriendChanged(friend_name));
    }

    /// Directory entry for `friend_name`, `None` if unknown.
    pub fn friend_data(&self, friend_name: &str) -> Option<FriendData> {
        self.state.read().friends_data.get(friend_name).cloned()
    }

    /// All friends, ordered by name.
    pub fn all_friends(&self) -> BTreeMap<String, FriendData> {
        self.state.read().friends_data.clone()
    }

    /// Records the preview line shown in the friends list.
    ///
    /// Returns `false` (and changes nothing) for unknown friends.
    pub fn update_friend_last_message(&self, friend_name: &str, text: impl Into<String>) -> bool {
        match self.state.write().friends_data.get_mut(friend_name) {
            Some(friend) => {
                friend.last_message = text.into();
                true
            }
            None => false,
        }
    }

    // ========================================================================
    // Messages
    // ========================================================================

    /// History with `friend_name`, empty if there is none.
    pub fn messages(&self, friend_name: &str) -> Vec<Message> {
        self.state
            .read()
            .messages
            .get(friend_name)
            .cloned()
            .unwrap_or_default()
    }

    /// Appends to `friend_name`'s history and publishes `MessageAdded`.
    pub fn add_message(&self, friend_name: impl Into<String>, message: Message) {
        let friend_name = friend_name.into();
        self.state
            .write()
            .messages
            .entry(friend_name.clone())
            .or_default()
            .push(message.clone());

        debug!(friend = %friend_name, kind = ?message.kind, "message added");
        self.events.publish(AppEvent::MessageAdded {
            friend_name,
            message,
        });
    }

    // ========================================================================
    // Pass-through
    // ========================================================================

    pub fn subscribe<F>(&self, kind: EventKind, callback: F) -> AppSubscription
    where
        F: Fn(&AppEvent) + Send + Sync + 'static,
    {
        self.events.subscribe(kind, callback)
    }

    pub fn once<F>(&self, kind: EventKind, callback: F) -> AppSubscription
    where
        F: Fn(&AppEvent) + Send + Sync + 'static,
    {
        self.events.once(kind, callback)
    }

    /// Publishes an application-level event. Returns the number of subscribers reached.
    pub fn publish(&self, event: AppEvent) -> usize {
        self.events.publish(event)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::seeded()
    }
}
