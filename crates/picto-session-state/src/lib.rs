//! # Picto Session State
//!
//! The in-memory state behind the chat screen and the closed catalog of
//! domain events published when it changes.
//!
//! ```rust
//! use picto_session_state::{AppEvent, AppState, EventKind, Message};
//! use std::sync::{Arc, Mutex};
//!
//! let state = AppState::seeded();
//! let seen = Arc::new(Mutex::new(Vec::new()));
//!
//! let sink = seen.clone();
//! state.subscribe(EventKind::MessageAdded, move |event| {
//!     if let AppEvent::MessageAdded { friend_name, .. } = event {
//!         sink.lock().unwrap().push(friend_name.clone());
//!     }
//! });
//!
//! state.add_message("Ana", Message::sent("¡Hola!", "10:40"));
//! assert_eq!(state.messages("Ana").last().unwrap().content, "¡Hola!");
//! assert_eq!(*seen.lock().unwrap(), vec!["Ana".to_string()]);
//! ```

mod events;
mod seed;
mod state;
mod types;

pub use events::{AppEvent, EventKind};
pub use seed::DEFAULT_FRIEND;
pub use state::{AppState, SessionState};
pub use types::{FriendData, Message, MessageKind, Presence, Registration, Screen, User};

/// Subscription handle for application events.
pub type AppSubscription = picto_event_bus::Subscription<AppEvent>;
