//! Domain events.
//!
//! Every event name is a variant here, so publishers and subscribers agree on
//! names and payload shapes at compile time.

use std::fmt;

use picto_event_bus::BusEvent;
use serde::{Deserialize, Serialize};

use crate::types::{Message, Registration, Screen, User};

/// An application event with its payload.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// The signed-in user was set (`Some`) or cleared (`None`).
    UserChanged(Option<User>),
    /// The open conversation switched to this friend.
    FriendChanged(String),
    /// A message was appended to a friend's history.
    MessageAdded { friend_name: String, message: Message },
    UserRegistered(Registration),
    UserLoggedIn(User),
    UserLoggedOut,
    ScreenChanged(Screen),
    /// The user sent a message from the composer.
    MessageSent { friend_name: String, message: Message },
    /// The user picked a friend from the list.
    FriendSelected(String),
}

/// Event names, used as subscription keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EventKind {
    UserChanged,
    FriendChanged,
    MessageAdded,
    UserRegistered,
    UserLoggedIn,
    UserLoggedOut,
    ScreenChanged,
    MessageSent,
    FriendSelected,
}

impl EventKind {
    pub const ALL: [EventKind; 9] = [
        EventKind::UserChanged,
        EventKind::FriendChanged,
        EventKind::MessageAdded,
        EventKind::UserRegistered,
        EventKind::UserLoggedIn,
        EventKind::UserLoggedOut,
        EventKind::ScreenChanged,
        EventKind::MessageSent,
        EventKind::FriendSelected,
    ];

    /// Wire name of the event.
    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::UserChanged => "userChanged",
            EventKind::FriendChanged => "friendChanged",
            EventKind::MessageAdded => "messageAdded",
            EventKind::UserRegistered => "userRegistered",
            EventKind::UserLoggedIn => "userLoggedIn",
            EventKind::UserLoggedOut => "userLoggedOut",
            EventKind::ScreenChanged => "screenChanged",
            EventKind::MessageSent => "messageSent",
            EventKind::FriendSelected => "friendSelected",
        }
    }

    /// Looks up a kind by wire name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == name)
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl BusEvent for AppEvent {
    type Kind = EventKind;

    fn kind(&self) -> EventKind {
        match self {
            AppEvent::UserChanged(_) => EventKind::UserChanged,
            AppEvent::FriendChanged(_) => EventKind::FriendChanged,
            AppEvent::MessageAdded { .. } => EventKind::MessageAdded,
            AppEvent::UserRegistered(_) => EventKind::UserRegistered,
            AppEvent::UserLoggedIn(_) => EventKind::UserLoggedIn,
            AppEvent::UserLoggedOut => EventKind::UserLoggedOut,
            AppEvent::ScreenChanged(_) => EventKind::ScreenChanged,
            AppEvent::MessageSent { .. } => EventKind::MessageSent,
            AppEvent::FriendSelected(_) => EventKind::FriendSelected,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names_round_trip() {
        for kind in EventKind::ALL {
            assert_eq!(EventKind::from_name(kind.as_str()), Some(kind));
            assert_eq!(
                serde_json::to_value(kind).unwrap(),
                serde_json::Value::String(kind.to_string())
            );
        }
        assert_eq!(EventKind::from_name("mesageAdded"), None);
    }

    #[test]
    fn payload_maps_to_kind() {
        let message = Message::sent("hola", "10:00");
        assert_eq!(
            AppEvent::MessageSent {
                friend_name: "Ana".into(),
                message
            }
            .kind(),
            EventKind::MessageSent
        );
        assert_eq!(AppEvent::UserLoggedOut.kind(), EventKind::UserLoggedOut);
        assert_eq!(
            AppEvent::ScreenChanged(Screen::Main).kind(),
            EventKind::ScreenChanged
        );
    }
}
