//! Demo conversation history loaded on a fresh session.

use std::collections::{BTreeMap, HashMap};

use crate::types::{FriendData, Message, Presence};

/// Friend whose conversation is open when a session starts.
pub const DEFAULT_FRIEND: &str = "Ana";

pub(crate) fn friends() -> BTreeMap<String, FriendData> {
    [
        ("Ana", "🌸", Presence::Online, "¡Hola! ¿Cómo estás?"),
        ("Carlos", "🚀", Presence::Online, "¿Jugamos?"),
        ("María", "🦄", Presence::Offline, "Mira este pictograma..."),
    ]
    .into_iter()
    .map(|(name, avatar, status, last_message)| {
        (
            name.to_string(),
            FriendData {
                avatar: avatar.to_string(),
                status,
                last_message: last_message.to_string(),
            },
        )
    })
    .collect()
}

pub(crate) fn messages() -> HashMap<String, Vec<Message>> {
    let mut messages = HashMap::new();
    messages.insert(
        "Ana".to_string(),
        vec![
            Message::received("¡Hola! ¿Cómo estás?", "10:30 AM", "🌸"),
            Message::sent("¡Muy bien! ¿Y tú?", "10:32 AM"),
            Message::received("¡Es mi cumpleaños!", "10:35 AM", "🌸").with_pictograms("🎈🎉🎂"),
        ],
    );
    messages.insert(
        "Carlos".to_string(),
        vec![Message::received("¿Jugamos?", "09:15 AM", "🚀")],
    );
    messages.insert(
        "María".to_string(),
        vec![Message::received("Mira este pictograma...", "Ayer", "🦄").with_pictograms("🌈✨")],
    );
    messages
}
