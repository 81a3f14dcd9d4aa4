//! Domain records held by the session state.

use serde::{Deserialize, Serialize};

/// The signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    pub email: String,
}

impl User {
    pub fn new(username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
        }
    }
}

/// Profile captured by the registration form.
///
/// The password never leaves the auth flow, so it is not part of the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    #[serde(flatten)]
    pub user: User,
    pub age: String,
}

/// Direction of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Sent,
    Received,
}

/// A chat message in a friend's history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    #[serde(rename = "type")]
    pub kind: MessageKind,
    pub content: String,
    /// Display time, e.g. `10:30` or `Ayer`.
    pub time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    /// Inline emoji pictogram annotation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pictograms: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pictogram_urls: Vec<String>,
}

impl Message {
    /// A message written by the current user.
    pub fn sent(content: impl Into<String>, time: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Sent,
            content: content.into(),
            time: time.into(),
            avatar: None,
            pictograms: None,
            pictogram_urls: Vec::new(),
        }
    }

    /// A message from a friend, shown with the friend's avatar.
    pub fn received(
        content: impl Into<String>,
        time: impl Into<String>,
        avatar: impl Into<String>,
    ) -> Self {
        Self {
            kind: MessageKind::Received,
            content: content.into(),
            time: time.into(),
            avatar: Some(avatar.into()),
            pictograms: None,
            pictogram_urls: Vec::new(),
        }
    }

    pub fn with_pictograms(mut self, pictograms: impl Into<String>) -> Self {
        self.pictograms = Some(pictograms.into());
        self
    }

    pub fn with_pictogram_urls(mut self, urls: Vec<String>) -> Self {
        self.pictogram_urls = urls;
        self
    }
}

/// Presence of a friend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Presence {
    Online,
    Offline,
}

impl Presence {
    /// Label shown under the friend's name in the chat header.
    pub fn label(self) -> &'static str {
        match self {
            Presence::Online => "En línea",
            Presence::Offline => "Desconectado",
        }
    }
}

/// Directory entry for a friend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FriendData {
    pub avatar: String,
    pub status: Presence,
    pub last_message: String,
}

/// Top-level screens of the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Screen {
    #[serde(rename = "welcomeScreen")]
    Welcome,
    #[serde(rename = "registerScreen")]
    Register,
    #[serde(rename = "loginScreen")]
    Login,
    #[serde(rename = "mainScreen")]
    Main,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn message_wire_shape() {
        let message = Message::received("¡Es mi cumpleaños!", "10:35", "🌸").with_pictograms("🎈🎉🎂");
        let value = serde_json::to_value(&message).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "received",
                "content": "¡Es mi cumpleaños!",
                "time": "10:35",
                "avatar": "🌸",
                "pictograms": "🎈🎉🎂"
            })
        );
    }

    #[test]
    fn sent_message_omits_optional_fields() {
        let value = serde_json::to_value(Message::sent("hola", "10:32")).unwrap();
        assert_eq!(value, json!({"type": "sent", "content": "hola", "time": "10:32"}));
    }

    #[test]
    fn registration_flattens_user() {
        let registration = Registration {
            user: User::new("lucia", "lucia@example.com"),
            age: "8".into(),
        };
        let value = serde_json::to_value(&registration).unwrap();
        assert_eq!(
            value,
            json!({"username": "lucia", "email": "lucia@example.com", "age": "8"})
        );
    }

    #[test]
    fn screen_names() {
        assert_eq!(serde_json::to_value(Screen::Main).unwrap(), json!("mainScreen"));
        assert_eq!(
            serde_json::from_value::<Screen>(json!("welcomeScreen")).unwrap(),
            Screen::Welcome
        );
    }

    #[test]
    fn presence_labels() {
        assert_eq!(Presence::Online.label(), "En línea");
        assert_eq!(Presence::Offline.label(), "Desconectado");
    }
}
