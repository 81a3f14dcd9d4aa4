//! The chat screen: friend selection, sending, and the deferred follow-ups
//! every sent message schedules.
//!
//! # Follow-ups
//!
//! After a message is sent two fire-and-forget tasks run on the tokio clock:
//!
//! 1. After [`SUGGESTION_DELAY`], a pictogram suggestion when the text has a
//!    known keyword, at most once per configured cooldown
//! 2. After the auto-reply delay, an answer from the friend if they are
//!    online and auto-reply is on
//!
//! Neither task is cancelled when the user moves on.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use picto_session_state::{AppEvent, AppState, AppSubscription, EventKind, Message, Presence, Screen};
use picto_storage::snapshot::{load_json, save_json};
use picto_storage::StorageKeys;
use thiserror::Error;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{debug, info, warn};
use user_settings::Chime;

use crate::context::AppContext;
use crate::notify::NotificationLevel;

pub const SUGGESTION_DELAY: Duration = Duration::from_millis(1_000);

/// Words a pictogram suggestion is offered for.
pub const PICTOGRAM_WORDS: [&str; 20] = [
    "hola", "adios", "casa", "comida", "agua", "feliz", "triste", "si", "no", "gracias",
    "por favor", "amor", "familia", "escuela", "jugar", "dormir", "comer", "beber", "correr",
    "caminar",
];

const SEND_VIBRATION: [u32; 3] = [50, 30, 50];
const SELECT_VIBRATION: [u32; 1] = [30];
const PICTOGRAM_VIBRATION: [u32; 1] = [25];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChatError {
    #[error("message is empty")]
    EmptyMessage,

    /// Follow-ups need a tokio runtime to run on.
    #[error("no tokio runtime to schedule follow-ups on")]
    NoRuntime,
}

/// What the chat header shows for a friend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatHeader {
    pub name: String,
    pub avatar: String,
    pub status: String,
}

/// A rendering surface for the open conversation.
pub trait ChatView: Send + Sync {
    fn show_header(&self, header: &ChatHeader);
    /// Replaces the visible history.
    fn show_messages(&self, friend_name: &str, messages: &[Message]);
    fn append_message(&self, message: &Message);
}

/// Handles to the tasks scheduled by a send.
pub struct FollowUps {
    /// Resolves to the suggested keyword, if a suggestion was shown.
    pub suggestion: JoinHandle<Option<String>>,
    /// Resolves to the friend's answer, if one was added.
    pub reply: JoinHandle<Option<Message>>,
}

pub struct SentMessage {
    pub friend_name: String,
    pub message: Message,
    pub follow_ups: FollowUps,
}

/// Chat flow controller. Holds the unsent draft.
pub struct ChatController {
    ctx: AppContext,
    draft: Mutex<String>,
}

impl ChatController {
    pub fn new(ctx: AppContext) -> Self {
        Self {
            ctx,
            draft: Mutex::new(String::new()),
        }
    }

    /// Opens the conversation with `friend_name` and publishes `FriendSelected`.
    pub fn select_friend(&self, friend_name: &str) {
        self.ctx.state.set_current_friend(friend_name);
        self.ctx.vibrate(&SELECT_VIBRATION);
        self.ctx
            .state
            .publish(AppEvent::FriendSelected(friend_name.to_string()));
    }

    /// Sends `text` to the current friend.
    ///
    /// Blank text is rejected with a warning. The follow-ups are spawned on
    /// the current tokio runtime; outside one nothing is sent and
    /// [`ChatError::NoRuntime`] is returned.
    pub fn send_message(&self, text: &str) -> Result<SentMessage, ChatError> {
        let text = text.trim();
        if text.is_empty() {
            self.ctx
                .notify(NotificationLevel::Warning, "Escribe un mensaje antes de enviar");
            return Err(ChatError::EmptyMessage);
        }
        let runtime = Handle::try_current().map_err(|_| ChatError::NoRuntime)?;

        let friend_name = self.ctx.state.current_friend();
        let message = Message::sent(text, self.ctx.clock.time_label());

        self.ctx.state.add_message(friend_name.clone(), message.clone());
        self.ctx.state.update_friend_last_message(&friend_name, text);

        let suggestion = {
            let ctx = self.ctx.clone();
            let text = text.to_string();
            runtime.spawn(async move {
                sleep(SUGGESTION_DELAY).await;
                offer_suggestion(&ctx, &text)
            })
        };

        self.draft.lock().clear();
        self.ctx.state.publish(AppEvent::MessageSent {
            friend_name: friend_name.clone(),
            message: message.clone(),
        });
        self.ctx.sound.play(Chime::Message);

        let reply = {
            let ctx = self.ctx.clone();
            let friend_name = friend_name.clone();
            let text = text.to_string();
            let delay = self.ctx.auto_reply_delay();
            runtime.spawn(async move {
                sleep(delay).await;
                auto_reply(&ctx, &friend_name, &text).await
            })
        };

        self.ctx.vibrate(&SEND_VIBRATION);
        debug!(friend = %friend_name, "message sent");

        Ok(SentMessage {
            friend_name,
            message,
            follow_ups: FollowUps { suggestion, reply },
        })
    }

    /// Sends the current draft.
    pub fn send_draft(&self) -> Result<SentMessage, ChatError> {
        let draft = self.draft();
        self.send_message(&draft)
    }

    pub fn draft(&self) -> String {
        self.draft.lock().clone()
    }

    pub fn set_draft(&self, text: impl Into<String>) {
        *self.draft.lock() = text.into();
    }

    /// Appends `pictogram` to the draft and counts it for achievements.
    pub fn add_pictogram(&self, pictogram: &str) {
        self.draft.lock().push_str(pictogram);
        self.ctx.vibrate(&PICTOGRAM_VIBRATION);
        self.ctx.achievements.track_pictogram_use(pictogram);
    }

    /// Header for `friend_name`, `None` for unknown friends.
    pub fn chat_header(&self, friend_name: &str) -> Option<ChatHeader> {
        header_for(&self.ctx.state, friend_name)
    }

    /// Status line while the user is typing, otherwise the friend's presence.
    pub fn typing_status(&self, typing: bool) -> Option<String> {
        if typing {
            return Some("Escribiendo...".to_string());
        }
        let friend = self.ctx.state.friend_data(&self.ctx.state.current_friend())?;
        Some(friend.status.label().to_string())
    }

    /// Keeps `view` in sync with the session. The returned handles detach it.
    pub fn attach(&self, view: Arc<dyn ChatView>) -> Vec<AppSubscription> {
        let state = &self.ctx.state;

        let on_friend = (Arc::downgrade(state), view.clone());
        let on_message = (Arc::downgrade(state), view.clone());
        let on_screen = (Arc::downgrade(state), view);

        vec![
            state.subscribe(EventKind::FriendChanged, move |event| {
                let (state, view) = &on_friend;
                if let (AppEvent::FriendChanged(name), Some(state)) = (event, state.upgrade()) {
                    render_conversation(&state, view.as_ref(), name);
                }
            }),
            state.subscribe(EventKind::MessageAdded, move |event| {
                let (state, view) = &on_message;
                let AppEvent::MessageAdded {
                    friend_name,
                    message,
                } = event
                else {
                    return;
                };
                if state
                    .upgrade()
                    .is_some_and(|state| state.current_friend() == *friend_name)
                {
                    view.append_message(message);
                }
            }),
            state.subscribe(EventKind::ScreenChanged, move |event| {
                let (state, view) = &on_screen;
                if let (AppEvent::ScreenChanged(Screen::Main), Some(state)) = (event, state.upgrade()) {
                    let current = state.current_friend();
                    render_conversation(&state, view.as_ref(), &current);
                }
            }),
        ]
    }
}

fn header_for(state: &AppState, friend_name: &str) -> Option<ChatHeader> {
    let friend = state.friend_data(friend_name)?;
    Some(ChatHeader {
        name: friend_name.to_string(),
        avatar: friend.avatar,
        status: friend.status.label().to_string(),
    })
}

/// Unknown friends get an empty history and keep the previous header.
fn render_conversation(state: &AppState, view: &dyn ChatView, friend_name: &str) {
    view.show_messages(friend_name, &state.messages(friend_name));
    if let Some(header) = header_for(state, friend_name) {
        view.show_header(&header);
    }
}

/// First word of `text` that has a pictogram, ignoring case and
/// `.,!?;` punctuation.
pub fn find_pictogram_word(text: &str) -> Option<String> {
    text.to_lowercase()
        .split(' ')
        .map(|word| word.replace(['.', ',', '!', '?', ';'], ""))
        .find(|word| PICTOGRAM_WORDS.contains(&word.as_str()))
}

/// Shows a pictogram suggestion for `text` unless one was shown within the
/// cooldown. Returns the suggested word.
pub fn offer_suggestion(ctx: &AppContext, text: &str) -> Option<String> {
    let word = find_pictogram_word(text)?;
    let now = ctx.clock.now_millis();
    let cooldown = i64::try_from(ctx.config.suggestion_cooldown_ms).unwrap_or(i64::MAX);

    let last: Option<i64> = load_json(ctx.store.as_ref(), StorageKeys::LAST_PICTOGRAM_SUGGESTION);
    if last.is_some_and(|last| now.saturating_sub(last) <= cooldown) {
        debug!(word, "pictogram suggestion throttled");
        return None;
    }

    ctx.notify(
        NotificationLevel::Info,
        &format!("¿Quieres agregar un pictograma para \"{word}\"?"),
    );
    if let Err(err) = save_json(ctx.store.as_ref(), StorageKeys::LAST_PICTOGRAM_SUGGESTION, &now) {
        warn!(error = %err, "failed to save suggestion timestamp");
    }
    Some(word)
}

/// Adds an answer from `friend_name` when they are online and auto-reply
/// is on. Returns the added message.
pub async fn auto_reply(ctx: &AppContext, friend_name: &str, text: &str) -> Option<Message> {
    if !ctx.settings.settings().auto_reply {
        debug!("auto-reply disabled");
        return None;
    }

    let friend = ctx.state.friend_data(friend_name)?;
    if friend.status != Presence::Online {
        debug!(friend = friend_name, "friend offline, no auto-reply");
        return None;
    }

    let reply = ctx.replies.reply(friend_name, text).await;
    let mut message = Message::received(reply.content, ctx.clock.time_label(), friend.avatar);
    if let Some(pictograms) = reply.pictograms {
        message = message.with_pictograms(pictograms);
    }

    ctx.state.add_message(friend_name, message.clone());
    ctx.state
        .update_friend_last_message(friend_name, message.content.clone());
    ctx.notify(
        NotificationLevel::Info,
        &format!("{friend_name} te ha enviado un mensaje"),
    );
    info!(friend = friend_name, "auto-reply delivered");
    Some(message)
}
