//! Command dispatch table.
//!
//! UI surfaces never call flows directly; they dispatch an [`Action`] and
//! the handler registered for its [`ActionKind`] runs it.

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use picto_session_state::{AppEvent, Message, Screen};
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::debug;
use user_settings::{SettingUpdate, SettingsError};

use crate::auth;
use crate::chat::{ChatController, ChatError};
use crate::context::AppContext;
use crate::notify::NotificationLevel;

/// A user action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    ShowScreen(Screen),
    ShowNotifications,
    Logout,
    SelectFriend(String),
    /// Sends the given text, or the current draft when `None`.
    SendMessage(Option<String>),
    AddPictogram(String),
    ChangeTheme(String),
    ToggleSound,
    ShowAchievements,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    ShowScreen,
    ShowNotifications,
    Logout,
    SelectFriend,
    SendMessage,
    AddPictogram,
    ChangeTheme,
    ToggleSound,
    ShowAchievements,
}

impl ActionKind {
    pub const ALL: [ActionKind; 9] = [
        ActionKind::ShowScreen,
        ActionKind::ShowNotifications,
        ActionKind::Logout,
        ActionKind::SelectFriend,
        ActionKind::SendMessage,
        ActionKind::AddPictogram,
        ActionKind::ChangeTheme,
        ActionKind::ToggleSound,
        ActionKind::ShowAchievements,
    ];
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl Action {
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::ShowScreen(_) => ActionKind::ShowScreen,
            Action::ShowNotifications => ActionKind::ShowNotifications,
            Action::Logout => ActionKind::Logout,
            Action::SelectFriend(_) => ActionKind::SelectFriend,
            Action::SendMessage(_) => ActionKind::SendMessage,
            Action::AddPictogram(_) => ActionKind::AddPictogram,
            Action::ChangeTheme(_) => ActionKind::ChangeTheme,
            Action::ToggleSound => ActionKind::ToggleSound,
            Action::ShowAchievements => ActionKind::ShowAchievements,
        }
    }
}

/// What a handler produced.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionOutcome {
    Done,
    Sent(Message),
    /// Display name of the applied theme.
    ThemeApplied(String),
    SoundEnabled(bool),
    /// Achievement summary, title line first.
    Achievements(Vec<String>),
}

#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("No handler registered for {0}")]
    NotRegistered(ActionKind),

    #[error("Handler for {expected} received {actual:?}")]
    WrongAction { expected: ActionKind, actual: Action },

    #[error(transparent)]
    Chat(#[from] ChatError),

    #[error(transparent)]
    Settings(#[from] SettingsError),
}

pub type DispatchResult = Result<ActionOutcome, DispatchError>;

/// Handler function type for actions.
pub type HandlerFn =
    Box<dyn Fn(Action) -> Pin<Box<dyn Future<Output = DispatchResult> + Send>> + Send + Sync>;

/// Maps each [`ActionKind`] to at most one handler.
#[derive(Default)]
pub struct CommandTable {
    handlers: RwLock<HashMap<ActionKind, HandlerFn>>,
}

impl CommandTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` for `kind`, replacing any previous one.
    pub async fn register_handler<F, Fut>(&self, kind: ActionKind, handler: F)
    where
        F: Fn(Action) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = DispatchResult> + Send + 'static,
    {
        let boxed_handler: HandlerFn = Box::new(move |action| Box::pin(handler(action)));
        self.handlers.write().await.insert(kind, boxed_handler);
    }

    pub async fn is_registered(&self, kind: ActionKind) -> bool {
        self.handlers.read().await.contains_key(&kind)
    }

    /// Runs the handler registered for `action`'s kind.
    pub async fn dispatch(&self, action: Action) -> DispatchResult {
        let kind = action.kind();
        debug!(%kind, "dispatching action");

        let future = {
            let handlers = self.handlers.read().await;
            let handler = handlers.get(&kind).ok_or(DispatchError::NotRegistered(kind))?;
            handler(action)
        };
        future.await
    }
}

/// Registers the shell's handler for every [`ActionKind`].
pub async fn register_default_handlers(table: &CommandTable, ctx: AppContext, chat: Arc<ChatController>) {
    {
        let ctx = ctx.clone();
        table
            .register_handler(ActionKind::ShowScreen, move |action| {
                let ctx = ctx.clone();
                async move {
                    let Action::ShowScreen(screen) = action else {
                        return Err(wrong(ActionKind::ShowScreen, action));
                    };
                    ctx.vibrate(&[50]);
                    ctx.state.publish(AppEvent::ScreenChanged(screen));
                    Ok(ActionOutcome::Done)
                }
            })
            .await;
    }

    {
        let ctx = ctx.clone();
        table
            .register_handler(ActionKind::ShowNotifications, move |_| {
                let ctx = ctx.clone();
                async move {
                    ctx.notify(NotificationLevel::Info, "¡Tienes 3 mensajes nuevos!");
                    Ok(ActionOutcome::Done)
                }
            })
            .await;
    }

    {
        let ctx = ctx.clone();
        table
            .register_handler(ActionKind::Logout, move |_| {
                let ctx = ctx.clone();
                async move {
                    auth::logout(&ctx).await;
                    Ok(ActionOutcome::Done)
                }
            })
            .await;
    }

    {
        let chat = chat.clone();
        table
            .register_handler(ActionKind::SelectFriend, move |action| {
                let chat = chat.clone();
                async move {
                    let Action::SelectFriend(name) = action else {
                        return Err(wrong(ActionKind::SelectFriend, action));
                    };
                    chat.select_friend(&name);
                    Ok(ActionOutcome::Done)
                }
            })
            .await;
    }

    {
        let chat = chat.clone();
        table
            .register_handler(ActionKind::SendMessage, move |action| {
                let chat = chat.clone();
                async move {
                    let Action::SendMessage(text) = action else {
                        return Err(wrong(ActionKind::SendMessage, action));
                    };
                    let sent = match text {
                        Some(text) => chat.send_message(&text)?,
                        None => chat.send_draft()?,
                    };
                    Ok(ActionOutcome::Sent(sent.message))
                }
            })
            .await;
    }

    {
        let chat = chat.clone();
        table
            .register_handler(ActionKind::AddPictogram, move |action| {
                let chat = chat.clone();
                async move {
                    let Action::AddPictogram(pictogram) = action else {
                        return Err(wrong(ActionKind::AddPictogram, action));
                    };
                    chat.add_pictogram(&pictogram);
                    Ok(ActionOutcome::Done)
                }
            })
            .await;
    }

    {
        let ctx = ctx.clone();
        table
            .register_handler(ActionKind::ChangeTheme, move |action| {
                let ctx = ctx.clone();
                async move {
                    let Action::ChangeTheme(key) = action else {
                        return Err(wrong(ActionKind::ChangeTheme, action));
                    };
                    let theme = ctx.settings.change_theme(&key)?;
                    ctx.notify(
                        NotificationLevel::Success,
                        &format!("Tema \"{}\" aplicado", theme.name),
                    );
                    Ok(ActionOutcome::ThemeApplied(theme.name.to_string()))
                }
            })
            .await;
    }

    {
        let ctx = ctx.clone();
        table
            .register_handler(ActionKind::ToggleSound, move |_| {
                let ctx = ctx.clone();
                async move {
                    let enabled = !ctx.settings.settings().sound_enabled;
                    ctx.settings.update(SettingUpdate::SoundEnabled(enabled))?;
                    let message = if enabled {
                        "Sonidos activados 🔊"
                    } else {
                        "Sonidos desactivados 🔇"
                    };
                    ctx.notify(NotificationLevel::Info, message);
                    Ok(ActionOutcome::SoundEnabled(enabled))
                }
            })
            .await;
    }

    table
        .register_handler(ActionKind::ShowAchievements, move |_| {
            let ctx = ctx.clone();
            async move {
                let mut lines = vec!["🏆 Tus Logros:".to_string()];
                lines.extend(ctx.achievements.summary());
                Ok(ActionOutcome::Achievements(lines))
            }
        })
        .await;
}

fn wrong(expected: ActionKind, actual: Action) -> DispatchError {
    DispatchError::WrongAction { expected, actual }
}
