//! # PictoAmigos Application Shell
//!
//! Wires the session state, validation, achievements, settings and reply
//! sources into the flows a chat client drives:
//!
//! - [`auth`]: registration, login, logout and live field checks
//! - [`chat`]: friend selection, sending, pictogram suggestions, auto-replies
//! - [`commands`]: the [`Action`] dispatch table UI surfaces call into
//!
//! Everything hangs off an explicitly constructed [`AppContext`]; there are
//! no globals, so each test builds a fresh one.

pub mod auth;
pub mod chat;
mod celebration;
pub mod commands;
mod context;
mod notify;
pub mod replies;
mod shell;

#[cfg(test)]
mod tests;

pub use auth::{AuthError, FormKind, LiveCheck, LoginForm, RegistrationForm};
pub use chat::{ChatController, ChatError, ChatHeader, ChatView, FollowUps, SentMessage};
pub use commands::{Action, ActionKind, ActionOutcome, CommandTable, DispatchError};
pub use context::{AppContext, AppContextBuilder};
pub use notify::{Notification, NotificationLevel, Notifier, RecordingNotifier, TracingNotifier};
pub use replies::{CannedReplies, Reply, ReplySource, RemoteReplies};
pub use shell::PictoApp;
