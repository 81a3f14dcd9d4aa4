//! CLI command implementations.

mod chat;
mod profile;
mod service;
mod settings;

pub use chat::chat;
pub use profile::{achievements, friends};
pub use service::{service_ask, service_health};
pub use settings::{settings_change, settings_show, SettingsChange};

use std::sync::Arc;

use anyhow::{Context, Result};
use chat_reply_client::ChatReplyClient;
use picto_app::{AppContext, CannedReplies, RemoteReplies, ReplySource};
use picto_config_and_utils::{Config, Paths};
use picto_storage::{JsonFileStore, KeyValueStore};
use tracing::debug;

use crate::console::{BellToneSink, ConsoleNotifier};

/// Open the on-disk store under the storage directory.
fn open_store(paths: &Paths) -> Result<Arc<dyn KeyValueStore>> {
    let store = JsonFileStore::open(paths.storage_dir())
        .with_context(|| format!("Failed to open storage at {}", paths.storage_dir().display()))?;
    Ok(Arc::new(store))
}

/// Client for the configured chat reply service, if any.
fn reply_client(config: &Config) -> Result<Option<ChatReplyClient>> {
    match config.chat_api_url()? {
        Some(url) => Ok(Some(ChatReplyClient::new(url)?)),
        None => Ok(None),
    }
}

/// Like [`reply_client`], but a missing URL is an error.
fn require_reply_client(config: &Config) -> Result<ChatReplyClient> {
    reply_client(config)?.context("No chat service configured. Set chat_api_url in config.json")
}

/// Build a terminal-backed context over the on-disk store.
fn build_context(config: &Config, paths: &Paths) -> Result<AppContext> {
    let replies: Arc<dyn ReplySource> = match reply_client(config)? {
        Some(client) => {
            debug!(url = %client.base_url(), "using remote replies");
            Arc::new(RemoteReplies::new(client))
        }
        None => Arc::new(CannedReplies::new()),
    };

    Ok(AppContext::builder(config.clone())
        .store(open_store(paths)?)
        .notifier(Arc::new(ConsoleNotifier))
        .tone_sink(Arc::new(BellToneSink))
        .replies(replies)
        .build())
}
