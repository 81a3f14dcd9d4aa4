//! Where friends' automatic answers come from.

use async_trait::async_trait;
use chat_reply_client::{ChatReplyClient, FALLBACK_REPLY};
use rand::seq::SliceRandom;
use tracing::{debug, warn};

/// Text of an automatic answer, with optional pictograms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub content: String,
    pub pictograms: Option<String>,
}

impl Reply {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            pictograms: None,
        }
    }
}

#[async_trait]
pub trait ReplySource: Send + Sync {
    /// Answer from `friend_name` to the user's `text`.
    async fn reply(&self, friend_name: &str, text: &str) -> Reply;
}

const CANNED: [&str; 8] = [
    "¡Qué divertido! 😊",
    "¡Me encanta! ✨",
    "¡Genial! 🎉",
    "¿En serio? 😮",
    "¡Ja ja ja! 😄",
    "¡Súper! 🌟",
    "¡Wow! 🤩",
    "¡Increíble! 🚀",
];

/// Picks a random cheerful answer.
#[derive(Debug, Clone)]
pub struct CannedReplies {
    replies: Vec<String>,
}

impl CannedReplies {
    pub fn new() -> Self {
        Self::with_replies(CANNED.iter().map(|r| r.to_string()).collect())
    }

    /// An empty list falls back to the built-in answers.
    pub fn with_replies(replies: Vec<String>) -> Self {
        if replies.is_empty() {
            return Self::new();
        }
        Self { replies }
    }
}

impl Default for CannedReplies {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReplySource for CannedReplies {
    async fn reply(&self, _friend_name: &str, _text: &str) -> Reply {
        let content = self
            .replies
            .choose(&mut rand::thread_rng())
            .cloned()
            .unwrap_or_else(|| CANNED[0].to_string());
        Reply::text(content)
    }
}

/// Asks the chat reply service; any failure becomes the apology message.
#[derive(Debug, Clone)]
pub struct RemoteReplies {
    client: ChatReplyClient,
}

impl RemoteReplies {
    pub fn new(client: ChatReplyClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ReplySource for RemoteReplies {
    async fn reply(&self, friend_name: &str, text: &str) -> Reply {
        match self.client.ask(text).await {
            Ok(answer) => {
                debug!(friend = friend_name, intent = %answer.decided_intent, "remote reply");
                Reply {
                    pictograms: answer.pictogram_text(),
                    content: answer.response,
                }
            }
            Err(err) => {
                warn!(friend = friend_name, error = %err, "chat reply service failed, using fallback");
                Reply::text(FALLBACK_REPLY)
            }
        }
    }
}
