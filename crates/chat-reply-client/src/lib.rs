//! # Chat Reply Client
//!
//! Talks to the reply service that classifies a child's message into an
//! intent and answers with a canned response plus matching pictograms.
//!
//! `POST {base}/chat` with [`ChatRequest`] returns a [`ChatReply`].

mod client;
mod types;

pub use client::{ChatReplyClient, DEFAULT_TIMEOUT};
pub use types::{ChatReply, ChatRequest, Health};

use thiserror::Error;

/// Shown in place of a reply when the service cannot be reached.
pub const FALLBACK_REPLY: &str =
    "Lo siento, no pude procesar tu mensaje. ¿Puedes intentarlo de nuevo?";

/// Error type for reply service calls.
#[derive(Error, Debug)]
pub enum ReplyError {
    #[error("Invalid service URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Service answered with status {0}")]
    Status(u16),
}

/// Result type for reply service calls.
pub type ReplyResult<T> = Result<T, ReplyError>;
