//! Errors from loading configuration and preparing the data directory.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// `config.json` or a stored value is not valid JSON for its type.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// `chat_api_url` does not parse.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Home directory not found")]
    NoHomeDir,
}

pub type CoreResult<T> = Result<T, CoreError>;
