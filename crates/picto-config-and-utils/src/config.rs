//! Application configuration.

use crate::{CoreResult, Paths};
use serde::{Deserialize, Serialize};
use std::path::Path;
use url::Url;

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Minimum simulated delay before a friend auto-replies.
pub const DEFAULT_AUTO_REPLY_MIN_DELAY_MS: u64 = 1_000;

/// Random jitter added on top of the minimum auto-reply delay.
pub const DEFAULT_AUTO_REPLY_JITTER_MS: u64 = 2_000;

/// Minimum gap between two pictogram suggestions.
pub const DEFAULT_SUGGESTION_COOLDOWN_MS: u64 = 30_000;

/// Settings read from `config.json`. Missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
    /// Base URL of the chat reply service. Canned replies are used when unset.
    pub chat_api_url: Option<String>,
    pub auto_reply_min_delay_ms: u64,
    pub auto_reply_jitter_ms: u64,
    pub suggestion_cooldown_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            chat_api_url: None,
            auto_reply_min_delay_ms: DEFAULT_AUTO_REPLY_MIN_DELAY_MS,
            auto_reply_jitter_ms: DEFAULT_AUTO_REPLY_JITTER_MS,
            suggestion_cooldown_ms: DEFAULT_SUGGESTION_COOLDOWN_MS,
        }
    }
}

impl Config {
    /// Defaults with environment overrides applied.
    pub fn new() -> Self {
        let mut config = Self::default();
        config.apply_env();
        config
    }

    /// Reads `config.json` under `paths` (defaults when absent), then applies
    /// `PICTO_LOG_LEVEL` and `PICTO_CHAT_API_URL`.
    pub fn load(paths: &Paths) -> CoreResult<Self> {
        let file = paths.config_file();
        let mut config = if file.exists() { Self::load_from_file(&file)? } else { Self::default() };
        config.apply_env();
        Ok(config)
    }

    pub fn load_from_file(path: &Path) -> CoreResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Writes `config.json`, creating the base directory if needed.
    pub fn save(&self, paths: &Paths) -> CoreResult<()> {
        paths.ensure_dirs()?;
        std::fs::write(paths.config_file(), serde_json::to_vec_pretty(self)?)?;
        Ok(())
    }

    fn apply_env(&mut self) {
        if let Ok(log_level) = std::env::var("PICTO_LOG_LEVEL") {
            self.log_level = log_level;
        }
        if let Ok(url) = std::env::var("PICTO_CHAT_API_URL") {
            let url = url.trim();
            if !url.is_empty() {
                self.chat_api_url = Some(url.to_string());
            }
        }
    }

    /// Parsed chat reply service URL, if one is configured.
    pub fn chat_api_url(&self) -> CoreResult<Option<Url>> {
        match &self.chat_api_url {
            Some(raw) => Ok(Some(Url::parse(raw)?)),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.log_level, DEFAULT_LOG_LEVEL);
        assert!(config.chat_api_url.is_none());
        assert_eq!(config.auto_reply_min_delay_ms, 1_000);
        assert_eq!(config.auto_reply_jitter_ms, 2_000);
        assert_eq!(config.suggestion_cooldown_ms, 30_000);
    }

    #[test]
    fn partial_file_fills_missing_fields() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.json");

        std::fs::write(&config_path, r#"{ "suggestion_cooldown_ms": 5 }"#).unwrap();

        let config = Config::load_from_file(&config_path).unwrap();
        assert_eq!(config.suggestion_cooldown_ms, 5);
        assert_eq!(config.log_level, DEFAULT_LOG_LEVEL);
        assert_eq!(config.auto_reply_jitter_ms, DEFAULT_AUTO_REPLY_JITTER_MS);
    }

    #[test]
    fn saved_config_reloads() {
        let dir = tempdir().unwrap();
        let paths = Paths::with_base_dir(dir.path().to_path_buf());

        let config = Config {
            chat_api_url: Some("http://127.0.0.1:8000".to_string()),
            auto_reply_min_delay_ms: 10,
            ..Config::default()
        };
        config.save(&paths).unwrap();

        let loaded = Config::load_from_file(&paths.config_file()).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn missing_file_means_defaults() {
        let dir = tempdir().unwrap();
        let paths = Paths::with_base_dir(dir.path().to_path_buf());

        let config = Config::load(&paths).unwrap();
        assert_eq!(config.auto_reply_jitter_ms, DEFAULT_AUTO_REPLY_JITTER_MS);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.json");
        std::fs::write(&config_path, "{ not json").unwrap();

        assert!(Config::load_from_file(&config_path).is_err());
    }

    #[test]
    fn chat_api_url_parsing() {
        let mut config = Config::default();
        assert!(config.chat_api_url().unwrap().is_none());

        config.chat_api_url = Some("http://127.0.0.1:8000".to_string());
        let url = config.chat_api_url().unwrap().unwrap();
        assert_eq!(url.scheme(), "http");
        assert_eq!(url.port(), Some(8000));

        config.chat_api_url = Some("not a valid url".to_string());
        assert!(config.chat_api_url().is_err());
    }
}
