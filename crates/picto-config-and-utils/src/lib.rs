//! Core configuration, paths, logging and clock utilities for PictoAmigos.

mod clock;
mod config;
mod error;
mod logging;
mod paths;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{
    Config, DEFAULT_AUTO_REPLY_JITTER_MS, DEFAULT_AUTO_REPLY_MIN_DELAY_MS, DEFAULT_LOG_LEVEL,
    DEFAULT_SUGGESTION_COOLDOWN_MS,
};
pub use error::{CoreError, CoreResult};
pub use logging::{init_logging, parse_level};
pub use paths::Paths;
