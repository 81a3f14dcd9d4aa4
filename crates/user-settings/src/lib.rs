//! # User Settings
//!
//! - [`SettingsManager`]: the persisted [`Settings`] record
//! - [`themes`]: the built-in colour themes
//! - [`SoundManager`]: short chimes played through a [`ToneSink`]

mod manager;
mod settings;
mod sound;
pub mod themes;

pub use manager::SettingsManager;
pub use settings::{FontSize, SettingUpdate, Settings};
pub use sound::{Chime, NullToneSink, RecordingToneSink, SoundManager, Tone, ToneSink, Waveform};
pub use themes::{Palette, Theme};

use picto_storage::StorageError;
use thiserror::Error;

/// Error type for settings operations.
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Unknown theme: {0}")]
    UnknownTheme(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Result type for settings operations.
pub type SettingsResult<T> = Result<T, SettingsError>;
