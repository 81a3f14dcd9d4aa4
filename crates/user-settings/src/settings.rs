use serde::{Deserialize, Serialize};

/// Base font size preference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontSize {
    Small,
    #[default]
    Medium,
    Large,
    Xlarge,
}

impl FontSize {
    /// CSS `rem` value for the base font size.
    pub fn rem(self) -> f32 {
        match self {
            Self::Small => 0.9,
            Self::Medium => 1.0,
            Self::Large => 1.1,
            Self::Xlarge => 1.2,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "small" => Some(Self::Small),
            "medium" => Some(Self::Medium),
            "large" => Some(Self::Large),
            "xlarge" => Some(Self::Xlarge),
            _ => None,
        }
    }
}

/// User preferences, stored as one JSON record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Key into the theme catalog.
    pub theme: String,
    pub sound_enabled: bool,
    pub animations_enabled: bool,
    pub font_size: FontSize,
    /// Friends answer automatically when online.
    pub auto_reply: bool,
    pub vibration_enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: "default".to_string(),
            sound_enabled: true,
            animations_enabled: true,
            font_size: FontSize::Medium,
            auto_reply: true,
            vibration_enabled: true,
        }
    }
}

/// A single preference change. Themes go through
/// [`SettingsManager::change_theme`](crate::SettingsManager::change_theme).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SettingUpdate {
    SoundEnabled(bool),
    AnimationsEnabled(bool),
    FontSize(FontSize),
    AutoReply(bool),
    VibrationEnabled(bool),
}

impl Settings {
    pub(crate) fn apply(&mut self, update: SettingUpdate) {
        match update {
            SettingUpdate::SoundEnabled(on) => self.sound_enabled = on,
            SettingUpdate::AnimationsEnabled(on) => self.animations_enabled = on,
            SettingUpdate::FontSize(size) => self.font_size = size,
            SettingUpdate::AutoReply(on) => self.auto_reply = on,
            SettingUpdate::VibrationEnabled(on) => self.vibration_enabled = on,
        }
    }
}
