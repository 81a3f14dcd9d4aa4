//! Storage key constants.

/// Keys for every persisted record.
pub struct StorageKeys;

impl StorageKeys {
    /// User preferences (`Settings` JSON object).
    pub const SETTINGS: &'static str = "pictoAmigosSettings";

    /// Achievement snapshot (id -> achievement JSON object).
    pub const ACHIEVEMENTS: &'static str = "pictoAmigosAchievements";

    /// Selected theme key, as a JSON string.
    pub const THEME: &'static str = "pictoAmigosTheme";

    /// Epoch millis of the last pictogram suggestion.
    pub const LAST_PICTOGRAM_SUGGESTION: &'static str = "lastPictogramSuggestion";
}
