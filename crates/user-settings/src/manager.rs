use std::sync::Arc;

use parking_lot::RwLock;
use picto_storage::snapshot::{load_merged, save_json};
use picto_storage::{KeyValueStore, StorageKeys};
use tracing::{info, warn};

use crate::settings::{SettingUpdate, Settings};
use crate::sound::SoundManager;
use crate::themes::{self, Theme};
use crate::{SettingsError, SettingsResult};

/// Owns the [`Settings`] record and writes every change back to the store.
///
/// A bound [`SoundManager`] follows `sound_enabled` through every update.
pub struct SettingsManager {
    store: Arc<dyn KeyValueStore>,
    settings: RwLock<Settings>,
    sound: RwLock<Option<Arc<SoundManager>>>,
}

impl SettingsManager {
    /// Stored record merged over the defaults. A missing record yields the
    /// defaults; stored fields that do not decode keep their default while
    /// the rest of the record is kept.
    pub fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let settings = load_merged(store.as_ref(), StorageKeys::SETTINGS, Settings::default());
        if themes::find(&settings.theme).is_none() {
            warn!(theme = %settings.theme, "stored theme is not in the catalog");
        }

        Self {
            store,
            settings: RwLock::new(settings),
            sound: RwLock::new(None),
        }
    }

    /// Makes `sound` follow `sound_enabled`, starting with the current value.
    pub fn bind_sound(&self, sound: Arc<SoundManager>) {
        sound.set_enabled(self.settings.read().sound_enabled);
        *self.sound.write() = Some(sound);
    }

    pub fn settings(&self) -> Settings {
        self.settings.read().clone()
    }

    /// The active theme. Unknown stored keys resolve to the default theme.
    pub fn theme(&self) -> &'static Theme {
        themes::find(&self.settings.read().theme).unwrap_or_else(themes::default_theme)
    }

    /// Applies one change and persists the full record.
    pub fn update(&self, update: SettingUpdate) -> SettingsResult<Settings> {
        let settings = {
            let mut settings = self.settings.write();
            settings.apply(update);
            settings.clone()
        };
        if let Some(sound) = self.sound.read().as_ref() {
            sound.set_enabled(settings.sound_enabled);
        }
        info!(?update, "setting updated");
        self.save(&settings)?;
        Ok(settings)
    }

    /// Switches to the theme `key` and persists it.
    pub fn change_theme(&self, key: &str) -> SettingsResult<&'static Theme> {
        let theme = themes::find(key).ok_or_else(|| SettingsError::UnknownTheme(key.to_string()))?;

        let settings = {
            let mut settings = self.settings.write();
            settings.theme = theme.key.to_string();
            settings.clone()
        };
        info!(theme = theme.key, "theme changed");
        self.save(&settings)?;
        save_json(self.store.as_ref(), StorageKeys::THEME, theme.key)?;
        Ok(theme)
    }

    fn save(&self, settings: &Settings) -> SettingsResult<()> {
        save_json(self.store.as_ref(), StorageKeys::SETTINGS, settings)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::FontSize;
    use crate::sound::NullToneSink;
    use picto_storage::MemoryStore;
    use serde_json::{json, Value};

    fn stored(store: &MemoryStore, key: &str) -> Value {
        serde_json::from_str(&store.get(key).unwrap().unwrap()).unwrap()
    }

    #[test]
    fn empty_store_gives_defaults() {
        let manager = SettingsManager::load(Arc::new(MemoryStore::new()));
        assert_eq!(manager.settings(), Settings::default());
        assert_eq!(manager.theme().key, "default");
    }

    #[test]
    fn partial_record_merges_over_defaults() {
        let store = MemoryStore::new();
        store
            .set(
                StorageKeys::SETTINGS,
                &json!({"soundEnabled": false, "fontSize": "large"}).to_string(),
            )
            .unwrap();

        let settings = SettingsManager::load(Arc::new(store)).settings();
        assert!(!settings.sound_enabled);
        assert_eq!(settings.font_size, FontSize::Large);
        assert!(settings.auto_reply);
        assert_eq!(settings.theme, "default");
    }

    #[test]
    fn corrupt_record_gives_defaults() {
        let store = MemoryStore::new();
        store.set(StorageKeys::SETTINGS, "not json").unwrap();
        assert_eq!(SettingsManager::load(Arc::new(store)).settings(), Settings::default());

    }

    #[test]
    fn bad_field_keeps_the_other_saved_choices() {
        let store = MemoryStore::new();
        store
            .set(
                StorageKeys::SETTINGS,
                &json!({"soundEnabled": false, "autoReply": false, "fontSize": "huge"}).to_string(),
            )
            .unwrap();

        let settings = SettingsManager::load(Arc::new(store)).settings();
        assert!(!settings.sound_enabled);
        assert!(!settings.auto_reply);
        assert_eq!(settings.font_size, FontSize::Medium);
        assert!(settings.vibration_enabled);
    }

    #[test]
    fn bound_sound_follows_updates() {
        let store = MemoryStore::new();
        store
            .set(StorageKeys::SETTINGS, r#"{"soundEnabled": false}"#)
            .unwrap();
        let manager = SettingsManager::load(Arc::new(store));
        let sound = Arc::new(SoundManager::new(Arc::new(NullToneSink), true));

        manager.bind_sound(sound.clone());
        assert!(!sound.is_enabled());

        manager.update(SettingUpdate::SoundEnabled(true)).unwrap();
        assert!(sound.is_enabled());
        manager.update(SettingUpdate::AutoReply(false)).unwrap();
        assert!(sound.is_enabled());
        manager.update(SettingUpdate::SoundEnabled(false)).unwrap();
        assert!(!sound.is_enabled());
    }

    #[test]
    fn update_persists_full_record() {
        let store = Arc::new(MemoryStore::new());
        let manager = SettingsManager::load(store.clone());

        let settings = manager.update(SettingUpdate::AutoReply(false)).unwrap();
        assert!(!settings.auto_reply);

        let saved = stored(&store, StorageKeys::SETTINGS);
        assert_eq!(saved["autoReply"], false);
        assert_eq!(saved["theme"], "default");
        assert_eq!(saved["vibrationEnabled"], true);

        let reloaded = SettingsManager::load(store);
        assert!(!reloaded.settings().auto_reply);
    }

    #[test]
    fn change_theme_persists_both_keys() {
        let store = Arc::new(MemoryStore::new());
        let manager = SettingsManager::load(store.clone());

        let theme = manager.change_theme("forest").unwrap();
        assert_eq!(theme.name, "Bosque Encantado");
        assert_eq!(manager.settings().theme, "forest");
        assert_eq!(stored(&store, StorageKeys::SETTINGS)["theme"], "forest");
        assert_eq!(stored(&store, StorageKeys::THEME), "forest");
    }

    #[test]
    fn unknown_theme_is_rejected() {
        let store = Arc::new(MemoryStore::new());
        let manager = SettingsManager::load(store.clone());

        let err = manager.change_theme("neon").unwrap_err();
        assert!(matches!(err, SettingsError::UnknownTheme(ref key) if key == "neon"));
        assert_eq!(manager.settings().theme, "default");
        assert!(store.is_empty());
    }

    #[test]
    fn unknown_stored_theme_resolves_to_default() {
        let store = MemoryStore::new();
        store
            .set(StorageKeys::SETTINGS, r#"{"theme": "neon"}"#)
            .unwrap();
        let manager = SettingsManager::load(Arc::new(store));
        assert_eq!(manager.settings().theme, "neon");
        assert_eq!(manager.theme().key, "default");
    }
}
