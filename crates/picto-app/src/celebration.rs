use std::sync::Arc;

use achievement_tracker::{Achievement, CelebrationSink};
use user_settings::{Chime, SettingsManager, SoundManager};

use crate::notify::{NotificationLevel, Notifier};

const CELEBRATION_VIBRATION: [u32; 5] = [100, 50, 100, 50, 200];

/// Announces unlocked achievements with a toast, a chime and a vibration.
pub(crate) struct ShellCelebration {
    pub(crate) notifier: Arc<dyn Notifier>,
    pub(crate) sound: Arc<SoundManager>,
    pub(crate) settings: Arc<SettingsManager>,
}

impl CelebrationSink for ShellCelebration {
    fn celebrate(&self, achievement: &Achievement) {
        self.notifier.notify(
            NotificationLevel::Success,
            &format!(
                "🏆 ¡Logro Desbloqueado! {} {}: {}",
                achievement.icon, achievement.title, achievement.description
            ),
        );
        self.sound.play(Chime::Success);
        if self.settings.settings().vibration_enabled {
            self.notifier.vibrate(&CELEBRATION_VIBRATION);
        }
    }
}
