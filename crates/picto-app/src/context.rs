use std::sync::Arc;
use std::time::Duration;

use achievement_tracker::AchievementSystem;
use picto_config_and_utils::{Clock, Config, SystemClock};
use picto_session_state::AppState;
use picto_storage::{KeyValueStore, MemoryStore};
use rand::Rng;
use user_settings::{NullToneSink, SettingsManager, SoundManager, ToneSink};

use crate::celebration::ShellCelebration;
use crate::notify::{NotificationLevel, Notifier, TracingNotifier};
use crate::replies::{CannedReplies, ReplySource};

/// Everything the shell's flows need, shared by cheap clones.
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<Config>,
    pub state: Arc<AppState>,
    pub store: Arc<dyn KeyValueStore>,
    pub settings: Arc<SettingsManager>,
    pub sound: Arc<SoundManager>,
    pub achievements: AchievementSystem,
    pub notifier: Arc<dyn Notifier>,
    pub clock: Arc<dyn Clock>,
    pub replies: Arc<dyn ReplySource>,
}

impl AppContext {
    pub fn builder(config: Config) -> AppContextBuilder {
        AppContextBuilder::new(config)
    }

    pub fn notify(&self, level: NotificationLevel, message: &str) {
        self.notifier.notify(level, message);
    }

    /// Vibrates unless the user turned vibration off.
    pub fn vibrate(&self, pattern: &[u32]) {
        if self.settings.settings().vibration_enabled {
            self.notifier.vibrate(pattern);
        }
    }

    /// Base auto-reply delay plus a random jitter in `0..=jitter`, saturating
    /// at `u64::MAX` milliseconds.
    pub(crate) fn auto_reply_delay(&self) -> Duration {
        let jitter = rand::thread_rng().gen_range(0..=self.config.auto_reply_jitter_ms);
        Duration::from_millis(self.config.auto_reply_min_delay_ms.saturating_add(jitter))
    }
}

/// Builds an [`AppContext`]. Unset collaborators get headless defaults:
/// in-memory store, system clock, log notifier, silent audio, canned replies
/// and the seeded demo session.
pub struct AppContextBuilder {
    config: Config,
    state: Option<AppState>,
    store: Option<Arc<dyn KeyValueStore>>,
    notifier: Option<Arc<dyn Notifier>>,
    clock: Option<Arc<dyn Clock>>,
    tone_sink: Option<Arc<dyn ToneSink>>,
    replies: Option<Arc<dyn ReplySource>>,
}

impl AppContextBuilder {
    fn new(config: Config) -> Self {
        Self {
            config,
            state: None,
            store: None,
            notifier: None,
            clock: None,
            tone_sink: None,
            replies: None,
        }
    }

    pub fn state(mut self, state: AppState) -> Self {
        self.state = Some(state);
        self
    }

    pub fn store(mut self, store: Arc<dyn KeyValueStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn tone_sink(mut self, sink: Arc<dyn ToneSink>) -> Self {
        self.tone_sink = Some(sink);
        self
    }

    pub fn replies(mut self, replies: Arc<dyn ReplySource>) -> Self {
        self.replies = Some(replies);
        self
    }

    pub fn build(self) -> AppContext {
        let store = self
            .store
            .unwrap_or_else(|| Arc::new(MemoryStore::new()));
        let notifier = self
            .notifier
            .unwrap_or_else(|| Arc::new(TracingNotifier));
        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock));
        let tone_sink = self.tone_sink.unwrap_or_else(|| Arc::new(NullToneSink));
        let replies = self
            .replies
            .unwrap_or_else(|| Arc::new(CannedReplies::new()));

        let settings = Arc::new(SettingsManager::load(store.clone()));
        let sound = Arc::new(SoundManager::new(tone_sink, settings.settings().sound_enabled));
        settings.bind_sound(sound.clone());

        let celebration = Arc::new(ShellCelebration {
            notifier: notifier.clone(),
            sound: sound.clone(),
            settings: settings.clone(),
        });
        let achievements = AchievementSystem::load(store.clone(), celebration, clock.clone());

        AppContext {
            config: Arc::new(self.config),
            state: Arc::new(self.state.unwrap_or_else(AppState::seeded)),
            store,
            settings,
            sound,
            achievements,
            notifier,
            clock,
            replies,
        }
    }
}
