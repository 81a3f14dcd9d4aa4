use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Triangle,
}

/// One beep of a chime.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub frequency_hz: f32,
    pub duration_ms: u32,
    /// Start time relative to the first tone of the chime.
    pub offset_ms: u32,
    pub waveform: Waveform,
}

impl Tone {
    const fn sine(frequency_hz: f32, duration_ms: u32, offset_ms: u32) -> Self {
        Self {
            frequency_hz,
            duration_ms,
            offset_ms,
            waveform: Waveform::Sine,
        }
    }
}

/// Named tone sequences played on UI events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Chime {
    Notification,
    Success,
    Error,
    Message,
}

impl Chime {
    pub fn tones(self) -> &'static [Tone] {
        const NOTIFICATION: [Tone; 2] = [Tone::sine(800.0, 100, 0), Tone::sine(600.0, 100, 100)];
        const SUCCESS: [Tone; 3] = [
            Tone::sine(523.0, 100, 0),
            Tone::sine(659.0, 100, 100),
            Tone::sine(784.0, 200, 200),
        ];
        const ERROR: [Tone; 2] = [Tone::sine(300.0, 200, 0), Tone::sine(250.0, 300, 150)];
        const MESSAGE: [Tone; 1] = [Tone {
            frequency_hz: 440.0,
            duration_ms: 100,
            offset_ms: 0,
            waveform: Waveform::Triangle,
        }];

        match self {
            Self::Notification => &NOTIFICATION,
            Self::Success => &SUCCESS,
            Self::Error => &ERROR,
            Self::Message => &MESSAGE,
        }
    }
}

/// Audio output. Implementations schedule each tone at its offset.
pub trait ToneSink: Send + Sync {
    fn play(&self, chime: Chime, tones: &[Tone]);
}

/// Silent output, for headless sessions.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullToneSink;

impl ToneSink for NullToneSink {
    fn play(&self, _chime: Chime, _tones: &[Tone]) {}
}

/// Remembers which chimes were played.
#[derive(Debug, Default)]
pub struct RecordingToneSink {
    played: Mutex<Vec<Chime>>,
}

impl RecordingToneSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn played(&self) -> Vec<Chime> {
        self.played.lock().clone()
    }
}

impl ToneSink for RecordingToneSink {
    fn play(&self, chime: Chime, _tones: &[Tone]) {
        self.played.lock().push(chime);
    }
}

/// Plays chimes while sound is enabled.
pub struct SoundManager {
    enabled: AtomicBool,
    sink: Arc<dyn ToneSink>,
}

impl SoundManager {
    pub fn new(sink: Arc<dyn ToneSink>, enabled: bool) -> Self {
        Self {
            enabled: AtomicBool::new(enabled),
            sink,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::SeqCst);
    }

    /// Flips the enabled flag and returns the new value.
    pub fn toggle(&self) -> bool {
        !self.enabled.fetch_xor(true, Ordering::SeqCst)
    }

    /// Returns `false` when muted.
    pub fn play(&self, chime: Chime) -> bool {
        if !self.is_enabled() {
            return false;
        }
        debug!(?chime, "playing chime");
        self.sink.play(chime, chime.tones());
        true
    }
}
