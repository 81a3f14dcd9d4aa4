//! # Achievement Tracker
//!
//! Persisted, progressively unlocked achievements. Progress is advanced
//! either directly ([`AchievementSystem::update_progress`]) or by domain
//! events once the tracker is [attached](AchievementSystem::attach) to an
//! [`AppState`](picto_session_state::AppState).
//!
//! Unlocking is idempotent: the [`CelebrationSink`] hears about each
//! achievement at most once.

mod catalog;
mod celebration;
mod tracker;

pub use catalog::{default_catalog, ids, Achievement};
pub use celebration::{CelebrationSink, NullSink, RecordingSink};
pub use tracker::{AchievementSystem, SPEED_WINDOW_MS};
