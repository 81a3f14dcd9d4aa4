//! Friends and achievements listings.

use std::sync::Arc;

use achievement_tracker::{AchievementSystem, NullSink};
use anyhow::Result;
use picto_config_and_utils::{Config, Paths, SystemClock};
use picto_session_state::AppState;
use serde_json::json;

use super::open_store;
use crate::output::{self, OutputFormat};

/// List friends and their status.
pub fn friends(_config: &Config, _paths: &Paths, format: &OutputFormat) -> Result<()> {
    let state = AppState::seeded();
    let friends = state.all_friends();

    output::emit(&friends, format, |friends| {
        println!("{:<12} {:<14} {}", "Amigo", "Estado", "Último mensaje");
        output::rule();
        for (name, data) in friends {
            println!(
                "{} {:<10} {:<14} {}",
                data.avatar,
                name,
                data.status.label(),
                data.last_message
            );
        }
    });

    Ok(())
}

/// Show achievement progress.
pub fn achievements(_config: &Config, paths: &Paths, format: &OutputFormat) -> Result<()> {
    let system = AchievementSystem::load(open_store(paths)?, Arc::new(NullSink), Arc::new(SystemClock));

    let report = json!({ "achievements": system.achievements() });
    output::emit(&report, format, |_| {
        output::title("🏆 Tus Logros:");
        for line in system.summary() {
            println!("  {}", line);
        }
    });

    Ok(())
}
