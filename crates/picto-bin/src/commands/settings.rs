//! Preference commands.

use anyhow::{Context, Result};
use picto_app::{Action, ActionOutcome, PictoApp};
use picto_config_and_utils::{Config, Paths};
use serde_json::json;
use user_settings::{FontSize, SettingUpdate, SettingsManager};

use super::{build_context, open_store};
use crate::output::{self, OutputFormat};

/// A preference change requested on the command line.
#[derive(Debug, Clone)]
pub enum SettingsChange {
    Theme(String),
    ToggleSound,
    FontSize(String),
    AutoReply(bool),
    Vibration(bool),
}

/// Print the current settings.
pub fn settings_show(_config: &Config, paths: &Paths, format: &OutputFormat) -> Result<()> {
    let manager = SettingsManager::load(open_store(paths)?);
    let settings = manager.settings();
    let theme = manager.theme();

    let report = json!({ "settings": settings, "theme": theme });
    output::emit(&report, format, |_| {
        output::title("Settings");
        output::field("Theme", &format!("{} ({})", theme.name, theme.key));
        output::field("Sound", on_off(settings.sound_enabled));
        output::field("Animations", on_off(settings.animations_enabled));
        output::field(
            "Font size",
            &format!("{:?} ({}rem)", settings.font_size, settings.font_size.rem()),
        );
        output::field("Auto-reply", on_off(settings.auto_reply));
        output::field("Vibration", on_off(settings.vibration_enabled));
    });

    Ok(())
}

/// Apply one preference change.
///
/// Theme and sound changes go through the session's command table so they
/// announce themselves the same way the chat does.
pub async fn settings_change(
    config: &Config,
    paths: &Paths,
    change: SettingsChange,
    format: &OutputFormat,
) -> Result<()> {
    let ctx = build_context(config, paths)?;

    let message = match change {
        SettingsChange::Theme(key) => {
            let app = PictoApp::start(ctx).await;
            let outcome = app.dispatch(Action::ChangeTheme(key)).await;
            app.shutdown();
            match outcome? {
                ActionOutcome::ThemeApplied(name) => format!("Theme set to {}", name),
                other => format!("{:?}", other),
            }
        }
        SettingsChange::ToggleSound => {
            let app = PictoApp::start(ctx).await;
            let outcome = app.dispatch(Action::ToggleSound).await;
            app.shutdown();
            match outcome? {
                ActionOutcome::SoundEnabled(on) => format!("Sound {}", on_off(on)),
                other => format!("{:?}", other),
            }
        }
        SettingsChange::FontSize(name) => {
            let size = FontSize::from_name(&name)
                .with_context(|| format!("Unknown font size '{}' (small, medium, large, xlarge)", name))?;
            ctx.settings.update(SettingUpdate::FontSize(size))?;
            format!("Font size set to {}", name)
        }
        SettingsChange::AutoReply(on) => {
            ctx.settings.update(SettingUpdate::AutoReply(on))?;
            format!("Auto-reply {}", on_off(on))
        }
        SettingsChange::Vibration(on) => {
            ctx.settings.update(SettingUpdate::VibrationEnabled(on))?;
            format!("Vibration {}", on_off(on))
        }
    };

    output::done(&message, format);
    Ok(())
}

fn on_off(on: bool) -> &'static str {
    if on {
        "on"
    } else {
        "off"
    }
}
