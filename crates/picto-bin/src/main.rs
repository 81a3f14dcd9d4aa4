//! PictoAmigos CLI - chat with pictogram friends from the terminal.

mod commands;
mod console;
mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use picto_config_and_utils::{init_logging, Config, Paths};
use tracing::debug;

/// PictoAmigos command-line interface.
#[derive(Parser)]
#[command(name = "pictoamigos")]
#[command(about = "Chat with your PictoAmigos friends using words and pictograms")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Output format (text or json)
    #[arg(short, long, default_value = "text", global = true)]
    format: output::OutputFormat,

    /// Log level (trace, debug, info, warn, error). Defaults to the configured level.
    #[arg(short, long, global = true, env = "PICTO_LOG_LEVEL")]
    log_level: Option<String>,

    /// Base directory for config, storage and logs. Defaults to ~/.pictoamigos
    #[arg(long, global = true)]
    base_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive chat session (default)
    Chat {
        /// Friend whose conversation opens first
        #[arg(short = 'F', long)]
        friend: Option<String>,
        /// Sign in with this email before chatting
        #[arg(long, requires = "password")]
        email: Option<String>,
        /// Password for --email
        #[arg(long)]
        password: Option<String>,
    },

    /// List friends and their status
    Friends,

    /// Show achievement progress
    Achievements,

    /// Show or change preferences
    Settings {
        #[command(subcommand)]
        command: Option<SettingsCommands>,
    },

    /// Talk to the chat reply service
    Service {
        #[command(subcommand)]
        command: ServiceCommands,
    },
}

#[derive(Subcommand)]
enum SettingsCommands {
    /// Print the current settings
    Show,
    /// Switch the colour theme
    Theme {
        /// Theme key (default, ocean, sunset, forest)
        key: String,
    },
    /// Turn sounds on or off
    ToggleSound,
    /// Set the base font size (small, medium, large, xlarge)
    FontSize { size: String },
    /// Turn automatic friend replies on or off
    AutoReply {
        #[arg(action = clap::ArgAction::Set)]
        enabled: bool,
    },
    /// Turn vibration on or off
    Vibration {
        #[arg(action = clap::ArgAction::Set)]
        enabled: bool,
    },
}

#[derive(Subcommand)]
enum ServiceCommands {
    /// Check whether the service is up
    Health,
    /// Ask the service for a reply
    Ask {
        /// Message text
        text: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let paths = match cli.base_dir {
        Some(base) => Paths::with_base_dir(base),
        None => Paths::new()?,
    };
    paths.ensure_dirs()?;
    let config = Config::load(&paths)?;

    let level = cli.log_level.as_deref().unwrap_or(&config.log_level);
    init_logging(level, Some(paths.log_file()));
    debug!(base_dir = %paths.base_dir().display(), "starting");

    let format = cli.format;
    match cli.command {
        None => commands::chat(&config, &paths, None, None).await,
        Some(Commands::Chat {
            friend,
            email,
            password,
        }) => {
            let login = email.zip(password);
            commands::chat(&config, &paths, friend, login).await
        }
        Some(Commands::Friends) => commands::friends(&config, &paths, &format),
        Some(Commands::Achievements) => commands::achievements(&config, &paths, &format),
        Some(Commands::Settings { command }) => {
            let command = command.unwrap_or(SettingsCommands::Show);
            run_settings(&config, &paths, command, &format).await
        }
        Some(Commands::Service { command }) => match command {
            ServiceCommands::Health => commands::service_health(&config, &format).await,
            ServiceCommands::Ask { text } => commands::service_ask(&config, &text, &format).await,
        },
    }
}

async fn run_settings(
    config: &Config,
    paths: &Paths,
    command: SettingsCommands,
    format: &output::OutputFormat,
) -> anyhow::Result<()> {
    use commands::SettingsChange;

    let change = match command {
        SettingsCommands::Show => return commands::settings_show(config, paths, format),
        SettingsCommands::Theme { key } => SettingsChange::Theme(key),
        SettingsCommands::ToggleSound => SettingsChange::ToggleSound,
        SettingsCommands::FontSize { size } => SettingsChange::FontSize(size),
        SettingsCommands::AutoReply { enabled } => SettingsChange::AutoReply(enabled),
        SettingsCommands::Vibration { enabled } => SettingsChange::Vibration(enabled),
    };
    commands::settings_change(config, paths, change, format).await
}
