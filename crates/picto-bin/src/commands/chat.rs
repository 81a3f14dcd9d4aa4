//! Interactive chat session.

use std::sync::Arc;

use anyhow::Result;
use picto_app::{auth, Action, ActionOutcome, ChatError, DispatchError, LoginForm, PictoApp};
use picto_config_and_utils::{Config, Paths};
use picto_session_state::Screen;
use tokio::io::{stdin, AsyncBufReadExt, BufReader};
use tracing::{info, warn};

use super::build_context;
use crate::console::TerminalView;

const HELP: &str = "\
Commands:
  /friend <name>   open the conversation with a friend
  /picto <emoji>   add a pictogram to the draft
  /send            send the draft
  /theme <key>     switch theme (default, ocean, sunset, forest)
  /sound           toggle sounds
  /achievements    show achievement progress
  /notifications   show notifications
  /logout          sign out and end the session
  /help            show this help
  /quit            end the session
Anything else is sent to the current friend.";

/// A parsed input line.
#[derive(Debug, PartialEq, Eq)]
enum Input {
    Action(Action),
    Help,
    Quit,
    Unknown(String),
}

fn parse_input(line: &str) -> Option<Input> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    let Some(command) = line.strip_prefix('/') else {
        return Some(Input::Action(Action::SendMessage(Some(line.to_string()))));
    };

    let (name, arg) = match command.split_once(' ') {
        Some((name, arg)) => (name, arg.trim()),
        None => (command, ""),
    };
    let input = match (name, arg) {
        ("friend", name) if !name.is_empty() => Input::Action(Action::SelectFriend(name.to_string())),
        ("picto", emoji) if !emoji.is_empty() => Input::Action(Action::AddPictogram(emoji.to_string())),
        ("send", _) => Input::Action(Action::SendMessage(None)),
        ("theme", key) if !key.is_empty() => Input::Action(Action::ChangeTheme(key.to_string())),
        ("sound", _) => Input::Action(Action::ToggleSound),
        ("achievements", _) => Input::Action(Action::ShowAchievements),
        ("notifications", _) => Input::Action(Action::ShowNotifications),
        ("logout", _) => Input::Action(Action::Logout),
        ("help", _) => Input::Help,
        ("quit" | "exit", _) => Input::Quit,
        _ => Input::Unknown(line.to_string()),
    };
    Some(input)
}

/// Start an interactive chat session on stdin.
pub async fn chat(
    config: &Config,
    paths: &Paths,
    friend: Option<String>,
    login: Option<(String, String)>,
) -> Result<()> {
    let ctx = build_context(config, paths)?;
    let mut app = PictoApp::start(ctx).await;
    app.attach_view(Arc::new(TerminalView));
    app.greet().await?;

    if let Some((email, password)) = login {
        if auth::login(app.context(), LoginForm { email, password }).await.is_err() {
            app.shutdown();
            anyhow::bail!("Login failed");
        }
    } else {
        app.dispatch(Action::ShowScreen(Screen::Main)).await?;
    }

    if let Some(friend) = friend {
        app.dispatch(Action::SelectFriend(friend)).await?;
    }
    println!("{}", HELP);

    let mut lines = BufReader::new(stdin()).lines();
    loop {
        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = tokio::signal::ctrl_c() => None,
        };
        let Some(line) = line else { break };

        let action = match parse_input(&line) {
            None => continue,
            Some(Input::Help) => {
                println!("{}", HELP);
                continue;
            }
            Some(Input::Quit) => break,
            Some(Input::Unknown(line)) => {
                eprintln!("Unknown command: {} (try /help)", line);
                continue;
            }
            Some(Input::Action(action)) => action,
        };

        let logout = matches!(action, Action::Logout);
        match app.dispatch(action).await {
            Ok(ActionOutcome::Achievements(summary)) => {
                for entry in summary {
                    println!("  {}", entry);
                }
            }
            Ok(_) => {}
            // Already reported by a notification.
            Err(DispatchError::Chat(ChatError::EmptyMessage)) => {}
            Err(err) => {
                warn!(error = %err, "action failed");
                eprintln!("Error: {}", err);
            }
        }
        if logout {
            break;
        }
    }

    info!("chat session ended");
    app.shutdown();
    Ok(())
}
