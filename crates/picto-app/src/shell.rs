use std::sync::Arc;
use std::time::Duration;

use picto_session_state::{AppEvent, AppSubscription, Screen};
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::info;
use user_settings::Chime;

use crate::chat::{ChatController, ChatView};
use crate::commands::{register_default_handlers, Action, CommandTable, DispatchResult};
use crate::context::AppContext;
use crate::notify::NotificationLevel;

pub const WELCOME_DELAY: Duration = Duration::from_millis(1_000);

/// A running PictoAmigos session.
pub struct PictoApp {
    ctx: AppContext,
    chat: Arc<ChatController>,
    commands: CommandTable,
    subscriptions: Vec<AppSubscription>,
}

impl PictoApp {
    /// Attaches the achievement tracker, registers the default command
    /// handlers and opens the welcome screen.
    pub async fn start(ctx: AppContext) -> Self {
        let chat = Arc::new(ChatController::new(ctx.clone()));
        let commands = CommandTable::new();
        register_default_handlers(&commands, ctx.clone(), chat.clone()).await;

        let subscriptions = ctx.achievements.attach(&ctx.state);
        ctx.state.publish(AppEvent::ScreenChanged(Screen::Welcome));
        info!("session started");

        Self {
            ctx,
            chat,
            commands,
            subscriptions,
        }
    }

    /// Shows the welcome toast and chime after [`WELCOME_DELAY`].
    pub fn greet(&self) -> JoinHandle<()> {
        let ctx = self.ctx.clone();
        tokio::spawn(async move {
            sleep(WELCOME_DELAY).await;
            ctx.notify(NotificationLevel::Success, "¡Bienvenido a PictoAmigos! 🌟");
            ctx.sound.play(Chime::Notification);
        })
    }

    pub fn context(&self) -> &AppContext {
        &self.ctx
    }

    pub fn chat(&self) -> &Arc<ChatController> {
        &self.chat
    }

    pub fn commands(&self) -> &CommandTable {
        &self.commands
    }

    pub async fn dispatch(&self, action: Action) -> DispatchResult {
        self.commands.dispatch(action).await
    }

    /// Connects a view; it stays attached until the session ends.
    pub fn attach_view(&mut self, view: Arc<dyn ChatView>) {
        let subs = self.chat.attach(view);
        self.subscriptions.extend(subs);
    }

    /// Detaches every subscriber this session registered.
    pub fn shutdown(self) {
        for sub in &self.subscriptions {
            sub.unsubscribe();
        }
        info!("session ended");
    }
}
