//! Terminal implementations of the shell's output seams.

use picto_app::{ChatHeader, ChatView, NotificationLevel, Notifier};
use picto_session_state::{Message, MessageKind};
use tracing::debug;
use user_settings::{Chime, Tone, ToneSink};

/// Prints notifications as prefixed lines.
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, level: NotificationLevel, message: &str) {
        let icon = match level {
            NotificationLevel::Info => "ℹ️ ",
            NotificationLevel::Success => "✅",
            NotificationLevel::Warning => "⚠️ ",
            NotificationLevel::Error => "❌",
        };
        println!("{icon} {message}");
    }

    fn vibrate(&self, pattern: &[u32]) {
        debug!(?pattern, "vibrate");
    }
}

/// Terminals have no tone generator; the terminal bell stands in.
pub struct BellToneSink;

impl ToneSink for BellToneSink {
    fn play(&self, chime: Chime, tones: &[Tone]) {
        debug!(?chime, tones = tones.len(), "chime");
        print!("\x07");
    }
}

/// Renders the open conversation as plain lines.
pub struct TerminalView;

impl TerminalView {
    fn render(message: &Message) {
        let pictograms = message
            .pictograms
            .as_deref()
            .map(|p| format!(" {p}"))
            .unwrap_or_default();
        match message.kind {
            MessageKind::Sent => println!("  [{}] tú: {}{}", message.time, message.content, pictograms),
            MessageKind::Received => println!(
                "  [{}] {} {}{}",
                message.time,
                message.avatar.as_deref().unwrap_or("🙂"),
                message.content,
                pictograms
            ),
        }
    }
}

impl ChatView for TerminalView {
    fn show_header(&self, header: &ChatHeader) {
        println!("\n{} {} · {}", header.avatar, header.name, header.status);
        println!("{}", "-".repeat(50));
    }

    fn show_messages(&self, friend_name: &str, messages: &[Message]) {
        if messages.is_empty() {
            println!("  (sin mensajes con {friend_name})");
        }
        for message in messages {
            Self::render(message);
        }
    }

    fn append_message(&self, message: &Message) {
        Self::render(message);
    }
}
