use std::sync::Arc;

use achievement_tracker::ids;
use picto_session_state::{AppEvent, EventKind, Screen};
use picto_storage::{KeyValueStore, MemoryStore, StorageKeys};
use user_settings::Chime;

use super::{harness, harness_with, record, RecordingView};
use crate::commands::{Action, ActionOutcome};
use crate::notify::NotificationLevel;
use crate::shell::PictoApp;

#[tokio::test(start_paused = true)]
async fn start_opens_welcome_screen() {
    let h = harness();
    let (events, _subs) = record(&h.ctx.state, &[EventKind::ScreenChanged]);

    let _app = PictoApp::start(h.ctx.clone()).await;
    assert_eq!(*events.lock(), vec![AppEvent::ScreenChanged(Screen::Welcome)]);
}

#[tokio::test(start_paused = true)]
async fn greeting_after_delay() {
    let h = harness();
    let app = PictoApp::start(h.ctx.clone()).await;

    app.greet().await.unwrap();
    assert!(h.notifier.contains(
        NotificationLevel::Success,
        "¡Bienvenido a PictoAmigos! 🌟"
    ));
    assert_eq!(h.tones.played(), vec![Chime::Notification]);
}

#[tokio::test(start_paused = true)]
async fn first_message_unlocks_achievement_once() {
    let h = harness();
    let app = PictoApp::start(h.ctx.clone()).await;

    for text in ["hola", "¿qué tal?"] {
        let outcome = app.dispatch(Action::SendMessage(Some(text.into()))).await.unwrap();
        assert!(matches!(outcome, ActionOutcome::Sent(_)));
    }

    assert!(h.ctx.achievements.is_unlocked(ids::FIRST_MESSAGE));
    let celebrations: Vec<_> = h
        .notifier
        .notifications()
        .into_iter()
        .filter(|n| n.message.contains("¡Logro Desbloqueado!"))
        .collect();
    assert_eq!(celebrations.len(), 1);
    assert!(celebrations[0].message.contains("¡Primer Mensaje!"));
    assert_eq!(
        h.tones.played(),
        vec![Chime::Success, Chime::Message, Chime::Message]
    );
}

#[tokio::test(start_paused = true)]
async fn three_friends_unlock_social_butterfly() {
    let h = harness();
    let app = PictoApp::start(h.ctx.clone()).await;

    for name in ["Ana", "Carlos", "Carlos", "María"] {
        app.dispatch(Action::SelectFriend(name.into())).await.unwrap();
    }
    assert!(h.ctx.achievements.is_unlocked(ids::SOCIAL_BUTTERFLY));
}

#[tokio::test(start_paused = true)]
async fn achievements_survive_restart() {
    let h = harness();
    let app = PictoApp::start(h.ctx.clone()).await;
    app.dispatch(Action::SendMessage(Some("hola".into()))).await.unwrap();

    let saved = h.store.get(StorageKeys::ACHIEVEMENTS).unwrap().unwrap();
    let store = MemoryStore::new();
    store.set(StorageKeys::ACHIEVEMENTS, &saved).unwrap();

    let restarted = harness_with(store);
    assert!(restarted.ctx.achievements.is_unlocked(ids::FIRST_MESSAGE));
}

#[tokio::test(start_paused = true)]
async fn attached_view_renders_main_screen() {
    let h = harness();
    let mut app = PictoApp::start(h.ctx.clone()).await;
    let view = Arc::new(RecordingView::default());
    app.attach_view(view.clone());

    app.dispatch(Action::ShowScreen(Screen::Main)).await.unwrap();
    assert_eq!(*view.conversations.lock(), vec![("Ana".to_string(), 3)]);
    assert_eq!(view.headers.lock()[0].status, "En línea");
}

#[tokio::test(start_paused = true)]
async fn shutdown_detaches_subscribers() {
    let h = harness();
    let app = PictoApp::start(h.ctx.clone()).await;
    let chat = app.chat().clone();
    app.shutdown();

    chat.send_message("hola").unwrap();
    assert_eq!(h.ctx.achievements.message_count(), 0);
    assert_eq!(h.ctx.state.events().subscriber_count(EventKind::MessageSent), 0);
}
