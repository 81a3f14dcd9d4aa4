use std::time::Duration;

use picto_session_state::{AppEvent, EventKind, Registration, Screen, User};
use tokio::time::{sleep, Instant};

use super::{assert_elapsed, harness, record};
use crate::auth::{self, AuthError, LoginForm, RegistrationForm, LOGIN_DELAY, REGISTER_DELAY};
use crate::notify::NotificationLevel;

const AUTH_EVENTS: [EventKind; 5] = [
    EventKind::UserChanged,
    EventKind::UserRegistered,
    EventKind::UserLoggedIn,
    EventKind::UserLoggedOut,
    EventKind::ScreenChanged,
];

fn valid_registration() -> RegistrationForm {
    RegistrationForm {
        username: "lucia".into(),
        email: "lucia@example.com".into(),
        password: "secreto".into(),
        age: "9".into(),
    }
}

#[tokio::test(start_paused = true)]
async fn register_rejects_invalid_form() {
    let h = harness();
    let (events, _subs) = record(&h.ctx.state, &AUTH_EVENTS);

    let form = RegistrationForm {
        username: "lu".into(),
        email: "lucia@".into(),
        password: "".into(),
        age: "9".into(),
    };
    let started = Instant::now();
    let Err(AuthError::Invalid(errors)) = auth::register(&h.ctx, form).await else {
        panic!("expected validation errors");
    };

    assert_eq!(started.elapsed(), Duration::ZERO);
    assert_eq!(errors.len(), 3);
    assert_eq!(errors["username"], "Debe tener al menos 3 caracteres");
    assert_eq!(errors["email"], "Ingresa un email válido");
    assert_eq!(errors["password"], "Este campo es requerido");

    assert!(h.notifier.contains(
        NotificationLevel::Warning,
        "corrige los errores en el formulario"
    ));
    assert_eq!(h.notifier.vibrations(), vec![vec![100, 50, 100]]);
    assert!(h.ctx.state.current_user().is_none());
    assert!(events.lock().is_empty());
}

#[tokio::test(start_paused = true)]
async fn register_signs_in_then_opens_main_screen() {
    let h = harness();
    let (events, _subs) = record(&h.ctx.state, &AUTH_EVENTS);

    let started = Instant::now();
    let user = auth::register(&h.ctx, valid_registration()).await.unwrap();

    assert_elapsed(started, REGISTER_DELAY * 2);
    let expected_user = User::new("lucia", "lucia@example.com");
    assert_eq!(user, expected_user);
    assert_eq!(h.ctx.state.current_user(), Some(expected_user.clone()));
    assert_eq!(
        *events.lock(),
        vec![
            AppEvent::UserChanged(Some(expected_user.clone())),
            AppEvent::UserRegistered(Registration {
                user: expected_user,
                age: "9".into(),
            }),
            AppEvent::ScreenChanged(Screen::Main),
        ]
    );
    assert!(h.notifier.contains(NotificationLevel::Success, "¡Cuenta creada exitosamente!"));
}

#[tokio::test(start_paused = true)]
async fn register_waits_before_signing_in() {
    let h = harness();
    let (events, _subs) = record(&h.ctx.state, &AUTH_EVENTS);

    let ctx = h.ctx.clone();
    let task = tokio::spawn(async move { auth::register(&ctx, valid_registration()).await });

    sleep(REGISTER_DELAY - Duration::from_millis(1)).await;
    assert!(h.ctx.state.current_user().is_none());

    sleep(Duration::from_millis(2)).await;
    assert!(h.ctx.state.current_user().is_some());
    assert_eq!(events.lock().len(), 2);

    task.await.unwrap().unwrap();
    assert_eq!(events.lock().last(), Some(&AppEvent::ScreenChanged(Screen::Main)));
}

#[tokio::test(start_paused = true)]
async fn login_uses_email_local_part() {
    let h = harness();
    let (events, _subs) = record(&h.ctx.state, &AUTH_EVENTS);

    let started = Instant::now();
    let form = LoginForm {
        email: "ana.maria@example.com".into(),
        password: "x".into(),
    };
    let user = auth::login(&h.ctx, form).await.unwrap();

    assert_elapsed(started, LOGIN_DELAY * 2);
    assert_eq!(user.username, "ana.maria");
    assert_eq!(
        *events.lock(),
        vec![
            AppEvent::UserChanged(Some(user.clone())),
            AppEvent::UserLoggedIn(user),
            AppEvent::ScreenChanged(Screen::Main),
        ]
    );
    assert!(h.notifier.contains(NotificationLevel::Success, "¡Bienvenido de vuelta!"));
}

#[tokio::test(start_paused = true)]
async fn login_rejects_missing_password() {
    let h = harness();
    let form = LoginForm {
        email: "ana@example.com".into(),
        password: "   ".into(),
    };
    let err = auth::login(&h.ctx, form).await.unwrap_err();
    let AuthError::Invalid(errors) = err;
    assert_eq!(errors.keys().collect::<Vec<_>>(), vec!["password"]);
    assert!(h.notifier.contains(NotificationLevel::Warning, "completa todos los campos"));
}

#[tokio::test(start_paused = true)]
async fn logout_clears_user_and_returns_to_welcome() {
    let h = harness();
    h.ctx.state.set_current_user(Some(User::new("lucia", "lucia@example.com")));
    let (events, _subs) = record(&h.ctx.state, &AUTH_EVENTS);

    auth::logout(&h.ctx).await;

    assert!(h.ctx.state.current_user().is_none());
    assert_eq!(
        *events.lock(),
        vec![
            AppEvent::UserChanged(None),
            AppEvent::UserLoggedOut,
            AppEvent::ScreenChanged(Screen::Welcome),
        ]
    );
    assert!(h.notifier.contains(NotificationLevel::Info, "¡Hasta luego!"));
}

#[tokio::test(start_paused = true)]
async fn vibration_respects_setting() {
    let h = harness();
    h.ctx
        .settings
        .update(user_settings::SettingUpdate::VibrationEnabled(false))
        .unwrap();

    let _ = auth::register(&h.ctx, RegistrationForm::default()).await;
    assert!(h.notifier.vibrations().is_empty());
}
