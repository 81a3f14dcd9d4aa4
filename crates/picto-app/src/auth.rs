//! Registration, login and logout.
//!
//! Both sign-in flows validate first, then simulate the server round trip
//! with a fixed delay before the session changes and the main screen opens.

use std::collections::HashMap;
use std::time::Duration;

use form_validation::{rules, validate_field, FormValidator, Rule, ValidationErrors};
use picto_session_state::{AppEvent, Registration, Screen, User};
use thiserror::Error;
use tokio::time::sleep;
use tracing::{debug, info};

use crate::context::AppContext;
use crate::notify::NotificationLevel;

pub const REGISTER_DELAY: Duration = Duration::from_millis(1_000);
pub const LOGIN_DELAY: Duration = Duration::from_millis(800);
pub const LOGOUT_DELAY: Duration = Duration::from_millis(1_000);

const INVALID_VIBRATION: [u32; 3] = [100, 50, 100];

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AuthError {
    #[error("form has {} invalid field(s)", .0.len())]
    Invalid(ValidationErrors),
}

/// Submitted registration form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub age: String,
}

impl RegistrationForm {
    fn values(&self) -> HashMap<&'static str, &str> {
        HashMap::from([
            ("username", self.username.as_str()),
            ("email", self.email.as_str()),
            ("password", self.password.as_str()),
            ("age", self.age.as_str()),
        ])
    }
}

/// Submitted login form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    fn values(&self) -> HashMap<&'static str, &str> {
        HashMap::from([("email", self.email.as_str()), ("password", self.password.as_str())])
    }

    /// Local part of the email address.
    fn username(&self) -> &str {
        self.email.split('@').next().unwrap_or_default()
    }
}

pub fn registration_validator() -> FormValidator {
    FormValidator::new([
        ("username", vec![rules::required(), rules::min_length(3)]),
        ("email", vec![rules::required(), rules::email()]),
        ("password", vec![rules::required(), rules::min_length(6)]),
        ("age", vec![rules::required()]),
    ])
}

pub fn login_validator() -> FormValidator {
    FormValidator::new([
        ("email", vec![rules::required(), rules::email()]),
        ("password", vec![rules::required()]),
    ])
}

/// Validates, waits [`REGISTER_DELAY`], signs the user in, publishes
/// `UserRegistered`, waits again and opens the main screen.
pub async fn register(ctx: &AppContext, form: RegistrationForm) -> Result<User, AuthError> {
    let mut validator = registration_validator();
    if !validator.validate(&form.values()) {
        return Err(reject(ctx, &validator, "Por favor, corrige los errores en el formulario"));
    }

    sleep(REGISTER_DELAY).await;

    let user = User::new(form.username, form.email);
    ctx.state.set_current_user(Some(user.clone()));
    ctx.notify(
        NotificationLevel::Success,
        "¡Cuenta creada exitosamente! Bienvenido a PictoAmigos",
    );
    info!(username = %user.username, "user registered");
    ctx.state.publish(AppEvent::UserRegistered(Registration {
        user: user.clone(),
        age: form.age,
    }));

    sleep(REGISTER_DELAY).await;
    ctx.state.publish(AppEvent::ScreenChanged(Screen::Main));
    Ok(user)
}

/// Validates, waits [`LOGIN_DELAY`], signs the user in, publishes
/// `UserLoggedIn`, waits again and opens the main screen.
pub async fn login(ctx: &AppContext, form: LoginForm) -> Result<User, AuthError> {
    let mut validator = login_validator();
    if !validator.validate(&form.values()) {
        return Err(reject(ctx, &validator, "Por favor, completa todos los campos correctamente"));
    }

    sleep(LOGIN_DELAY).await;

    let user = User::new(form.username(), form.email.clone());
    ctx.state.set_current_user(Some(user.clone()));
    ctx.notify(NotificationLevel::Success, "¡Bienvenido de vuelta!");
    info!(username = %user.username, "user logged in");
    ctx.state.publish(AppEvent::UserLoggedIn(user.clone()));

    sleep(LOGIN_DELAY).await;
    ctx.state.publish(AppEvent::ScreenChanged(Screen::Main));
    Ok(user)
}

/// Signs out, publishes `UserLoggedOut` and returns to the welcome screen
/// after [`LOGOUT_DELAY`].
pub async fn logout(ctx: &AppContext) {
    ctx.state.set_current_user(None);
    ctx.notify(NotificationLevel::Info, "¡Hasta luego! Vuelve pronto");
    info!("user logged out");
    ctx.state.publish(AppEvent::UserLoggedOut);

    sleep(LOGOUT_DELAY).await;
    ctx.state.publish(AppEvent::ScreenChanged(Screen::Welcome));
}

fn reject(ctx: &AppContext, validator: &FormValidator, message: &str) -> AuthError {
    debug!(errors = ?validator.errors(), "form rejected");
    ctx.notify(NotificationLevel::Warning, message);
    ctx.vibrate(&INVALID_VIBRATION);
    AuthError::Invalid(validator.errors().clone())
}

/// Which form a keystroke belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    Register,
    Login,
}

/// Field state after a keystroke.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LiveCheck {
    /// Input is empty; clear any marker.
    Cleared,
    /// The field has no live rules.
    Unchecked,
    Valid,
    Invalid(String),
}

/// Per-keystroke check with the lighter live rules.
///
/// Required-ness is only enforced on submit, so an empty field just clears.
pub fn live_check(form: FormKind, field: &str, value: &str) -> LiveCheck {
    if value.is_empty() {
        return LiveCheck::Cleared;
    }

    let rules = live_rules(form, field);
    if rules.is_empty() {
        return LiveCheck::Unchecked;
    }

    let outcome = validate_field(value, &rules);
    if outcome.valid {
        LiveCheck::Valid
    } else {
        LiveCheck::Invalid(outcome.message.unwrap_or_default())
    }
}

fn live_rules(form: FormKind, field: &str) -> Vec<Rule> {
    match (form, field) {
        (_, "username") => vec![rules::min_length(3)],
        (_, "email" | "loginEmail") => vec![rules::email()],
        (FormKind::Register, "password" | "loginPassword") => vec![rules::min_length(6)],
        _ => Vec::new(),
    }
}
