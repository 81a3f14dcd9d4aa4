//! Built-in rules.
//!
//! Everything except [`required`] and [`min_length`] accepts an empty value,
//! so optional fields only need the format rule.

use std::sync::OnceLock;

use regex::Regex;

use crate::rule::{Rule, RuleOutcome};

const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(EMAIL_PATTERN).unwrap_or_else(|e| unreachable!("{e}")))
}

/// Non-empty after trimming.
pub fn required() -> Rule {
    Rule::new(|value| RuleOutcome::check(!value.trim().is_empty(), "Este campo es requerido"))
}

/// At least `min` characters. Empty values fail.
pub fn min_length(min: usize) -> Rule {
    Rule::new(move |value| {
        RuleOutcome::check(
            !value.is_empty() && value.chars().count() >= min,
            format!("Debe tener al menos {min} caracteres"),
        )
    })
}

/// At most `max` characters. Empty values pass.
pub fn max_length(max: usize) -> Rule {
    Rule::new(move |value| {
        RuleOutcome::check(
            value.chars().count() <= max,
            format!("No debe exceder {max} caracteres"),
        )
    })
}

/// `local@domain.tld` shape. Empty values pass.
pub fn email() -> Rule {
    Rule::new(|value| {
        RuleOutcome::check(
            value.is_empty() || email_regex().is_match(value),
            "Ingresa un email válido",
        )
    })
}

/// Matches `regex`. Empty values pass.
pub fn pattern(regex: Regex, message: Option<&str>) -> Rule {
    let message = message.unwrap_or("Formato inválido").to_string();
    Rule::new(move |value| RuleOutcome::check(value.is_empty() || regex.is_match(value), message.clone()))
}
