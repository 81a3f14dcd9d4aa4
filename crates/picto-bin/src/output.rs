//! Text and JSON rendering for command results.

use clap::ValueEnum;
use serde::Serialize;

const RULE_WIDTH: usize = 50;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// Pretty-printed JSON on stdout.
    Json,
}

/// Emit `value` as JSON, or hand it to `text` for human output.
pub fn emit<T: Serialize>(value: &T, format: &OutputFormat, text: impl FnOnce(&T)) {
    if *format == OutputFormat::Text {
        text(value);
        return;
    }
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{json}"),
        Err(err) => eprintln!("Error: {err}"),
    }
}

/// Confirmation line for a completed change.
pub fn done(message: &str, format: &OutputFormat) {
    let status = serde_json::json!({ "status": "success", "message": message });
    emit(&status, format, |_| println!("✓ {message}"));
}

/// `label: value`, aligned.
pub fn field(label: &str, value: &str) {
    println!("  {:<16}{value}", format!("{label}:"));
}

pub fn rule() {
    println!("{}", "─".repeat(RULE_WIDTH));
}

/// Section title followed by a rule.
pub fn title(text: &str) {
    println!("\n{text}");
    rule();
}
