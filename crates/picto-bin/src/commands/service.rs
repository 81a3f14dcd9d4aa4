//! Chat reply service commands.

use anyhow::Result;
use picto_config_and_utils::Config;

use super::require_reply_client;
use crate::output::{self, OutputFormat};

/// Check whether the service is up.
pub async fn service_health(config: &Config, format: &OutputFormat) -> Result<()> {
    let client = require_reply_client(config)?;
    let health = client.health().await?;

    output::emit(&health, format, |health| {
        output::title("Chat service");
        output::field("URL", client.base_url().as_str());
        output::field("Status", &health.status);
        output::field("Model loaded", if health.model_loaded { "yes" } else { "no" });
        if let Some(message) = &health.message {
            output::field("Message", message);
        }
        if let Some(error) = &health.error {
            output::field("Error", error);
        }
    });

    if !health.is_healthy() {
        anyhow::bail!("Chat service is not ready");
    }
    Ok(())
}

/// Ask the service for a reply.
pub async fn service_ask(config: &Config, text: &str, format: &OutputFormat) -> Result<()> {
    let client = require_reply_client(config)?;
    let reply = client.ask(text).await?;

    output::emit(&reply, format, |reply| {
        println!("{}", reply.response);
        if let Some(pictograms) = reply.pictogram_text() {
            println!("{}", pictograms);
        }
        output::field("Intent", &reply.decided_intent);
        output::field("Confidence", &format!("{:.2}", reply.best_prob));
    });

    Ok(())
}
