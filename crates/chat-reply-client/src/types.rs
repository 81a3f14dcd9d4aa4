use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of `POST /chat`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub text: String,
    pub include_pictos: bool,
}

impl ChatRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            include_pictos: true,
        }
    }
}

/// Answer from `POST /chat`. Fields the client does not use are optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatReply {
    pub response: String,
    pub decided_intent: String,
    pub best_prob: f64,
    #[serde(default)]
    pub pictos: Option<Vec<Value>>,
    #[serde(default)]
    pub input: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

impl ChatReply {
    /// Pictograms joined with spaces, `None` when there are none.
    pub fn pictogram_text(&self) -> Option<String> {
        let pictos = self.pictos.as_ref().filter(|p| !p.is_empty())?;
        let parts: Vec<String> = pictos
            .iter()
            .map(|picto| match picto {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect();
        Some(parts.join(" "))
    }
}

/// Answer from `GET /health`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Health {
    pub status: String,
    pub model_loaded: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl Health {
    pub fn is_healthy(&self) -> bool {
        self.model_loaded && self.status == "healthy"
    }
}
