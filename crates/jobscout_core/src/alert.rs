use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body every non-success backend response must carry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub body: Value,
    pub url: String,
}

/// Text shown by the alert panel.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Alert {
    pub body: String,
    pub url: String,
}

impl Alert {
    pub fn new(body: &Value, url: impl Into<String>) -> Self {
        Self {
            body: display_body(body),
            url: url.into(),
        }
    }
}

impl From<ErrorEnvelope> for Alert {
    fn from(envelope: ErrorEnvelope) -> Self {
        Self::new(&envelope.body, envelope.url)
    }
}

/// String bodies are shown as their text; any other value as compact JSON.
pub fn display_body(body: &Value) -> String {
    match body {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
