use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    /// No credential configured; callers should not even attempt a request.
    #[error("API Key not configured.")]
    MissingApiKey,

    #[error("Network error: {0}")]
    Network(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// JSON mode was requested but the reply did not parse. `raw` keeps the text.
    #[error("Failed to parse JSON response: {message}")]
    Parse { message: String, raw: String },

    #[error("Model returned no text")]
    EmptyResponse,
}

/// Credential state shown to the UI before any AI action is offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiKeyStatus {
    Checking,
    Ok,
    Missing,
}

impl ApiKeyStatus {
    pub fn from_key(key: Option<&str>) -> Self {
        match key {
            Some(key) if !key.trim().is_empty() => ApiKeyStatus::Ok,
            _ => ApiKeyStatus::Missing,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ApiKeyStatus::Checking => "checking",
            ApiKeyStatus::Ok => "ok",
            ApiKeyStatus::Missing => "missing",
        }
    }
}

/// A successful generation.
#[derive(Debug, Clone, PartialEq)]
pub struct Generated {
    pub text: String,
    /// Present only for JSON-mode requests whose reply parsed.
    pub parsed_json: Option<serde_json::Value>,
}

impl Generated {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            parsed_json: None,
        }
    }
}

#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Model identifier, for logs.
    fn id(&self) -> &str;

    fn api_key_status(&self) -> ApiKeyStatus;

    /// Generate from a single user prompt. With `json_mode` the reply is also parsed.
    async fn generate(&self, prompt: &str, json_mode: bool) -> Result<Generated, LlmError>;
}
