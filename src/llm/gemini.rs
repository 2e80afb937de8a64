//! Gemini `generateContent` REST backend.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::settings::LlmSettings;

use super::{
    json::parse_json_reply,
    traits::{ApiKeyStatus, Generated, LlmError, TextGenerator},
};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

pub struct GeminiClient {
    client: Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
}

impl GeminiClient {
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key: Option<String>,
    ) -> Self {
        // Builder only fails on TLS backend init; fall back to the default client then.
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();

        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
            api_key: api_key.filter(|key| !key.trim().is_empty()),
        }
    }

    pub fn from_settings(settings: &LlmSettings) -> Self {
        Self::new(
            settings.base_url.clone(),
            settings.model.clone(),
            settings.api_key.clone(),
        )
    }

    fn generate_url(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

impl GenerateResponse {
    fn text(self) -> Option<String> {
        let content = self.candidates.into_iter().next()?.content?;
        let text: String = content
            .parts
            .into_iter()
            .filter_map(|part| part.text)
            .collect();
        Some(text)
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    fn id(&self) -> &str {
        &self.model
    }

    fn api_key_status(&self) -> ApiKeyStatus {
        ApiKeyStatus::from_key(self.api_key.as_deref())
    }

    async fn generate(&self, prompt: &str, json_mode: bool) -> Result<Generated, LlmError> {
        let api_key = self.api_key.as_deref().ok_or(LlmError::MissingApiKey)?;

        let body = GenerateRequest {
            contents: vec![Content {
                role: Some("user".into()),
                parts: vec![Part {
                    text: Some(prompt.to_string()),
                }],
            }],
            generation_config: json_mode.then(|| GenerationConfig {
                response_mime_type: "application/json".into(),
            }),
        };

        let response = self
            .client
            .post(self.generate_url())
            .query(&[("key", api_key)])
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::RequestFailed(format!("HTTP {}: {}", status, body)));
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| LlmError::Parse {
                message: e.to_string(),
                raw: String::new(),
            })?;

        let text = parsed.text().ok_or(LlmError::EmptyResponse)?;

        if json_mode {
            parse_json_reply(text)
        } else {
            Ok(Generated::text(text))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_key_is_treated_as_missing() {
        let client = GeminiClient::new("https://example.test/v1beta/", "gemini-test", Some(" ".into()));
        assert_eq!(client.api_key_status(), ApiKeyStatus::Missing);
        assert_eq!(
            client.generate_url(),
            "https://example.test/v1beta/models/gemini-test:generateContent"
        );
    }

    #[tokio::test]
    async fn missing_key_fails_without_network() {
        let client = GeminiClient::new("http://127.0.0.1:9", "gemini-test", None);
        let err = client.generate("hello", false).await.unwrap_err();
        assert!(matches!(err, LlmError::MissingApiKey));
    }

    #[test]
    fn response_text_joins_parts_of_first_candidate() {
        let response: GenerateResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"role":"model","parts":[{"text":"Hello, "},{"text":"world"}]}}]}"#,
        )
        .unwrap();
        assert_eq!(response.text().as_deref(), Some("Hello, world"));
    }

    #[test]
    fn request_body_sets_json_mime_type_only_in_json_mode() {
        let body = GenerateRequest {
            contents: vec![],
            generation_config: true.then(|| GenerationConfig {
                response_mime_type: "application/json".into(),
            }),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["generationConfig"]["responseMimeType"], "application/json");

        let plain = GenerateRequest {
            contents: vec![],
            generation_config: None,
        };
        assert!(serde_json::to_value(&plain).unwrap().get("generationConfig").is_none());
    }
}
