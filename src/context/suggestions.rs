use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    llm::{ApiKeyStatus, Generated, LlmError},
    log_warn,
};

use super::{prompts, AppContext, ENABLE_LOGS};

const MAX_SUGGESTIONS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SuggestionKind {
    Pains,
    Gains,
}

impl SuggestionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SuggestionKind::Pains => "pains",
            SuggestionKind::Gains => "gains",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SuggestionError {
    #[error("Please describe the 'Job to be Done' first.")]
    MissingJob,

    #[error("API Key not configured.")]
    Unavailable,

    #[error("Received unexpected format for suggestions.")]
    UnexpectedFormat,

    #[error(transparent)]
    Llm(#[from] LlmError),
}

impl AppContext {
    /// Ask for five customer pains or gains for `jobs_to_be_done`.
    ///
    /// Takes the text from the caller because the Problem Canvas editor may
    /// hold a newer value than the store.
    pub async fn fetch_problem_suggestions(
        &self,
        jobs_to_be_done: &str,
        kind: SuggestionKind,
    ) -> Result<Vec<String>, SuggestionError> {
        if self.api_key_status == ApiKeyStatus::Missing {
            return Err(SuggestionError::Unavailable);
        }
        if jobs_to_be_done.trim().is_empty() {
            return Err(SuggestionError::MissingJob);
        }

        let prompt = prompts::problem_suggestions(jobs_to_be_done, kind);
        let reply = self.llm.generate(&prompt, true).await;
        if let Err(err) = &reply {
            log_warn!("Problem suggestions for {} failed: {}", kind.as_str(), err);
        }
        parse_suggestions(reply)
    }
}

/// Interpret a JSON-mode reply as a list of suggestions.
///
/// Accepts a JSON array or an object with a `suggestions` array. Text that is
/// not JSON at all falls back to plain `- item` lines (first five); any other
/// JSON shape is rejected.
pub fn parse_suggestions(reply: Result<Generated, LlmError>) -> Result<Vec<String>, SuggestionError> {
    let generated = match reply {
        Ok(generated) => generated,
        Err(LlmError::Parse { raw, .. }) if !raw.trim().is_empty() => return Ok(text_lines(&raw)),
        Err(err) => return Err(err.into()),
    };

    let suggestions = match &generated.parsed_json {
        Some(value) => from_json(value),
        None => match serde_json::from_str::<Value>(&generated.text) {
            Ok(value) => from_json(&value),
            Err(_) => Some(text_lines(&generated.text)).filter(|lines| !lines.is_empty()),
        },
    };
    suggestions.ok_or(SuggestionError::UnexpectedFormat)
}

fn from_json(value: &Value) -> Option<Vec<String>> {
    match value {
        Value::Array(items) => Some(strings(items)),
        Value::Object(object) => match object.get("suggestions") {
            Some(Value::Array(items)) => Some(strings(items)),
            _ => None,
        },
        _ => None,
    }
}

fn strings(items: &[Value]) -> Vec<String> {
    items
        .iter()
        .map(|item| match item {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        })
        .collect()
}

fn text_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(|line| line.strip_prefix("- ").unwrap_or(line).trim())
        .filter(|line| !line.is_empty())
        .take(MAX_SUGGESTIONS)
        .map(str::to_string)
        .collect()
}

/// Append suggestions to a field as `- item` lines.
pub fn append_suggestions(existing: &str, suggestions: &[String]) -> String {
    let lines = suggestions
        .iter()
        .map(|suggestion| format!("- {suggestion}"))
        .collect::<Vec<_>>()
        .join("\n");
    format!("{existing}\n{lines}").trim().to_string()
}
