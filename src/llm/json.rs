use super::traits::{Generated, LlmError};

/// Strip a surrounding Markdown code fence, with or without a language tag.
pub fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some(body) = rest.strip_suffix("```") else {
        return trimmed;
    };

    // Drop the language tag: everything up to the first newline when it is a bare word.
    let body = match body.split_once('\n') {
        Some((tag, remainder)) if tag.trim().chars().all(|c| c.is_ascii_alphanumeric()) => {
            remainder
        }
        _ => body.trim_start_matches(|c: char| c.is_ascii_alphanumeric()),
    };
    body.trim()
}

/// Build a JSON-mode result from the raw model text.
pub fn parse_json_reply(text: String) -> Result<Generated, LlmError> {
    match serde_json::from_str(strip_code_fence(&text)) {
        Ok(value) => Ok(Generated {
            text,
            parsed_json: Some(value),
        }),
        Err(err) => Err(LlmError::Parse {
            message: err.to_string(),
            raw: text,
        }),
    }
}
