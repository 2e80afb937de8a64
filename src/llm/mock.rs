//! Scripted generator for tests.

use std::{
    collections::VecDeque,
    sync::{
        atomic::{AtomicU32, Ordering},
        Mutex,
    },
    time::Duration,
};

use async_trait::async_trait;

use super::{
    json::parse_json_reply,
    traits::{ApiKeyStatus, Generated, LlmError, TextGenerator},
};

/// Answers with queued replies, then with a fixed default reply.
pub struct MockGenerator {
    model_id: String,
    status: ApiKeyStatus,
    default_reply: Result<String, String>,
    queued: Mutex<VecDeque<Result<String, String>>>,
    prompts: Mutex<Vec<String>>,
    delay: Option<Duration>,
    call_count: AtomicU32,
}

impl MockGenerator {
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            model_id: "mock-model".into(),
            status: ApiKeyStatus::Ok,
            default_reply: Ok(reply.into()),
            queued: Mutex::new(VecDeque::new()),
            prompts: Mutex::new(Vec::new()),
            delay: None,
            call_count: AtomicU32::new(0),
        }
    }

    /// A generator whose every call fails with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            default_reply: Err(message.into()),
            ..Self::new("")
        }
    }

    /// A generator with no credential configured.
    pub fn without_key() -> Self {
        Self {
            status: ApiKeyStatus::Missing,
            ..Self::new("")
        }
    }

    pub fn with_reply(self, reply: impl Into<String>) -> Self {
        self.lock_queue().push_back(Ok(reply.into()));
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::SeqCst)
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn lock_queue(&self) -> std::sync::MutexGuard<'_, VecDeque<Result<String, String>>> {
        self.queued
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for MockGenerator {
    fn default() -> Self {
        Self::new("Mock response")
    }
}

#[async_trait]
impl TextGenerator for MockGenerator {
    fn id(&self) -> &str {
        &self.model_id
    }

    fn api_key_status(&self) -> ApiKeyStatus {
        self.status
    }

    async fn generate(&self, prompt: &str, json_mode: bool) -> Result<Generated, LlmError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.prompts
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(prompt.to_string());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if self.status == ApiKeyStatus::Missing {
            return Err(LlmError::MissingApiKey);
        }

        let reply = self
            .lock_queue()
            .pop_front()
            .unwrap_or_else(|| self.default_reply.clone());

        match reply {
            Ok(text) if json_mode => parse_json_reply(text),
            Ok(text) => Ok(Generated::text(text)),
            Err(message) => Err(LlmError::RequestFailed(message)),
        }
    }
}
