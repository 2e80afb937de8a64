//! Typed key/value persistence over a string-valued durable medium.
//!
//! Every collection lives under its own namespaced key as a JSON document.
//! Reads never fail: a missing or malformed entry yields the caller's default.
//! Writes are fire-and-forget; there is no transaction spanning two keys.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};

use crate::{log_debug, log_error, log_warn};

mod memory;
mod sqlite;

pub use memory::MemoryBackend;
pub use sqlite::SqliteBackend;

const ENABLE_LOGS: bool = true;

/// Namespace applied to every key so shared storage can hold unrelated data.
pub const KEY_PREFIX: &str = "validatehub-";

/// Storage keys, one per persisted collection.
pub mod keys {
    pub const PROJECT_NAME: &str = "projectName";
    pub const PROBLEM_CANVAS: &str = "problemCanvas";
    pub const INTERVIEWS: &str = "interviews";
    pub const HYPOTHESES: &str = "hypotheses";
    pub const TEST_CARDS: &str = "testCards";
    pub const MVPS: &str = "mvps";
    pub const VALUE_PROPOSITION: &str = "valueProposition";
    pub const BUSINESS_MODEL: &str = "businessModel";
    pub const FERMI_ESTIMATIONS: &str = "fermiEstimations";
    pub const LEARNING_CARDS: &str = "learningCards";
}

/// The durable medium: string keys to string values.
#[async_trait]
pub trait KeyValueBackend: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Persist `value`. May return before the medium has applied the write.
    fn set(&self, key: &str, value: String) -> Result<()>;

    /// Keys currently stored that start with `prefix`.
    async fn list(&self, prefix: &str) -> Result<Vec<String>>;

    /// Wait until every accepted `set` is durable.
    async fn flush(&self) -> Result<()> {
        Ok(())
    }
}

/// JSON (de)serializing view over a [`KeyValueBackend`].
#[derive(Clone)]
pub struct KvAdapter {
    backend: Arc<dyn KeyValueBackend>,
    prefix: String,
}

impl KvAdapter {
    pub fn new(backend: Arc<dyn KeyValueBackend>) -> Self {
        Self::with_prefix(backend, KEY_PREFIX)
    }

    pub fn with_prefix(backend: Arc<dyn KeyValueBackend>, prefix: impl Into<String>) -> Self {
        Self {
            backend,
            prefix: prefix.into(),
        }
    }

    fn namespaced(&self, key: &str) -> String {
        format!("{}{}", self.prefix, key)
    }

    /// Load `key`, falling back to `default` when absent or unreadable.
    pub async fn read<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        let full_key = self.namespaced(key);
        match self.backend.get(&full_key).await {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(value) => value,
                Err(err) => {
                    log_warn!("Error parsing stored value for \"{}\": {}; using default", full_key, err);
                    default
                }
            },
            Ok(None) => {
                log_debug!("No stored value for \"{}\"; using default", full_key);
                default
            }
            Err(err) => {
                log_warn!("Error reading storage key \"{}\": {:#}; using default", full_key, err);
                default
            }
        }
    }

    /// Serialize and persist `value` under `key`. Failures are logged only.
    pub fn write<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        let full_key = self.namespaced(key);
        let serialized = match serde_json::to_string(value) {
            Ok(serialized) => serialized,
            Err(err) => {
                log_error!("Error serializing value for \"{}\": {}", full_key, err);
                return;
            }
        };

        if let Err(err) = self.backend.set(&full_key, serialized) {
            log_error!("Error setting storage key \"{}\": {:#}", full_key, err);
        }
    }

    /// Keys under this adapter's namespace, with the prefix removed.
    pub async fn keys(&self) -> Vec<String> {
        match self.backend.list(&self.prefix).await {
            Ok(keys) => keys
                .into_iter()
                .filter_map(|key| key.strip_prefix(&self.prefix).map(str::to_string))
                .collect(),
            Err(err) => {
                log_warn!("Error listing storage keys: {:#}", err);
                Vec::new()
            }
        }
    }

    pub async fn flush(&self) -> Result<()> {
        self.backend.flush().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Sample {
        name: String,
        count: u32,
    }

    fn sample() -> Sample {
        Sample {
            name: "fallback".into(),
            count: 0,
        }
    }

    #[tokio::test]
    async fn read_returns_default_when_absent() {
        let adapter = KvAdapter::new(Arc::new(MemoryBackend::new()));
        assert_eq!(adapter.read("missing", sample()).await, sample());
    }

    #[tokio::test]
    async fn read_returns_default_when_malformed() {
        let backend = Arc::new(MemoryBackend::new());
        backend.insert_raw("validatehub-broken", "{not json");
        let adapter = KvAdapter::new(backend);

        assert_eq!(adapter.read("broken", sample()).await, sample());
    }

    #[tokio::test]
    async fn write_is_namespaced_and_readable() {
        let backend = Arc::new(MemoryBackend::new());
        let adapter = KvAdapter::new(backend.clone());
        let value = Sample {
            name: "stored".into(),
            count: 3,
        };

        adapter.write("sample", &value);

        assert_eq!(
            backend.raw("validatehub-sample").as_deref(),
            Some(r#"{"name":"stored","count":3}"#)
        );
        assert_eq!(adapter.read("sample", sample()).await, value);
        assert_eq!(adapter.keys().await, vec!["sample".to_string()]);
    }
}
