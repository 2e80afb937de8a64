use std::{
    collections::BTreeMap,
    sync::Mutex,
};

use anyhow::Result;
use async_trait::async_trait;

use super::KeyValueBackend;

/// Process-local backend. Used by tests and as a scratch workbook.
#[derive(Default)]
pub struct MemoryBackend {
    entries: Mutex<BTreeMap<String, String>>,
    writes: Mutex<Vec<String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `value` verbatim, bypassing serialization.
    pub fn insert_raw(&self, key: &str, value: &str) {
        self.entries_guard().insert(key.to_string(), value.to_string());
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries_guard().get(key).cloned()
    }

    /// How many times `key` has been written through [`KeyValueBackend::set`].
    pub fn write_count(&self, key: &str) -> usize {
        self.writes_guard().iter().filter(|written| *written == key).count()
    }

    pub fn total_writes(&self) -> usize {
        self.writes_guard().len()
    }

    fn entries_guard(&self) -> std::sync::MutexGuard<'_, BTreeMap<String, String>> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn writes_guard(&self) -> std::sync::MutexGuard<'_, Vec<String>> {
        self.writes.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl KeyValueBackend for MemoryBackend {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.raw(key))
    }

    fn set(&self, key: &str, value: String) -> Result<()> {
        self.entries_guard().insert(key.to_string(), value);
        self.writes_guard().push(key.to_string());
        Ok(())
    }

    async fn list(&self, prefix: &str) -> Result<Vec<String>> {
        Ok(self
            .entries_guard()
            .keys()
            .filter(|key| key.starts_with(prefix))
            .cloned()
            .collect())
    }
}
