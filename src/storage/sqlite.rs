use anyhow::Result;
use async_trait::async_trait;

use crate::db::Database;

use super::KeyValueBackend;

/// Durable backend on the SQLite `kv_entries` table.
#[derive(Clone)]
pub struct SqliteBackend {
    db: Database,
}

impl SqliteBackend {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl KeyValueBackend for SqliteBackend {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        self.db.kv_get(key).await
    }

    fn set(&self, key: &str, value: String) -> Result<()> {
        self.db.kv_put(key, value)
    }

    async fn list(&self, prefix: &str) -> Result<Vec<String>> {
        self.db.kv_keys(prefix).await
    }

    async fn flush(&self) -> Result<()> {
        self.db.flush().await
    }
}
