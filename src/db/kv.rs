use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::{params, OptionalExtension};

use super::Database;

impl Database {
    /// Read the raw value stored under `key`.
    pub async fn kv_get(&self, key: &str) -> Result<Option<String>> {
        let key = key.to_string();
        self.execute(move |conn| {
            conn.query_row(
                "SELECT value FROM kv_entries WHERE key = ?1",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()
            .with_context(|| format!("failed to read kv entry {key}"))
        })
        .await
    }

    /// Upsert `value` under `key` without waiting for the write to land.
    pub fn kv_put(&self, key: &str, value: String) -> Result<()> {
        let key = key.to_string();
        self.submit("kv_put", move |conn| {
            conn.execute(
                "INSERT INTO kv_entries (key, value, updated_at)
                 VALUES (?1, ?2, ?3)
                 ON CONFLICT(key) DO UPDATE SET value = ?2, updated_at = ?3",
                params![key, value, Utc::now().to_rfc3339()],
            )
            .with_context(|| format!("failed to write kv entry {key}"))?;
            Ok(())
        })
    }

    /// All keys starting with `prefix`, sorted.
    pub async fn kv_keys(&self, prefix: &str) -> Result<Vec<String>> {
        let pattern = format!("{}%", prefix.replace('%', "\\%").replace('_', "\\_"));
        self.execute(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT key FROM kv_entries WHERE key LIKE ?1 ESCAPE '\\' ORDER BY key ASC",
            )?;
            let mut rows = stmt.query(params![pattern])?;
            let mut keys = Vec::new();
            while let Some(row) = rows.next()? {
                keys.push(row.get::<_, String>(0)?);
            }
            Ok(keys)
        })
        .await
    }

    /// Resolves once every previously submitted write has been applied.
    pub async fn flush(&self) -> Result<()> {
        self.execute(|_| Ok(())).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn put_then_get_round_trips_through_worker() {
        let dir = TempDir::new().unwrap();
        let db = Database::new(dir.path().join("kv.sqlite3")).unwrap();

        assert_eq!(db.kv_get("validatehub-projectName").await.unwrap(), None);

        db.kv_put("validatehub-projectName", "\"Acme\"".into()).unwrap();
        db.kv_put("validatehub-projectName", "\"Acme 2\"".into()).unwrap();
        db.flush().await.unwrap();

        assert_eq!(
            db.kv_get("validatehub-projectName").await.unwrap().as_deref(),
            Some("\"Acme 2\"")
        );
    }

    #[tokio::test]
    async fn keys_are_filtered_by_prefix() {
        let dir = TempDir::new().unwrap();
        let db = Database::new(dir.path().join("kv.sqlite3")).unwrap();

        db.kv_put("validatehub-mvps", "[]".into()).unwrap();
        db.kv_put("validatehub-hypotheses", "[]".into()).unwrap();
        db.kv_put("other_app", "{}".into()).unwrap();
        db.flush().await.unwrap();

        let keys = db.kv_keys("validatehub-").await.unwrap();
        assert_eq!(keys, vec!["validatehub-hypotheses", "validatehub-mvps"]);
    }
}
