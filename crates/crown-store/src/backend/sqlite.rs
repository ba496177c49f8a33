//! SQLite backend over the `kv_records` and `kv_index` tables.
//!
//! Documents are stored as JSON text. Index order is SQLite rowid order,
//! which is insertion order for these tables.

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use super::KvBackend;
use crate::error::StoreResult;
use crate::pool::Database;

#[derive(Debug, Clone)]
pub struct SqliteBackend {
    db: Database,
}

impl SqliteBackend {
    pub fn new(db: Database) -> Self {
        SqliteBackend { db }
    }
}

#[async_trait]
impl KvBackend for SqliteBackend {
    async fn get(&self, key: &str) -> StoreResult<Option<Value>> {
        let raw: Option<String> = sqlx::query_scalar("SELECT value FROM kv_records WHERE key = ?")
            .bind(key)
            .fetch_optional(self.db.pool())
            .await?;

        raw.map(|text| serde_json::from_str(&text))
            .transpose()
            .map_err(Into::into)
    }

    async fn put(&self, key: &str, value: &Value) -> StoreResult<()> {
        let text = serde_json::to_string(value)?;

        sqlx::query(
            r#"
            INSERT INTO kv_records (key, value, updated_at)
            VALUES (?, ?, strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(text)
        .execute(self.db.pool())
        .await?;

        debug!(key = %key, "Record written");
        Ok(())
    }

    async fn delete(&self, key: &str) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM kv_records WHERE key = ?")
            .bind(key)
            .execute(self.db.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn index_members(&self, index: &str) -> StoreResult<Vec<String>> {
        let members: Vec<String> =
            sqlx::query_scalar("SELECT member FROM kv_index WHERE index_name = ? ORDER BY rowid")
                .bind(index)
                .fetch_all(self.db.pool())
                .await?;

        Ok(members)
    }

    async fn index_add(&self, index: &str, member: &str) -> StoreResult<()> {
        sqlx::query("INSERT OR IGNORE INTO kv_index (index_name, member) VALUES (?, ?)")
            .bind(index)
            .bind(member)
            .execute(self.db.pool())
            .await?;

        Ok(())
    }

    async fn index_remove(&self, index: &str, member: &str) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM kv_index WHERE index_name = ? AND member = ?")
            .bind(index)
            .bind(member)
            .execute(self.db.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn health_check(&self) -> bool {
        self.db.health_check().await
    }

    fn name(&self) -> &'static str {
        "sqlite"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::DbConfig;
    use serde_json::json;

    async fn backend() -> SqliteBackend {
        SqliteBackend::new(Database::new(DbConfig::in_memory()).await.unwrap())
    }

    #[tokio::test]
    async fn test_put_overwrites() {
        let backend = backend().await;

        backend.put("product:p1", &json!({"id": "p1", "quantity": 5})).await.unwrap();
        backend.put("product:p1", &json!({"id": "p1", "quantity": 3})).await.unwrap();

        assert_eq!(
            backend.get("product:p1").await.unwrap(),
            Some(json!({"id": "p1", "quantity": 3}))
        );
        assert!(backend.delete("product:p1").await.unwrap());
        assert_eq!(backend.get("product:p1").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_index_round_trip() {
        let backend = backend().await;

        for id in ["cat2", "cat1", "cat2"] {
            backend.index_add("categories", id).await.unwrap();
        }
        assert_eq!(
            backend.index_members("categories").await.unwrap(),
            vec!["cat2", "cat1"]
        );

        assert!(backend.index_remove("categories", "cat2").await.unwrap());
        assert!(!backend.index_remove("categories", "cat2").await.unwrap());
        assert!(backend.health_check().await);
    }
}
