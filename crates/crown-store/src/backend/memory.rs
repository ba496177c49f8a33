use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use super::KvBackend;
use crate::error::StoreResult;

/// Process-local backend. Contents are lost on restart.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    records: RwLock<HashMap<String, Value>>,
    indexes: RwLock<HashMap<String, Vec<String>>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KvBackend for MemoryBackend {
    async fn get(&self, key: &str) -> StoreResult<Option<Value>> {
        Ok(self.records.read().await.get(key).cloned())
    }

    async fn put(&self, key: &str, value: &Value) -> StoreResult<()> {
        self.records
            .write()
            .await
            .insert(key.to_string(), value.clone());
        Ok(())
    }

    async fn delete(&self, key: &str) -> StoreResult<bool> {
        Ok(self.records.write().await.remove(key).is_some())
    }

    async fn index_members(&self, index: &str) -> StoreResult<Vec<String>> {
        Ok(self
            .indexes
            .read()
            .await
            .get(index)
            .cloned()
            .unwrap_or_default())
    }

    async fn index_add(&self, index: &str, member: &str) -> StoreResult<()> {
        let mut indexes = self.indexes.write().await;
        let members = indexes.entry(index.to_string()).or_default();
        if !members.iter().any(|m| m == member) {
            members.push(member.to_string());
        }
        Ok(())
    }

    async fn index_remove(&self, index: &str, member: &str) -> StoreResult<bool> {
        let mut indexes = self.indexes.write().await;
        let Some(members) = indexes.get_mut(index) else {
            return Ok(false);
        };
        let before = members.len();
        members.retain(|m| m != member);
        Ok(members.len() != before)
    }

    async fn health_check(&self) -> bool {
        true
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_records() {
        let backend = MemoryBackend::new();

        assert_eq!(backend.get("category:cat1").await.unwrap(), None);

        backend
            .put("category:cat1", &json!({"id": "cat1", "name": "Shirts"}))
            .await
            .unwrap();
        assert_eq!(
            backend.get("category:cat1").await.unwrap(),
            Some(json!({"id": "cat1", "name": "Shirts"}))
        );

        assert!(backend.delete("category:cat1").await.unwrap());
        assert!(!backend.delete("category:cat1").await.unwrap());
    }

    #[tokio::test]
    async fn test_index_keeps_insertion_order_without_duplicates() {
        let backend = MemoryBackend::new();

        for id in ["b", "a", "b", "c"] {
            backend.index_add("products", id).await.unwrap();
        }
        assert_eq!(backend.index_members("products").await.unwrap(), vec!["b", "a", "c"]);

        assert!(backend.index_remove("products", "a").await.unwrap());
        assert!(!backend.index_remove("products", "a").await.unwrap());
        assert!(!backend.index_remove("missing", "a").await.unwrap());
        assert_eq!(backend.index_members("products").await.unwrap(), vec!["b", "c"]);
    }
}
