//! # Entity Store
//!
//! One generic repository for every record type, configured by data.
//!
//! ## Storage Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  EntityConfig { entity: "product", index: Some("products"), .. }        │
//! │                                                                         │
//! │  key "product:prod1" ──► {"id":"prod1","name":"Classic Oxford", ...}    │
//! │  key "product:prod2" ──► {"id":"prod2", ...}                            │
//! │                                                                         │
//! │  index "products"    ──► [prod1, prod2, ...]      (list / seed check)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Operation Semantics
//! - `get` never fails on a missing record; it returns the initial state
//! - `patch`/`mutate` are read-modify-write with no isolation between
//!   concurrent callers; callers that need it serialize themselves
//! - `ensure_seed` only seeds an empty index, so it is cheap to call often

use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::backend::KvBackend;
use crate::error::{StoreError, StoreResult};

// =============================================================================
// Record Trait
// =============================================================================

/// A type the entity store can persist.
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    fn id(&self) -> &str;
    fn set_id(&mut self, id: String);
}

// =============================================================================
// Configuration
// =============================================================================

/// Static description of one entity type.
#[derive(Debug, Clone)]
pub struct EntityConfig<T> {
    /// Key prefix, e.g. `"product"`.
    pub entity: &'static str,
    /// Index holding every id; `None` for singletons.
    pub index: Option<&'static str>,
    /// State served by `get` when nothing is stored.
    pub initial_state: T,
    /// Records written by `ensure_seed` into an empty index.
    pub seed: Vec<T>,
}

/// Result of `list`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
}

// =============================================================================
// Entity Store
// =============================================================================

pub struct EntityStore<T> {
    backend: Arc<dyn KvBackend>,
    config: Arc<EntityConfig<T>>,
}

impl<T> Clone for EntityStore<T> {
    fn clone(&self) -> Self {
        EntityStore {
            backend: Arc::clone(&self.backend),
            config: Arc::clone(&self.config),
        }
    }
}

impl<T> fmt::Debug for EntityStore<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityStore")
            .field("entity", &self.config.entity)
            .field("index", &self.config.index)
            .field("backend", &self.backend.name())
            .finish()
    }
}

impl<T: Record> EntityStore<T> {
    pub fn new(backend: Arc<dyn KvBackend>, config: EntityConfig<T>) -> Self {
        EntityStore {
            backend,
            config: Arc::new(config),
        }
    }

    fn key(&self, id: &str) -> String {
        format!("{}:{}", self.config.entity, id)
    }

    fn decode(&self, value: Value) -> StoreResult<T> {
        Ok(serde_json::from_value(value)?)
    }

    /// Stored state, or the initial state carrying `id` when absent.
    pub async fn get(&self, id: &str) -> StoreResult<T> {
        match self.find(id).await? {
            Some(state) => Ok(state),
            None => {
                let mut state = self.config.initial_state.clone();
                state.set_id(id.to_string());
                Ok(state)
            }
        }
    }

    /// Stored state, or `None` when absent.
    pub async fn find(&self, id: &str) -> StoreResult<Option<T>> {
        self.backend
            .get(&self.key(id))
            .await?
            .map(|value| self.decode(value))
            .transpose()
    }

    pub async fn exists(&self, id: &str) -> StoreResult<bool> {
        Ok(self.backend.get(&self.key(id)).await?.is_some())
    }

    /// Writes a new record and adds it to the index.
    ///
    /// An empty id is replaced with a fresh UUID v4.
    ///
    /// ## Errors
    /// `AlreadyExists` if a record with the same id is stored.
    pub async fn create(&self, mut state: T) -> StoreResult<T> {
        if state.id().trim().is_empty() {
            state.set_id(Uuid::new_v4().to_string());
        }

        let key = self.key(state.id());
        if self.backend.get(&key).await?.is_some() {
            return Err(StoreError::already_exists(self.config.entity, state.id()));
        }

        self.backend.put(&key, &serde_json::to_value(&state)?).await?;
        if let Some(index) = self.config.index {
            self.backend.index_add(index, state.id()).await?;
        }

        debug!(entity = self.config.entity, id = %state.id(), "Entity created");
        Ok(state)
    }

    /// Unconditional upsert, for singletons that are never listed.
    pub async fn put(&self, state: &T) -> StoreResult<()> {
        self.backend
            .put(&self.key(state.id()), &serde_json::to_value(state)?)
            .await
    }

    /// Shallow-merges the top-level fields of `partial` into the record.
    ///
    /// ## Merge Rules
    /// ```text
    /// stored  {"id":"p1","name":"Tie","price":1499,"quantity":75}
    /// partial {"id":"zz","price":1299}
    ///           │         │
    ///           │         └── replaces stored field
    ///           └──────────── ignored: the id is fixed by the key
    /// result  {"id":"p1","name":"Tie","price":1299,"quantity":75}
    /// ```
    ///
    /// ## Errors
    /// - `NotFound` if nothing is stored under `id`
    /// - `InvalidPatch` if `partial` is not an object or the merged record
    ///   no longer decodes as `T`
    pub async fn patch(&self, id: &str, partial: Value) -> StoreResult<T> {
        self.patch_checked(id, partial, |_| Ok::<(), StoreError>(()))
            .await
    }

    /// [`patch`](Self::patch), but `check` sees the merged record before it
    /// is written. A rejection becomes `InvalidPatch` and nothing is stored.
    pub async fn patch_checked<F, E>(&self, id: &str, partial: Value, check: F) -> StoreResult<T>
    where
        F: FnOnce(&T) -> Result<(), E> + Send,
        E: fmt::Display,
    {
        let Value::Object(fields) = partial else {
            return Err(StoreError::InvalidPatch(
                "patch body must be a JSON object".to_string(),
            ));
        };

        let key = self.key(id);
        let current = self
            .backend
            .get(&key)
            .await?
            .ok_or_else(|| StoreError::not_found(self.config.entity, id))?;

        let mut merged = match current {
            Value::Object(map) => map,
            _ => serde_json::Map::new(),
        };
        for (field, value) in fields {
            if field != "id" {
                merged.insert(field, value);
            }
        }
        merged.insert("id".to_string(), Value::String(id.to_string()));

        let state: T = serde_json::from_value(Value::Object(merged))
            .map_err(|e| StoreError::InvalidPatch(e.to_string()))?;
        check(&state).map_err(|e| StoreError::InvalidPatch(e.to_string()))?;

        self.backend.put(&key, &serde_json::to_value(&state)?).await?;
        Ok(state)
    }

    /// Read-modify-write through `f`. The id cannot be changed.
    ///
    /// ## Errors
    /// `NotFound` if nothing is stored under `id`.
    pub async fn mutate<F>(&self, id: &str, f: F) -> StoreResult<T>
    where
        F: FnOnce(T) -> T + Send,
    {
        let current = self
            .find(id)
            .await?
            .ok_or_else(|| StoreError::not_found(self.config.entity, id))?;

        let mut next = f(current);
        next.set_id(id.to_string());

        self.backend
            .put(&self.key(id), &serde_json::to_value(&next)?)
            .await?;
        Ok(next)
    }

    /// Removes the record and its index entry. Returns `false` if absent.
    pub async fn delete(&self, id: &str) -> StoreResult<bool> {
        let existed = self.backend.delete(&self.key(id)).await?;
        if let Some(index) = self.config.index {
            self.backend.index_remove(index, id).await?;
        }

        if existed {
            debug!(entity = self.config.entity, id = %id, "Entity deleted");
        }
        Ok(existed)
    }

    /// Every indexed record, in index order.
    ///
    /// Ids whose record has vanished are skipped. Records that no longer
    /// decode are skipped with a warning.
    pub async fn list(&self) -> StoreResult<Page<T>> {
        let Some(index) = self.config.index else {
            return Ok(Page { items: Vec::new() });
        };

        let ids = self.backend.index_members(index).await?;
        let mut items = Vec::with_capacity(ids.len());

        for id in ids {
            let Some(value) = self.backend.get(&self.key(&id)).await? else {
                continue;
            };
            match self.decode(value) {
                Ok(state) => items.push(state),
                Err(e) => warn!(
                    entity = self.config.entity,
                    id = %id,
                    error = %e,
                    "Skipping undecodable record"
                ),
            }
        }

        Ok(Page { items })
    }

    /// Number of ids in the index.
    pub async fn count(&self) -> StoreResult<usize> {
        match self.config.index {
            Some(index) => Ok(self.backend.index_members(index).await?.len()),
            None => Ok(0),
        }
    }

    /// Writes the seed records if the index is empty.
    ///
    /// Returns the number of records written. Two callers racing on an empty
    /// index both write the same seed records, which converges.
    pub async fn ensure_seed(&self) -> StoreResult<usize> {
        let Some(index) = self.config.index else {
            return Ok(0);
        };
        if self.config.seed.is_empty() || !self.backend.index_members(index).await?.is_empty() {
            return Ok(0);
        }

        for state in &self.config.seed {
            self.backend
                .put(&self.key(state.id()), &serde_json::to_value(state)?)
                .await?;
            self.backend.index_add(index, state.id()).await?;
        }

        info!(
            entity = self.config.entity,
            count = self.config.seed.len(),
            "Seed data written"
        );
        Ok(self.config.seed.len())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryBackend;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    #[serde(default)]
    struct Widget {
        id: String,
        name: String,
        stock: i64,
    }

    impl Record for Widget {
        fn id(&self) -> &str {
            &self.id
        }

        fn set_id(&mut self, id: String) {
            self.id = id;
        }
    }

    fn widget(id: &str, name: &str, stock: i64) -> Widget {
        Widget {
            id: id.to_string(),
            name: name.to_string(),
            stock,
        }
    }

    fn store() -> EntityStore<Widget> {
        EntityStore::new(
            Arc::new(MemoryBackend::new()),
            EntityConfig {
                entity: "widget",
                index: Some("widgets"),
                initial_state: Widget::default(),
                seed: vec![widget("w1", "Seeded", 1), widget("w2", "Seeded 2", 2)],
            },
        )
    }

    #[tokio::test]
    async fn test_get_returns_initial_state_when_absent() {
        let store = store();
        assert_eq!(store.get("nope").await.unwrap(), widget("nope", "", 0));
        assert_eq!(store.find("nope").await.unwrap(), None);
        assert!(!store.exists("nope").await.unwrap());
    }

    #[tokio::test]
    async fn test_create_assigns_uuid_and_indexes() {
        let store = store();
        let created = store.create(widget("", "Fresh", 3)).await.unwrap();

        assert!(Uuid::parse_str(&created.id).is_ok());
        assert!(store.exists(&created.id).await.unwrap());
        assert_eq!(store.list().await.unwrap().items, vec![created]);
    }

    #[tokio::test]
    async fn test_create_duplicate_fails() {
        let store = store();
        store.create(widget("a", "One", 1)).await.unwrap();

        let err = store.create(widget("a", "Two", 2)).await.unwrap_err();
        assert!(matches!(err, StoreError::AlreadyExists { .. }));
        assert_eq!(store.get("a").await.unwrap().name, "One");
    }

    #[tokio::test]
    async fn test_patch_merges_and_keeps_id() {
        let store = store();
        store.create(widget("a", "One", 1)).await.unwrap();

        let patched = store
            .patch("a", json!({"id": "hijack", "stock": 9}))
            .await
            .unwrap();
        assert_eq!(patched, widget("a", "One", 9));
        assert!(!store.exists("hijack").await.unwrap());
    }

    #[tokio::test]
    async fn test_patch_checked_rejects_before_write() {
        let store = store();
        store.create(widget("a", "One", 1)).await.unwrap();

        let err = store
            .patch_checked("a", json!({"stock": -5}), |w: &Widget| {
                if w.stock < 0 {
                    Err("stock must not be negative")
                } else {
                    Ok(())
                }
            })
            .await
            .unwrap_err();
        assert!(
            matches!(err, StoreError::InvalidPatch(ref m) if m == "stock must not be negative")
        );
        assert_eq!(store.get("a").await.unwrap().stock, 1);
    }

    #[tokio::test]
    async fn test_patch_errors() {
        let store = store();
        assert!(matches!(
            store.patch("missing", json!({"stock": 1})).await.unwrap_err(),
            StoreError::NotFound { .. }
        ));

        store.create(widget("a", "One", 1)).await.unwrap();
        assert!(matches!(
            store.patch("a", json!([1, 2])).await.unwrap_err(),
            StoreError::InvalidPatch(_)
        ));
        assert!(matches!(
            store.patch("a", json!({"stock": "lots"})).await.unwrap_err(),
            StoreError::InvalidPatch(_)
        ));
        assert_eq!(store.get("a").await.unwrap().stock, 1);
    }

    #[tokio::test]
    async fn test_mutate() {
        let store = store();
        store.create(widget("a", "One", 5)).await.unwrap();

        let next = store
            .mutate("a", |mut w| {
                w.stock -= 2;
                w
            })
            .await
            .unwrap();
        assert_eq!(next.stock, 3);
        assert_eq!(store.get("a").await.unwrap().stock, 3);

        assert!(store.mutate("missing", |w| w).await.is_err());
    }

    #[tokio::test]
    async fn test_delete_removes_index_membership() {
        let store = store();
        store.create(widget("a", "One", 1)).await.unwrap();

        assert!(store.delete("a").await.unwrap());
        assert!(!store.delete("a").await.unwrap());
        assert!(store.list().await.unwrap().items.is_empty());
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_ensure_seed_is_idempotent() {
        let store = store();

        assert_eq!(store.ensure_seed().await.unwrap(), 2);
        assert_eq!(store.ensure_seed().await.unwrap(), 0);

        let names: Vec<String> = store
            .list()
            .await
            .unwrap()
            .items
            .into_iter()
            .map(|w| w.name)
            .collect();
        assert_eq!(names, vec!["Seeded", "Seeded 2"]);
    }

    #[tokio::test]
    async fn test_seed_skipped_when_index_has_members() {
        let store = store();
        store.create(widget("mine", "Mine", 1)).await.unwrap();

        assert_eq!(store.ensure_seed().await.unwrap(), 0);
        assert_eq!(store.count().await.unwrap(), 1);
    }
}
