//! # Key-Value Backends
//!
//! The storage interface the entity store is written against.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  EntityStore<T>                                                         │
//! │       │  get / put / delete        "product:prod1" → JSON document      │
//! │       │  index_members / add / rm  "products"      → {prod1, prod2..}   │
//! │       ▼                                                                 │
//! │  Arc<dyn KvBackend>                                                     │
//! │       ├── MemoryBackend  (tests, `storage = "memory"`)                  │
//! │       └── SqliteBackend  (kv_records + kv_index tables)                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every call is a single backend round trip. Nothing here is transactional
//! across calls.

mod memory;
mod sqlite;

pub use memory::MemoryBackend;
pub use sqlite::SqliteBackend;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::StoreResult;

#[async_trait]
pub trait KvBackend: Send + Sync + std::fmt::Debug {
    /// Reads the document stored under `key`.
    async fn get(&self, key: &str) -> StoreResult<Option<Value>>;

    /// Writes `value` under `key`, replacing any previous document.
    async fn put(&self, key: &str, value: &Value) -> StoreResult<()>;

    /// Removes `key`. Returns `false` if nothing was stored.
    async fn delete(&self, key: &str) -> StoreResult<bool>;

    /// Members of `index` in insertion order.
    async fn index_members(&self, index: &str) -> StoreResult<Vec<String>>;

    /// Adds `member` to `index`; adding an existing member is a no-op.
    async fn index_add(&self, index: &str, member: &str) -> StoreResult<()>;

    /// Removes `member` from `index`. Returns `false` if it was not a member.
    async fn index_remove(&self, index: &str, member: &str) -> StoreResult<bool>;

    /// Round trip to the backend.
    async fn health_check(&self) -> bool;

    /// Short name for logs.
    fn name(&self) -> &'static str;
}
