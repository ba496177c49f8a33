//! # crown-store: Entity Store for Crown POS
//!
//! Persists categories, products, invoices, staff and store settings as JSON
//! documents in a key-value backend.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Crown POS Data Flow                              │
//! │                                                                         │
//! │  HTTP route (POST /api/products)                                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   crown-store (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐   │   │
//! │  │   │    Stores     │    │ EntityStore<T>│    │  KvBackend   │   │   │
//! │  │   │ (entities.rs) │───►│  (entity.rs)  │───►│  memory      │   │   │
//! │  │   │ configs, seed │    │ get/create/.. │    │  sqlite      │   │   │
//! │  │   └───────────────┘    └───────────────┘    └──────┬───────┘   │   │
//! │  └────────────────────────────────────────────────────┼───────────┘   │
//! │                                                       ▼               │
//! │                        kv_records / kv_index (SQLite, migrations/)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`backend`] - The `KvBackend` trait and its implementations
//! - [`entity`] - Generic `EntityStore<T>`
//! - [`entities`] - Crown POS entity configurations and seed data
//! - [`pool`] - SQLite connection pool
//! - [`migrations`] - Embedded schema migrations
//! - [`error`] - Store error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use crown_store::{Database, DbConfig, SqliteBackend, Stores};
//!
//! let db = Database::new(DbConfig::new("./data/crown.db")).await?;
//! let stores = Stores::new(Arc::new(SqliteBackend::new(db)));
//!
//! stores.ensure_seed().await?;
//! let products = stores.products.list().await?.items;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod backend;
pub mod entities;
pub mod entity;
pub mod error;
pub mod migrations;
pub mod pool;

// =============================================================================
// Re-exports
// =============================================================================

pub use backend::{KvBackend, MemoryBackend, SqliteBackend};
pub use entities::Stores;
pub use entity::{EntityConfig, EntityStore, Page, Record};
pub use error::{StoreError, StoreResult};
pub use pool::{Database, DbConfig};
