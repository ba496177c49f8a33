//! # Store Error Types
//!
//! Error types for entity store and backend operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  sqlx::Error / serde_json::Error                                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Adds entity/id context                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ApiError (apps/api) ← NotFound 404, AlreadyExists 409, else 500        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Entity store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No record stored under the key.
    ///
    /// ## When This Occurs
    /// - `patch` or `mutate` on an id that was never created
    /// - The record was deleted between list and fetch
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// `create` with an id that is already taken.
    #[error("{entity} already exists: {id}")]
    AlreadyExists { entity: String, id: String },

    /// A stored record does not decode as its entity type.
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A patch body that is not a JSON object, or that leaves the record
    /// with fields of the wrong type.
    #[error("Invalid patch: {0}")]
    InvalidPatch(String),

    /// Backend I/O failed.
    #[error("Backend error: {0}")]
    Backend(String),

    /// Database connection failed.
    ///
    /// ## When This Occurs
    /// - Database file can't be created
    /// - Pool is closed or exhausted
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Migration failed.
    #[error("Migration failed: {0}")]
    MigrationFailed(String),
}

impl StoreError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        StoreError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    pub fn already_exists(entity: impl Into<String>, id: impl Into<String>) -> Self {
        StoreError::AlreadyExists {
            entity: entity.into(),
            id: id.into(),
        }
    }
}

/// Convert sqlx errors to StoreError.
///
/// ## Error Mapping
/// ```text
/// sqlx::Error::PoolTimedOut   → StoreError::ConnectionFailed
/// sqlx::Error::PoolClosed     → StoreError::ConnectionFailed
/// Other                       → StoreError::Backend
/// ```
impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut => {
                StoreError::ConnectionFailed("Connection pool exhausted".to_string())
            }
            sqlx::Error::PoolClosed => StoreError::ConnectionFailed("Pool is closed".to_string()),
            sqlx::Error::Database(db_err) => StoreError::Backend(db_err.message().to_string()),
            _ => StoreError::Backend(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for StoreError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        StoreError::MigrationFailed(err.to_string())
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
