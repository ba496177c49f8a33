//! # Database Migrations
//!
//! Embedded SQL migrations for the SQLite backend.
//!
//! ## Schema
//! ```text
//! ┌───────────────────────────────┐      ┌───────────────────────────────┐
//! │ kv_records                    │      │ kv_index                      │
//! │ ───────────────────────────── │      │ ───────────────────────────── │
//! │ key        TEXT PK            │      │ index_name TEXT ┐ PK          │
//! │ value      TEXT (JSON)        │      │ member     TEXT ┘             │
//! │ updated_at TEXT               │      │                               │
//! └───────────────────────────────┘      └───────────────────────────────┘
//!   "product:prod1" → {...}                ("products", "prod1")
//! ```
//!
//! ## Adding New Migrations
//!
//! 1. Create a new file in `migrations/sqlite/` with the next sequence number
//! 2. Name format: `NNN_description.sql`
//! 3. **NEVER** modify existing migrations - always add new ones

use sqlx::SqlitePool;
use tracing::info;

use crate::error::StoreResult;

/// Embedded migrations from the workspace `migrations/sqlite` directory.
static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations/sqlite");

/// Runs all pending database migrations.
///
/// Idempotent: applied migrations are tracked in `_sqlx_migrations`.
pub async fn run_migrations(pool: &SqlitePool) -> StoreResult<()> {
    info!("Checking for pending migrations");

    MIGRATOR.run(pool).await?;

    info!(total = MIGRATOR.migrations.len(), "All migrations applied");
    Ok(())
}

/// Returns `(total_migrations, applied_migrations)` for diagnostics.
pub async fn migration_status(pool: &SqlitePool) -> StoreResult<(usize, usize)> {
    let total = MIGRATOR.migrations.len();

    let applied: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations")
        .fetch_one(pool)
        .await
        .unwrap_or(0);

    Ok((total, applied as usize))
}
