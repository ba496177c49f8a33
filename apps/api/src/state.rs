//! Shared application state.

use std::sync::Arc;

use tracing::info;

use crown_store::{Database, DbConfig, KvBackend, MemoryBackend, SqliteBackend, StoreResult, Stores};

use crate::config::{ApiConfig, StorageKind};
use crate::services::{InvoiceMessenger, InvoiceService, MockMessenger};

/// Handed to every handler; cheap to clone.
#[derive(Debug, Clone)]
pub struct AppState {
    pub stores: Stores,
    pub invoices: Arc<InvoiceService>,
    pub config: Arc<ApiConfig>,
}

impl AppState {
    /// Opens the configured backend.
    pub async fn connect(config: ApiConfig) -> StoreResult<Self> {
        let backend: Arc<dyn KvBackend> = match config.storage {
            StorageKind::Sqlite => {
                let db = Database::new(DbConfig::new(config.database_path.clone())).await?;
                Arc::new(SqliteBackend::new(db))
            }
            StorageKind::Memory => Arc::new(MemoryBackend::new()),
        };
        info!(backend = backend.name(), "Storage backend ready");

        Ok(Self::new(config, backend))
    }

    pub fn new(config: ApiConfig, backend: Arc<dyn KvBackend>) -> Self {
        let messenger = Arc::new(MockMessenger::new(
            config.send_delay(),
            config.send_success_rate,
        ));
        Self::with_messenger(config, backend, messenger)
    }

    pub fn with_messenger(
        config: ApiConfig,
        backend: Arc<dyn KvBackend>,
        messenger: Arc<dyn InvoiceMessenger>,
    ) -> Self {
        let stores = Stores::new(backend);
        let invoices =
            InvoiceService::new(stores.clone(), messenger, config.invoice_prefix.clone());

        AppState {
            stores,
            invoices: Arc::new(invoices),
            config: Arc::new(config),
        }
    }
}
