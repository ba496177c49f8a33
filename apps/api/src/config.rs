//! API server configuration.
//!
//! ## Sources (later wins)
//! ```text
//! built-in defaults ──► crown.toml (optional) ──► CROWN_* environment
//!
//!   CROWN_HTTP_PORT=9000
//!   CROWN_STORAGE=memory
//!   CROWN_SEND_SUCCESS_RATE=1.0
//! ```

use std::path::PathBuf;
use std::time::Duration;

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

/// Where entity records are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageKind {
    /// SQLite file at `database_path`.
    Sqlite,
    /// Process memory; lost on restart.
    Memory,
}

/// API server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// HTTP listen port
    pub http_port: u16,

    pub storage: StorageKind,

    /// SQLite database file (only used with `storage = "sqlite"`)
    pub database_path: PathBuf,

    /// Invoice numbers are `{prefix}-{n:04}`
    pub invoice_prefix: String,

    /// Artificial delay of the mocked invoice dispatch
    pub send_delay_ms: u64,

    /// Probability (0.0–1.0) that a mocked dispatch succeeds
    pub send_success_rate: f64,

    /// Default threshold for the low-stock report and summary
    pub low_stock_threshold: i64,

    /// Default window of the dead-stock report
    pub dead_stock_days: i64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            http_port: 8080,
            storage: StorageKind::Sqlite,
            database_path: PathBuf::from("./data/crown.db"),
            invoice_prefix: "INV-2024".to_string(),
            send_delay_ms: 1500,
            send_success_rate: 0.8,
            low_stock_threshold: crown_core::DEFAULT_LOW_STOCK_THRESHOLD,
            dead_stock_days: crown_core::DEFAULT_DEAD_STOCK_DAYS,
        }
    }
}

impl ApiConfig {
    /// Load configuration from `crown.toml` (if present) and `CROWN_*`
    /// environment variables over the defaults.
    pub fn load() -> Result<Self, ConfigError> {
        let defaults = ApiConfig::default();

        let settings = Config::builder()
            .set_default("http_port", i64::from(defaults.http_port))?
            .set_default("storage", "sqlite")?
            .set_default(
                "database_path",
                defaults.database_path.to_string_lossy().to_string(),
            )?
            .set_default("invoice_prefix", defaults.invoice_prefix.clone())?
            .set_default("send_delay_ms", defaults.send_delay_ms as i64)?
            .set_default("send_success_rate", defaults.send_success_rate)?
            .set_default("low_stock_threshold", defaults.low_stock_threshold)?
            .set_default("dead_stock_days", defaults.dead_stock_days)?
            .add_source(File::with_name("crown").required(false))
            .add_source(Environment::with_prefix("CROWN").try_parsing(true))
            .build()?;

        let config: ApiConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// In-memory configuration for tests: no delay, every send succeeds.
    pub fn for_tests() -> Self {
        ApiConfig {
            storage: StorageKind::Memory,
            send_delay_ms: 0,
            send_success_rate: 1.0,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.http_port == 0 {
            return Err(ConfigError::InvalidValue("http_port".to_string()));
        }

        if !(0.0..=1.0).contains(&self.send_success_rate) {
            return Err(ConfigError::InvalidValue("send_success_rate".to_string()));
        }

        if self.invoice_prefix.trim().is_empty() {
            return Err(ConfigError::MissingRequired("invoice_prefix".to_string()));
        }

        if self.storage == StorageKind::Sqlite && self.database_path.as_os_str().is_empty() {
            return Err(ConfigError::MissingRequired("database_path".to_string()));
        }

        if self.low_stock_threshold < 0 || self.dead_stock_days < 0 {
            return Err(ConfigError::InvalidValue(
                "low_stock_threshold/dead_stock_days".to_string(),
            ));
        }

        Ok(())
    }

    pub fn send_delay(&self) -> Duration {
        Duration::from_millis(self.send_delay_ms)
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),

    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
}
