//! # Crown API
//!
//! HTTP JSON server behind the Crown POS admin frontend.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Crown API                                      │
//! │                                                                         │
//! │  ┌────────────────┐   ┌─────────────────┐   ┌────────────────────────┐ │
//! │  │  routes        │   │  services       │   │  crown-store           │ │
//! │  │                │──►│                 │──►│                        │ │
//! │  │ • categories   │   │ • InvoiceService│   │ • Stores               │ │
//! │  │ • products     │   │   (stock, totals│   │   (EntityStore<T>)     │ │
//! │  │ • invoices     │   │    numbering)   │   │ • memory / SQLite      │ │
//! │  │ • settings     │   │ • Messenger     │   │                        │ │
//! │  │ • staff        │   │   (mock send)   │   │                        │ │
//! │  │ • reports      │   └────────┬────────┘   └────────────────────────┘ │
//! │  └───────┬────────┘            │                                        │
//! │          └─────────────────────┴──► crown-core (billing, reports)       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! See [`config::ApiConfig`]. Every key can be set as `CROWN_<KEY>`:
//! - `CROWN_HTTP_PORT` - listen port (default: 8080)
//! - `CROWN_STORAGE` - `sqlite` or `memory` (default: sqlite)
//! - `CROWN_DATABASE_PATH` - SQLite file (default: ./data/crown.db)
//! - `CROWN_INVOICE_PREFIX` - invoice number prefix (default: INV-2024)
//! - `CROWN_SEND_DELAY_MS` / `CROWN_SEND_SUCCESS_RATE` - mocked dispatch

pub mod config;
pub mod error;
pub mod extract;
pub mod routes;
pub mod services;
pub mod state;

// Re-exports
pub use config::ApiConfig;
pub use error::{ApiError, ApiResponse};
pub use routes::build_app;
pub use state::AppState;
