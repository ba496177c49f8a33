//! # crown-core: Pure Business Logic for Crown POS
//!
//! This crate is the **heart** of Crown POS. It contains all billing and
//! reporting logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Crown POS Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Admin Frontend                               │   │
//! │  │    Billing ──► Invoices ──► Inventory ──► Reports ──► Settings │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ HTTP JSON                              │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    apps/api (axum routes)                       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ crown-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  billing  │  │  reports  │  │   │
//! │  │   │  Product  │  │   Money   │  │  totals   │  │  summary  │  │   │
//! │  │   │  Invoice  │  │   words   │  │  stock    │  │  top/dead │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORAGE • NO NETWORK • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 crown-store (Entity Store)                      │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Invoice, StoreSettings, etc.)
//! - [`money`] - Money type backed by exact decimals
//! - [`words`] - Amount in words (Indian numbering)
//! - [`billing`] - Cart-to-invoice totals
//! - [`stock`] - Stock check and deduction planning
//! - [`reports`] - Dashboard aggregations
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Example Usage
//!
//! ```rust
//! use crown_core::billing::{compute_totals, BillingLine, Discount};
//! use crown_core::money::Money;
//! use crown_core::types::{DiscountType, TaxRate};
//!
//! let line = BillingLine {
//!     original_price: Money::from_f64(100.0),
//!     quantity: 2,
//!     discount: Discount::from_f64(10.0, DiscountType::Fixed),
//! };
//! let totals = compute_totals(&[line], None, TaxRate::from_percentage(18.0));
//!
//! assert_eq!(totals.sub_total.to_f64(), 200.0);
//! assert_eq!(totals.tax.to_f64(), 32.4);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod billing;
pub mod error;
pub mod money;
pub mod reports;
pub mod stock;
pub mod types;
pub mod validation;
pub mod words;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;
pub use words::amount_to_words;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Key of the store settings singleton.
pub const SETTINGS_ID: &str = "singleton";

/// Maximum lines allowed on a single invoice.
pub const MAX_INVOICE_ITEMS: usize = 100;

/// Maximum quantity of a single line.
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10)
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Largest rupee amount accepted for a price or a discount.
///
/// Keeps every bill total (at most `MAX_INVOICE_ITEMS` lines of
/// `MAX_ITEM_QUANTITY` units) far inside the exact decimal range.
pub const MAX_AMOUNT: i64 = 1_000_000_000_000;

/// Products at or below this quantity (and above zero) count as low stock.
pub const DEFAULT_LOW_STOCK_THRESHOLD: i64 = 10;

/// Trailing window, in days, used by the dead-stock report.
pub const DEFAULT_DEAD_STOCK_DAYS: i64 = 90;
