//! # Domain Types
//!
//! Core domain types used throughout Crown POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Category     │◄──│     Product     │   │  StaffMember    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  id, sku        │   │  id, name       │       │
//! │  │  name           │   │  price          │   │  role, pin      │       │
//! │  └─────────────────┘   │  quantity       │   └─────────────────┘       │
//! │                        └────────▲────────┘                              │
//! │                                 │ productId (snapshot)                  │
//! │  ┌─────────────────┐   ┌────────┴────────┐   ┌─────────────────┐       │
//! │  │    Invoice      │──►│  InvoiceItem    │   │  StoreSettings  │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  invoiceNumber  │   │  price          │   │  "singleton"    │       │
//! │  │  totals, words  │   │  originalPrice  │   │  taxRate (%)    │       │
//! │  │  status         │   │  discount       │   └─────────────────┘       │
//! │  └─────────────────┘   └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Format
//! Every record is stored and served as camelCase JSON. Monetary fields are
//! plain `f64` rupee amounts; arithmetic on them goes through [`Money`].
//! All records default missing fields so that partially-written records and
//! partial admin payloads still deserialize.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::SETTINGS_ID;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate expressed as a percentage (18 = 18%).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TaxRate(Decimal);

impl TaxRate {
    /// Creates a tax rate from a percentage as stored in settings.
    pub fn from_percentage(pct: f64) -> Self {
        TaxRate(Money::from_f64(pct).decimal())
    }

    /// Returns the rate as a percentage.
    #[inline]
    pub fn percentage(&self) -> Decimal {
        self.0
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(Decimal::ZERO)
    }
}

// =============================================================================
// Category
// =============================================================================

/// A product category shown in the inventory screen.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default, rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
}

// =============================================================================
// Product
// =============================================================================

/// A product available for sale.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default, rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier.
    pub id: String,

    /// Display name shown to the clerk and on the invoice.
    pub name: String,

    /// Stock Keeping Unit - business identifier.
    pub sku: String,

    /// Selling price in rupees.
    pub price: f64,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub size: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub color: Option<String>,

    /// Units on the shelf.
    pub quantity: i64,

    /// Free-form shelf/rack location.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub stock_location: Option<String>,

    /// Owning category id.
    pub category_id: String,
}

impl Product {
    /// Checks if `quantity` more units can be sold.
    pub fn can_sell(&self, quantity: i64) -> bool {
        self.quantity >= quantity
    }

    /// In stock but at or below `threshold`.
    pub fn is_low_stock(&self, threshold: i64) -> bool {
        self.quantity > 0 && self.quantity <= threshold
    }
}

// =============================================================================
// Staff
// =============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum StaffRole {
    Admin,
    #[default]
    Staff,
}

/// A member of the shop floor staff.
///
/// The PIN is stored as given; nothing in the API checks it against access.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default, rename_all = "camelCase")]
pub struct StaffMember {
    pub id: String,
    pub name: String,
    pub role: StaffRole,
    pub pin: String,
}

// =============================================================================
// Store Settings
// =============================================================================

/// Store-wide settings, persisted as a single record keyed `"singleton"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default, rename_all = "camelCase")]
pub struct StoreSettings {
    pub id: String,
    pub name: String,
    pub address: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub logo_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub phone: Option<String>,

    /// Tax rate as a percentage (0–100).
    pub tax_rate: f64,
}

impl StoreSettings {
    /// Returns the tax rate.
    #[inline]
    pub fn tax_rate(&self) -> TaxRate {
        TaxRate::from_percentage(self.tax_rate)
    }
}

impl Default for StoreSettings {
    /// Settings served before anyone has saved the settings form.
    fn default() -> Self {
        StoreSettings {
            id: SETTINGS_ID.to_string(),
            name: "CROWN – The Premium Menswear".to_string(),
            address: "123 Fashion Street, Metro City, 12345".to_string(),
            logo_url: None,
            phone: Some("+91 98765 43210".to_string()),
            tax_rate: 18.0,
        }
    }
}

// =============================================================================
// Invoice
// =============================================================================

/// How a discount value is interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum DiscountType {
    /// `discount` is a percentage of the line (or bill) amount.
    Percentage,
    /// `discount` is an amount in rupees (per unit on a line).
    #[default]
    Fixed,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default, rename_all = "camelCase")]
pub struct Customer {
    pub name: String,
    pub phone: String,
}

/// A line on an invoice.
/// Uses snapshot pattern to freeze product data at time of sale.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default, rename_all = "camelCase")]
pub struct InvoiceItem {
    pub product_id: String,
    /// Product name at time of sale (frozen).
    pub product_name: String,
    pub quantity: i64,
    /// Unit price charged; may be a manual override of `original_price`.
    pub price: f64,
    /// Catalogue price at time of sale. Falls back to `price` when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub original_price: Option<f64>,
    pub discount: f64,
    pub discount_type: DiscountType,
}

impl InvoiceItem {
    /// Undiscounted unit price used for all billing math.
    pub fn original_price(&self) -> Money {
        Money::from_f64(self.original_price.unwrap_or(self.price))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Paid,
    #[default]
    Pending,
    Cancelled,
}

/// Outcome of the (mocked) invoice dispatch to the customer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum MessagingStatus {
    #[default]
    Pending,
    Sent,
    Failed,
}

/// A finalized invoice.
///
/// Immutable once created except for `messaging_status`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default, rename_all = "camelCase")]
pub struct Invoice {
    pub id: String,
    pub invoice_number: String,
    /// Creation time, epoch milliseconds.
    pub date: i64,
    pub customer: Customer,
    pub items: Vec<InvoiceItem>,
    pub sub_total: f64,
    pub total_discount: f64,
    pub tax: f64,
    /// `grand_total - pre-round total`; negative when rounded down.
    pub rounding: f64,
    /// Whole-rupee total.
    pub grand_total: f64,
    pub amount_in_words: String,
    pub status: InvoiceStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub messaging_status: Option<MessagingStatus>,
}

/// Discount applied to the whole cart after per-item discounts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default, rename_all = "camelCase")]
pub struct BillDiscount {
    pub value: f64,
    pub discount_type: DiscountType,
}

/// Invoice as submitted by the billing screen.
///
/// The totals the client computed are accepted for logging only; the server
/// recomputes every figure from `items`, `bill_discount` and the store tax rate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default, rename_all = "camelCase")]
pub struct InvoiceDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub customer: Option<Customer>,
    pub items: Vec<InvoiceItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub bill_discount: Option<BillDiscount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub grand_total: Option<f64>,
}

impl Invoice {
    /// Units across all lines.
    pub fn units(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Returns the grand total as Money.
    #[inline]
    pub fn grand_total(&self) -> Money {
        Money::from_f64(self.grand_total)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_deserializes_partial_payload() {
        let product: Product =
            serde_json::from_str(r#"{"name":"Silk Tie","price":1499,"categoryId":"cat4"}"#)
                .unwrap();
        assert_eq!(product.name, "Silk Tie");
        assert_eq!(product.price, 1499.0);
        assert_eq!(product.quantity, 0);
        assert_eq!(product.size, None);
    }

    #[test]
    fn test_optional_fields_are_omitted() {
        let json = serde_json::to_value(Product {
            id: "p1".into(),
            ..Default::default()
        })
        .unwrap();
        assert!(json.get("size").is_none());
        assert!(json.get("categoryId").is_some());
    }

    #[test]
    fn test_original_price_falls_back_to_price() {
        let mut item = InvoiceItem {
            price: 90.0,
            ..Default::default()
        };
        assert_eq!(item.original_price().to_f64(), 90.0);

        item.original_price = Some(100.0);
        assert_eq!(item.original_price().to_f64(), 100.0);
    }

    #[test]
    fn test_enum_wire_names() {
        assert_eq!(serde_json::to_string(&DiscountType::Percentage).unwrap(), "\"percentage\"");
        assert_eq!(serde_json::to_string(&StaffRole::Admin).unwrap(), "\"admin\"");
        assert_eq!(serde_json::to_string(&MessagingStatus::Failed).unwrap(), "\"failed\"");
    }

    #[test]
    fn test_low_stock_excludes_sold_out() {
        let mut product = Product {
            quantity: 0,
            ..Default::default()
        };
        assert!(!product.is_low_stock(10));
        product.quantity = 10;
        assert!(product.is_low_stock(10));
        product.quantity = 11;
        assert!(!product.is_low_stock(10));
    }

    #[test]
    fn test_default_settings() {
        let settings = StoreSettings::default();
        assert_eq!(settings.id, "singleton");
        assert_eq!(settings.tax_rate, 18.0);
    }
}
