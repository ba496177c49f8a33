//! # Validation Module
//!
//! Business-rule validation for everything the admin API accepts.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Admin frontend forms                                          │
//! │  ├── Basic format checks (min length, PIN length)                       │
//! │  └── Immediate user feedback                                            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: HTTP route (Rust)                                             │
//! │  ├── Type validation (JSON deserialization)                             │
//! │  └── THIS MODULE: Business rule validation                              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Invoice service                                               │
//! │  └── Stock availability (see `stock`)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use crown_core::validation::{validate_sku, validate_line_quantity};
//!
//! validate_sku("CROWN-SH-001").unwrap();
//! validate_line_quantity(5).unwrap();
//! ```

use crate::error::ValidationError;
use crate::types::{
    BillDiscount, Category, DiscountType, InvoiceDraft, InvoiceItem, Product, StaffMember,
    StoreSettings,
};
use crate::{MAX_AMOUNT, MAX_INVOICE_ITEMS, MAX_ITEM_QUANTITY};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

const MAX_NAME_LEN: usize = 200;
const MAX_SKU_LEN: usize = 50;
const PIN_LEN: usize = 4;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a display name (category, product, staff, store).
///
/// ## Rules
/// - Must not be empty after trimming
/// - At most 200 characters
pub fn validate_name(field: &str, name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::required(field));
    }

    if name.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a SKU (Stock Keeping Unit).
///
/// ## Rules
/// - Must not be empty
/// - At most 50 characters
///
/// Any other characters are allowed, so `RB/01` and `SH 001` are valid.
///
/// ## Example
/// ```rust
/// use crown_core::validation::validate_sku;
///
/// assert!(validate_sku("CROWN-AC-002").is_ok());
/// assert!(validate_sku("RB/01").is_ok());
/// assert!(validate_sku("").is_err());
/// ```
pub fn validate_sku(sku: &str) -> ValidationResult<()> {
    let sku = sku.trim();

    if sku.is_empty() {
        return Err(ValidationError::required("sku"));
    }

    if sku.len() > MAX_SKU_LEN {
        return Err(ValidationError::TooLong {
            field: "sku".to_string(),
            max: MAX_SKU_LEN,
        });
    }

    Ok(())
}

/// Validates a staff PIN: exactly four ASCII digits.
///
/// ## Example
/// ```rust
/// use crown_core::validation::validate_pin;
///
/// assert!(validate_pin("0420").is_ok());
/// assert!(validate_pin("420").is_err());
/// assert!(validate_pin("12a4").is_err());
/// ```
pub fn validate_pin(pin: &str) -> ValidationResult<()> {
    if pin.is_empty() {
        return Err(ValidationError::required("pin"));
    }

    if pin.len() != PIN_LEN || !pin.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "pin".to_string(),
            reason: "must be exactly 4 digits".to_string(),
        });
    }

    Ok(())
}

/// Validates a search query and returns it trimmed.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.len() > 100 {
        return Err(ValidationError::TooLong {
            field: "q".to_string(),
            max: 100,
        });
    }

    Ok(query.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

fn finite(field: &str, value: f64) -> ValidationResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "must be a finite number".to_string(),
        })
    }
}

/// Validates a monetary amount in rupees.
///
/// ## Rules
/// - Must be a finite number
/// - Must be non-negative; zero is allowed
/// - At most `MAX_AMOUNT` rupees
pub fn validate_amount(field: &str, value: f64) -> ValidationResult<()> {
    finite(field, value)?;

    if value < 0.0 {
        return Err(ValidationError::Negative {
            field: field.to_string(),
        });
    }

    if value > MAX_AMOUNT as f64 {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: MAX_AMOUNT,
        });
    }

    Ok(())
}

/// Validates shelf quantity on a product (zero means sold out).
pub fn validate_stock_quantity(qty: i64) -> ValidationResult<()> {
    if qty < 0 {
        return Err(ValidationError::Negative {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Validates the quantity of an invoice line.
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Finalize invoice                                                       │
/// │                                                                         │
/// │  Line: Silk Tie × qty                                                   │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  validate_line_quantity(qty) ← THIS FUNCTION                            │
/// │       │                                                                 │
/// │       ├── qty <= 0?  → "quantity must be positive"                      │
/// │       │                                                                 │
/// │       ├── qty > 999? → "quantity must be between 1 and 999"             │
/// │       │                                                                 │
/// │       └── OK → stock check                                              │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn validate_line_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a discount value.
///
/// ## Rules
/// - Non-negative and at most `MAX_AMOUNT`
/// - Percentage discounts at most 100
pub fn validate_discount(field: &str, value: f64, kind: DiscountType) -> ValidationResult<()> {
    validate_amount(field, value)?;

    if kind == DiscountType::Percentage && value > 100.0 {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: 100,
        });
    }

    Ok(())
}

/// Validates a tax rate percentage (0–100).
///
/// ## Example
/// ```rust
/// use crown_core::validation::validate_tax_rate;
///
/// assert!(validate_tax_rate(18.0).is_ok());
/// assert!(validate_tax_rate(0.0).is_ok());
/// assert!(validate_tax_rate(100.5).is_err());
/// ```
pub fn validate_tax_rate(pct: f64) -> ValidationResult<()> {
    finite("taxRate", pct)?;

    if !(0.0..=100.0).contains(&pct) {
        return Err(ValidationError::OutOfRange {
            field: "taxRate".to_string(),
            min: 0,
            max: 100,
        });
    }

    Ok(())
}

// =============================================================================
// Invoice Validators
// =============================================================================

/// Validates one invoice line.
pub fn validate_invoice_item(item: &InvoiceItem) -> ValidationResult<()> {
    if item.product_id.trim().is_empty() {
        return Err(ValidationError::required("productId"));
    }

    validate_line_quantity(item.quantity)?;
    validate_amount("price", item.price)?;
    if let Some(original) = item.original_price {
        validate_amount("originalPrice", original)?;
    }
    validate_discount("discount", item.discount, item.discount_type)
}

pub fn validate_bill_discount(discount: &BillDiscount) -> ValidationResult<()> {
    validate_discount("billDiscount", discount.value, discount.discount_type)
}

/// Validates a draft invoice before any stock is touched.
///
/// ## Rules
/// - A customer is present
/// - Between 1 and `MAX_INVOICE_ITEMS` lines, each valid
/// - Bill discount, when given, is valid
pub fn validate_invoice_draft(draft: &InvoiceDraft) -> ValidationResult<()> {
    if draft.customer.is_none() {
        return Err(ValidationError::required("customer"));
    }

    if draft.items.is_empty() {
        return Err(ValidationError::required("items"));
    }

    if draft.items.len() > MAX_INVOICE_ITEMS {
        return Err(ValidationError::OutOfRange {
            field: "items".to_string(),
            min: 1,
            max: MAX_INVOICE_ITEMS as i64,
        });
    }

    draft.items.iter().try_for_each(validate_invoice_item)?;

    if let Some(discount) = &draft.bill_discount {
        validate_bill_discount(discount)?;
    }

    Ok(())
}

// =============================================================================
// Record Validators
// =============================================================================
// Applied to the full record after a create payload is decoded or a patch
// is merged, so partial updates are held to the same rules as creates.

pub fn validate_category(category: &Category) -> ValidationResult<()> {
    validate_name("name", &category.name)
}

/// ## Rules
/// - Name and SKU valid
/// - Price non-negative, quantity non-negative
///
/// Whether `categoryId` names an existing category is checked by the caller.
pub fn validate_product(product: &Product) -> ValidationResult<()> {
    validate_name("name", &product.name)?;
    validate_sku(&product.sku)?;
    validate_amount("price", product.price)?;
    validate_stock_quantity(product.quantity)
}

pub fn validate_staff(member: &StaffMember) -> ValidationResult<()> {
    validate_name("name", &member.name)?;
    validate_pin(&member.pin)
}

pub fn validate_settings(settings: &StoreSettings) -> ValidationResult<()> {
    validate_name("name", &settings.name)?;
    validate_tax_rate(settings.tax_rate)
}

// =============================================================================
// Unit Tests
// =============================================================================
