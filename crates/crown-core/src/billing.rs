//! # Billing Computation
//!
//! Turns cart lines into the authoritative figures printed on an invoice.
//!
//! ## Calculation Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Cart ──► Invoice Totals                             │
//! │                                                                         │
//! │  lines ──► Σ originalPrice × qty ─────────────────────► subTotal        │
//! │    │                                                                    │
//! │    └────► Σ item discount ────────────────────────────► itemDiscounts   │
//! │              fixed:      discount × qty                                 │
//! │              percentage: originalPrice × qty × discount / 100           │
//! │                                                                         │
//! │  bill discount                                                          │
//! │              fixed:      value                                          │
//! │              percentage: (subTotal − itemDiscounts) × value / 100       │
//! │                                                                         │
//! │  totalDiscount = itemDiscounts + billDiscount                           │
//! │  taxable       = subTotal − totalDiscount                               │
//! │  tax           = taxable × taxRate / 100                                │
//! │  grandTotal    = taxable + tax                     (pre-round)          │
//! │                                                                         │
//! │  finalize():  rounded  = round(grandTotal)                              │
//! │               rounding = rounded − grandTotal      (signed)             │
//! │               words    = amount_to_words(rounded)                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The unit `price` on an [`InvoiceItem`] may be a manual override; the
//! subtotal always uses the undiscounted original price.

use rust_decimal::Decimal;

use crate::money::Money;
use crate::types::{BillDiscount, DiscountType, Invoice, InvoiceItem, TaxRate};
use crate::words::amount_to_words;

// =============================================================================
// Discount
// =============================================================================

/// A discount value together with how it is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Discount {
    pub value: Decimal,
    pub kind: DiscountType,
}

impl Discount {
    pub fn from_f64(value: f64, kind: DiscountType) -> Self {
        Discount {
            value: Money::from_f64(value).decimal(),
            kind,
        }
    }

    /// No discount.
    pub const fn none() -> Self {
        Discount {
            value: Decimal::ZERO,
            kind: DiscountType::Fixed,
        }
    }

    /// Discount on a cart line: fixed values are per unit.
    pub fn line_amount(&self, original_price: Money, quantity: i64) -> Money {
        match self.kind {
            DiscountType::Fixed => Money::from_decimal(self.value) * quantity,
            DiscountType::Percentage => (original_price * quantity).percent(self.value),
        }
    }

    /// Discount on the whole bill: fixed values are taken as-is.
    pub fn bill_amount(&self, base: Money) -> Money {
        match self.kind {
            DiscountType::Fixed => Money::from_decimal(self.value),
            DiscountType::Percentage => base.percent(self.value),
        }
    }
}

impl From<&BillDiscount> for Discount {
    fn from(bill: &BillDiscount) -> Self {
        Discount::from_f64(bill.value, bill.discount_type)
    }
}

// =============================================================================
// Billing Line
// =============================================================================

/// The part of a cart line the totals depend on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BillingLine {
    pub original_price: Money,
    pub quantity: i64,
    pub discount: Discount,
}

impl BillingLine {
    /// Undiscounted line amount.
    pub fn gross(&self) -> Money {
        self.original_price * self.quantity
    }

    pub fn discount_amount(&self) -> Money {
        self.discount.line_amount(self.original_price, self.quantity)
    }

    /// Line amount after its own discount.
    pub fn net(&self) -> Money {
        self.gross() - self.discount_amount()
    }
}

impl From<&InvoiceItem> for BillingLine {
    fn from(item: &InvoiceItem) -> Self {
        BillingLine {
            original_price: item.original_price(),
            quantity: item.quantity,
            discount: Discount::from_f64(item.discount, item.discount_type),
        }
    }
}

// =============================================================================
// Totals
// =============================================================================

/// Pre-rounding totals of a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BillTotals {
    pub sub_total: Money,
    pub item_discounts: Money,
    pub bill_discount: Money,
    pub total_discount: Money,
    pub taxable_amount: Money,
    pub tax: Money,
    pub grand_total: Money,
}

/// Totals as they are persisted on an invoice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinalTotals {
    pub sub_total: Money,
    pub total_discount: Money,
    pub tax: Money,
    /// `grand_total − pre-round total`.
    pub rounding: Money,
    /// Whole rupees.
    pub grand_total: Money,
    pub amount_in_words: String,
}

/// Computes the pre-rounding totals for `lines`.
pub fn compute_totals(
    lines: &[BillingLine],
    bill_discount: Option<Discount>,
    tax_rate: TaxRate,
) -> BillTotals {
    let sub_total: Money = lines.iter().map(BillingLine::gross).sum();
    let item_discounts: Money = lines.iter().map(BillingLine::discount_amount).sum();

    let bill_discount = bill_discount
        .map(|d| d.bill_amount(sub_total - item_discounts))
        .unwrap_or_default();

    let total_discount = item_discounts + bill_discount;
    let taxable_amount = sub_total - total_discount;
    let tax = taxable_amount.percent(tax_rate.percentage());

    BillTotals {
        sub_total,
        item_discounts,
        bill_discount,
        total_discount,
        taxable_amount,
        tax,
        grand_total: taxable_amount + tax,
    }
}

impl BillTotals {
    /// Rounds the grand total to whole rupees and renders it in words.
    pub fn finalize(&self) -> FinalTotals {
        let rounded = self.grand_total.round_to_whole();
        FinalTotals {
            sub_total: self.sub_total,
            total_discount: self.total_discount,
            tax: self.tax,
            rounding: rounded - self.grand_total,
            grand_total: rounded,
            amount_in_words: amount_to_words(rounded),
        }
    }
}

/// Prices invoice items end to end.
pub fn price_invoice(
    items: &[InvoiceItem],
    bill_discount: Option<&BillDiscount>,
    tax_rate: TaxRate,
) -> FinalTotals {
    let lines: Vec<BillingLine> = items.iter().map(BillingLine::from).collect();
    compute_totals(&lines, bill_discount.map(Discount::from), tax_rate).finalize()
}

impl FinalTotals {
    /// Writes these figures onto `invoice`.
    pub fn apply_to(&self, invoice: &mut Invoice) {
        invoice.sub_total = self.sub_total.to_f64();
        invoice.total_discount = self.total_discount.to_f64();
        invoice.tax = self.tax.to_f64();
        invoice.rounding = self.rounding.to_f64();
        invoice.grand_total = self.grand_total.to_f64();
        invoice.amount_in_words = self.amount_in_words.clone();
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn line(price: f64, quantity: i64, discount: f64, kind: DiscountType) -> BillingLine {
        BillingLine {
            original_price: Money::from_f64(price),
            quantity,
            discount: Discount::from_f64(discount, kind),
        }
    }

    fn rate(pct: f64) -> TaxRate {
        TaxRate::from_percentage(pct)
    }

    #[test]
    fn test_reference_cart() {
        let totals = compute_totals(
            &[line(100.0, 2, 10.0, DiscountType::Fixed)],
            None,
            rate(18.0),
        );

        assert_eq!(totals.sub_total.to_f64(), 200.0);
        assert_eq!(totals.item_discounts.to_f64(), 20.0);
        assert_eq!(totals.total_discount.to_f64(), 20.0);
        assert_eq!(totals.taxable_amount.to_f64(), 180.0);
        assert_eq!(totals.tax.to_f64(), 32.4);
        assert_eq!(totals.grand_total.to_f64(), 212.4);

        let fin = totals.finalize();
        assert_eq!(fin.grand_total.to_f64(), 212.0);
        assert_eq!(fin.rounding.to_f64(), -0.4);
        assert_eq!(fin.amount_in_words, "Two Hundred Twelve Rupees Only");
    }

    #[test]
    fn test_subtotal_ignores_price_override() {
        let item = InvoiceItem {
            product_id: "prod1".into(),
            product_name: "Classic Oxford Shirt".into(),
            quantity: 1,
            price: 1999.0,
            original_price: Some(2499.0),
            discount: 0.0,
            discount_type: DiscountType::Fixed,
        };

        let fin = price_invoice(&[item], None, TaxRate::zero());
        assert_eq!(fin.sub_total.to_f64(), 2499.0);
        assert_eq!(fin.grand_total.to_f64(), 2499.0);
    }

    #[test]
    fn test_percentage_item_discount() {
        let l = line(250.0, 4, 10.0, DiscountType::Percentage);
        assert_eq!(l.gross().to_f64(), 1000.0);
        assert_eq!(l.discount_amount().to_f64(), 100.0);
        assert_eq!(l.net().to_f64(), 900.0);
    }

    #[test]
    fn test_percentage_bill_discount_applies_after_item_discounts() {
        let totals = compute_totals(
            &[line(100.0, 2, 10.0, DiscountType::Fixed)],
            Some(Discount::from_f64(10.0, DiscountType::Percentage)),
            TaxRate::zero(),
        );

        // (200 - 20) * 10%
        assert_eq!(totals.bill_discount.to_f64(), 18.0);
        assert_eq!(totals.total_discount.to_f64(), 38.0);
        assert_eq!(totals.taxable_amount.to_f64(), 162.0);
    }

    #[test]
    fn test_fixed_bill_discount_is_flat() {
        let totals = compute_totals(
            &[line(100.0, 3, 0.0, DiscountType::Fixed)],
            Some(Discount::from_f64(50.0, DiscountType::Fixed)),
            TaxRate::zero(),
        );
        assert_eq!(totals.bill_discount.to_f64(), 50.0);
        assert_eq!(totals.grand_total.to_f64(), 250.0);
    }

    #[test]
    fn test_rounding_up() {
        // 99 * 1.05 = 103.95
        let fin = compute_totals(&[line(99.0, 1, 0.0, DiscountType::Fixed)], None, rate(5.0))
            .finalize();
        assert_eq!(fin.grand_total.to_f64(), 104.0);
        assert_eq!(fin.rounding.to_f64(), 0.05);
    }

    #[test]
    fn test_empty_cart() {
        let fin = compute_totals(&[], None, rate(18.0)).finalize();
        assert!(fin.grand_total.is_zero());
        assert_eq!(fin.amount_in_words, "Zero");
    }

    #[test]
    fn test_oversized_prices_saturate_without_panicking() {
        let item = InvoiceItem {
            product_id: "prod1".into(),
            product_name: "Classic Oxford Shirt".into(),
            quantity: 999,
            price: 5e27,
            original_price: Some(5e27),
            discount: 0.0,
            discount_type: DiscountType::Fixed,
        };

        let fin = price_invoice(&[item], None, rate(18.0));
        assert_eq!(fin.sub_total.decimal(), Decimal::MAX);
        assert_ne!(fin.amount_in_words, "Zero");
    }

    #[test]
    fn test_apply_to_invoice() {
        let mut invoice = Invoice::default();
        compute_totals(&[line(100.0, 2, 10.0, DiscountType::Fixed)], None, rate(18.0))
            .finalize()
            .apply_to(&mut invoice);

        assert_eq!(invoice.sub_total, 200.0);
        assert_eq!(invoice.total_discount, 20.0);
        assert_eq!(invoice.tax, 32.4);
        assert_eq!(invoice.rounding, -0.4);
        assert_eq!(invoice.grand_total, 212.0);
    }
}
