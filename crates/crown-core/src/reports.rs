//! # Reports
//!
//! Dashboard aggregations over the product and invoice lists. Every function
//! here is a pure fold over data the caller has already loaded.
//!
//! ```text
//! ┌──────────────────┬────────────────────────────────────────────────────┐
//! │ summary          │ revenue, units sold, low-stock count, customers    │
//! │ sales_over_time  │ Σ grandTotal per calendar month (UTC)              │
//! │ top_selling      │ units and net revenue per product                  │
//! │ low_stock        │ products with 0 < quantity ≤ threshold             │
//! │ dead_stock       │ products not sold inside a trailing window         │
//! └──────────────────┴────────────────────────────────────────────────────┘
//! ```

use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::{DateTime, Datelike};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::billing::BillingLine;
use crate::money::Money;
use crate::types::{Invoice, Product};

const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

const MS_PER_DAY: i64 = 86_400_000;

// =============================================================================
// Wire Types
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    /// Σ grandTotal over all invoices.
    pub total_revenue: f64,
    /// Units sold over all invoices.
    pub total_sales: i64,
    pub low_stock_items: usize,
    /// Distinct customer phone numbers.
    pub new_customers: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SalesOverTime {
    /// Month label, e.g. `"Jan"`.
    pub name: String,
    pub sales: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct TopSellingProduct {
    pub product_id: String,
    pub product_name: String,
    pub units_sold: i64,
    /// Revenue after per-item discounts.
    pub revenue: f64,
}

// =============================================================================
// Aggregations
// =============================================================================

pub fn summary(
    products: &[Product],
    invoices: &[Invoice],
    low_stock_threshold: i64,
) -> ReportSummary {
    let total_revenue: Money = invoices.iter().map(Invoice::grand_total).sum();

    let customers: HashSet<&str> = invoices
        .iter()
        .map(|inv| inv.customer.phone.trim())
        .filter(|phone| !phone.is_empty())
        .collect();

    ReportSummary {
        total_revenue: total_revenue.to_f64(),
        total_sales: invoices.iter().map(Invoice::units).sum(),
        low_stock_items: products
            .iter()
            .filter(|p| p.is_low_stock(low_stock_threshold))
            .count(),
        new_customers: customers.len(),
    }
}

/// Revenue per calendar month, January first.
///
/// Only months with at least one invoice are returned. Invoices from
/// different years share a bucket.
pub fn sales_over_time(invoices: &[Invoice]) -> Vec<SalesOverTime> {
    let mut by_month: BTreeMap<u32, Money> = BTreeMap::new();

    for invoice in invoices {
        let Some(date) = DateTime::from_timestamp_millis(invoice.date) else {
            continue;
        };
        *by_month.entry(date.month0()).or_default() += invoice.grand_total();
    }

    by_month
        .into_iter()
        .map(|(month0, sales)| SalesOverTime {
            name: MONTH_LABELS[month0 as usize].to_string(),
            sales: sales.to_f64(),
        })
        .collect()
}

/// Per-product units and net revenue, best sellers first.
///
/// Ties on units keep the order in which products were first seen.
pub fn top_selling(invoices: &[Invoice], limit: Option<usize>) -> Vec<TopSellingProduct> {
    struct Tally<'a> {
        name: &'a str,
        units: i64,
        revenue: Money,
    }

    let mut order: Vec<&str> = Vec::new();
    let mut tallies: HashMap<&str, Tally> = HashMap::new();

    for item in invoices.iter().flat_map(|inv| inv.items.iter()) {
        let tally = tallies.entry(item.product_id.as_str()).or_insert_with(|| {
            order.push(item.product_id.as_str());
            Tally {
                name: item.product_name.as_str(),
                units: 0,
                revenue: Money::zero(),
            }
        });
        tally.units += item.quantity;
        tally.revenue += BillingLine::from(item).net();
    }

    let mut rows: Vec<TopSellingProduct> = order
        .into_iter()
        .filter_map(|id| {
            tallies.get(id).map(|t| TopSellingProduct {
                product_id: id.to_string(),
                product_name: t.name.to_string(),
                units_sold: t.units,
                revenue: t.revenue.to_f64(),
            })
        })
        .collect();

    rows.sort_by(|a, b| b.units_sold.cmp(&a.units_sold));
    if let Some(limit) = limit {
        rows.truncate(limit);
    }
    rows
}

pub fn low_stock(products: &[Product], threshold: i64) -> Vec<Product> {
    products
        .iter()
        .filter(|p| p.is_low_stock(threshold))
        .cloned()
        .collect()
}

/// Products that appear on no invoice dated within `days` before `now_ms`.
pub fn dead_stock(
    products: &[Product],
    invoices: &[Invoice],
    now_ms: i64,
    days: i64,
) -> Vec<Product> {
    let cutoff = now_ms.saturating_sub(days.saturating_mul(MS_PER_DAY));

    let sold: HashSet<&str> = invoices
        .iter()
        .filter(|inv| inv.date >= cutoff)
        .flat_map(|inv| inv.items.iter().map(|i| i.product_id.as_str()))
        .collect();

    products
        .iter()
        .filter(|p| !sold.contains(p.id.as_str()))
        .cloned()
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Customer, DiscountType, InvoiceItem};

    // 2024-01-15 and 2024-03-10, UTC
    const JAN_15: i64 = 1_705_276_800_000;
    const MAR_10: i64 = 1_710_028_800_000;

    fn product(id: &str, quantity: i64) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Product {id}"),
            quantity,
            ..Default::default()
        }
    }

    fn item(product_id: &str, quantity: i64, price: f64, discount: f64) -> InvoiceItem {
        InvoiceItem {
            product_id: product_id.to_string(),
            product_name: format!("Product {product_id}"),
            quantity,
            price,
            original_price: Some(price),
            discount,
            discount_type: DiscountType::Fixed,
        }
    }

    fn invoice(date: i64, phone: &str, grand_total: f64, items: Vec<InvoiceItem>) -> Invoice {
        Invoice {
            id: format!("inv-{date}-{phone}"),
            date,
            customer: Customer {
                name: "Walk-in".into(),
                phone: phone.into(),
            },
            items,
            grand_total,
            ..Default::default()
        }
    }

    #[test]
    fn test_summary() {
        let products = vec![product("a", 0), product("b", 5), product("c", 10), product("d", 11)];
        let invoices = vec![
            invoice(JAN_15, "111", 100.0, vec![item("a", 2, 50.0, 0.0)]),
            invoice(MAR_10, "111", 250.0, vec![item("b", 1, 250.0, 0.0)]),
            invoice(MAR_10, "", 30.0, vec![item("c", 3, 10.0, 0.0)]),
        ];

        let s = summary(&products, &invoices, 10);
        assert_eq!(s.total_revenue, 380.0);
        assert_eq!(s.total_sales, 6);
        assert_eq!(s.low_stock_items, 2);
        assert_eq!(s.new_customers, 1);
    }

    #[test]
    fn test_sales_over_time_orders_months() {
        let invoices = vec![
            invoice(MAR_10, "1", 300.0, vec![]),
            invoice(JAN_15, "2", 100.0, vec![]),
            invoice(JAN_15, "3", 50.0, vec![]),
        ];

        let rows = sales_over_time(&invoices);
        assert_eq!(
            rows,
            vec![
                SalesOverTime {
                    name: "Jan".into(),
                    sales: 150.0
                },
                SalesOverTime {
                    name: "Mar".into(),
                    sales: 300.0
                },
            ]
        );
    }

    #[test]
    fn test_top_selling_nets_item_discount() {
        let invoices = vec![
            invoice(JAN_15, "1", 0.0, vec![item("a", 1, 100.0, 0.0), item("b", 4, 50.0, 5.0)]),
            invoice(MAR_10, "2", 0.0, vec![item("a", 2, 100.0, 10.0)]),
        ];

        let rows = top_selling(&invoices, None);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].product_id, "b");
        assert_eq!(rows[0].units_sold, 4);
        assert_eq!(rows[0].revenue, 180.0);
        assert_eq!(rows[1].product_id, "a");
        assert_eq!(rows[1].units_sold, 3);
        assert_eq!(rows[1].revenue, 280.0);

        assert_eq!(top_selling(&invoices, Some(1)).len(), 1);
    }

    #[test]
    fn test_low_stock_threshold() {
        let products = vec![product("a", 0), product("b", 3), product("c", 4)];
        let ids: Vec<String> = low_stock(&products, 3).into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec!["b"]);
    }

    #[test]
    fn test_dead_stock_window() {
        let products = vec![product("a", 5), product("b", 5), product("c", 5)];
        let invoices = vec![
            invoice(MAR_10, "1", 0.0, vec![item("a", 1, 10.0, 0.0)]),
            invoice(JAN_15, "2", 0.0, vec![item("b", 1, 10.0, 0.0)]),
        ];

        // 30 days after Mar 10: only "a" sold inside the window
        let now = MAR_10 + 30 * MS_PER_DAY;
        let ids: Vec<String> = dead_stock(&products, &invoices, now, 30)
            .into_iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec!["b", "c"]);

        let ids: Vec<String> = dead_stock(&products, &invoices, now, 90)
            .into_iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec!["c"]);
    }
}
