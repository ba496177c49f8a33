//! # Stock Planning
//!
//! Decides how an invoice changes shelf quantities before anything is written.
//!
//! ```text
//! items ──► group by productId (sum qty) ──► compare with current stock
//!                                                  │
//!                          ┌───────────────────────┴──────────────────┐
//!                          ▼                                          ▼
//!                 every product covered                  any product short/unknown
//!                          │                                          │
//!                Vec<StockDeduction>                     Err(InsufficientStock |
//!                (applied by the caller)                     ProductNotFound)
//! ```
//!
//! A plan is all-or-nothing: nothing is deducted unless every line passes.

use std::collections::HashMap;

use crate::error::{CoreError, CoreResult};
use crate::types::{InvoiceItem, Product};

/// Stock change for one product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockDeduction {
    pub product_id: String,
    pub quantity: i64,
    /// Shelf quantity once the deduction is applied.
    pub remaining: i64,
}

/// Plans the stock deduction for `items` against `products`.
///
/// Lines for the same product are summed before checking, so two lines of
/// 3 units each need 6 on the shelf. Deductions come back in the order each
/// product first appears on the invoice.
pub fn plan_stock_deduction(
    items: &[InvoiceItem],
    products: &HashMap<String, Product>,
) -> CoreResult<Vec<StockDeduction>> {
    let mut order: Vec<&str> = Vec::new();
    let mut requested: HashMap<&str, i64> = HashMap::new();

    for item in items {
        let entry = requested.entry(item.product_id.as_str()).or_insert_with(|| {
            order.push(item.product_id.as_str());
            0
        });
        *entry += item.quantity;
    }

    order
        .into_iter()
        .map(|product_id| {
            let quantity = requested[product_id];
            let product = products
                .get(product_id)
                .ok_or_else(|| CoreError::ProductNotFound(product_id.to_string()))?;

            if !product.can_sell(quantity) {
                return Err(CoreError::InsufficientStock {
                    product: product.name.clone(),
                    available: product.quantity,
                    requested: quantity,
                });
            }

            Ok(StockDeduction {
                product_id: product_id.to_string(),
                quantity,
                remaining: product.quantity - quantity,
            })
        })
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, name: &str, quantity: i64) -> Product {
        Product {
            id: id.to_string(),
            name: name.to_string(),
            quantity,
            ..Default::default()
        }
    }

    fn item(product_id: &str, quantity: i64) -> InvoiceItem {
        InvoiceItem {
            product_id: product_id.to_string(),
            quantity,
            ..Default::default()
        }
    }

    fn shelf() -> HashMap<String, Product> {
        [
            product("prod1", "Classic Oxford Shirt", 50),
            product("prod7", "Silk Tie", 5),
        ]
        .into_iter()
        .map(|p| (p.id.clone(), p))
        .collect()
    }

    #[test]
    fn test_plan_within_stock() {
        let plan = plan_stock_deduction(&[item("prod1", 2), item("prod7", 5)], &shelf()).unwrap();
        assert_eq!(
            plan,
            vec![
                StockDeduction {
                    product_id: "prod1".into(),
                    quantity: 2,
                    remaining: 48
                },
                StockDeduction {
                    product_id: "prod7".into(),
                    quantity: 5,
                    remaining: 0
                },
            ]
        );
    }

    #[test]
    fn test_insufficient_stock_names_product() {
        let err =
            plan_stock_deduction(&[item("prod1", 1), item("prod7", 6)], &shelf()).unwrap_err();
        match err {
            CoreError::InsufficientStock {
                product,
                available,
                requested,
            } => {
                assert_eq!(product, "Silk Tie");
                assert_eq!(available, 5);
                assert_eq!(requested, 6);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_lines_are_summed() {
        let err =
            plan_stock_deduction(&[item("prod7", 3), item("prod7", 3)], &shelf()).unwrap_err();
        assert!(matches!(err, CoreError::InsufficientStock { requested: 6, .. }));

        let plan = plan_stock_deduction(&[item("prod7", 2), item("prod7", 3)], &shelf()).unwrap();
        assert_eq!(plan.len(), 1);
        assert_eq!(plan[0].remaining, 0);
    }

    #[test]
    fn test_unknown_product() {
        let err = plan_stock_deduction(&[item("ghost", 1)], &shelf()).unwrap_err();
        assert!(matches!(err, CoreError::ProductNotFound(id) if id == "ghost"));
    }
}
