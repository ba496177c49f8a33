//! # Invoice Service
//!
//! Turns a billing-screen draft into a persisted invoice.
//!
//! ## Create Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  POST /api/invoices (InvoiceDraft)                                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  validate draft ──────────────────────────────────────► 400             │
//! │       │                                                                 │
//! │  ═════╪══════════════ gate (one creation at a time) ═══════════════     │
//! │       ▼                                                                 │
//! │  load products ──► plan_stock_deduction ──────────────► 400 / 404       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  price_invoice (store tax rate) ──► deduct stock ──► number + persist   │
//! │  ═════╪═════════════════════════════════════════════════════════════    │
//! │       ▼                                                                 │
//! │  Invoice { status: paid, messagingStatus: pending }                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The gate serializes creations inside this process only. Two processes
//! sharing one SQLite file can still race on stock and numbering.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crown_core::billing::price_invoice;
use crown_core::stock::plan_stock_deduction;
use crown_core::validation::validate_invoice_draft;
use crown_core::{CoreError, Invoice, InvoiceDraft, InvoiceStatus, MessagingStatus, Product};
use crown_store::Stores;

use super::messaging::InvoiceMessenger;
use crate::error::ApiError;

/// Tolerance when comparing the client's total with ours.
const TOTAL_TOLERANCE: f64 = 0.01;

#[derive(Debug)]
pub struct InvoiceService {
    stores: Stores,
    messenger: Arc<dyn InvoiceMessenger>,
    prefix: String,
    gate: Mutex<()>,
}

impl InvoiceService {
    pub fn new(
        stores: Stores,
        messenger: Arc<dyn InvoiceMessenger>,
        prefix: impl Into<String>,
    ) -> Self {
        InvoiceService {
            stores,
            messenger,
            prefix: prefix.into(),
            gate: Mutex::new(()),
        }
    }

    /// Every invoice, newest first.
    pub async fn list(&self) -> Result<Vec<Invoice>, ApiError> {
        let mut invoices = self.stores.invoices.list().await?.items;
        invoices.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(invoices)
    }

    pub async fn get(&self, id: &str) -> Result<Invoice, ApiError> {
        self.stores
            .invoices
            .find(id)
            .await?
            .ok_or_else(|| CoreError::InvoiceNotFound(id.to_string()).into())
    }

    /// Validates `draft`, deducts stock and persists the priced invoice.
    ///
    /// Nothing is written when any line fails the stock check.
    pub async fn create(&self, draft: InvoiceDraft) -> Result<Invoice, ApiError> {
        validate_invoice_draft(&draft)?;

        let _gate = self.gate.lock().await;

        let products = self.load_products(&draft).await?;
        let plan = plan_stock_deduction(&draft.items, &products)?;

        let settings = self.stores.store_settings().await?;
        let totals = price_invoice(&draft.items, draft.bill_discount.as_ref(), settings.tax_rate());

        if let Some(client_total) = draft.grand_total {
            let unrounded = (totals.grand_total - totals.rounding).to_f64();
            if (client_total - unrounded).abs() > TOTAL_TOLERANCE {
                warn!(
                    client = client_total,
                    server = unrounded,
                    "Client grand total differs from server computation"
                );
            }
        }

        for deduction in &plan {
            let quantity = deduction.quantity;
            self.stores
                .products
                .mutate(&deduction.product_id, move |mut product| {
                    product.quantity -= quantity;
                    product
                })
                .await?;
            debug!(
                product_id = %deduction.product_id,
                quantity,
                remaining = deduction.remaining,
                "Stock deducted"
            );
        }

        let sequence = self.stores.invoices.count().await? + 1;
        let mut invoice = Invoice {
            invoice_number: format!("{}-{:04}", self.prefix, sequence),
            date: Utc::now().timestamp_millis(),
            customer: draft.customer.unwrap_or_default(),
            items: draft.items,
            status: InvoiceStatus::Paid,
            messaging_status: Some(MessagingStatus::Pending),
            ..Default::default()
        };
        totals.apply_to(&mut invoice);

        let invoice = self.stores.invoices.create(invoice).await?;
        info!(
            id = %invoice.id,
            number = %invoice.invoice_number,
            grand_total = invoice.grand_total,
            lines = invoice.items.len(),
            "Invoice created"
        );
        Ok(invoice)
    }

    /// Dispatches the invoice to its customer and records the outcome.
    pub async fn send(&self, id: &str) -> Result<Invoice, ApiError> {
        let invoice = self.get(id).await?;
        let status = self.messenger.send(&invoice).await;

        let invoice = self
            .stores
            .invoices
            .mutate(id, move |mut invoice| {
                invoice.messaging_status = Some(status);
                invoice
            })
            .await?;
        Ok(invoice)
    }

    async fn load_products(
        &self,
        draft: &InvoiceDraft,
    ) -> Result<HashMap<String, Product>, ApiError> {
        let mut products = HashMap::new();
        for item in &draft.items {
            if products.contains_key(&item.product_id) {
                continue;
            }
            if let Some(product) = self.stores.products.find(&item.product_id).await? {
                products.insert(item.product_id.clone(), product);
            }
        }
        Ok(products)
    }
}
