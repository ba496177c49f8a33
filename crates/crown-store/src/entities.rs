//! # Domain Entities
//!
//! Binds each Crown POS record type to the generic [`EntityStore`].
//!
//! ```text
//! ┌───────────────┬────────────────┬──────────────┬──────────────────────┐
//! │ Type          │ entity         │ index        │ seed                 │
//! ├───────────────┼────────────────┼──────────────┼──────────────────────┤
//! │ Category      │ category       │ categories   │ 4 categories         │
//! │ Product       │ product        │ products     │ 10 menswear products │
//! │ Invoice       │ invoice        │ invoices     │ -                    │
//! │ StaffMember   │ staff          │ staff        │ -                    │
//! │ StoreSettings │ storesettings  │ -            │ default settings     │
//! └───────────────┴────────────────┴──────────────┴──────────────────────┘
//! ```

use std::sync::Arc;

use crown_core::{
    Category, Invoice, InvoiceStatus, MessagingStatus, Product, StaffMember, StoreSettings,
    SETTINGS_ID,
};

use crate::backend::KvBackend;
use crate::entity::{EntityConfig, EntityStore, Record};
use crate::error::StoreResult;

// =============================================================================
// Record Implementations
// =============================================================================

macro_rules! impl_record {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Record for $ty {
                fn id(&self) -> &str {
                    &self.id
                }

                fn set_id(&mut self, id: String) {
                    self.id = id;
                }
            }
        )+
    };
}

impl_record!(Category, Product, Invoice, StaffMember, StoreSettings);

// =============================================================================
// Entity Configurations
// =============================================================================

pub fn category_config() -> EntityConfig<Category> {
    EntityConfig {
        entity: "category",
        index: Some("categories"),
        initial_state: Category::default(),
        seed: seed_categories(),
    }
}

pub fn product_config() -> EntityConfig<Product> {
    EntityConfig {
        entity: "product",
        index: Some("products"),
        initial_state: Product::default(),
        seed: seed_products(),
    }
}

pub fn invoice_config() -> EntityConfig<Invoice> {
    EntityConfig {
        entity: "invoice",
        index: Some("invoices"),
        initial_state: Invoice {
            status: InvoiceStatus::Pending,
            messaging_status: Some(MessagingStatus::Pending),
            ..Default::default()
        },
        seed: Vec::new(),
    }
}

pub fn staff_config() -> EntityConfig<StaffMember> {
    EntityConfig {
        entity: "staff",
        index: Some("staff"),
        initial_state: StaffMember::default(),
        seed: Vec::new(),
    }
}

pub fn settings_config() -> EntityConfig<StoreSettings> {
    EntityConfig {
        entity: "storesettings",
        index: None,
        initial_state: StoreSettings::default(),
        seed: Vec::new(),
    }
}

// =============================================================================
// Seed Data
// =============================================================================

pub fn seed_categories() -> Vec<Category> {
    [
        ("cat1", "Shirts"),
        ("cat2", "Trousers"),
        ("cat3", "Jackets"),
        ("cat4", "Accessories"),
    ]
    .into_iter()
    .map(|(id, name)| Category {
        id: id.to_string(),
        name: name.to_string(),
    })
    .collect()
}

pub fn seed_products() -> Vec<Product> {
    // (id, name, sku, price, size, color, quantity, category)
    let rows: [(&str, &str, &str, f64, Option<&str>, Option<&str>, i64, &str); 10] = [
        (
            "prod1",
            "Classic Oxford Shirt",
            "CROWN-SH-001",
            2499.0,
            Some("M"),
            Some("White"),
            50,
            "cat1",
        ),
        (
            "prod2",
            "Linen Casual Shirt",
            "CROWN-SH-002",
            2999.0,
            Some("L"),
            Some("Blue"),
            30,
            "cat1",
        ),
        ("prod3", "Slim Fit Chinos", "CROWN-TR-001", 3499.0, Some("32"), Some("Khaki"), 40, "cat2"),
        (
            "prod4",
            "Wool Blend Trousers",
            "CROWN-TR-002",
            4999.0,
            Some("34"),
            Some("Grey"),
            25,
            "cat2",
        ),
        ("prod5", "Denim Jacket", "CROWN-JK-001", 5999.0, Some("M"), Some("Indigo"), 15, "cat3"),
        ("prod6", "Leather Belt", "CROWN-AC-001", 1999.0, None, None, 60, "cat4"),
        ("prod7", "Silk Tie", "CROWN-AC-002", 1499.0, None, Some("Navy"), 75, "cat4"),
        (
            "prod8",
            "Checkered Flannel Shirt",
            "CROWN-SH-003",
            3199.0,
            Some("XL"),
            Some("Red/Black"),
            22,
            "cat1",
        ),
        ("prod9", "Cargo Trousers", "CROWN-TR-003", 3899.0, Some("32"), Some("Olive"), 18, "cat2"),
        ("prod10", "Bomber Jacket", "CROWN-JK-002", 6499.0, Some("L"), Some("Black"), 12, "cat3"),
    ];

    rows.into_iter()
        .map(|(id, name, sku, price, size, color, quantity, category_id)| Product {
            id: id.to_string(),
            name: name.to_string(),
            sku: sku.to_string(),
            price,
            size: size.map(str::to_string),
            color: color.map(str::to_string),
            quantity,
            stock_location: None,
            category_id: category_id.to_string(),
        })
        .collect()
}

// =============================================================================
// Stores
// =============================================================================

/// One entity store per record type over a shared backend.
#[derive(Debug, Clone)]
pub struct Stores {
    pub categories: EntityStore<Category>,
    pub products: EntityStore<Product>,
    pub invoices: EntityStore<Invoice>,
    pub staff: EntityStore<StaffMember>,
    pub settings: EntityStore<StoreSettings>,
    backend: Arc<dyn KvBackend>,
}

impl Stores {
    pub fn new(backend: Arc<dyn KvBackend>) -> Self {
        Stores {
            categories: EntityStore::new(Arc::clone(&backend), category_config()),
            products: EntityStore::new(Arc::clone(&backend), product_config()),
            invoices: EntityStore::new(Arc::clone(&backend), invoice_config()),
            staff: EntityStore::new(Arc::clone(&backend), staff_config()),
            settings: EntityStore::new(Arc::clone(&backend), settings_config()),
            backend,
        }
    }

    /// Seeds categories and products into empty indexes.
    pub async fn ensure_seed(&self) -> StoreResult<()> {
        self.categories.ensure_seed().await?;
        self.products.ensure_seed().await?;
        Ok(())
    }

    /// Current store settings, defaults included.
    pub async fn store_settings(&self) -> StoreResult<StoreSettings> {
        self.settings.get(SETTINGS_ID).await
    }

    pub fn backend(&self) -> &Arc<dyn KvBackend> {
        &self.backend
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryBackend;

    fn stores() -> Stores {
        Stores::new(Arc::new(MemoryBackend::new()))
    }

    #[tokio::test]
    async fn test_seed_populates_catalogue_once() {
        let stores = stores();
        stores.ensure_seed().await.unwrap();
        stores.ensure_seed().await.unwrap();

        let categories = stores.categories.list().await.unwrap().items;
        assert_eq!(categories.len(), 4);
        assert_eq!(categories[0].name, "Shirts");

        let products = stores.products.list().await.unwrap().items;
        assert_eq!(products.len(), 10);
        assert_eq!(products[6].name, "Silk Tie");
        assert_eq!(products[6].quantity, 75);
        assert_eq!(products[5].size, None);

        assert!(stores.invoices.list().await.unwrap().items.is_empty());
    }

    #[tokio::test]
    async fn test_settings_default_then_saved() {
        let stores = stores();

        let settings = stores.store_settings().await.unwrap();
        assert_eq!(settings, StoreSettings::default());

        stores
            .settings
            .put(&StoreSettings {
                tax_rate: 12.0,
                ..settings
            })
            .await
            .unwrap();
        assert_eq!(stores.store_settings().await.unwrap().tax_rate, 12.0);
    }

    #[tokio::test]
    async fn test_invoice_initial_state() {
        let stores = stores();
        let invoice = stores.invoices.get("unknown").await.unwrap();
        assert_eq!(invoice.id, "unknown");
        assert_eq!(invoice.messaging_status, Some(MessagingStatus::Pending));
    }
}
