//! The top-level in-memory collections and their demo seed.
//!
//! All mutable state lives in one [`Dataset`] behind a single
//! `tokio::sync::RwLock`. Every mutation funnels through the services; nothing
//! writes these fields directly. The lock also gives the transfer completion
//! its atomicity: both sides of the stock move happen inside one write-lock
//! critical section.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::{InventoryItem, Movement, Product, Session, Store, Transfer};

pub type SharedDataset = Arc<RwLock<Dataset>>;

/// Top-level collections. Stores and products are read-only catalog data;
/// items, movements, transfers and the session are mutated through services
/// and mirrored to disk after every change.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub session: Option<Session>,
    pub items: Vec<InventoryItem>,
    pub movements: Vec<Movement>,
    pub transfers: Vec<Transfer>,
    pub stores: Vec<Store>,
    pub products: Vec<Product>,
}

impl Dataset {
    pub fn shared(self) -> SharedDataset {
        Arc::new(RwLock::new(self))
    }

    /// Demo catalog and opening stock used on first boot (and by tests).
    pub fn seed() -> Self {
        let stores = seed_stores();
        let products = seed_products();

        let mut items = Vec::with_capacity(stores.len() * products.len());
        let now = Utc::now();

        // One inventory item per (product, store) pair. Quantities are spread
        // so the demo data exercises out-of-stock, low-stock and healthy rows.
        let opening_quantities = [24, 5, 0, 12, 3, 40, 8, 16];
        for store in &stores {
            for (idx, product) in products.iter().enumerate() {
                let base = opening_quantities[idx % opening_quantities.len()];
                let quantity = if store.is_flagship { base * 2 } else { base };
                items.push(InventoryItem {
                    id: Uuid::new_v4(),
                    product_id: product.id.clone(),
                    store_id: store.id.clone(),
                    quantity,
                    low_stock_threshold: 5,
                    last_updated: now,
                });
            }
        }

        Self {
            session: None,
            items,
            movements: Vec::new(),
            transfers: Vec::new(),
            stores,
            products,
        }
    }
}

fn seed_stores() -> Vec<Store> {
    vec![
        Store {
            id: "store-downtown".into(),
            name: "Downtown Flagship".into(),
            is_flagship: true,
        },
        Store {
            id: "store-eastside".into(),
            name: "Eastside Mall".into(),
            is_flagship: false,
        },
        Store {
            id: "store-harbor".into(),
            name: "Harbor Outlet".into(),
            is_flagship: false,
        },
    ]
}

fn seed_products() -> Vec<Product> {
    vec![
        Product {
            id: "prod-aurora-27".into(),
            name: "Aurora 27\" Monitor".into(),
            brand: "Aurora".into(),
            category: "Displays".into(),
            price: 329.99,
        },
        Product {
            id: "prod-keystone-tkl".into(),
            name: "Keystone TKL Keyboard".into(),
            brand: "Keystone".into(),
            category: "Peripherals".into(),
            price: 89.50,
        },
        Product {
            id: "prod-vertex-mouse".into(),
            name: "Vertex Wireless Mouse".into(),
            brand: "Vertex".into(),
            category: "Peripherals".into(),
            price: 49.00,
        },
        Product {
            id: "prod-nimbus-dock".into(),
            name: "Nimbus USB-C Dock".into(),
            brand: "Nimbus".into(),
            category: "Accessories".into(),
            price: 139.00,
        },
        Product {
            id: "prod-halo-cam".into(),
            name: "Halo 4K Webcam".into(),
            brand: "Halo".into(),
            category: "Peripherals".into(),
            price: 119.95,
        },
        Product {
            id: "prod-strata-ssd-1tb".into(),
            name: "Strata 1TB NVMe SSD".into(),
            brand: "Strata".into(),
            category: "Storage".into(),
            price: 99.99,
        },
        Product {
            id: "prod-pulse-headset".into(),
            name: "Pulse Gaming Headset".into(),
            brand: "Pulse".into(),
            category: "Audio".into(),
            price: 74.25,
        },
        Product {
            id: "prod-ridge-stand".into(),
            name: "Ridge Laptop Stand".into(),
            brand: "Ridge".into(),
            category: "Accessories".into(),
            price: 38.00,
        },
    ]
}
