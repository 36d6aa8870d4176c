//! Shared helpers for integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use storefront_api::dataset::{Dataset, SharedDataset};
use storefront_api::events::EventSender;
use storefront_api::handlers::AppServices;
use storefront_api::models::{InventoryItem, Role, Session, User};
use storefront_api::persistence::{InMemorySnapshotStore, SnapshotStore};

use chrono::Utc;
use uuid::Uuid;

/// Services over a fresh seed dataset with an in-memory mirror.
pub fn seeded_services() -> (AppServices, SharedDataset) {
    services_with(Dataset::seed())
}

pub fn services_with(data: Dataset) -> (AppServices, SharedDataset) {
    services_with_store(data, Arc::new(InMemorySnapshotStore::new()))
}

pub fn services_with_store(
    data: Dataset,
    store: Arc<dyn SnapshotStore>,
) -> (AppServices, SharedDataset) {
    let shared = data.shared();
    let services = AppServices::new(shared.clone(), store, EventSender::discard());
    (services, shared)
}

/// A bare session for driving services directly, without going through login.
pub fn session(role: Role, managed: Option<&str>, selected: Option<&str>) -> Session {
    Session {
        role,
        user: User {
            name: "Test User".into(),
            username: "test".into(),
        },
        managed_store_id: managed.map(String::from),
        selected_store_id: selected.map(String::from),
    }
}

/// Minimal dataset: one item per (store, quantity) pair for product `p1`.
pub fn dataset_with_items(rows: &[(&str, i32, i32)]) -> Dataset {
    let mut data = Dataset::default();
    for (store_id, quantity, threshold) in rows {
        data.items.push(InventoryItem {
            id: Uuid::new_v4(),
            product_id: "p1".into(),
            store_id: (*store_id).into(),
            quantity: *quantity,
            low_stock_threshold: *threshold,
            last_updated: Utc::now(),
        });
    }
    data
}

pub async fn item_quantity(data: &SharedDataset, store_id: &str) -> i32 {
    data.read()
        .await
        .items
        .iter()
        .find(|i| i.store_id == store_id && i.product_id == "p1")
        .map(|i| i.quantity)
        .expect("item should exist")
}
