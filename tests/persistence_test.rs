//! Write-through mirror: every mutation is durable before the call returns,
//! and a fresh boot from the same data directory reproduces the state.

mod common;

use std::sync::Arc;

use common::{dataset_with_items, services_with_store, session};
use storefront_api::handlers::AppServices;
use storefront_api::dataset::SharedDataset;
use storefront_api::events::EventSender;
use storefront_api::models::{Role, TransferStatus};
use storefront_api::persistence::{load_or_seed, JsonSnapshotStore, SnapshotStore};
use storefront_api::services::inventory::UpdateStockCommand;
use storefront_api::services::transfers::CreateTransferCommand;
use tempfile::TempDir;

async fn reboot(dir: &TempDir) -> (AppServices, SharedDataset) {
    let store: Arc<dyn SnapshotStore> = Arc::new(JsonSnapshotStore::new(dir.path()));
    let data = load_or_seed(store.as_ref()).await.unwrap().shared();
    let services = AppServices::new(data.clone(), store, EventSender::discard());
    (services, data)
}

#[tokio::test]
async fn ledger_mutations_survive_restart() {
    let dir = TempDir::new().unwrap();
    let store: Arc<dyn SnapshotStore> = Arc::new(JsonSnapshotStore::new(dir.path()));
    let (services, data) =
        services_with_store(dataset_with_items(&[("s1", 10, 5), ("s2", 2, 5)]), store);
    let owner = session(Role::Owner, None, None);

    let item_id = data.read().await.items[0].id;
    services
        .inventory
        .update_stock(
            UpdateStockCommand {
                item_id,
                quantity_delta: -4,
                reason: "Sold".into(),
            },
            &owner,
        )
        .await
        .unwrap();

    let created = services
        .transfers
        .create(
            CreateTransferCommand {
                from_store_id: "s1".into(),
                to_store_id: "s2".into(),
                product_id: "p1".into(),
                quantity: 3,
            },
            &owner,
        )
        .await
        .unwrap();
    services
        .transfers
        .set_status(created.id, TransferStatus::Completed, &owner)
        .await
        .unwrap();

    let expected = data.read().await.clone();

    // Fresh process: load from the same directory.
    let (_, reloaded) = reboot(&dir).await;
    let guard = reloaded.read().await;
    assert_eq!(guard.items, expected.items);
    assert_eq!(guard.movements, expected.movements);
    assert_eq!(guard.transfers, expected.transfers);
    assert_eq!(guard.transfers[0].status, TransferStatus::Completed);
}

#[tokio::test]
async fn session_survives_restart_and_logout_is_durable() {
    let dir = TempDir::new().unwrap();

    {
        let (services, _) = reboot(&dir).await;
        services.sessions.login("manager", "manager123").await.unwrap();
    }

    let (services, _) = reboot(&dir).await;
    let restored = services.sessions.current().await.expect("session restored");
    assert_eq!(restored.role, Role::StoreManager);
    assert_eq!(restored.managed_store_id.as_deref(), Some("store-eastside"));

    services.sessions.logout().await.unwrap();

    let (services, _) = reboot(&dir).await;
    assert!(services.sessions.current().await.is_none());
}

#[tokio::test]
async fn first_boot_seeds_and_persists_nothing_until_a_mutation() {
    let dir = TempDir::new().unwrap();
    let (services, _) = reboot(&dir).await;

    // No mutation yet: the directory holds no inventory snapshot.
    assert!(!dir.path().join("inventory.json").exists());

    services.sessions.login("owner", "owner123").await.unwrap();
    assert!(dir.path().join("session.json").exists());
}
