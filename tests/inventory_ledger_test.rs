//! Ledger behavior: clamping, movement recording, alerts, scope correctness.

mod common;

use common::{dataset_with_items, seeded_services, services_with, session};
use storefront_api::auth::StoreScope;
use storefront_api::models::{MovementType, Role, StockUpdateOutcome};
use storefront_api::services::inventory::UpdateStockCommand;
use uuid::Uuid;

fn update(item_id: Uuid, delta: i32, reason: &str) -> UpdateStockCommand {
    UpdateStockCommand {
        item_id,
        quantity_delta: delta,
        reason: reason.into(),
    }
}

#[tokio::test]
async fn sale_reduces_quantity_and_records_movement() {
    // Scenario A: quantity 5, threshold 5, sell 2.
    let (services, data) = services_with(dataset_with_items(&[("s1", 5, 5)]));
    let actor = session(Role::Owner, None, None);
    let item_id = data.read().await.items[0].id;

    let outcome = services
        .inventory
        .update_stock(update(item_id, -2, "Sold"), &actor)
        .await
        .unwrap();

    assert_eq!(outcome, StockUpdateOutcome::Applied);
    let guard = data.read().await;
    assert_eq!(guard.items[0].quantity, 3);
    assert_eq!(guard.movements.len(), 1);
    let movement = &guard.movements[0];
    assert_eq!(movement.movement_type, MovementType::Sale);
    assert_eq!(movement.quantity_delta, -2);
    assert_eq!(movement.performed_by, "Test User");
}

#[tokio::test]
async fn oversell_clamps_to_zero_but_records_requested_delta() {
    // Scenario B: quantity 0, sell 3.
    let (services, data) = services_with(dataset_with_items(&[("s1", 0, 5)]));
    let actor = session(Role::Owner, None, None);
    let item_id = data.read().await.items[0].id;

    let outcome = services
        .inventory
        .update_stock(update(item_id, -3, "Shrinkage"), &actor)
        .await
        .unwrap();

    assert_eq!(outcome, StockUpdateOutcome::ClampedToZero);
    let guard = data.read().await;
    assert_eq!(guard.items[0].quantity, 0);
    assert_eq!(guard.movements[0].quantity_delta, -3);
}

#[tokio::test]
async fn quantity_never_goes_negative_across_a_sequence() {
    let (services, data) = services_with(dataset_with_items(&[("s1", 4, 5)]));
    let actor = session(Role::StoreManager, Some("s1"), None);
    let item_id = data.read().await.items[0].id;

    for delta in [-3, -3, 2, -10, 1, -1, -1] {
        services
            .inventory
            .update_stock(update(item_id, delta, "cycle"), &actor)
            .await
            .unwrap();
        assert!(data.read().await.items[0].quantity >= 0);
    }
}

#[tokio::test]
async fn movement_log_is_append_only() {
    let (services, data) = services_with(dataset_with_items(&[("s1", 10, 5)]));
    let actor = session(Role::Owner, None, None);
    let item_id = data.read().await.items[0].id;

    let mut last_len = 0;
    let mut first_movement = None;
    for delta in [-1, 2, -3] {
        services
            .inventory
            .update_stock(update(item_id, delta, "op"), &actor)
            .await
            .unwrap();
        let guard = data.read().await;
        assert!(guard.movements.len() > last_len, "log must grow");
        last_len = guard.movements.len();
        match &first_movement {
            None => first_movement = Some(guard.movements[0].clone()),
            Some(first) => assert_eq!(first, &guard.movements[0], "existing entries never change"),
        }
    }
}

#[tokio::test]
async fn positive_delta_is_a_purchase() {
    let (services, data) = services_with(dataset_with_items(&[("s1", 1, 5)]));
    let actor = session(Role::Owner, None, None);
    let item_id = data.read().await.items[0].id;

    services
        .inventory
        .update_stock(update(item_id, 6, "Restock"), &actor)
        .await
        .unwrap();

    let guard = data.read().await;
    assert_eq!(guard.items[0].quantity, 7);
    assert_eq!(guard.movements[0].movement_type, MovementType::Purchase);
}

#[tokio::test]
async fn alerts_match_classification() {
    // Scenario D: [{q:0},{q:2,thr:5},{q:10,thr:5}]
    let (services, _) =
        services_with(dataset_with_items(&[("s1", 0, 5), ("s2", 2, 5), ("s3", 10, 5)]));

    let alerts = services.inventory.stock_alerts(&StoreScope::all()).await;
    assert_eq!(alerts.out_of_stock, 1);
    assert_eq!(alerts.low_stock, 1);
    assert_eq!(alerts.total, 2);
}

#[tokio::test]
async fn manager_scope_ignores_injected_selection() {
    // Scenario E: manager pinned to S1 even with selected_store_id = S2.
    let (services, _) = services_with(dataset_with_items(&[("S1", 5, 5), ("S2", 5, 5)]));
    let manager = session(Role::StoreManager, Some("S1"), Some("S2"));

    let scope = StoreScope::for_session(Some(&manager));
    let items = services.inventory.list(&scope).await;
    assert!(!items.is_empty());
    assert!(items.iter().all(|i| i.store_id == "S1"));

    let alerts = services.inventory.stock_alerts(&scope).await;
    let all = services.inventory.stock_alerts(&StoreScope::all()).await;
    assert!(alerts.total <= all.total);
}

#[tokio::test]
async fn recent_movements_view_is_bounded_and_newest_first() {
    let (services, data) = seeded_services();
    let actor = session(Role::Owner, None, None);
    let item_id = data.read().await.items[0].id;

    for seq in 0..8 {
        services
            .inventory
            .update_stock(update(item_id, -1, &format!("sale {}", seq)), &actor)
            .await
            .unwrap();
    }

    let recent = services
        .movements
        .for_item(item_id, Some(5), Some(Role::Owner))
        .await
        .unwrap();
    assert_eq!(recent.len(), 5);
    assert_eq!(recent[0].reason, "sale 7");
}
