//! Inventory ledger: scoped reads, stock updates, and alert aggregation.

use std::sync::Arc;

use chrono::Utc;
use serde::Deserialize;
use tracing::instrument;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::auth::StoreScope;
use crate::dataset::SharedDataset;
use crate::errors::ServiceError;
use crate::events::{Event, EventSender};
use crate::models::{
    InventoryItem, Movement, MovementType, PermissionSet, Session, StockAlerts, StockUpdateOutcome,
};
use crate::persistence::SnapshotStore;

/// Requested stock change for one inventory item.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateStockCommand {
    pub item_id: Uuid,

    /// Signed delta. Positive deltas are recorded as purchases, negative as
    /// sales; zero is rejected.
    #[validate(custom = "validate_nonzero_delta")]
    pub quantity_delta: i32,

    #[validate(length(min = 1, message = "Reason cannot be empty"))]
    pub reason: String,
}

fn validate_nonzero_delta(delta: i32) -> Result<(), ValidationError> {
    if delta == 0 {
        return Err(ValidationError::new("quantity_delta_zero"));
    }
    Ok(())
}

/// Service for the per-store stock records and their derived views.
#[derive(Clone)]
pub struct InventoryService {
    data: SharedDataset,
    store: Arc<dyn SnapshotStore>,
    event_sender: EventSender,
}

impl InventoryService {
    pub fn new(data: SharedDataset, store: Arc<dyn SnapshotStore>, event_sender: EventSender) -> Self {
        Self {
            data,
            store,
            event_sender,
        }
    }

    /// All items visible in the given scope.
    #[instrument(skip(self))]
    pub async fn list(&self, scope: &StoreScope) -> Vec<InventoryItem> {
        let data = self.data.read().await;
        data.items
            .iter()
            .filter(|item| scope.includes(&item.store_id))
            .cloned()
            .collect()
    }

    /// Point lookup for one (product, store) pair.
    pub async fn get_item(&self, product_id: &str, store_id: &str) -> Option<InventoryItem> {
        let data = self.data.read().await;
        data.items
            .iter()
            .find(|i| i.product_id == product_id && i.store_id == store_id)
            .cloned()
    }

    /// Apply a signed stock delta and record the movement.
    ///
    /// Quantities clamp at zero instead of going negative, and an unknown
    /// item id is a no-op rather than a failure; both cases are reported
    /// through the returned outcome so callers can tell them apart. The
    /// movement records the requested delta even when the clamp truncated
    /// the applied change.
    #[instrument(skip(self, actor), fields(item_id = %command.item_id))]
    pub async fn update_stock(
        &self,
        command: UpdateStockCommand,
        actor: &Session,
    ) -> Result<StockUpdateOutcome, ServiceError> {
        let permissions = PermissionSet::for_role(Some(actor.role));
        if !permissions.can_edit {
            return Err(ServiceError::Forbidden(
                "role cannot edit inventory".to_string(),
            ));
        }
        command.validate()?;

        {
            let mut data = self.data.write().await;
            let Some(item) = data.items.iter_mut().find(|i| i.id == command.item_id) else {
                return Ok(StockUpdateOutcome::ItemNotFound);
            };

            let requested = item.quantity + command.quantity_delta;
            let outcome = if requested < 0 {
                StockUpdateOutcome::ClampedToZero
            } else {
                StockUpdateOutcome::Applied
            };
            item.quantity = requested.max(0);
            item.last_updated = Utc::now();

            let movement_type = if command.quantity_delta > 0 {
                MovementType::Purchase
            } else {
                MovementType::Sale
            };
            let movement = Movement {
                id: Uuid::new_v4(),
                inventory_item_id: item.id,
                product_id: item.product_id.clone(),
                store_id: item.store_id.clone(),
                movement_type,
                quantity_delta: command.quantity_delta,
                reason: command.reason.clone(),
                performed_by: actor.user.name.clone(),
                timestamp: Utc::now(),
            };

            let event = Event::StockAdjusted {
                item_id: item.id,
                store_id: item.store_id.clone(),
                movement_type,
                quantity_delta: command.quantity_delta,
                new_quantity: item.quantity,
                outcome,
            };

            data.movements.push(movement);
            self.store.save_items(&data.items).await?;
            self.store.save_movements(&data.movements).await?;

            self.event_sender
                .send(event)
                .await
                .map_err(ServiceError::EventError)?;

            Ok(outcome)
        }
    }

    /// Low-stock and out-of-stock counts over the scoped item list.
    ///
    /// Recomputed on every call; there is no cache to fall out of sync with
    /// the item collection.
    #[instrument(skip(self))]
    pub async fn stock_alerts(&self, scope: &StoreScope) -> StockAlerts {
        let data = self.data.read().await;
        let mut low_stock = 0;
        let mut out_of_stock = 0;
        for item in data.items.iter().filter(|i| scope.includes(&i.store_id)) {
            if item.is_out_of_stock() {
                out_of_stock += 1;
            } else if item.is_low_stock() {
                low_stock += 1;
            }
        }
        StockAlerts {
            low_stock,
            out_of_stock,
            total: low_stock + out_of_stock,
        }
    }
}
