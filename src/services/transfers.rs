//! Inter-store transfer workflow.
//!
//! Transfers are created in `Pending` and resolved by a single status
//! mutation: `Completed` performs the two-sided stock move, `Rejected` leaves
//! stock untouched. Both resolutions are terminal. `Approved` exists in the
//! status vocabulary but nothing transitions into it.

use std::sync::Arc;

use chrono::Utc;
use serde::Deserialize;
use tracing::{instrument, warn};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::auth::StoreScope;
use crate::dataset::SharedDataset;
use crate::errors::ServiceError;
use crate::events::{Event, EventSender};
use crate::models::{
    Movement, MovementType, PermissionSet, Session, Transfer, TransferStatus,
};
use crate::persistence::SnapshotStore;

/// Request to move stock between two stores.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateTransferCommand {
    #[validate(length(min = 1, message = "Source store cannot be empty"))]
    pub from_store_id: String,

    #[validate(length(min = 1, message = "Destination store must be selected"))]
    pub to_store_id: String,

    #[validate(length(min = 1, message = "Product cannot be empty"))]
    pub product_id: String,

    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    pub quantity: i32,
}

#[derive(Clone)]
pub struct TransferService {
    data: SharedDataset,
    store: Arc<dyn SnapshotStore>,
    event_sender: EventSender,
}

impl TransferService {
    pub fn new(data: SharedDataset, store: Arc<dyn SnapshotStore>, event_sender: EventSender) -> Self {
        Self {
            data,
            store,
            event_sender,
        }
    }

    /// Create a pending transfer.
    ///
    /// The quantity check runs against the live source stock at creation time
    /// only; it is deliberately not re-validated at completion, so creation
    /// stays non-blocking for the approver.
    #[instrument(skip(self, actor))]
    pub async fn create(
        &self,
        command: CreateTransferCommand,
        actor: &Session,
    ) -> Result<Transfer, ServiceError> {
        let permissions = PermissionSet::for_role(Some(actor.role));
        if !permissions.can_transfer {
            return Err(ServiceError::Forbidden(
                "role cannot create transfers".to_string(),
            ));
        }
        command.validate()?;

        if command.from_store_id == command.to_store_id {
            return Err(ServiceError::ValidationError(
                "Source and destination store must differ".to_string(),
            ));
        }

        let mut data = self.data.write().await;

        let source_quantity = data
            .items
            .iter()
            .find(|i| i.product_id == command.product_id && i.store_id == command.from_store_id)
            .map(|i| i.quantity)
            .ok_or_else(|| {
                ServiceError::NotFound(format!(
                    "no stock record for product {} at store {}",
                    command.product_id, command.from_store_id
                ))
            })?;

        if command.quantity > source_quantity {
            return Err(ServiceError::InsufficientStock(format!(
                "requested {} but only {} available at {}",
                command.quantity, source_quantity, command.from_store_id
            )));
        }

        let transfer = Transfer {
            id: Uuid::new_v4(),
            from_store_id: command.from_store_id,
            to_store_id: command.to_store_id,
            product_id: command.product_id,
            quantity: command.quantity,
            status: TransferStatus::Pending,
            created_at: Utc::now(),
            created_by: actor.role.actor_label().to_string(),
            completed_at: None,
        };

        data.transfers.push(transfer.clone());
        self.store.save_transfers(&data.transfers).await?;

        self.event_sender
            .send(Event::TransferCreated {
                transfer_id: transfer.id,
                from_store_id: transfer.from_store_id.clone(),
                to_store_id: transfer.to_store_id.clone(),
                product_id: transfer.product_id.clone(),
                quantity: transfer.quantity,
            })
            .await
            .map_err(ServiceError::EventError)?;

        Ok(transfer)
    }

    /// Resolve a pending transfer.
    ///
    /// `Completed` applies the stored snapshot quantity to both stock records
    /// inside one write-lock critical section: the source decrements (clamped
    /// at zero if intervening movements drained it), the destination
    /// increments, and matching transfer-out/transfer-in movements are
    /// recorded. `Rejected` changes only the status. Any other target status
    /// is rejected, as is resolving an already-terminal transfer.
    #[instrument(skip(self, actor))]
    pub async fn set_status(
        &self,
        transfer_id: Uuid,
        new_status: TransferStatus,
        actor: &Session,
    ) -> Result<Transfer, ServiceError> {
        let permissions = PermissionSet::for_role(Some(actor.role));
        if !permissions.can_approve_transfer {
            return Err(ServiceError::Forbidden(
                "role cannot approve or reject transfers".to_string(),
            ));
        }

        if !matches!(
            new_status,
            TransferStatus::Completed | TransferStatus::Rejected
        ) {
            return Err(ServiceError::InvalidStatus(format!(
                "transfers cannot be moved to {}",
                new_status
            )));
        }

        let mut data = self.data.write().await;

        let transfer = data
            .transfers
            .iter()
            .find(|t| t.id == transfer_id)
            .cloned()
            .ok_or_else(|| ServiceError::NotFound(format!("transfer {} not found", transfer_id)))?;

        if transfer.status != TransferStatus::Pending {
            return Err(ServiceError::InvalidStatus(format!(
                "transfer {} is already {}",
                transfer_id, transfer.status
            )));
        }

        let mut completed_at = None;
        if new_status == TransferStatus::Completed {
            let now = Utc::now();
            completed_at = Some(now);
            let performed_by = actor.role.actor_label().to_string();

            let mut recorded = Vec::with_capacity(2);
            for (store_id, movement_type, delta) in [
                (
                    transfer.from_store_id.as_str(),
                    MovementType::TransferOut,
                    -transfer.quantity,
                ),
                (
                    transfer.to_store_id.as_str(),
                    MovementType::TransferIn,
                    transfer.quantity,
                ),
            ] {
                match data
                    .items
                    .iter_mut()
                    .find(|i| i.product_id == transfer.product_id && i.store_id == store_id)
                {
                    Some(item) => {
                        item.quantity = (item.quantity + delta).max(0);
                        item.last_updated = now;
                        recorded.push(Movement {
                            id: Uuid::new_v4(),
                            inventory_item_id: item.id,
                            product_id: item.product_id.clone(),
                            store_id: item.store_id.clone(),
                            movement_type,
                            quantity_delta: delta,
                            reason: format!(
                                "Transfer {} -> {}",
                                transfer.from_store_id, transfer.to_store_id
                            ),
                            performed_by: performed_by.clone(),
                            timestamp: now,
                        });
                    }
                    None => {
                        // Mirrors the ledger's missing-item policy: the side
                        // without a stock record is skipped rather than failed.
                        warn!(
                            product_id = %transfer.product_id,
                            %store_id,
                            "transfer side has no stock record; skipping"
                        );
                    }
                }
            }
            data.movements.extend(recorded);
        }

        let updated = {
            let slot = data
                .transfers
                .iter_mut()
                .find(|t| t.id == transfer_id)
                .ok_or_else(|| {
                    ServiceError::InternalError("transfer vanished mid-update".to_string())
                })?;
            slot.status = new_status;
            if completed_at.is_some() {
                slot.completed_at = completed_at;
            }
            slot.clone()
        };

        if new_status == TransferStatus::Completed {
            self.store.save_items(&data.items).await?;
            self.store.save_movements(&data.movements).await?;
        }
        self.store.save_transfers(&data.transfers).await?;

        self.event_sender
            .send(Event::TransferStatusChanged {
                transfer_id,
                new_status,
            })
            .await
            .map_err(ServiceError::EventError)?;

        Ok(updated)
    }

    /// Transfers visible to a session: everything for roles that can view all
    /// stores, otherwise only transfers touching the effective store.
    #[instrument(skip(self))]
    pub async fn list_for(&self, scope: &StoreScope, permissions: &PermissionSet) -> Vec<Transfer> {
        let data = self.data.read().await;
        if permissions.can_view_all_stores {
            return data.transfers.clone();
        }
        match &scope.store_id {
            Some(store_id) => data
                .transfers
                .iter()
                .filter(|t| &t.from_store_id == store_id || &t.to_store_id == store_id)
                .cloned()
                .collect(),
            None => Vec::new(),
        }
    }
}
