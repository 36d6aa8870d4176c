//! Domain events emitted after successful mutations.
//!
//! Events ride a bounded mpsc channel to a background task that logs them;
//! failure to enqueue an event is surfaced as a `ServiceError::EventError` but
//! never rolls back the mutation that produced it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::info;
use uuid::Uuid;

use crate::models::{MovementType, Role, StockUpdateOutcome, TransferStatus};

/// Events produced by the ledger and transfer workflow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    SessionOpened {
        username: String,
        role: Role,
        timestamp: DateTime<Utc>,
    },
    SessionClosed {
        timestamp: DateTime<Utc>,
    },
    StockAdjusted {
        item_id: Uuid,
        store_id: String,
        movement_type: MovementType,
        quantity_delta: i32,
        new_quantity: i32,
        outcome: StockUpdateOutcome,
    },
    TransferCreated {
        transfer_id: Uuid,
        from_store_id: String,
        to_store_id: String,
        product_id: String,
        quantity: i32,
    },
    TransferStatusChanged {
        transfer_id: Uuid,
        new_status: TransferStatus,
    },
}

#[derive(Debug, Clone)]
pub struct EventSender {
    sender: mpsc::Sender<Event>,
}

impl EventSender {
    pub fn new(sender: mpsc::Sender<Event>) -> Self {
        Self { sender }
    }

    /// Create a sender wired to a drain task, for contexts that do not care
    /// about observing the events (tests, seed tooling).
    pub fn discard() -> Self {
        let (tx, mut rx) = mpsc::channel(64);
        tokio::spawn(async move { while rx.recv().await.is_some() {} });
        Self::new(tx)
    }

    pub async fn send(&self, event: Event) -> Result<(), String> {
        self.sender
            .send(event)
            .await
            .map_err(|e| format!("Failed to send event: {}", e))
    }
}

/// Background consumer: log every event with structured fields.
pub async fn process_events(mut receiver: mpsc::Receiver<Event>) {
    while let Some(event) = receiver.recv().await {
        match &event {
            Event::SessionOpened {
                username, role, ..
            } => info!(%username, %role, "session opened"),
            Event::SessionClosed { .. } => info!("session closed"),
            Event::StockAdjusted {
                item_id,
                store_id,
                movement_type,
                quantity_delta,
                new_quantity,
                outcome,
            } => info!(
                %item_id,
                %store_id,
                %movement_type,
                quantity_delta,
                new_quantity,
                ?outcome,
                "stock adjusted"
            ),
            Event::TransferCreated {
                transfer_id,
                from_store_id,
                to_store_id,
                quantity,
                ..
            } => info!(%transfer_id, %from_store_id, %to_store_id, quantity, "transfer created"),
            Event::TransferStatusChanged {
                transfer_id,
                new_status,
            } => info!(%transfer_id, %new_status, "transfer status changed"),
        }
    }
}
