//! HTTP surface: thin axum handlers over the services.
//!
//! Handlers resolve the active session, hand it to the services (which own
//! the authorization checks), and wrap results in the `ApiResponse` envelope.

pub mod auth;
pub mod catalog;
pub mod health;
pub mod inventory;
pub mod transfers;

use std::sync::Arc;

use axum::Router;

use crate::auth::SessionService;
use crate::dataset::SharedDataset;
use crate::errors::ServiceError;
use crate::events::EventSender;
use crate::models::Session;
use crate::persistence::SnapshotStore;
use crate::services::{InventoryService, MovementService, TransferService};
use crate::AppState;

/// Aggregated services shared by all handlers.
#[derive(Clone)]
pub struct AppServices {
    pub sessions: SessionService,
    pub inventory: InventoryService,
    pub transfers: TransferService,
    pub movements: MovementService,
}

impl AppServices {
    pub fn new(
        data: SharedDataset,
        store: Arc<dyn SnapshotStore>,
        event_sender: EventSender,
    ) -> Self {
        Self {
            sessions: SessionService::new(data.clone(), store.clone(), event_sender.clone()),
            inventory: InventoryService::new(data.clone(), store.clone(), event_sender.clone()),
            transfers: TransferService::new(data.clone(), store, event_sender),
            movements: MovementService::new(data),
        }
    }
}

/// Require an active session, or fail with 401.
pub(crate) async fn require_session(state: &AppState) -> Result<Session, ServiceError> {
    state
        .services
        .sessions
        .current()
        .await
        .ok_or_else(|| ServiceError::Unauthorized("no active session".to_string()))
}

/// All `/api/v1` routes.
pub fn api_router() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/inventory", inventory::router())
        .nest("/transfers", transfers::router())
        .nest("/catalog", catalog::router())
}
