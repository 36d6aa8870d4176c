use axum::{
    extract::{Json, Path, Query, State},
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::auth::StoreScope;
use crate::errors::ServiceError;
use crate::handlers::require_session;
use crate::services::inventory::UpdateStockCommand;
use crate::{ApiResponse, AppState};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_inventory))
        .route("/alerts", get(stock_alerts))
        .route("/item", get(get_item))
        .route("/adjust", post(adjust_stock))
        .route("/:id/movements", get(item_movements))
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ItemLookup {
    pub product_id: String,
    pub store_id: String,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct MovementQuery {
    /// Cap on returned movements, newest first. The dashboard's recent
    /// activity panel passes 5.
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AdjustStockRequest {
    pub item_id: Uuid,
    pub quantity_delta: i32,
    pub reason: String,
}

/// Inventory items visible in the session's effective store scope.
#[utoipa::path(
    get,
    path = "/api/v1/inventory",
    responses(
        (status = 200, description = "Scoped inventory list"),
        (status = 401, description = "No active session", body = crate::errors::ErrorResponse)
    ),
    tag = "inventory"
)]
pub async fn list_inventory(State(state): State<AppState>) -> Result<impl IntoResponse, ServiceError> {
    let session = require_session(&state).await?;
    let scope = StoreScope::for_session(Some(&session));
    let items = state.services.inventory.list(&scope).await;
    Ok(Json(ApiResponse::success(items)))
}

/// Low-stock / out-of-stock counts for the effective scope.
#[utoipa::path(
    get,
    path = "/api/v1/inventory/alerts",
    responses(
        (status = 200, description = "Alert counts"),
        (status = 401, description = "No active session", body = crate::errors::ErrorResponse)
    ),
    tag = "inventory"
)]
pub async fn stock_alerts(State(state): State<AppState>) -> Result<impl IntoResponse, ServiceError> {
    let session = require_session(&state).await?;
    let scope = StoreScope::for_session(Some(&session));
    let alerts = state.services.inventory.stock_alerts(&scope).await;
    Ok(Json(ApiResponse::success(alerts)))
}

/// Point lookup for one (product, store) pair. A missing pair is a `null`
/// payload, not a 404.
#[utoipa::path(
    get,
    path = "/api/v1/inventory/item",
    params(ItemLookup),
    responses(
        (status = 200, description = "Item, or null when the pair has no stock record"),
        (status = 401, description = "No active session", body = crate::errors::ErrorResponse)
    ),
    tag = "inventory"
)]
pub async fn get_item(
    State(state): State<AppState>,
    Query(lookup): Query<ItemLookup>,
) -> Result<impl IntoResponse, ServiceError> {
    require_session(&state).await?;
    let item = state
        .services
        .inventory
        .get_item(&lookup.product_id, &lookup.store_id)
        .await;
    Ok(Json(ApiResponse::success(item)))
}

/// Apply a signed stock delta.
///
/// Clamp-to-zero and unknown-item cases are successful responses carrying the
/// outcome, matching the ledger's silent-policy contract.
#[utoipa::path(
    post,
    path = "/api/v1/inventory/adjust",
    request_body = AdjustStockRequest,
    responses(
        (status = 200, description = "Outcome of the update"),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorResponse),
        (status = 401, description = "No active session", body = crate::errors::ErrorResponse),
        (status = 403, description = "Role cannot edit", body = crate::errors::ErrorResponse)
    ),
    tag = "inventory"
)]
pub async fn adjust_stock(
    State(state): State<AppState>,
    Json(payload): Json<AdjustStockRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let session = require_session(&state).await?;
    let outcome = state
        .services
        .inventory
        .update_stock(
            UpdateStockCommand {
                item_id: payload.item_id,
                quantity_delta: payload.quantity_delta,
                reason: payload.reason,
            },
            &session,
        )
        .await?;
    Ok(Json(ApiResponse::success(
        serde_json::json!({ "outcome": outcome }),
    )))
}

/// Movement history for one item, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/inventory/{id}/movements",
    params(
        ("id" = Uuid, Path, description = "Inventory item id"),
        MovementQuery
    ),
    responses(
        (status = 200, description = "Movements, newest first"),
        (status = 401, description = "No active session", body = crate::errors::ErrorResponse)
    ),
    tag = "inventory"
)]
pub async fn item_movements(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<MovementQuery>,
) -> Result<impl IntoResponse, ServiceError> {
    let session = require_session(&state).await?;
    let movements = state
        .services
        .movements
        .for_item(id, query.limit, Some(session.role))
        .await?;
    Ok(Json(ApiResponse::success(movements)))
}
