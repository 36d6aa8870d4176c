use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::auth::StoreScope;
use crate::errors::ServiceError;
use crate::handlers::require_session;
use crate::models::{PermissionSet, TransferStatus};
use crate::services::transfers::CreateTransferCommand;
use crate::{ApiResponse, AppState};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_transfers).post(create_transfer))
        .route("/:id/status", post(set_transfer_status))
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateTransferRequest {
    pub from_store_id: String,
    pub to_store_id: String,
    pub product_id: String,
    pub quantity: i32,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SetStatusRequest {
    pub status: TransferStatus,
}

/// Transfers visible to the session: all of them for roles that view all
/// stores, otherwise only those touching the effective store.
#[utoipa::path(
    get,
    path = "/api/v1/transfers",
    responses(
        (status = 200, description = "Visible transfers"),
        (status = 401, description = "No active session", body = crate::errors::ErrorResponse)
    ),
    tag = "transfers"
)]
pub async fn list_transfers(State(state): State<AppState>) -> Result<impl IntoResponse, ServiceError> {
    let session = require_session(&state).await?;
    let scope = StoreScope::for_session(Some(&session));
    let permissions = PermissionSet::for_role(Some(session.role));
    let transfers = state
        .services
        .transfers
        .list_for(&scope, &permissions)
        .await;
    Ok(Json(ApiResponse::success(transfers)))
}

#[utoipa::path(
    post,
    path = "/api/v1/transfers",
    request_body = CreateTransferRequest,
    responses(
        (status = 201, description = "Pending transfer created"),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorResponse),
        (status = 401, description = "No active session", body = crate::errors::ErrorResponse),
        (status = 403, description = "Role cannot transfer", body = crate::errors::ErrorResponse),
        (status = 422, description = "Quantity exceeds source stock", body = crate::errors::ErrorResponse)
    ),
    tag = "transfers"
)]
pub async fn create_transfer(
    State(state): State<AppState>,
    Json(payload): Json<CreateTransferRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let session = require_session(&state).await?;
    let transfer = state
        .services
        .transfers
        .create(
            CreateTransferCommand {
                from_store_id: payload.from_store_id,
                to_store_id: payload.to_store_id,
                product_id: payload.product_id,
                quantity: payload.quantity,
            },
            &session,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(transfer))))
}

/// Resolve a pending transfer to `COMPLETED` or `REJECTED`.
#[utoipa::path(
    post,
    path = "/api/v1/transfers/{id}/status",
    params(("id" = Uuid, Path, description = "Transfer id")),
    request_body = SetStatusRequest,
    responses(
        (status = 200, description = "Transfer resolved"),
        (status = 400, description = "Invalid target status or terminal transfer", body = crate::errors::ErrorResponse),
        (status = 401, description = "No active session", body = crate::errors::ErrorResponse),
        (status = 403, description = "Role cannot approve transfers", body = crate::errors::ErrorResponse),
        (status = 404, description = "Unknown transfer", body = crate::errors::ErrorResponse)
    ),
    tag = "transfers"
)]
pub async fn set_transfer_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<SetStatusRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let session = require_session(&state).await?;
    let transfer = state
        .services
        .transfers
        .set_status(id, payload.status, &session)
        .await?;
    Ok(Json(ApiResponse::success(transfer)))
}
