use axum::{
    extract::{Json, State},
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::auth::{LoginResult, StoreScope};
use crate::errors::ServiceError;
use crate::models::PermissionSet;
use crate::{ApiResponse, AppState};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/me", get(me))
        .route("/select-store", post(select_store))
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SelectStoreRequest {
    /// `null` clears the selection (all stores).
    pub store_id: Option<String>,
}

/// Credential check against the demo accounts.
///
/// Always answers 200: invalid credentials come back as `success: false` with
/// a message the UI renders inline.
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login outcome (check the success flag)", body = LoginResult),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse)
    ),
    tag = "auth"
)]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResult>, ServiceError> {
    let result = state
        .services
        .sessions
        .login(&payload.username, &payload.password)
        .await?;
    Ok(Json(result))
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/logout",
    responses(
        (status = 200, description = "Session closed"),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse)
    ),
    tag = "auth"
)]
pub async fn logout(State(state): State<AppState>) -> Result<impl IntoResponse, ServiceError> {
    state.services.sessions.logout().await?;
    Ok(Json(ApiResponse::success(serde_json::json!({
        "logged_out": true
    }))))
}

/// The active session with its derived permissions and effective scope.
#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    responses(
        (status = 200, description = "Current session state"),
    ),
    tag = "auth"
)]
pub async fn me(State(state): State<AppState>) -> Result<impl IntoResponse, ServiceError> {
    let session = state.services.sessions.current().await;
    let scope = StoreScope::for_session(session.as_ref());
    let permissions = PermissionSet::for_role(session.as_ref().map(|s| s.role));
    Ok(Json(ApiResponse::success(serde_json::json!({
        "session": session,
        "permissions": permissions,
        "effective_store_id": scope.store_id,
    }))))
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/select-store",
    request_body = SelectStoreRequest,
    responses(
        (status = 200, description = "Selection updated"),
        (status = 401, description = "No active session", body = crate::errors::ErrorResponse),
        (status = 403, description = "Role cannot switch scope", body = crate::errors::ErrorResponse),
        (status = 404, description = "Unknown store", body = crate::errors::ErrorResponse)
    ),
    tag = "auth"
)]
pub async fn select_store(
    State(state): State<AppState>,
    Json(payload): Json<SelectStoreRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let session = state
        .services
        .sessions
        .select_store(payload.store_id)
        .await?;
    Ok(Json(ApiResponse::success(session)))
}
