use axum::{extract::State, response::IntoResponse, Json};
use chrono::Utc;
use serde_json::json;

use crate::AppState;

/// Liveness probe with a couple of cheap dataset gauges.
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is up")),
    tag = "health"
)]
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let data = state.data.read().await;
    Json(json!({
        "status": "ok",
        "timestamp": Utc::now().to_rfc3339(),
        "items": data.items.len(),
        "movements": data.movements.len(),
        "transfers": data.transfers.len(),
    }))
}
