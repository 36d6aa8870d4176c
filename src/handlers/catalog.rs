//! Read-only catalog endpoints.
//!
//! Products and stores are external collaborators here; the UI fetches them
//! once and joins names onto ledger rows client-side.

use axum::{extract::State, response::IntoResponse, routing::get, Json, Router};

use crate::errors::ServiceError;
use crate::{ApiResponse, AppState};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/stores", get(list_stores))
        .route("/products", get(list_products))
}

#[utoipa::path(
    get,
    path = "/api/v1/catalog/stores",
    responses((status = 200, description = "All stores")),
    tag = "catalog"
)]
pub async fn list_stores(State(state): State<AppState>) -> Result<impl IntoResponse, ServiceError> {
    let stores = state.data.read().await.stores.clone();
    Ok(Json(ApiResponse::success(stores)))
}

#[utoipa::path(
    get,
    path = "/api/v1/catalog/products",
    responses((status = 200, description = "All products")),
    tag = "catalog"
)]
pub async fn list_products(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ServiceError> {
    let products = state.data.read().await.products.clone();
    Ok(Json(ApiResponse::success(products)))
}
