//! OpenAPI document for the back-office API, served through Swagger UI.

use utoipa::OpenApi;

use crate::auth::LoginResult;
use crate::errors::ErrorResponse;
use crate::handlers;
use crate::models::{
    InventoryItem, Movement, MovementType, PermissionSet, Product, Role, Session, StockAlerts,
    StockUpdateOutcome, Store, Transfer, TransferStatus, User,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Storefront Back Office API",
        description = "Multi-store inventory ledger, stock movement history, and inter-store transfer workflow",
        version = "0.2.0"
    ),
    paths(
        handlers::health::health,
        handlers::auth::login,
        handlers::auth::logout,
        handlers::auth::me,
        handlers::auth::select_store,
        handlers::inventory::list_inventory,
        handlers::inventory::stock_alerts,
        handlers::inventory::get_item,
        handlers::inventory::adjust_stock,
        handlers::inventory::item_movements,
        handlers::transfers::list_transfers,
        handlers::transfers::create_transfer,
        handlers::transfers::set_transfer_status,
        handlers::catalog::list_stores,
        handlers::catalog::list_products,
    ),
    components(schemas(
        handlers::auth::LoginRequest,
        handlers::auth::SelectStoreRequest,
        handlers::inventory::AdjustStockRequest,
        handlers::transfers::CreateTransferRequest,
        handlers::transfers::SetStatusRequest,
        Role,
        User,
        Session,
        PermissionSet,
        Store,
        Product,
        InventoryItem,
        Movement,
        MovementType,
        Transfer,
        TransferStatus,
        StockAlerts,
        StockUpdateOutcome,
        LoginResult,
        ErrorResponse,
    )),
    tags(
        (name = "auth", description = "Session bootstrap and scope selection"),
        (name = "inventory", description = "Inventory ledger and alerts"),
        (name = "transfers", description = "Inter-store transfer workflow"),
        (name = "catalog", description = "Read-only product and store catalog"),
        (name = "health", description = "Liveness")
    )
)]
pub struct ApiDoc;

pub fn spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}
