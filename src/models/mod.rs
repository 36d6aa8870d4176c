//! Core data model for the inventory ledger and transfer workflow.
//!
//! All records are plain serde structs held in memory and mirrored to disk by
//! the persistence layer; none of them are database entities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::ToSchema;
use uuid::Uuid;

/// Roles recognized by the back office. Absence of a session means
/// unauthenticated, which maps to an all-false permission set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Owner,
    StoreManager,
    Superadmin,
}

impl Role {
    /// Label recorded on transfers and movements created by this role.
    pub fn actor_label(&self) -> &'static str {
        match self {
            Role::Owner => "Owner",
            Role::StoreManager => "Store Manager",
            Role::Superadmin => "Superadmin",
        }
    }
}

/// Capability set derived from a role. Derived on demand, never stored:
/// call sites consult this struct instead of matching on the raw role so the
/// capability rules live in exactly one place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PermissionSet {
    pub can_edit: bool,
    pub can_transfer: bool,
    pub can_approve_transfer: bool,
    pub can_view_all_stores: bool,
    pub can_view_history: bool,
}

/// The acting user attached to a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub name: String,
    pub username: String,
}

/// The single active back-office session.
///
/// `managed_store_id` is populated for store managers only; `selected_store_id`
/// is the owner's explicit store filter (None means all stores).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Session {
    pub role: Role,
    pub user: User,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub managed_store_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_store_id: Option<String>,
}

/// Store catalog record (external collaborator, referenced by id).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Store {
    pub id: String,
    pub name: String,
    pub is_flagship: bool,
}

/// Product catalog record (external collaborator, referenced by id).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub brand: String,
    pub category: String,
    pub price: f64,
}

/// Stock record for one (product, store) pair.
///
/// `quantity` is never negative: every mutation clamps at zero. Items are
/// created at provisioning time and never deleted during normal operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct InventoryItem {
    pub id: Uuid,
    pub product_id: String,
    pub store_id: String,
    pub quantity: i32,
    pub low_stock_threshold: i32,
    pub last_updated: DateTime<Utc>,
}

impl InventoryItem {
    pub fn is_out_of_stock(&self) -> bool {
        self.quantity == 0
    }

    pub fn is_low_stock(&self) -> bool {
        self.quantity > 0 && self.quantity <= self.low_stock_threshold
    }
}

/// Classification of a stock movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum MovementType {
    Purchase,
    Sale,
    TransferIn,
    TransferOut,
    Damage,
    Correction,
}

/// Immutable ledger entry for one stock change.
///
/// `quantity_delta` is recorded as requested, even when the applied change was
/// truncated by the zero clamp. Movements are append-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Movement {
    pub id: Uuid,
    pub inventory_item_id: Uuid,
    pub product_id: String,
    pub store_id: String,
    pub movement_type: MovementType,
    pub quantity_delta: i32,
    pub reason: String,
    pub performed_by: String,
    pub timestamp: DateTime<Utc>,
}

/// Lifecycle states of a transfer.
///
/// `Approved` is part of the vocabulary but no operation currently transitions
/// into it; the implemented transitions are Pending -> Completed and
/// Pending -> Rejected, both terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum TransferStatus {
    Pending,
    Approved,
    Completed,
    Rejected,
}

impl TransferStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, TransferStatus::Completed | TransferStatus::Rejected)
    }
}

/// A request to move a fixed quantity of one product between two stores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Transfer {
    pub id: Uuid,
    pub from_store_id: String,
    pub to_store_id: String,
    pub product_id: String,
    pub quantity: i32,
    pub status: TransferStatus,
    pub created_at: DateTime<Utc>,
    pub created_by: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

/// Counts of items needing attention, recomputed over the scoped item list on
/// every read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StockAlerts {
    pub low_stock: usize,
    pub out_of_stock: usize,
    pub total: usize,
}

/// Outcome of a stock update. Clamping and missing-item cases are policy
/// outcomes rather than errors, but callers and tests need to tell them apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StockUpdateOutcome {
    Applied,
    ClampedToZero,
    ItemNotFound,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transfer_status_terminality() {
        assert!(!TransferStatus::Pending.is_terminal());
        assert!(!TransferStatus::Approved.is_terminal());
        assert!(TransferStatus::Completed.is_terminal());
        assert!(TransferStatus::Rejected.is_terminal());
    }

    #[test]
    fn status_serializes_screaming_snake() {
        let s = serde_json::to_string(&TransferStatus::Pending).unwrap();
        assert_eq!(s, "\"PENDING\"");
        let t = serde_json::to_string(&MovementType::TransferIn).unwrap();
        assert_eq!(t, "\"TRANSFER_IN\"");
    }

    #[test]
    fn item_stock_classification() {
        let mut item = InventoryItem {
            id: Uuid::new_v4(),
            product_id: "p1".into(),
            store_id: "s1".into(),
            quantity: 0,
            low_stock_threshold: 5,
            last_updated: Utc::now(),
        };
        assert!(item.is_out_of_stock());
        assert!(!item.is_low_stock());

        item.quantity = 3;
        assert!(item.is_low_stock());

        item.quantity = 6;
        assert!(!item.is_low_stock());
        assert!(!item.is_out_of_stock());
    }
}
