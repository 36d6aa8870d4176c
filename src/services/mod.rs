//! Business services for the inventory ledger and transfer workflow.
//!
//! Each service holds the shared dataset lock, the snapshot store and the
//! event sender. Authorization is enforced here, inside the service boundary,
//! so handlers only resolve the session and pass it along.

pub mod inventory;
pub mod movements;
pub mod transfers;

pub use inventory::InventoryService;
pub use movements::MovementService;
pub use transfers::TransferService;
