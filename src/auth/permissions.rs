//! Role-to-capability mapping.
//!
//! Call sites never match on the raw role; they derive a [`PermissionSet`] and
//! consult its flags, so the capability rules cannot drift between call sites.

use crate::models::{PermissionSet, Role};

impl PermissionSet {
    /// Total function over every role, including "no session".
    pub fn for_role(role: Option<Role>) -> Self {
        match role {
            Some(Role::Owner) => Self {
                can_edit: true,
                can_transfer: true,
                can_approve_transfer: true,
                can_view_all_stores: true,
                can_view_history: true,
            },
            Some(Role::StoreManager) => Self {
                can_edit: true,
                can_transfer: true,
                can_approve_transfer: false,
                can_view_all_stores: false,
                can_view_history: true,
            },
            // Superadmin manages platform concerns outside the ledger; within
            // the ledger it is read-only history, same as unauthenticated.
            Some(Role::Superadmin) | None => Self {
                can_edit: false,
                can_transfer: false,
                can_approve_transfer: false,
                can_view_all_stores: false,
                can_view_history: true,
            },
        }
    }
}
