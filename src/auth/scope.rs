//! Store scope resolution.
//!
//! Every scoped read and write derives its effective store through
//! [`StoreScope::for_session`]; the result is computed per request and never
//! cached, so a role or selection change takes effect immediately.

use serde::{Deserialize, Serialize};

use crate::models::{PermissionSet, Session};

/// The store (or all stores) a session may operate against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreScope {
    /// `None` means all stores (only reachable by roles with
    /// `can_view_all_stores`).
    pub store_id: Option<String>,
}

impl StoreScope {
    pub fn all() -> Self {
        Self { store_id: None }
    }

    pub fn store(id: impl Into<String>) -> Self {
        Self {
            store_id: Some(id.into()),
        }
    }

    /// Resolve the effective store for a session.
    ///
    /// A store manager is always pinned to their managed store; any
    /// `selected_store_id` on the session is ignored. Roles with
    /// `can_view_all_stores` follow the explicit selection, `None` meaning
    /// all stores. Everyone else gets an empty scope.
    pub fn for_session(session: Option<&Session>) -> Self {
        let Some(session) = session else {
            return Self::all();
        };
        let permissions = PermissionSet::for_role(Some(session.role));

        if let Some(managed) = &session.managed_store_id {
            if !permissions.can_view_all_stores {
                return Self::store(managed.clone());
            }
        }

        if permissions.can_view_all_stores {
            Self {
                store_id: session.selected_store_id.clone(),
            }
        } else {
            Self {
                store_id: session.managed_store_id.clone(),
            }
        }
    }

    /// Whether a record belonging to `store_id` is visible in this scope.
    pub fn includes(&self, store_id: &str) -> bool {
        match &self.store_id {
            Some(id) => id == store_id,
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Role, User};

    fn session(role: Role, managed: Option<&str>, selected: Option<&str>) -> Session {
        Session {
            role,
            user: User {
                name: "Test".into(),
                username: "test".into(),
            },
            managed_store_id: managed.map(String::from),
            selected_store_id: selected.map(String::from),
        }
    }

    #[test]
    fn manager_is_pinned_to_managed_store() {
        let s = session(Role::StoreManager, Some("S1"), Some("S2"));
        let scope = StoreScope::for_session(Some(&s));
        assert_eq!(scope, StoreScope::store("S1"));
        assert!(scope.includes("S1"));
        assert!(!scope.includes("S2"));
    }

    #[test]
    fn owner_follows_selection() {
        let s = session(Role::Owner, None, Some("S2"));
        assert_eq!(StoreScope::for_session(Some(&s)), StoreScope::store("S2"));
    }

    #[test]
    fn owner_without_selection_sees_all_stores() {
        let s = session(Role::Owner, None, None);
        let scope = StoreScope::for_session(Some(&s));
        assert_eq!(scope, StoreScope::all());
        assert!(scope.includes("S1"));
        assert!(scope.includes("anything"));
    }

    #[test]
    fn no_session_resolves_to_all() {
        assert_eq!(StoreScope::for_session(None), StoreScope::all());
    }
}
