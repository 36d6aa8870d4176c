//! Session bootstrap and role-based access.
//!
//! Authentication here is deliberately trivial: a fixed credential check
//! against three demo accounts. What matters to the rest of the system is the
//! session it produces (role, user, managed/selected store) and the
//! result-shaped login contract: invalid credentials are a `success: false`
//! payload, never an error status.

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::instrument;
use utoipa::ToSchema;

use crate::dataset::SharedDataset;
use crate::errors::ServiceError;
use crate::events::{Event, EventSender};
use crate::models::{PermissionSet, Role, Session, User};
use crate::persistence::SnapshotStore;

mod permissions;
pub mod scope;

pub use scope::StoreScope;

struct DemoAccount {
    username: &'static str,
    password: &'static str,
    name: &'static str,
    role: Role,
    managed_store_id: Option<&'static str>,
    redirect_to: &'static str,
}

const DEMO_ACCOUNTS: &[DemoAccount] = &[
    DemoAccount {
        username: "owner",
        password: "owner123",
        name: "Olivia Chen",
        role: Role::Owner,
        managed_store_id: None,
        redirect_to: "/dashboard",
    },
    DemoAccount {
        username: "manager",
        password: "manager123",
        name: "Marcus Reed",
        role: Role::StoreManager,
        managed_store_id: Some("store-eastside"),
        redirect_to: "/dashboard",
    },
    DemoAccount {
        username: "superadmin",
        password: "superadmin123",
        name: "Priya Nair",
        role: Role::Superadmin,
        managed_store_id: None,
        redirect_to: "/admin",
    },
];

/// Result of a login attempt. Always returned with HTTP 200; the flag carries
/// the outcome so the UI can render the message inline.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session: Option<Session>,
}

/// Manages the single active back-office session.
#[derive(Clone)]
pub struct SessionService {
    data: SharedDataset,
    store: Arc<dyn SnapshotStore>,
    event_sender: EventSender,
}

impl SessionService {
    pub fn new(data: SharedDataset, store: Arc<dyn SnapshotStore>, event_sender: EventSender) -> Self {
        Self {
            data,
            store,
            event_sender,
        }
    }

    /// Check credentials against the demo accounts and open a session.
    #[instrument(skip(self, password))]
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResult, ServiceError> {
        let Some(account) = DEMO_ACCOUNTS
            .iter()
            .find(|a| a.username == username && a.password == password)
        else {
            return Ok(LoginResult {
                success: false,
                message: Some("Invalid username or password".to_string()),
                redirect_to: None,
                session: None,
            });
        };

        let session = Session {
            role: account.role,
            user: User {
                name: account.name.to_string(),
                username: account.username.to_string(),
            },
            managed_store_id: account.managed_store_id.map(String::from),
            selected_store_id: None,
        };

        {
            let mut data = self.data.write().await;
            data.session = Some(session.clone());
            self.store.save_session(data.session.as_ref()).await?;
        }

        self.event_sender
            .send(Event::SessionOpened {
                username: session.user.username.clone(),
                role: session.role,
                timestamp: Utc::now(),
            })
            .await
            .map_err(ServiceError::EventError)?;

        Ok(LoginResult {
            success: true,
            message: None,
            redirect_to: Some(account.redirect_to.to_string()),
            session: Some(session),
        })
    }

    #[instrument(skip(self))]
    pub async fn logout(&self) -> Result<(), ServiceError> {
        {
            let mut data = self.data.write().await;
            data.session = None;
            self.store.save_session(None).await?;
        }
        self.event_sender
            .send(Event::SessionClosed {
                timestamp: Utc::now(),
            })
            .await
            .map_err(ServiceError::EventError)?;
        Ok(())
    }

    pub async fn current(&self) -> Option<Session> {
        self.data.read().await.session.clone()
    }

    /// Change the owner's explicit store selection. Only roles that can view
    /// all stores have a selection to change; a store manager's scope is
    /// pinned regardless.
    #[instrument(skip(self))]
    pub async fn select_store(&self, store_id: Option<String>) -> Result<Session, ServiceError> {
        let mut data = self.data.write().await;
        let role = data
            .session
            .as_ref()
            .map(|s| s.role)
            .ok_or_else(|| ServiceError::Unauthorized("no active session".to_string()))?;

        let permissions = PermissionSet::for_role(Some(role));
        if !permissions.can_view_all_stores {
            return Err(ServiceError::Forbidden(
                "role cannot switch store scope".to_string(),
            ));
        }

        if let Some(id) = &store_id {
            if !data.stores.iter().any(|s| &s.id == id) {
                return Err(ServiceError::NotFound(format!("store {} not found", id)));
            }
        }

        let session = data
            .session
            .as_mut()
            .ok_or_else(|| ServiceError::InternalError("session vanished mid-update".to_string()))?;
        session.selected_store_id = store_id;
        let updated = session.clone();
        self.store.save_session(data.session.as_ref()).await?;
        Ok(updated)
    }

    /// Scope and permissions for the current session, resolved per call.
    pub async fn access(&self) -> (Option<Session>, StoreScope, PermissionSet) {
        let session = self.current().await;
        let scope = StoreScope::for_session(session.as_ref());
        let permissions = PermissionSet::for_role(session.as_ref().map(|s| s.role));
        (session, scope, permissions)
    }
}
