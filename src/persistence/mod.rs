//! Durable mirror of the in-memory dataset.
//!
//! Each top-level collection is persisted independently as a JSON document so
//! a mutation only rewrites the collections it touched. Writes go through a
//! temp-file rename to avoid leaving a half-written snapshot behind a crash.
//! The mirror is write-through: services persist before their call returns.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use tracing::info;

use crate::errors::ServiceError;
use crate::models::{InventoryItem, Movement, Session, Transfer};

const SESSION_FILE: &str = "session.json";
const INVENTORY_FILE: &str = "inventory.json";
const MOVEMENTS_FILE: &str = "movements.json";
const TRANSFERS_FILE: &str = "transfers.json";

/// Mirrored collections as loaded from disk. Absent files load as `None` so
/// the caller can fall back to seed data per collection.
#[derive(Debug, Default)]
pub struct DatasetSnapshot {
    pub session: Option<Option<Session>>,
    pub items: Option<Vec<InventoryItem>>,
    pub movements: Option<Vec<Movement>>,
    pub transfers: Option<Vec<Transfer>>,
}

#[async_trait]
pub trait SnapshotStore: Send + Sync {
    async fn save_session(&self, session: Option<&Session>) -> Result<(), ServiceError>;
    async fn save_items(&self, items: &[InventoryItem]) -> Result<(), ServiceError>;
    async fn save_movements(&self, movements: &[Movement]) -> Result<(), ServiceError>;
    async fn save_transfers(&self, transfers: &[Transfer]) -> Result<(), ServiceError>;
    async fn load(&self) -> Result<DatasetSnapshot, ServiceError>;
}

/// JSON-file store rooted at a data directory.
pub struct JsonSnapshotStore {
    data_dir: PathBuf,
}

impl JsonSnapshotStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    async fn write_file<T: Serialize + Sync>(
        &self,
        name: &str,
        value: &T,
    ) -> Result<(), ServiceError> {
        tokio::fs::create_dir_all(&self.data_dir).await?;
        let body = serde_json::to_vec_pretty(value)?;
        let target = self.data_dir.join(name);
        let tmp = self.data_dir.join(format!("{name}.tmp"));
        tokio::fs::write(&tmp, &body).await?;
        tokio::fs::rename(&tmp, &target).await?;
        Ok(())
    }

    async fn read_file<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>, ServiceError> {
        let path = self.data_dir.join(name);
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[async_trait]
impl SnapshotStore for JsonSnapshotStore {
    async fn save_session(&self, session: Option<&Session>) -> Result<(), ServiceError> {
        self.write_file(SESSION_FILE, &session).await
    }

    async fn save_items(&self, items: &[InventoryItem]) -> Result<(), ServiceError> {
        self.write_file(INVENTORY_FILE, &items).await
    }

    async fn save_movements(&self, movements: &[Movement]) -> Result<(), ServiceError> {
        self.write_file(MOVEMENTS_FILE, &movements).await
    }

    async fn save_transfers(&self, transfers: &[Transfer]) -> Result<(), ServiceError> {
        self.write_file(TRANSFERS_FILE, &transfers).await
    }

    async fn load(&self) -> Result<DatasetSnapshot, ServiceError> {
        let snapshot = DatasetSnapshot {
            session: self.read_file(SESSION_FILE).await?,
            items: self.read_file(INVENTORY_FILE).await?,
            movements: self.read_file(MOVEMENTS_FILE).await?,
            transfers: self.read_file(TRANSFERS_FILE).await?,
        };
        if snapshot.items.is_some() {
            info!(data_dir = %self.data_dir.display(), "loaded ledger snapshot from disk");
        }
        Ok(snapshot)
    }
}

/// In-memory store used by unit tests and as a fallback when no data
/// directory is configured.
#[derive(Default)]
pub struct InMemorySnapshotStore {
    documents: Mutex<HashMap<&'static str, serde_json::Value>>,
}

impl InMemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn put<T: Serialize>(&self, name: &'static str, value: &T) -> Result<(), ServiceError> {
        let doc = serde_json::to_value(value)?;
        self.documents
            .lock()
            .map_err(|_| ServiceError::InternalError("snapshot store mutex poisoned".into()))?
            .insert(name, doc);
        Ok(())
    }

    fn get<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>, ServiceError> {
        let docs = self
            .documents
            .lock()
            .map_err(|_| ServiceError::InternalError("snapshot store mutex poisoned".into()))?;
        docs.get(name)
            .map(|doc| serde_json::from_value(doc.clone()).map_err(ServiceError::from))
            .transpose()
    }
}

#[async_trait]
impl SnapshotStore for InMemorySnapshotStore {
    async fn save_session(&self, session: Option<&Session>) -> Result<(), ServiceError> {
        self.put(SESSION_FILE, &session)
    }

    async fn save_items(&self, items: &[InventoryItem]) -> Result<(), ServiceError> {
        self.put(INVENTORY_FILE, &items)
    }

    async fn save_movements(&self, movements: &[Movement]) -> Result<(), ServiceError> {
        self.put(MOVEMENTS_FILE, &movements)
    }

    async fn save_transfers(&self, transfers: &[Transfer]) -> Result<(), ServiceError> {
        self.put(TRANSFERS_FILE, &transfers)
    }

    async fn load(&self) -> Result<DatasetSnapshot, ServiceError> {
        Ok(DatasetSnapshot {
            session: self.get(SESSION_FILE)?,
            items: self.get(INVENTORY_FILE)?,
            movements: self.get(MOVEMENTS_FILE)?,
            transfers: self.get(TRANSFERS_FILE)?,
        })
    }
}

/// Build the boot-time dataset: disk snapshot where present, seed otherwise.
pub async fn load_or_seed(store: &dyn SnapshotStore) -> Result<crate::dataset::Dataset, ServiceError> {
    let snapshot = store.load().await?;
    let mut data = crate::dataset::Dataset::seed();

    if let Some(items) = snapshot.items {
        data.items = items;
    }
    if let Some(movements) = snapshot.movements {
        data.movements = movements;
    }
    if let Some(transfers) = snapshot.transfers {
        data.transfers = transfers;
    }
    if let Some(session) = snapshot.session {
        data.session = session;
    }

    Ok(data)
}
