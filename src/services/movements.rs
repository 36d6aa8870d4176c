//! Read side of the movement log.
//!
//! Movements are appended by the inventory and transfer services inside their
//! own write-lock sections; this service only queries them. Entries are never
//! edited or removed.

use tracing::instrument;
use uuid::Uuid;

use crate::dataset::SharedDataset;
use crate::errors::ServiceError;
use crate::models::{Movement, PermissionSet, Role};

#[derive(Clone)]
pub struct MovementService {
    data: SharedDataset,
}

impl MovementService {
    pub fn new(data: SharedDataset) -> Self {
        Self { data }
    }

    /// Movements for one inventory item, most recent first.
    ///
    /// Callers typically take a small prefix for a recent-activity view, so
    /// `limit` trims server-side; `None` returns the full history.
    #[instrument(skip(self))]
    pub async fn for_item(
        &self,
        inventory_item_id: Uuid,
        limit: Option<usize>,
        role: Option<Role>,
    ) -> Result<Vec<Movement>, ServiceError> {
        let permissions = PermissionSet::for_role(role);
        if !permissions.can_view_history {
            return Err(ServiceError::Forbidden(
                "role cannot view movement history".to_string(),
            ));
        }

        let data = self.data.read().await;
        let mut movements: Vec<Movement> = data
            .movements
            .iter()
            .filter(|m| m.inventory_item_id == inventory_item_id)
            .cloned()
            .collect();
        // Insertion order is chronological; display order is newest first.
        movements.reverse();
        if let Some(limit) = limit {
            movements.truncate(limit);
        }
        Ok(movements)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Dataset;
    use crate::models::MovementType;
    use chrono::Utc;

    fn movement(item_id: Uuid, delta: i32, seq: usize) -> Movement {
        Movement {
            id: Uuid::new_v4(),
            inventory_item_id: item_id,
            product_id: "p1".into(),
            store_id: "s1".into(),
            movement_type: MovementType::Sale,
            quantity_delta: delta,
            reason: format!("sale #{}", seq),
            performed_by: "Alice".into(),
            timestamp: Utc::now(),
        }
    }

    #[tokio::test]
    async fn for_item_is_newest_first_and_bounded() {
        let item_id = Uuid::new_v4();
        let other = Uuid::new_v4();
        let mut data = Dataset::default();
        for seq in 0..7 {
            data.movements.push(movement(item_id, -1, seq));
        }
        data.movements.push(movement(other, -1, 99));

        let svc = MovementService::new(data.shared());
        let recent = svc
            .for_item(item_id, Some(5), Some(Role::StoreManager))
            .await
            .unwrap();
        assert_eq!(recent.len(), 5);
        assert_eq!(recent[0].reason, "sale #6");
        assert_eq!(recent[4].reason, "sale #2");
        assert!(recent.iter().all(|m| m.inventory_item_id == item_id));

        let full = svc.for_item(item_id, None, None).await.unwrap();
        assert_eq!(full.len(), 7);
    }

    #[tokio::test]
    async fn history_is_viewable_without_a_session() {
        let svc = MovementService::new(Dataset::default().shared());
        assert!(svc.for_item(Uuid::new_v4(), None, None).await.unwrap().is_empty());
    }
}
