//! In-memory snapshot storage for testing and development

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::traits::*;
use crate::types::*;

/// In-memory storage implementation for testing and development
#[derive(Debug, Clone)]
pub struct MemoryStorage {
    snapshots: Arc<RwLock<HashMap<String, Vec<Snapshot>>>>,
}

impl MemoryStorage {
    /// Create a new memory storage instance
    pub fn new() -> Self {
        Self {
            snapshots: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Clear all data (useful for testing)
    pub fn clear(&self) -> EngineResult<()> {
        self.snapshots
            .write()
            .map_err(|_| poisoned())?
            .clear();
        Ok(())
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

fn poisoned() -> EngineError {
    EngineError::Storage("snapshot lock poisoned".to_string())
}

#[async_trait]
impl SnapshotStorage for MemoryStorage {
    async fn save_snapshot(&mut self, snapshot: &Snapshot) -> EngineResult<()> {
        let mut snapshots = self.snapshots.write().map_err(|_| poisoned())?;
        let history = snapshots.entry(snapshot.client_id.clone()).or_default();
        if history.iter().any(|s| s.id == snapshot.id) {
            return Err(EngineError::Storage(format!(
                "Snapshot {} already stored",
                snapshot.id
            )));
        }
        history.push(snapshot.clone());
        history.sort_by_key(|s| s.created_at);
        Ok(())
    }

    async fn list_snapshots(&self, client_id: &str) -> EngineResult<Vec<Snapshot>> {
        Ok(self
            .snapshots
            .read()
            .map_err(|_| poisoned())?
            .get(client_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn delete_snapshots(&mut self, client_id: &str) -> EngineResult<usize> {
        Ok(self
            .snapshots
            .write()
            .map_err(|_| poisoned())?
            .remove(client_id)
            .map(|history| history.len())
            .unwrap_or(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(day: u32) -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 5, day)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap()
    }

    #[tokio::test]
    async fn test_snapshots_ordered_by_timestamp() {
        let mut storage = MemoryStorage::new();
        let later = Snapshot::new("c1", at(2), serde_json::json!({ "n": 2 }));
        let earlier = Snapshot::new("c1", at(1), serde_json::json!({ "n": 1 }));
        storage.save_snapshot(&later).await.unwrap();
        storage.save_snapshot(&earlier).await.unwrap();
        storage
            .save_snapshot(&Snapshot::new("c2", at(3), serde_json::json!({})))
            .await
            .unwrap();

        let history = storage.list_snapshots("c1").await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].id, earlier.id);

        let latest = storage.latest_snapshot("c1").await.unwrap().unwrap();
        assert_eq!(latest.id, later.id);
        assert_eq!(latest.content["n"], 2);
    }

    #[tokio::test]
    async fn test_duplicate_snapshot_rejected() {
        let mut storage = MemoryStorage::new();
        let snapshot = Snapshot::new("c1", at(1), serde_json::json!({}));
        storage.save_snapshot(&snapshot).await.unwrap();
        assert!(matches!(
            storage.save_snapshot(&snapshot).await,
            Err(EngineError::Storage(_))
        ));
    }

    #[tokio::test]
    async fn test_delete_and_clear() {
        let mut storage = MemoryStorage::new();
        storage
            .save_snapshot(&Snapshot::new("c1", at(1), serde_json::json!({})))
            .await
            .unwrap();
        storage
            .save_snapshot(&Snapshot::new("c2", at(1), serde_json::json!({})))
            .await
            .unwrap();

        assert_eq!(storage.delete_snapshots("c1").await.unwrap(), 1);
        assert_eq!(storage.delete_snapshots("c1").await.unwrap(), 0);
        assert!(storage.latest_snapshot("c1").await.unwrap().is_none());

        storage.clear().unwrap();
        assert!(storage.list_snapshots("c2").await.unwrap().is_empty());
    }
}
