//! Seams to the collaborators around the engine

use async_trait::async_trait;
use std::path::Path;

use crate::types::*;

/// Upstream collaborator producing extracted fields for one stored document
pub trait DocumentExtractor: Send + Sync {
    /// Extract the fields of the document at `path`, uploaded with the
    /// given type label
    fn extract(&self, path: &Path, document_type: &str) -> EngineResult<ExtractedDocument>;
}

/// Storage abstraction for result snapshots
///
/// Snapshots are opaque to the engine; it never reads them back. Any backend
/// (PostgreSQL, SQLite, in-memory, etc.) can implement this trait.
#[async_trait]
pub trait SnapshotStorage: Send + Sync {
    /// Save a snapshot
    async fn save_snapshot(&mut self, snapshot: &Snapshot) -> EngineResult<()>;

    /// All snapshots of a client, oldest first
    async fn list_snapshots(&self, client_id: &str) -> EngineResult<Vec<Snapshot>>;

    /// Most recent snapshot of a client
    async fn latest_snapshot(&self, client_id: &str) -> EngineResult<Option<Snapshot>> {
        Ok(self.list_snapshots(client_id).await?.into_iter().last())
    }

    /// Delete every snapshot of a client, returning how many were removed
    async fn delete_snapshots(&mut self, client_id: &str) -> EngineResult<usize>;
}
