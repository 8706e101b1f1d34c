//! Session metadata store boundary.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::SessionRecord;
use crate::Result;

/// Key-value lookup of session records, keyed by `rag_id`.
///
/// The production store is an external document database; this trait is the
/// only surface the pipeline depends on. The core never updates a record
/// in place.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Persists a new session record.
    async fn create(&self, record: SessionRecord) -> Result<()>;

    /// Looks up a session record by its `rag_id`.
    ///
    /// Returns `None` when the id is unknown.
    async fn get(&self, rag_id: Uuid) -> Result<Option<SessionRecord>>;

    /// Deletes a session record.
    async fn delete(&self, rag_id: Uuid) -> Result<()>;
}

/// In-process session store.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    records: RwLock<HashMap<Uuid, SessionRecord>>,
}

impl MemorySessionStore {
    /// Creates a new, empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored sessions.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Returns true if no sessions are stored.
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn create(&self, record: SessionRecord) -> Result<()> {
        self.records.write().await.insert(record.rag_id, record);
        Ok(())
    }

    async fn get(&self, rag_id: Uuid) -> Result<Option<SessionRecord>> {
        Ok(self.records.read().await.get(&rag_id).cloned())
    }

    async fn delete(&self, rag_id: Uuid) -> Result<()> {
        self.records.write().await.remove(&rag_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use ragmux_vector::{QdrantConfig, VectorStoreConfig};

    use super::*;

    fn record() -> SessionRecord {
        SessionRecord::new(
            VectorStoreConfig::Qdrant(QdrantConfig::new("http://localhost:6334")),
            "sk-key",
            "notes",
        )
    }

    #[tokio::test]
    async fn created_sessions_can_be_looked_up() {
        let store = MemorySessionStore::new();
        let record = record();
        let rag_id = record.rag_id;

        store.create(record).await.unwrap();

        let found = store.get(rag_id).await.unwrap().unwrap();
        assert_eq!(found.rag_id, rag_id);
        assert_eq!(found.collection, "notes");
    }

    #[tokio::test]
    async fn unknown_ids_return_none() {
        let store = MemorySessionStore::new();
        assert!(store.get(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn deleted_sessions_are_gone() {
        let store = MemorySessionStore::new();
        let record = record();
        let rag_id = record.rag_id;

        store.create(record).await.unwrap();
        store.delete(rag_id).await.unwrap();

        assert!(store.get(rag_id).await.unwrap().is_none());
        assert!(store.is_empty().await);
    }
}
