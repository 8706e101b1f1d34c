//! Session record type.

use ragmux_vector::VectorStoreConfig;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An immutable session record for one RAG tenant.
///
/// Credentials are stored as plain fields, matching the metadata store
/// they round-trip through.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRecord {
    /// Opaque session identifier; generated at creation, never reused.
    pub rag_id: Uuid,
    /// Vector index endpoint, credentials, and backend selection.
    pub vector: VectorStoreConfig,
    /// API key for the embedding/completion provider.
    pub embedding_api_key: String,
    /// Target collection name in the vector index.
    pub collection: String,
}

impl SessionRecord {
    /// Creates a new session record with a fresh `rag_id`.
    pub fn new(
        vector: VectorStoreConfig,
        embedding_api_key: impl Into<String>,
        collection: impl Into<String>,
    ) -> Self {
        Self {
            rag_id: Uuid::new_v4(),
            vector,
            embedding_api_key: embedding_api_key.into(),
            collection: collection.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use ragmux_vector::QdrantConfig;

    use super::*;

    #[test]
    fn new_records_get_distinct_ids() {
        let vector = VectorStoreConfig::Qdrant(QdrantConfig::new("http://localhost:6334"));

        let first = SessionRecord::new(vector.clone(), "sk-key", "notes");
        let second = SessionRecord::new(vector, "sk-key", "notes");

        assert_ne!(first.rag_id, second.rag_id);
    }

    #[test]
    fn record_round_trips_through_json() {
        let record = SessionRecord::new(
            VectorStoreConfig::Qdrant(QdrantConfig::new("http://localhost:6334").with_api_key("qd")),
            "sk-key",
            "notes",
        );

        let json = serde_json::to_string(&record).unwrap();
        let parsed: SessionRecord = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.rag_id, record.rag_id);
        assert_eq!(parsed.collection, "notes");
        assert_eq!(parsed.vector.backend_name(), "qdrant");
    }
}
