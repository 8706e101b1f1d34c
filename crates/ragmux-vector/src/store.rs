//! Vector store trait and unified facade.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::TRACING_TARGET;
use crate::config::VectorStoreConfig;
use crate::error::{VectorError, VectorResult};
use crate::qdrant::QdrantBackend;
use crate::weaviate::WeaviateBackend;

/// Default settle delay applied before searches.
///
/// Both supported backends index writes asynchronously; the delay reduces
/// (but cannot eliminate) the chance that a search misses a recent upsert.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_secs(1);

/// Default bound on a single backend operation.
pub const DEFAULT_OPERATION_TIMEOUT: Duration = Duration::from_secs(30);

/// Vector data to be stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorData {
    /// Unique identifier for the vector.
    pub id: String,
    /// The embedding vector.
    pub vector: Vec<f32>,
    /// Optional metadata.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, serde_json::Value>,
}

impl VectorData {
    /// Creates a new vector data with an ID and embedding.
    pub fn new(id: impl Into<String>, vector: Vec<f32>) -> Self {
        Self {
            id: id.into(),
            vector,
            metadata: HashMap::new(),
        }
    }

    /// Adds a single metadata field.
    pub fn with_field(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }

    /// Returns the `"text"` metadata field, if present.
    pub fn text(&self) -> Option<&str> {
        self.metadata.get("text").and_then(|v| v.as_str())
    }
}

/// Search result from a vector query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    /// Vector ID.
    pub id: String,
    /// Similarity score (higher is more similar).
    pub score: f32,
    /// Associated metadata.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, serde_json::Value>,
}

impl SearchResult {
    /// Returns the `"text"` metadata field, if present.
    pub fn text(&self) -> Option<&str> {
        self.metadata.get("text").and_then(|v| v.as_str())
    }
}

/// Trait for vector store backends.
///
/// All backends use cosine similarity and expose identical semantics so
/// callers stay backend-agnostic.
#[async_trait]
pub trait VectorStoreBackend: Send + Sync {
    /// Ensures a collection exists, creating it if necessary.
    ///
    /// Idempotent and race-tolerant: a concurrent create by another caller
    /// is treated as success. Fails with [`VectorError::DimensionMismatch`]
    /// if an existing collection has an incompatible dimensionality (where
    /// the backend exposes its collection configuration).
    async fn ensure_collection(&self, name: &str, dimensions: usize) -> VectorResult<()>;

    /// Checks if a collection exists.
    async fn collection_exists(&self, name: &str) -> VectorResult<bool>;

    /// Upserts vectors into a collection.
    ///
    /// The write may be indexed asynchronously by the service; visibility
    /// to subsequent searches is eventual.
    async fn upsert(&self, collection: &str, vectors: Vec<VectorData>) -> VectorResult<()>;

    /// Searches for the nearest neighbors of `query`.
    ///
    /// Results are ordered by descending similarity. Fails with
    /// [`VectorError::CollectionNotFound`] if the collection does not exist.
    async fn search(
        &self,
        collection: &str,
        query: Vec<f32>,
        limit: usize,
    ) -> VectorResult<Vec<SearchResult>>;
}

/// Unified vector store that wraps backend implementations.
pub struct VectorStore {
    backend_name: &'static str,
    backend: Box<dyn VectorStoreBackend>,
    settle_delay: Duration,
    operation_timeout: Duration,
}

impl VectorStore {
    /// Creates a new vector store from configuration.
    pub async fn connect(config: VectorStoreConfig) -> VectorResult<Self> {
        let backend_name = config.backend_name();
        let backend: Box<dyn VectorStoreBackend> = match config {
            VectorStoreConfig::Qdrant(cfg) => Box::new(QdrantBackend::new(&cfg).await?),
            VectorStoreConfig::Weaviate(cfg) => Box::new(WeaviateBackend::new(&cfg)?),
        };

        tracing::info!(
            target: TRACING_TARGET,
            backend = %backend_name,
            "Vector store initialized"
        );

        Ok(Self {
            backend_name,
            backend,
            settle_delay: DEFAULT_SETTLE_DELAY,
            operation_timeout: DEFAULT_OPERATION_TIMEOUT,
        })
    }

    /// Wraps an already constructed backend.
    pub fn from_backend(
        backend_name: &'static str,
        backend: Box<dyn VectorStoreBackend>,
    ) -> Self {
        Self {
            backend_name,
            backend,
            settle_delay: DEFAULT_SETTLE_DELAY,
            operation_timeout: DEFAULT_OPERATION_TIMEOUT,
        }
    }

    /// Sets the settle delay applied before every search.
    ///
    /// A zero duration disables the delay entirely.
    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    /// Sets the bound on a single backend operation.
    pub fn with_operation_timeout(mut self, timeout: Duration) -> Self {
        self.operation_timeout = timeout;
        self
    }

    /// Returns the backend name.
    pub fn backend_name(&self) -> &'static str {
        self.backend_name
    }

    /// Returns the configured settle delay.
    pub fn settle_delay(&self) -> Duration {
        self.settle_delay
    }

    /// Ensures a collection exists, creating it if necessary.
    pub async fn ensure_collection(&self, name: &str, dimensions: usize) -> VectorResult<()> {
        tracing::debug!(
            target: TRACING_TARGET,
            collection = %name,
            dimensions = %dimensions,
            "Ensuring collection"
        );
        self.bounded(self.backend.ensure_collection(name, dimensions))
            .await
    }

    /// Checks if a collection exists.
    pub async fn collection_exists(&self, name: &str) -> VectorResult<bool> {
        self.bounded(self.backend.collection_exists(name)).await
    }

    /// Upserts vectors into a collection.
    pub async fn upsert(&self, collection: &str, vectors: Vec<VectorData>) -> VectorResult<()> {
        tracing::debug!(
            target: TRACING_TARGET,
            collection = %collection,
            count = %vectors.len(),
            "Upserting vectors"
        );
        self.bounded(self.backend.upsert(collection, vectors)).await
    }

    /// Searches for similar vectors.
    ///
    /// Waits for the configured settle delay first, then queries the
    /// backend. The delay is a bounded pause, not a retry loop; a write
    /// that has not been indexed when it elapses is still missed.
    pub async fn search(
        &self,
        collection: &str,
        query: Vec<f32>,
        limit: usize,
    ) -> VectorResult<Vec<SearchResult>> {
        if !self.settle_delay.is_zero() {
            tokio::time::sleep(self.settle_delay).await;
        }

        tracing::debug!(
            target: TRACING_TARGET,
            collection = %collection,
            limit = %limit,
            "Searching vectors"
        );
        self.bounded(self.backend.search(collection, query, limit))
            .await
    }

    /// Bounds a backend operation by the configured timeout.
    async fn bounded<T>(
        &self,
        operation: impl Future<Output = VectorResult<T>> + Send,
    ) -> VectorResult<T> {
        tokio::time::timeout(self.operation_timeout, operation)
            .await
            .map_err(|_| {
                VectorError::timeout(format!(
                    "{} operation exceeded {:?}",
                    self.backend_name, self.operation_timeout
                ))
            })?
    }
}

impl std::fmt::Debug for VectorStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VectorStore")
            .field("backend", &self.backend_name)
            .field("settle_delay", &self.settle_delay)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::memory::MemoryBackend;

    fn store() -> VectorStore {
        VectorStore::from_backend("memory", Box::new(MemoryBackend::new()))
            .with_settle_delay(Duration::ZERO)
    }

    fn data(id: &str, vector: Vec<f32>, text: &str) -> VectorData {
        VectorData::new(id, vector).with_field("text", serde_json::json!(text))
    }

    #[tokio::test]
    async fn ensure_collection_is_idempotent() {
        let store = store();

        store.ensure_collection("notes", 3).await.unwrap();
        store.ensure_collection("notes", 3).await.unwrap();

        assert!(store.collection_exists("notes").await.unwrap());
    }

    #[tokio::test]
    async fn ensure_collection_rejects_incompatible_dimensions() {
        let store = store();
        store.ensure_collection("notes", 3).await.unwrap();

        let err = store.ensure_collection("notes", 4).await.unwrap_err();
        assert!(matches!(
            err,
            VectorError::DimensionMismatch {
                expected: 3,
                actual: 4
            }
        ));
    }

    #[tokio::test]
    async fn upsert_then_search_returns_top_match() {
        let store = store();
        store.ensure_collection("notes", 2).await.unwrap();

        store
            .upsert(
                "notes",
                vec![
                    data("a", vec![1.0, 0.0], "hello world"),
                    data("b", vec![0.0, 1.0], "unrelated"),
                ],
            )
            .await
            .unwrap();

        let results = store.search("notes", vec![1.0, 0.1], 1).await.unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, "a");
        assert_eq!(results[0].text(), Some("hello world"));
    }

    #[tokio::test]
    async fn search_orders_by_descending_similarity() {
        let store = store();
        store.ensure_collection("notes", 2).await.unwrap();

        store
            .upsert(
                "notes",
                vec![
                    data("far", vec![0.0, 1.0], "far"),
                    data("near", vec![1.0, 0.0], "near"),
                    data("middle", vec![1.0, 1.0], "middle"),
                ],
            )
            .await
            .unwrap();

        let results = store.search("notes", vec![1.0, 0.0], 3).await.unwrap();
        let ids: Vec<_> = results.iter().map(|r| r.id.as_str()).collect();

        assert_eq!(ids, ["near", "middle", "far"]);
    }

    #[tokio::test]
    async fn search_on_empty_collection_returns_no_results() {
        let store = store();
        store.ensure_collection("empty", 2).await.unwrap();

        let results = store.search("empty", vec![1.0, 0.0], 10).await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn search_on_missing_collection_fails() {
        let store = store();

        let err = store.search("missing", vec![1.0, 0.0], 1).await.unwrap_err();
        assert!(matches!(err, VectorError::CollectionNotFound(_)));
    }

    #[tokio::test]
    async fn settle_delay_elapses_before_search() {
        let store = VectorStore::from_backend("memory", Box::new(MemoryBackend::new()))
            .with_settle_delay(Duration::from_millis(20));
        store.ensure_collection("notes", 2).await.unwrap();
        store
            .upsert("notes", vec![data("a", vec![1.0, 0.0], "hello world")])
            .await
            .unwrap();

        let started = std::time::Instant::now();
        let results = store.search("notes", vec![1.0, 0.0], 1).await.unwrap();

        assert!(started.elapsed() >= Duration::from_millis(20));
        assert_eq!(results[0].id, "a");
    }

    #[tokio::test]
    async fn upsert_rejects_mismatched_vector_length() {
        let store = store();
        store.ensure_collection("notes", 3).await.unwrap();

        let err = store
            .upsert("notes", vec![data("a", vec![1.0, 0.0], "short")])
            .await
            .unwrap_err();
        assert!(matches!(err, VectorError::DimensionMismatch { .. }));
    }
}
