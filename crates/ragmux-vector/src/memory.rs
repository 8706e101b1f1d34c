//! In-memory vector store backend for testing.
//!
//! Implements the full [`VectorStoreBackend`] contract over a process-local
//! map, including the dimension checks the remote backends enforce. Unlike
//! the remote backends, writes are immediately visible to searches.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::{VectorError, VectorResult};
use crate::store::{SearchResult, VectorData, VectorStoreBackend};

/// In-memory backend implementation.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    collections: RwLock<HashMap<String, Collection>>,
}

#[derive(Debug)]
struct Collection {
    dimensions: usize,
    vectors: Vec<VectorData>,
}

impl MemoryBackend {
    /// Creates a new, empty backend.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VectorStoreBackend for MemoryBackend {
    async fn ensure_collection(&self, name: &str, dimensions: usize) -> VectorResult<()> {
        let mut collections = self.collections.write().await;

        if let Some(existing) = collections.get(name) {
            if existing.dimensions != dimensions {
                return Err(VectorError::dimension_mismatch(
                    existing.dimensions,
                    dimensions,
                ));
            }
            return Ok(());
        }

        collections.insert(
            name.to_owned(),
            Collection {
                dimensions,
                vectors: Vec::new(),
            },
        );
        Ok(())
    }

    async fn collection_exists(&self, name: &str) -> VectorResult<bool> {
        Ok(self.collections.read().await.contains_key(name))
    }

    async fn upsert(&self, collection: &str, vectors: Vec<VectorData>) -> VectorResult<()> {
        let mut collections = self.collections.write().await;
        let entry = collections
            .get_mut(collection)
            .ok_or_else(|| VectorError::collection_not_found(collection))?;

        for vector in vectors {
            if vector.vector.len() != entry.dimensions {
                return Err(VectorError::dimension_mismatch(
                    entry.dimensions,
                    vector.vector.len(),
                ));
            }
            entry.vectors.retain(|existing| existing.id != vector.id);
            entry.vectors.push(vector);
        }
        Ok(())
    }

    async fn search(
        &self,
        collection: &str,
        query: Vec<f32>,
        limit: usize,
    ) -> VectorResult<Vec<SearchResult>> {
        let collections = self.collections.read().await;
        let entry = collections
            .get(collection)
            .ok_or_else(|| VectorError::collection_not_found(collection))?;

        if query.len() != entry.dimensions {
            return Err(VectorError::dimension_mismatch(
                entry.dimensions,
                query.len(),
            ));
        }

        let mut scored: Vec<SearchResult> = entry
            .vectors
            .iter()
            .map(|data| SearchResult {
                id: data.id.clone(),
                score: cosine_similarity(&query, &data.vector),
                metadata: data.metadata.clone(),
            })
            .collect();

        scored.sort_by(|a, b| b.score.total_cmp(&a.score));
        scored.truncate(limit);
        Ok(scored)
    }
}

fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cosine_similarity_of_parallel_vectors_is_one() {
        let similarity = cosine_similarity(&[1.0, 2.0], &[2.0, 4.0]);
        assert!((similarity - 1.0).abs() < 1e-6);
    }

    #[test]
    fn cosine_similarity_of_orthogonal_vectors_is_zero() {
        let similarity = cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]);
        assert!(similarity.abs() < 1e-6);
    }

    #[tokio::test]
    async fn upsert_replaces_existing_id() {
        let backend = MemoryBackend::new();
        backend.ensure_collection("notes", 2).await.unwrap();

        backend
            .upsert("notes", vec![VectorData::new("a", vec![1.0, 0.0])])
            .await
            .unwrap();
        backend
            .upsert("notes", vec![VectorData::new("a", vec![0.0, 1.0])])
            .await
            .unwrap();

        let results = backend.search("notes", vec![0.0, 1.0], 10).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, "a");
    }
}
