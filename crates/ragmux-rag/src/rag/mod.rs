//! Retrieval-augmented generation pipeline.
//!
//! # Modules
//!
//! - [`chunker`] - Word-window text splitting for ingestion
//! - [`config`] - Pipeline configuration knobs
//!
//! The [`RagService`] orchestrator composes the embedding provider, the
//! completion provider, and the vector store for a single session.
//! Ingestion chunks the text, embeds each chunk, and upserts the vectors;
//! answering embeds the query, searches the index, and feeds the retrieved
//! chunks to the completion model as grounding context.

mod chunker;
mod config;

use std::sync::Arc;

use ragmux_vector::{SearchResult, VectorData, VectorStore};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use self::chunker::Chunker;
pub use self::config::RagConfig;
use crate::provider::{CompletionProvider, EmbeddingProvider, OpenAiCredentials};
use crate::session::SessionRecord;
use crate::{Result, TRACING_TARGET};

/// A retrieved chunk supporting a generated answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievedChunk {
    /// Chunk identifier in the vector index.
    pub id: String,
    /// Original chunk text.
    pub text: String,
    /// Similarity score (higher is more similar).
    pub score: f32,
}

impl From<SearchResult> for RetrievedChunk {
    fn from(result: SearchResult) -> Self {
        let text = result.text().unwrap_or_default().to_owned();
        Self {
            id: result.id,
            text,
            score: result.score,
        }
    }
}

/// The result of a retrieval-augmented query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RagAnswer {
    /// Generated answer text.
    pub answer: String,
    /// Supporting chunks in similarity order.
    pub chunks: Vec<RetrievedChunk>,
}

/// Per-session RAG pipeline.
///
/// A service instance is scoped to one request flow: [`RagService::connect`]
/// acquires provider and index handles for a session record, and dropping
/// the service releases them. Nothing is cached across requests, so
/// credential changes in the session store take effect on the next request.
///
/// The service is cheap to clone within a request.
#[derive(Clone)]
pub struct RagService {
    inner: Arc<RagServiceInner>,
}

struct RagServiceInner {
    embedding: EmbeddingProvider,
    completion: CompletionProvider,
    store: VectorStore,
    chunker: Chunker,
    collection: String,
    config: RagConfig,
}

impl RagService {
    /// Connects providers and the vector store for one session.
    pub async fn connect(record: &SessionRecord, config: RagConfig) -> Result<Self> {
        let credentials = OpenAiCredentials::new(&record.embedding_api_key);

        let embedding = EmbeddingProvider::new(config.embedding_model, &credentials)?
            .with_request_timeout(config.request_timeout);
        let completion = CompletionProvider::new(config.completion_model, &credentials)?
            .with_request_timeout(config.request_timeout);
        let store = VectorStore::connect(record.vector.clone())
            .await?
            .with_settle_delay(config.settle_delay)
            .with_operation_timeout(config.request_timeout);
        let chunker = Chunker::new(config.word_limit)?;

        tracing::debug!(
            target: TRACING_TARGET,
            rag_id = %record.rag_id,
            backend = %store.backend_name(),
            collection = %record.collection,
            "RAG pipeline connected"
        );

        Ok(Self {
            inner: Arc::new(RagServiceInner {
                embedding,
                completion,
                store,
                chunker,
                collection: record.collection.clone(),
                config,
            }),
        })
    }

    /// Returns the configuration.
    pub fn config(&self) -> &RagConfig {
        &self.inner.config
    }

    /// Returns a reference to the chunker.
    pub fn chunker(&self) -> &Chunker {
        &self.inner.chunker
    }

    /// Splits text into ingestion-sized chunks without indexing them.
    pub fn chunk(&self, text: &str) -> Vec<String> {
        self.inner.chunker.split(text)
    }

    /// Chunks, embeds, and indexes `text` into the session's collection.
    ///
    /// Returns the number of chunks indexed. The collection is created on
    /// first use; the write becomes visible to searches eventually.
    pub async fn ingest(&self, text: &str) -> Result<usize> {
        if text.trim().is_empty() {
            return Err(crate::Error::invalid_input("cannot ingest empty text"));
        }

        let chunks = self.inner.chunker.split(text);
        let embeddings = self.inner.embedding.embed_texts(chunks.clone()).await?;
        let dimensions = self.inner.embedding.dimensions();

        let mut points = Vec::with_capacity(chunks.len());
        for (chunk, vector) in chunks.iter().zip(embeddings) {
            if vector.len() != dimensions {
                return Err(ragmux_vector::VectorError::dimension_mismatch(
                    dimensions,
                    vector.len(),
                )
                .into());
            }
            points.push(
                VectorData::new(Uuid::new_v4().to_string(), vector)
                    .with_field("text", serde_json::Value::String(chunk.clone())),
            );
        }

        self.inner
            .store
            .ensure_collection(&self.inner.collection, dimensions)
            .await?;
        self.inner.store.upsert(&self.inner.collection, points).await?;

        tracing::info!(
            target: TRACING_TARGET,
            collection = %self.inner.collection,
            chunks = %chunks.len(),
            "Text indexed"
        );

        Ok(chunks.len())
    }

    /// Answers `query` grounded in the most similar indexed chunks.
    ///
    /// An empty collection is not an error: generation proceeds with an
    /// empty context and the model typically reports it has no
    /// information.
    pub async fn answer(&self, prompt: &str, query: &str) -> Result<RagAnswer> {
        if query.trim().is_empty() {
            return Err(crate::Error::invalid_input("cannot answer an empty query"));
        }

        let query_vector = self.inner.embedding.embed_text(query).await?;

        // First reference to an absent collection creates it, so a query
        // against a freshly provisioned session finds an empty collection
        // rather than failing.
        self.inner
            .store
            .ensure_collection(&self.inner.collection, self.inner.embedding.dimensions())
            .await?;

        let results = self
            .inner
            .store
            .search(&self.inner.collection, query_vector, self.inner.config.top_k)
            .await?;

        let chunks: Vec<RetrievedChunk> = results.into_iter().map(Into::into).collect();

        tracing::debug!(
            target: TRACING_TARGET,
            collection = %self.inner.collection,
            retrieved = %chunks.len(),
            "Generating grounded answer"
        );

        let system_context = grounding_context(prompt, &chunks);
        let answer = self.inner.completion.complete(&system_context, query).await?;

        Ok(RagAnswer { answer, chunks })
    }
}

impl std::fmt::Debug for RagService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RagService")
            .field("backend", &self.inner.store.backend_name())
            .field("collection", &self.inner.collection)
            .finish()
    }
}

/// Builds the system context for answer generation.
///
/// Retrieved chunks come first, in similarity order, followed by the
/// caller-supplied prompt, so the model treats the grounding as
/// background knowledge rather than instructions.
fn grounding_context(prompt: &str, chunks: &[RetrievedChunk]) -> String {
    let context = chunks
        .iter()
        .map(|chunk| chunk.text.as_str())
        .collect::<Vec<_>>()
        .join(" ");

    format!(
        "You are a knowledge assistant. Your task is to answer based on the \
         given context: {context} Prompt: {prompt}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(text: &str, score: f32) -> RetrievedChunk {
        RetrievedChunk {
            id: Uuid::new_v4().to_string(),
            text: text.to_owned(),
            score,
        }
    }

    #[test]
    fn context_preserves_similarity_order() {
        let chunks = [chunk("most relevant", 0.9), chunk("less relevant", 0.4)];
        let context = grounding_context("give answer", &chunks);

        let most = context.find("most relevant").unwrap();
        let less = context.find("less relevant").unwrap();
        assert!(most < less);
    }

    #[test]
    fn context_places_grounding_before_the_prompt() {
        let chunks = [chunk("background fact", 0.8)];
        let context = grounding_context("summarize the facts", &chunks);

        let grounding = context.find("background fact").unwrap();
        let prompt = context.find("summarize the facts").unwrap();
        assert!(grounding < prompt);
    }

    #[test]
    fn empty_retrieval_still_builds_a_context() {
        let context = grounding_context("give answer", &[]);

        assert!(context.contains("knowledge assistant"));
        assert!(context.contains("Prompt: give answer"));
    }

    #[test]
    fn retrieved_chunk_reads_text_from_payload() {
        let result = SearchResult {
            id: "a".into(),
            score: 0.7,
            metadata: [("text".to_owned(), serde_json::json!("hello world"))]
                .into_iter()
                .collect(),
        };

        let chunk = RetrievedChunk::from(result);
        assert_eq!(chunk.text, "hello world");
        assert_eq!(chunk.score, 0.7);
    }

    #[test]
    fn retrieved_chunk_tolerates_missing_payload() {
        let result = SearchResult {
            id: "a".into(),
            score: 0.1,
            metadata: Default::default(),
        };

        assert_eq!(RetrievedChunk::from(result).text, "");
    }
}
