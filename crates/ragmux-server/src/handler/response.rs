//! Response types for HTTP handlers.

use ragmux_rag::RetrievedChunk;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A newly provisioned session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionCreated {
    /// Opaque session identifier for subsequent requests.
    pub rag_id: Uuid,
}

/// Acknowledges indexed content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentIndexed {
    /// Session identifier.
    pub rag_id: Uuid,
    /// Number of chunks written to the index.
    pub chunks_indexed: usize,
}

/// A retrieval-augmented answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryAnswer {
    /// Session identifier.
    pub rag_id: Uuid,
    /// Generated answer text.
    pub answer: String,
    /// Supporting chunks in similarity order.
    pub chunks: Vec<RetrievedChunk>,
}

/// Chunked text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextChunks {
    /// Ordered chunks covering the input text.
    pub chunks: Vec<String>,
}

/// Liveness probe response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Health {
    /// Always `"ok"` when the process is serving.
    pub status: String,
}

/// Error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Machine-readable error kind.
    pub error: String,
    /// Human-readable message.
    pub message: String,
}
