//! Request types for HTTP handlers.

use ragmux_rag::SessionRecord;
use ragmux_vector::{QdrantConfig, VectorStoreConfig, WeaviateConfig};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

/// Selectable vector index backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VectorBackendKind {
    Qdrant,
    Weaviate,
}

/// Provisions a new RAG session.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateSession {
    /// Vector index backend to use for this session.
    pub backend: VectorBackendKind,
    /// Vector index service endpoint.
    #[validate(url)]
    pub endpoint: String,
    /// Vector index API key (omit for unsecured deployments).
    #[serde(default)]
    pub index_api_key: Option<String>,
    /// Embedding/completion provider API key.
    #[validate(length(min = 1))]
    pub embedding_api_key: String,
    /// Target collection name.
    #[validate(length(min = 1))]
    pub collection: String,
}

impl CreateSession {
    /// Converts the request into a session record with a fresh `rag_id`.
    pub fn into_record(self) -> SessionRecord {
        let vector = match self.backend {
            VectorBackendKind::Qdrant => {
                let mut config = QdrantConfig::new(self.endpoint);
                if let Some(api_key) = self.index_api_key {
                    config = config.with_api_key(api_key);
                }
                VectorStoreConfig::Qdrant(config)
            }
            VectorBackendKind::Weaviate => {
                let mut config = WeaviateConfig::new(self.endpoint);
                if let Some(api_key) = self.index_api_key {
                    config = config.with_api_key(api_key);
                }
                VectorStoreConfig::Weaviate(config)
            }
        };

        SessionRecord::new(vector, self.embedding_api_key, self.collection)
    }
}

/// Ingests one or more texts into a session's collection.
#[derive(Debug, Deserialize, Validate)]
pub struct IngestContent {
    /// Session identifier.
    pub rag_id: Uuid,
    /// Texts to chunk, embed, and index.
    #[validate(length(min = 1))]
    pub content: Vec<String>,
}

/// Asks a retrieval-augmented question.
#[derive(Debug, Deserialize, Validate)]
pub struct AskQuery {
    /// Session identifier.
    pub rag_id: Uuid,
    /// Query text.
    #[validate(length(min = 1))]
    pub query: String,
    /// Instruction prompt appended after the retrieved context.
    #[serde(default = "default_prompt")]
    pub prompt: String,
}

fn default_prompt() -> String {
    "give answer".to_owned()
}

/// Splits text into word-bounded chunks without indexing.
#[derive(Debug, Deserialize, Validate)]
pub struct SplitText {
    /// Text to split.
    #[validate(length(min = 1))]
    pub text: String,
    /// Maximum words per chunk.
    #[serde(default = "default_word_limit")]
    #[validate(range(min = 1))]
    pub word_limit: usize,
}

fn default_word_limit() -> usize {
    200
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_session_builds_the_selected_backend() {
        let request: CreateSession = serde_json::from_value(serde_json::json!({
            "backend": "weaviate",
            "endpoint": "https://cluster.weaviate.network",
            "index_api_key": "wv-key",
            "embedding_api_key": "sk-key",
            "collection": "notes",
        }))
        .unwrap();

        request.validate().unwrap();
        let record = request.into_record();

        assert_eq!(record.vector.backend_name(), "weaviate");
        assert_eq!(record.collection, "notes");
    }

    #[test]
    fn create_session_rejects_malformed_endpoints() {
        let request: CreateSession = serde_json::from_value(serde_json::json!({
            "backend": "qdrant",
            "endpoint": "not a url",
            "embedding_api_key": "sk-key",
            "collection": "notes",
        }))
        .unwrap();

        assert!(request.validate().is_err());
    }

    #[test]
    fn split_text_defaults_the_word_limit() {
        let request: SplitText =
            serde_json::from_value(serde_json::json!({ "text": "hello world" })).unwrap();

        request.validate().unwrap();
        assert_eq!(request.word_limit, 200);
    }

    #[test]
    fn split_text_rejects_zero_word_limit() {
        let request: SplitText = serde_json::from_value(serde_json::json!({
            "text": "hello world",
            "word_limit": 0,
        }))
        .unwrap();

        assert!(request.validate().is_err());
    }
}
