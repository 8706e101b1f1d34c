//! RAG pipeline configuration.

use std::time::Duration;

use crate::provider::{OpenAiCompletionModel, OpenAiEmbeddingModel};

/// Configuration for the RAG pipeline.
#[derive(Debug, Clone)]
pub struct RagConfig {
    /// Number of nearest neighbors retrieved per query.
    pub top_k: usize,
    /// Maximum words per ingested chunk.
    pub word_limit: usize,
    /// Pause before every search, giving asynchronous indexing a chance
    /// to apply recent writes. Zero disables it.
    pub settle_delay: Duration,
    /// Bound on a single remote call (embedding, completion, index).
    pub request_timeout: Duration,
    /// Embedding model; fixes the dimensionality of indexed collections.
    pub embedding_model: OpenAiEmbeddingModel,
    /// Chat completion model used for answer generation.
    pub completion_model: OpenAiCompletionModel,
}

impl RagConfig {
    /// Sets the number of retrieved neighbors.
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Sets the chunk word limit.
    pub fn with_word_limit(mut self, word_limit: usize) -> Self {
        self.word_limit = word_limit;
        self
    }

    /// Sets the settle delay.
    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    /// Sets the remote call timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Sets the embedding model.
    pub fn with_embedding_model(mut self, model: OpenAiEmbeddingModel) -> Self {
        self.embedding_model = model;
        self
    }

    /// Sets the completion model.
    pub fn with_completion_model(mut self, model: OpenAiCompletionModel) -> Self {
        self.completion_model = model;
        self
    }
}

impl Default for RagConfig {
    fn default() -> Self {
        Self {
            top_k: 10,
            word_limit: 200,
            settle_delay: Duration::from_secs(1),
            request_timeout: Duration::from_secs(30),
            embedding_model: OpenAiEmbeddingModel::default(),
            completion_model: OpenAiCompletionModel::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_documented_knobs() {
        let config = RagConfig::default();

        assert_eq!(config.top_k, 10);
        assert_eq!(config.word_limit, 200);
        assert_eq!(config.settle_delay, Duration::from_secs(1));
        assert_eq!(config.embedding_model.dimensions(), 1536);
    }
}
