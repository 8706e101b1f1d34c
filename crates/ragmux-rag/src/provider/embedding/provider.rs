//! Embedding provider abstraction.

use std::sync::Arc;
use std::time::Duration;

use ragmux_core::Provider;
use rig::embeddings::EmbeddingModel as RigEmbeddingModel;
use rig::prelude::EmbeddingsClient;
use rig::providers::openai;

use super::model::OpenAiEmbeddingModel;
use crate::error::classify_provider_error;
use crate::provider::OpenAiCredentials;
use crate::{Error, Result, TRACING_TARGET};

/// Default bound on a single embedding request.
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Embedding provider wrapping the rig OpenAI embedding model.
///
/// This is a cheaply cloneable wrapper around an `Arc`'d service. Every
/// call re-embeds; there is no caching and no retry.
#[derive(Clone)]
pub struct EmbeddingProvider {
    inner: Arc<EmbeddingService>,
    request_timeout: Duration,
}

struct EmbeddingService {
    model: openai::EmbeddingModel,
    model_name: &'static str,
    dimensions: usize,
}

impl EmbeddingProvider {
    /// Creates a new embedding provider.
    pub fn new(model: OpenAiEmbeddingModel, credentials: &OpenAiCredentials) -> Result<Self> {
        let client = openai::Client::new(&credentials.api_key)
            .map_err(|e| Error::provider("openai", e.to_string()))?;

        Ok(Self {
            inner: Arc::new(EmbeddingService {
                model: client.embedding_model_with_ndims(model.as_str(), model.dimensions()),
                model_name: model.as_str(),
                dimensions: model.dimensions(),
            }),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        })
    }

    /// Sets the bound on a single embedding request.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Returns the model name.
    pub fn model_name(&self) -> &'static str {
        self.inner.model_name
    }

    /// Returns the model's native output dimensionality.
    pub fn dimensions(&self) -> usize {
        self.inner.dimensions
    }

    /// Embeds a single text document.
    pub async fn embed_text(&self, text: &str) -> Result<Vec<f32>> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(Error::invalid_input("cannot embed empty text"));
        }

        tracing::debug!(
            target: TRACING_TARGET,
            model = %self.inner.model_name,
            chars = %trimmed.len(),
            "Embedding text"
        );

        let embedding = tokio::time::timeout(
            self.request_timeout,
            self.inner.model.embed_text(trimmed),
        )
        .await
        .map_err(|_| Error::timeout(format!("embedding request exceeded {:?}", self.request_timeout)))?
        .map_err(|e| classify_provider_error("openai", e.to_string()))?;

        Ok(embedding.vec.into_iter().map(|v| v as f32).collect())
    }

    /// Embeds multiple text documents, preserving input order.
    pub async fn embed_texts(
        &self,
        texts: impl IntoIterator<Item = String> + Send,
    ) -> Result<Vec<Vec<f32>>> {
        let documents: Vec<String> = texts.into_iter().collect();
        if documents.iter().any(|d| d.trim().is_empty()) {
            return Err(Error::invalid_input("cannot embed empty text"));
        }
        if documents.is_empty() {
            return Ok(Vec::new());
        }

        tracing::debug!(
            target: TRACING_TARGET,
            model = %self.inner.model_name,
            count = %documents.len(),
            "Embedding documents"
        );

        let embeddings = tokio::time::timeout(
            self.request_timeout,
            self.inner.model.embed_texts(documents),
        )
        .await
        .map_err(|_| Error::timeout(format!("embedding request exceeded {:?}", self.request_timeout)))?
        .map_err(|e| classify_provider_error("openai", e.to_string()))?;

        Ok(embeddings
            .into_iter()
            .map(|embedding| embedding.vec.into_iter().map(|v| v as f32).collect())
            .collect())
    }
}

#[async_trait::async_trait]
impl Provider for EmbeddingProvider {
    type Params = OpenAiEmbeddingModel;
    type Credentials = OpenAiCredentials;

    async fn connect(
        params: Self::Params,
        credentials: Self::Credentials,
    ) -> ragmux_core::Result<Self> {
        Ok(Self::new(params, &credentials)?)
    }
}

impl std::fmt::Debug for EmbeddingProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmbeddingProvider")
            .field("model", &self.inner.model_name)
            .field("ndims", &self.inner.dimensions)
            .finish()
    }
}
