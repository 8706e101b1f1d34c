//! Weaviate configuration.

use serde::{Deserialize, Serialize};

/// Weaviate configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaviateConfig {
    /// Weaviate cluster URL (REST endpoint).
    pub url: String,
    /// API key (optional for unsecured deployments).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

impl WeaviateConfig {
    /// Creates a new Weaviate configuration.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            api_key: None,
        }
    }

    /// Sets the API key.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }
}
