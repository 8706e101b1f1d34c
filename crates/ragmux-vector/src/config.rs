//! Vector store configuration types.

use serde::{Deserialize, Serialize};

// Re-export configs from backend modules
pub use crate::qdrant::QdrantConfig;
pub use crate::weaviate::WeaviateConfig;

/// Vector store backend configuration.
///
/// The variant selects the wire protocol; both backends satisfy the same
/// [`VectorStoreBackend`](crate::VectorStoreBackend) contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
#[non_exhaustive]
pub enum VectorStoreConfig {
    /// Qdrant vector database.
    Qdrant(QdrantConfig),
    /// Weaviate vector database.
    Weaviate(WeaviateConfig),
}

impl VectorStoreConfig {
    /// Returns the backend name as a static string.
    pub fn backend_name(&self) -> &'static str {
        match self {
            Self::Qdrant(_) => "qdrant",
            Self::Weaviate(_) => "weaviate",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_round_trips_through_tagged_json() {
        let config = VectorStoreConfig::Weaviate(
            WeaviateConfig::new("https://cluster.weaviate.network").with_api_key("wv-key"),
        );

        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["type"], "weaviate");

        let parsed: VectorStoreConfig = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, config);
        assert_eq!(parsed.backend_name(), "weaviate");
    }

    #[test]
    fn qdrant_config_parses_without_api_key() {
        let parsed: VectorStoreConfig =
            serde_json::from_str(r#"{"type": "qdrant", "url": "http://localhost:6334"}"#).unwrap();

        assert_eq!(parsed.backend_name(), "qdrant");
        let VectorStoreConfig::Qdrant(config) = parsed else {
            panic!("expected qdrant config");
        };
        assert!(config.api_key.is_none());
    }
}
