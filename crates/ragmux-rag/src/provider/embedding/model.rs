//! Type-safe embedding model references.

use serde::{Deserialize, Serialize};

/// OpenAI embedding models.
///
/// The dimensionality is fixed per model and determines the configuration
/// of every collection indexed with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OpenAiEmbeddingModel {
    /// text-embedding-ada-002 (legacy, 1536 dimensions)
    #[serde(rename = "text-embedding-ada-002")]
    TextEmbeddingAda002,
    /// text-embedding-3-small (1536 dimensions)
    TextEmbedding3Small,
    /// text-embedding-3-large (3072 dimensions)
    TextEmbedding3Large,
}

impl OpenAiEmbeddingModel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TextEmbeddingAda002 => "text-embedding-ada-002",
            Self::TextEmbedding3Small => "text-embedding-3-small",
            Self::TextEmbedding3Large => "text-embedding-3-large",
        }
    }

    pub fn dimensions(&self) -> usize {
        match self {
            Self::TextEmbeddingAda002 | Self::TextEmbedding3Small => 1536,
            Self::TextEmbedding3Large => 3072,
        }
    }
}

impl Default for OpenAiEmbeddingModel {
    fn default() -> Self {
        Self::TextEmbeddingAda002
    }
}

impl AsRef<str> for OpenAiEmbeddingModel {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_names_serialize_as_kebab_case() {
        let json = serde_json::to_string(&OpenAiEmbeddingModel::TextEmbeddingAda002).unwrap();
        assert_eq!(json, "\"text-embedding-ada-002\"");
    }

    #[test]
    fn default_model_matches_its_dimensions() {
        let model = OpenAiEmbeddingModel::default();
        assert_eq!(model.as_str(), "text-embedding-ada-002");
        assert_eq!(model.dimensions(), 1536);
    }
}
