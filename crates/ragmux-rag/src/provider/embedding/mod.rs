//! Embedding models and providers.

mod model;
mod provider;

pub use model::OpenAiEmbeddingModel;
pub use provider::EmbeddingProvider;
