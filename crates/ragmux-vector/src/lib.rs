#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

pub mod qdrant;
pub mod weaviate;

#[cfg(any(test, feature = "test-utils"))]
pub mod memory;

mod config;
mod error;
mod store;

pub use config::{QdrantConfig, VectorStoreConfig, WeaviateConfig};
pub use error::{VectorError, VectorResult};
pub use store::{SearchResult, VectorData, VectorStore, VectorStoreBackend};

/// Tracing target for vector store operations.
pub const TRACING_TARGET: &str = "ragmux_vector";
