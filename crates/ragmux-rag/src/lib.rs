#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod error;
pub mod provider;
pub mod rag;
pub mod session;

pub use error::{Error, Result};
pub use rag::{Chunker, RagAnswer, RagConfig, RagService, RetrievedChunk};
pub use session::{MemorySessionStore, SessionRecord, SessionStore};

/// Tracing target for the main library.
pub const TRACING_TARGET: &str = "ragmux_rag";
