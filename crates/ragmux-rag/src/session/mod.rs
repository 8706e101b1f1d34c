//! Per-tenant session records and the metadata store boundary.
//!
//! A session binds an opaque `rag_id` to the vector index credentials and
//! target collection of one tenant. Records are immutable once created;
//! the only lifecycle transitions are creation and deletion.

mod record;
mod store;

pub use record::SessionRecord;
pub use store::{MemorySessionStore, SessionStore};
