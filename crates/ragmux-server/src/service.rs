//! Shared service state for HTTP handlers.

use std::sync::Arc;

use ragmux_rag::{MemorySessionStore, RagConfig, SessionStore};

/// State shared across handlers.
///
/// Holds the session metadata store handle and the pipeline configuration
/// defaults. Provider and index clients are NOT held here; they are
/// acquired per request by the handlers.
#[derive(Clone)]
pub struct ServiceState {
    sessions: Arc<dyn SessionStore>,
    config: RagConfig,
}

impl ServiceState {
    /// Creates service state over an existing session store.
    pub fn new(sessions: Arc<dyn SessionStore>, config: RagConfig) -> Self {
        Self { sessions, config }
    }

    /// Creates service state with an in-process session store.
    pub fn in_memory(config: RagConfig) -> Self {
        Self::new(Arc::new(MemorySessionStore::new()), config)
    }

    /// Returns the session store.
    pub fn sessions(&self) -> &dyn SessionStore {
        self.sessions.as_ref()
    }

    /// Returns the pipeline configuration defaults.
    pub fn config(&self) -> &RagConfig {
        &self.config
    }
}

impl std::fmt::Debug for ServiceState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceState")
            .field("config", &self.config)
            .finish()
    }
}
