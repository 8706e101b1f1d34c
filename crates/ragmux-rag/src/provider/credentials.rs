//! Provider credentials.

use serde::{Deserialize, Serialize};

/// OpenAI API credentials.
///
/// The same key authenticates both the embedding and the completion API.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenAiCredentials {
    /// API key.
    pub api_key: String,
}

impl OpenAiCredentials {
    /// Creates new credentials from an API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
        }
    }
}

// Keys must not leak into logs or error chains.
impl std::fmt::Debug for OpenAiCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiCredentials")
            .field("api_key", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_redacts_the_key() {
        let credentials = OpenAiCredentials::new("sk-secret");
        let rendered = format!("{credentials:?}");

        assert!(!rendered.contains("sk-secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
