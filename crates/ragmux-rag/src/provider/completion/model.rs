//! Type-safe completion model references.

use serde::{Deserialize, Serialize};

/// OpenAI chat completion models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OpenAiCompletionModel {
    /// gpt-4o
    Gpt4o,
    /// gpt-4o-mini
    Gpt4oMini,
    /// gpt-3.5-turbo (legacy)
    Gpt35Turbo,
}

impl OpenAiCompletionModel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gpt4o => "gpt-4o",
            Self::Gpt4oMini => "gpt-4o-mini",
            Self::Gpt35Turbo => "gpt-3.5-turbo",
        }
    }
}

impl Default for OpenAiCompletionModel {
    fn default() -> Self {
        Self::Gpt4oMini
    }
}

impl AsRef<str> for OpenAiCompletionModel {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}
