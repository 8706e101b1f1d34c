//! Error types for ragmux-rag.

use std::fmt;

use ragmux_vector::VectorError;
use uuid::Uuid;

/// Result type alias for RAG operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during RAG operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Input validation failed before any remote call.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Provider error (API call failed, auth rejected, etc.)
    #[error("provider error: {provider}: {message}")]
    Provider { provider: String, message: String },

    /// Provider signaled throttling.
    #[error("rate limited by provider: {provider}")]
    RateLimited { provider: String },

    /// A remote call exceeded its configured bound.
    #[error("timeout: {0}")]
    Timeout(String),

    /// Session error (malformed record, store failure, etc.)
    #[error("session error: {0}")]
    Session(String),

    /// Unknown session identifier.
    #[error("session not found: {0}")]
    SessionNotFound(Uuid),

    /// Vector index error.
    #[error("vector store error: {0}")]
    Vector(#[from] VectorError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Creates an invalid input error.
    pub fn invalid_input(message: impl fmt::Display) -> Self {
        Self::InvalidInput(message.to_string())
    }

    /// Creates a provider error.
    pub fn provider(provider: impl fmt::Display, message: impl fmt::Display) -> Self {
        Self::Provider {
            provider: provider.to_string(),
            message: message.to_string(),
        }
    }

    /// Creates a rate limited error.
    pub fn rate_limited(provider: impl fmt::Display) -> Self {
        Self::RateLimited {
            provider: provider.to_string(),
        }
    }

    /// Creates a timeout error.
    pub fn timeout(message: impl fmt::Display) -> Self {
        Self::Timeout(message.to_string())
    }

    /// Creates a session error.
    pub fn session(message: impl fmt::Display) -> Self {
        Self::Session(message.to_string())
    }

    /// Creates a configuration error.
    pub fn config(message: impl fmt::Display) -> Self {
        Self::Config(message.to_string())
    }

    /// Returns true if retrying the operation could succeed.
    ///
    /// No retry is performed inside the pipeline; this informs callers
    /// that choose to retry with backoff.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Provider { .. }
                | Self::RateLimited { .. }
                | Self::Timeout(_)
                | Self::Vector(VectorError::Connection(_) | VectorError::Timeout(_))
        )
    }
}

/// Classifies a provider failure, separating throttling from other errors.
pub(crate) fn classify_provider_error(provider: &str, message: String) -> Error {
    let lowered = message.to_lowercase();
    if lowered.contains("429") || lowered.contains("rate limit") {
        Error::rate_limited(provider)
    } else {
        Error::provider(provider, message)
    }
}

impl From<Error> for ragmux_core::Error {
    fn from(err: Error) -> Self {
        let kind = match &err {
            Error::InvalidInput(_) => ragmux_core::ErrorKind::InvalidInput,
            Error::Provider { .. } => ragmux_core::ErrorKind::ProviderUnavailable,
            Error::RateLimited { .. } => ragmux_core::ErrorKind::RateLimited,
            Error::Timeout(_) | Error::Vector(VectorError::Timeout(_)) => {
                ragmux_core::ErrorKind::Timeout
            }
            Error::SessionNotFound(_) | Error::Vector(VectorError::CollectionNotFound(_)) => {
                ragmux_core::ErrorKind::NotFound
            }
            Error::Vector(VectorError::DimensionMismatch { .. }) => {
                ragmux_core::ErrorKind::SchemaConflict
            }
            Error::Vector(VectorError::Authentication(_)) => {
                ragmux_core::ErrorKind::ProviderUnavailable
            }
            Error::Vector(_) => ragmux_core::ErrorKind::ProviderUnavailable,
            Error::Session(_) => ragmux_core::ErrorKind::Internal,
            Error::Config(_) => ragmux_core::ErrorKind::Configuration,
            Error::Serialization(_) => ragmux_core::ErrorKind::Serialization,
        };

        ragmux_core::Error::new(kind)
            .with_message(err.to_string())
            .with_source(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn throttling_messages_classify_as_rate_limited() {
        let err = classify_provider_error("openai", "HTTP 429 Too Many Requests".into());
        assert!(matches!(err, Error::RateLimited { .. }));

        let err = classify_provider_error("openai", "connection refused".into());
        assert!(matches!(err, Error::Provider { .. }));
    }

    #[test]
    fn not_found_errors_map_to_not_found_kind() {
        let err = Error::SessionNotFound(Uuid::new_v4());
        let core: ragmux_core::Error = err.into();
        assert_eq!(core.kind(), ragmux_core::ErrorKind::NotFound);

        let err = Error::from(VectorError::collection_not_found("notes"));
        let core: ragmux_core::Error = err.into();
        assert_eq!(core.kind(), ragmux_core::ErrorKind::NotFound);
    }

    #[test]
    fn dimension_mismatch_maps_to_schema_conflict() {
        let err = Error::from(VectorError::dimension_mismatch(1536, 3072));
        let core: ragmux_core::Error = err.into();
        assert_eq!(core.kind(), ragmux_core::ErrorKind::SchemaConflict);
    }
}
