//! HTTP error handling.
//!
//! Pipeline errors propagate unchanged up to the handlers and are mapped
//! onto status codes here; nothing is retried or suppressed on the way.

use std::borrow::Cow;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::handler::response::ErrorResponse;

/// Result type alias for HTTP handlers.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Error categories exposed by the HTTP surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed or invalid request input.
    BadRequest,
    /// Unknown session or collection.
    NotFound,
    /// Stored schema is incompatible with the request.
    Conflict,
    /// Upstream provider signaled throttling.
    RateLimited,
    /// Upstream provider or index call failed.
    BadGateway,
    /// Upstream call exceeded its bound.
    Timeout,
    /// Internal server error.
    Internal,
}

impl ErrorKind {
    /// Returns the HTTP status code for this kind.
    pub const fn status(self) -> StatusCode {
        match self {
            Self::BadRequest => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Conflict => StatusCode::CONFLICT,
            Self::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            Self::BadGateway => StatusCode::BAD_GATEWAY,
            Self::Timeout => StatusCode::GATEWAY_TIMEOUT,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns the error kind as a string for response bodies.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BadRequest => "bad_request",
            Self::NotFound => "not_found",
            Self::Conflict => "conflict",
            Self::RateLimited => "rate_limited",
            Self::BadGateway => "bad_gateway",
            Self::Timeout => "timeout",
            Self::Internal => "internal",
        }
    }
}

/// The error type for HTTP handlers.
#[derive(Debug, Clone)]
#[must_use = "errors do nothing unless serialized"]
pub struct Error {
    kind: ErrorKind,
    message: Cow<'static, str>,
}

impl Error {
    /// Creates a new error with the specified kind and message.
    pub fn new(kind: ErrorKind, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Creates a bad request error.
    pub fn bad_request(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::BadRequest, message)
    }

    /// Creates a not found error for the given resource.
    pub fn not_found(resource: impl Into<Cow<'static, str>>) -> Self {
        let resource = resource.into();
        Self::new(ErrorKind::NotFound, format!("{resource} not found"))
    }

    /// Returns the error kind.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the error message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.kind.status();
        let body = ErrorResponse {
            error: self.kind.as_str().to_owned(),
            message: self.message.into_owned(),
        };
        (status, axum::Json(body)).into_response()
    }
}

impl From<ragmux_rag::Error> for Error {
    fn from(err: ragmux_rag::Error) -> Self {
        use ragmux_rag::Error as RagError;
        use ragmux_vector::VectorError;

        let kind = match &err {
            RagError::InvalidInput(_) => ErrorKind::BadRequest,
            RagError::SessionNotFound(_) => ErrorKind::NotFound,
            RagError::RateLimited { .. } => ErrorKind::RateLimited,
            RagError::Timeout(_) => ErrorKind::Timeout,
            RagError::Provider { .. } => ErrorKind::BadGateway,
            RagError::Vector(vector) => match vector {
                VectorError::CollectionNotFound(_) => ErrorKind::NotFound,
                VectorError::DimensionMismatch { .. } => ErrorKind::Conflict,
                VectorError::Timeout(_) => ErrorKind::Timeout,
                VectorError::InvalidConfig(_) => ErrorKind::BadRequest,
                _ => ErrorKind::BadGateway,
            },
            RagError::Session(_) | RagError::Config(_) | RagError::Serialization(_) => {
                ErrorKind::Internal
            }
        };

        Self::new(kind, err.to_string())
    }
}

impl From<validator::ValidationErrors> for Error {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::bad_request(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;

    #[test]
    fn kinds_map_to_expected_status_codes() {
        assert_eq!(ErrorKind::BadRequest.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ErrorKind::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(ErrorKind::Conflict.status(), StatusCode::CONFLICT);
        assert_eq!(ErrorKind::RateLimited.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(ErrorKind::Timeout.status(), StatusCode::GATEWAY_TIMEOUT);
    }

    #[test]
    fn unknown_sessions_become_not_found() {
        let err = Error::from(ragmux_rag::Error::SessionNotFound(Uuid::new_v4()));
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn dimension_conflicts_become_conflict() {
        let err = Error::from(ragmux_rag::Error::from(
            ragmux_vector::VectorError::dimension_mismatch(1536, 3072),
        ));
        assert_eq!(err.kind(), ErrorKind::Conflict);
    }

    #[test]
    fn provider_failures_become_bad_gateway() {
        let err = Error::from(ragmux_rag::Error::provider("openai", "boom"));
        assert_eq!(err.kind(), ErrorKind::BadGateway);
    }
}
