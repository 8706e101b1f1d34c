//! Provider creation trait.

use crate::Result;

/// Trait for creating a provider from parameters and credentials.
///
/// This trait bridges non-sensitive parameters (like collection name or
/// model) with sensitive credentials (like API keys) to construct a fully
/// configured provider instance.
///
/// # Type Parameters
///
/// - `Params`: Non-sensitive configuration (e.g., model name, endpoint)
/// - `Credentials`: Sensitive authentication data (e.g., API keys)
#[async_trait::async_trait]
pub trait Provider: Send {
    /// Non-sensitive parameters (endpoint, collection, model, etc.).
    type Params: Send;
    /// Sensitive credentials (API keys, secrets, etc.).
    type Credentials: Send;

    /// Creates a new provider from parameters and credentials.
    async fn connect(params: Self::Params, credentials: Self::Credentials) -> Result<Self>
    where
        Self: Sized;
}
