//! HTTP handlers.
//!
//! Each submodule owns one resource and exposes a `routes()` function;
//! [`routes`] merges them into the service router.

pub mod request;
pub mod response;

mod chunks;
mod documents;
mod monitors;
mod queries;
mod sessions;

use axum::Router;

use crate::service::ServiceState;

/// Returns a router with all routes registered.
pub fn routes(state: ServiceState) -> Router {
    Router::new()
        .merge(chunks::routes())
        .merge(documents::routes())
        .merge(monitors::routes())
        .merge(queries::routes())
        .merge(sessions::routes())
        .with_state(state)
}
