//! Liveness handlers.

use axum::routing::get;
use axum::{Json, Router};

use crate::handler::response::Health;
use crate::service::ServiceState;

/// Reports process liveness.
async fn health() -> Json<Health> {
    Json(Health {
        status: "ok".to_owned(),
    })
}

/// Returns monitoring routes.
pub fn routes() -> Router<ServiceState> {
    Router::new().route("/health", get(health))
}
