//! Session provisioning handlers.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use validator::Validate;

use crate::error::Result;
use crate::handler::request::CreateSession;
use crate::handler::response::SessionCreated;
use crate::service::ServiceState;

/// Tracing target for session operations.
const TRACING_TARGET: &str = "ragmux_server::handler::sessions";

/// Provisions a new RAG session.
///
/// Generates a fresh `rag_id` and persists the session record; no remote
/// clients are constructed until the first ingest or query.
#[tracing::instrument(skip_all)]
async fn create_session(
    State(state): State<ServiceState>,
    Json(request): Json<CreateSession>,
) -> Result<(StatusCode, Json<SessionCreated>)> {
    request.validate()?;

    let record = request.into_record();
    let rag_id = record.rag_id;

    state.sessions().create(record).await?;

    tracing::info!(
        target: TRACING_TARGET,
        rag_id = %rag_id,
        "Session provisioned",
    );

    Ok((StatusCode::CREATED, Json(SessionCreated { rag_id })))
}

/// Returns session routes.
pub fn routes() -> Router<ServiceState> {
    Router::new().route("/v1/sessions", post(create_session))
}
