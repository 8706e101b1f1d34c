//! Retrieval-augmented query handlers.

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use ragmux_rag::RagService;
use validator::Validate;

use crate::error::Result;
use crate::handler::request::AskQuery;
use crate::handler::response::QueryAnswer;
use crate::service::ServiceState;

/// Tracing target for query operations.
const TRACING_TARGET: &str = "ragmux_server::handler::queries";

/// Answers a query grounded in the session's indexed chunks.
///
/// A session whose collection holds nothing yet still answers; the model
/// simply has no grounding to work with.
#[tracing::instrument(skip_all, fields(rag_id = %request.rag_id))]
async fn ask_query(
    State(state): State<ServiceState>,
    Json(request): Json<AskQuery>,
) -> Result<Json<QueryAnswer>> {
    request.validate()?;

    let record = state
        .sessions()
        .get(request.rag_id)
        .await?
        .ok_or(ragmux_rag::Error::SessionNotFound(request.rag_id))?;

    let rag = RagService::connect(&record, state.config().clone()).await?;

    let result = rag.answer(&request.prompt, &request.query).await?;

    tracing::info!(
        target: TRACING_TARGET,
        rag_id = %request.rag_id,
        supporting_chunks = %result.chunks.len(),
        "Query answered",
    );

    Ok(Json(QueryAnswer {
        rag_id: request.rag_id,
        answer: result.answer,
        chunks: result.chunks,
    }))
}

/// Returns query routes.
pub fn routes() -> Router<ServiceState> {
    Router::new().route("/v1/queries", post(ask_query))
}
