//! Content ingestion handlers.

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use ragmux_rag::RagService;
use validator::Validate;

use crate::error::Result;
use crate::handler::request::IngestContent;
use crate::handler::response::ContentIndexed;
use crate::service::ServiceState;

/// Tracing target for ingestion operations.
const TRACING_TARGET: &str = "ragmux_server::handler::documents";

/// Chunks, embeds, and indexes content into a session's collection.
#[tracing::instrument(skip_all, fields(rag_id = %request.rag_id))]
async fn ingest_content(
    State(state): State<ServiceState>,
    Json(request): Json<IngestContent>,
) -> Result<Json<ContentIndexed>> {
    request.validate()?;

    let record = state
        .sessions()
        .get(request.rag_id)
        .await?
        .ok_or(ragmux_rag::Error::SessionNotFound(request.rag_id))?;

    let rag = RagService::connect(&record, state.config().clone()).await?;

    let mut chunks_indexed = 0;
    for text in &request.content {
        chunks_indexed += rag.ingest(text).await?;
    }

    tracing::info!(
        target: TRACING_TARGET,
        rag_id = %request.rag_id,
        chunks_indexed = %chunks_indexed,
        "Content indexed",
    );

    Ok(Json(ContentIndexed {
        rag_id: request.rag_id,
        chunks_indexed,
    }))
}

/// Returns ingestion routes.
pub fn routes() -> Router<ServiceState> {
    Router::new().route("/v1/documents", post(ingest_content))
}
