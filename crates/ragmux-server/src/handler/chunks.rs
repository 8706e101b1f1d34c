//! Standalone text chunking handlers.

use axum::routing::post;
use axum::{Json, Router};
use ragmux_rag::Chunker;
use validator::Validate;

use crate::error::{Error, Result};
use crate::handler::request::SplitText;
use crate::handler::response::TextChunks;
use crate::service::ServiceState;

/// Tracing target for chunking operations.
const TRACING_TARGET: &str = "ragmux_server::handler::chunks";

/// Splits text into word-bounded chunks without indexing it.
#[tracing::instrument(skip_all)]
async fn split_text(Json(request): Json<SplitText>) -> Result<Json<TextChunks>> {
    request.validate()?;

    if request.text.trim().is_empty() {
        return Err(Error::bad_request("text cannot be empty"));
    }

    let chunker = Chunker::new(request.word_limit)?;
    let chunks = chunker.split(&request.text);

    tracing::debug!(
        target: TRACING_TARGET,
        word_limit = %request.word_limit,
        chunks = %chunks.len(),
        "Text split",
    );

    Ok(Json(TextChunks { chunks }))
}

/// Returns chunking routes.
pub fn routes() -> Router<ServiceState> {
    Router::new().route("/v1/chunks", post(split_text))
}
