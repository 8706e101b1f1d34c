//! Handler integration tests.
//!
//! These exercise the HTTP surface against an in-process session store.
//! Paths that would reach remote providers (real ingest/query flows) are
//! covered up to the session lookup boundary.

use axum_test::TestServer;
use ragmux_rag::RagConfig;
use ragmux_server::handler::response::{ErrorResponse, Health, SessionCreated, TextChunks};
use ragmux_server::{ServiceState, handler};
use serde_json::json;

fn server() -> TestServer {
    let state = ServiceState::in_memory(RagConfig::default());
    TestServer::new(handler::routes(state)).expect("router should build")
}

#[tokio::test]
async fn health_reports_ok() {
    let server = server();

    let response = server.get("/health").await;

    response.assert_status_ok();
    assert_eq!(response.json::<Health>().status, "ok");
}

#[tokio::test]
async fn provisioning_returns_a_fresh_rag_id() {
    let server = server();

    let first = server
        .post("/v1/sessions")
        .json(&json!({
            "backend": "qdrant",
            "endpoint": "http://localhost:6334",
            "embedding_api_key": "sk-test",
            "collection": "notes",
        }))
        .await;
    first.assert_status(axum::http::StatusCode::CREATED);

    let second = server
        .post("/v1/sessions")
        .json(&json!({
            "backend": "qdrant",
            "endpoint": "http://localhost:6334",
            "embedding_api_key": "sk-test",
            "collection": "notes",
        }))
        .await;
    second.assert_status(axum::http::StatusCode::CREATED);

    let first: SessionCreated = first.json();
    let second: SessionCreated = second.json();
    assert_ne!(first.rag_id, second.rag_id);
}

#[tokio::test]
async fn provisioning_rejects_malformed_endpoints() {
    let server = server();

    let response = server
        .post("/v1/sessions")
        .json(&json!({
            "backend": "weaviate",
            "endpoint": "not a url",
            "embedding_api_key": "sk-test",
            "collection": "notes",
        }))
        .await;

    response.assert_status_bad_request();
    assert_eq!(response.json::<ErrorResponse>().error, "bad_request");
}

#[tokio::test]
async fn ingest_with_unknown_session_is_not_found() {
    let server = server();

    let response = server
        .post("/v1/documents")
        .json(&json!({
            "rag_id": "5bb38fc8-88cb-4b0a-a683-fcbc17e7b1f2",
            "content": ["some text"],
        }))
        .await;

    response.assert_status_not_found();
    assert_eq!(response.json::<ErrorResponse>().error, "not_found");
}

#[tokio::test]
async fn query_with_unknown_session_is_not_found() {
    let server = server();

    let response = server
        .post("/v1/queries")
        .json(&json!({
            "rag_id": "5bb38fc8-88cb-4b0a-a683-fcbc17e7b1f2",
            "query": "what do you know?",
        }))
        .await;

    response.assert_status_not_found();
}

#[tokio::test]
async fn split_text_returns_word_windows() {
    let server = server();

    let response = server
        .post("/v1/chunks")
        .json(&json!({ "text": "a b c d e", "word_limit": 2 }))
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<TextChunks>().chunks, ["a b", "c d", "e"]);
}

#[tokio::test]
async fn split_text_rejects_blank_text() {
    let server = server();

    let response = server
        .post("/v1/chunks")
        .json(&json!({ "text": "   " }))
        .await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn split_text_rejects_zero_word_limit() {
    let server = server();

    let response = server
        .post("/v1/chunks")
        .json(&json!({ "text": "hello", "word_limit": 0 }))
        .await;

    response.assert_status_bad_request();
}
