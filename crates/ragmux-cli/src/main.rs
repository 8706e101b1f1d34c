#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod config;
mod server;
mod telemetry;

use std::process;

use anyhow::Context;
use axum::Router;
use clap::Parser;
use ragmux_server::{ServiceState, handler};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::Cli;

// Tracing target constants
pub const TRACING_TARGET_SERVER_STARTUP: &str = "ragmux_cli::server::startup";
pub const TRACING_TARGET_SERVER_SHUTDOWN: &str = "ragmux_cli::server::shutdown";
pub const TRACING_TARGET_CONFIG: &str = "ragmux_cli::config";

#[tokio::main]
async fn main() {
    let Err(error) = run().await else {
        tracing::info!(
            target: TRACING_TARGET_SERVER_SHUTDOWN,
            "application terminated successfully"
        );
        process::exit(0);
    };

    if tracing::enabled!(tracing::Level::ERROR) {
        tracing::error!(
            target: TRACING_TARGET_SERVER_SHUTDOWN,
            error = %error,
            "application terminated with error"
        );
    } else {
        eprintln!("Error: {error:#}");
    }

    process::exit(1);
}

/// Main application entry point.
async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    telemetry::init_tracing().context("failed to initialize tracing")?;

    let rag_config = cli.pipeline.to_rag_config();
    tracing::info!(
        target: TRACING_TARGET_CONFIG,
        address = %cli.server.socket_addr(),
        top_k = %rag_config.top_k,
        word_limit = %rag_config.word_limit,
        settle_delay_ms = %rag_config.settle_delay.as_millis(),
        "configuration loaded"
    );

    let state = ServiceState::in_memory(rag_config);
    let router = create_router(state, &cli);

    server::serve(router, &cli.server).await?;

    Ok(())
}

/// Creates the router with middleware layers applied.
fn create_router(state: ServiceState, cli: &Cli) -> Router {
    handler::routes(state)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(cli.server.handler_timeout()))
}
