//! HTTP server lifecycle.

use std::time::Duration;

use anyhow::Context;
use axum::Router;
use axum_server::Handle;

use crate::config::ServerConfig;
use crate::{TRACING_TARGET_SERVER_SHUTDOWN, TRACING_TARGET_SERVER_STARTUP};

/// Grace period for in-flight requests on shutdown.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(30);

/// Binds the server and serves until a shutdown signal arrives.
pub(crate) async fn serve(router: Router, config: &ServerConfig) -> anyhow::Result<()> {
    let address = config.socket_addr();
    let handle = Handle::new();

    tokio::spawn(wait_for_shutdown(handle.clone()));

    tracing::info!(
        target: TRACING_TARGET_SERVER_STARTUP,
        address = %address,
        "server listening"
    );

    axum_server::bind(address)
        .handle(handle)
        .serve(router.into_make_service())
        .await
        .context("server terminated unexpectedly")
}

/// Triggers graceful shutdown on ctrl-c.
async fn wait_for_shutdown(handle: Handle) {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::error!(
            target: TRACING_TARGET_SERVER_SHUTDOWN,
            error = %error,
            "failed to listen for shutdown signal"
        );
        return;
    }

    tracing::info!(
        target: TRACING_TARGET_SERVER_SHUTDOWN,
        "shutdown signal received, draining connections"
    );
    handle.graceful_shutdown(Some(SHUTDOWN_GRACE));
}
