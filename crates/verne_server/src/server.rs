//! Server startup and graceful shutdown.

use crate::api::{ApiState, create_router};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use verne_error::{HttpError, VerneResult};

/// Bind the content API and serve until interrupted.
///
/// Returns once a shutdown signal (ctrl-c) arrives and in-flight requests
/// have drained.
pub async fn serve(addr: SocketAddr, state: ApiState) -> VerneResult<()> {
    let app = create_router(state);
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| HttpError::new(format!("failed to bind {addr}: {e}")))?;
    tracing::info!("content API listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| HttpError::new(format!("server error: {e}")))?;

    tracing::info!("content API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::error!(%error, "failed to install shutdown handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
