//! HTTP front end for browser clients.
//!
//! Provides two endpoints:
//! - `/audit?url=...` - runs one audit and returns the `AuditReport` as JSON
//! - `/health` - liveness probe
//!
//! All requests share one `PageAuditor`.

mod handlers;
mod types;

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;

use handlers::{audit_handler, health_handler};
pub use types::{ErrorResponse, ServerState};

use crate::PageAuditor;

/// Builds the router without binding a socket.
pub fn router(auditor: Arc<PageAuditor>) -> Router {
    Router::new()
        .route("/audit", get(audit_handler))
        .route("/health", get(health_handler))
        .with_state(ServerState { auditor })
}

/// Serves the audit endpoints on an already bound listener.
pub async fn serve(listener: TcpListener, auditor: Arc<PageAuditor>) -> Result<(), anyhow::Error> {
    axum::serve(listener, router(auditor))
        .await
        .map_err(|e| anyhow::anyhow!("Audit server error: {}", e))
}

/// Binds `127.0.0.1:<port>` and serves until the process exits.
pub async fn start_server(port: u16, auditor: Arc<PageAuditor>) -> Result<(), anyhow::Error> {
    let listener = TcpListener::bind(format!("127.0.0.1:{}", port))
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind audit server to port {}: {}", port, e))?;

    log::info!("Audit server listening on http://127.0.0.1:{}/", port);
    log::info!("  - Audit: http://127.0.0.1:{}/audit?url=<page>", port);
    log::info!("  - Health: http://127.0.0.1:{}/health", port);

    serve(listener, auditor).await
}
