//! Audit server HTTP handlers.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;

use super::types::{ErrorResponse, ServerState};
use crate::error_handling::AuditError;

#[derive(Debug, Deserialize)]
pub struct AuditQuery {
    #[serde(default)]
    pub url: String,
}

/// Runs one audit and returns the report as JSON.
///
/// An empty or missing `url` is answered with 400 and nothing is fetched.
pub async fn audit_handler(
    State(state): State<ServerState>,
    Query(query): Query<AuditQuery>,
) -> Response {
    match state.auditor.audit(&query.url).await {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(e @ AuditError::InvalidInput) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )
            .into_response(),
        Err(e) => {
            log::error!("Audit of {} failed: {e}", query.url);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}

pub async fn health_handler() -> &'static str {
    "ok"
}
