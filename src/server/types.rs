//! Server state and response bodies.

use std::sync::Arc;

use serde::Serialize;

use crate::PageAuditor;

/// Shared state for the audit server
#[derive(Clone)]
pub struct ServerState {
    pub auditor: Arc<PageAuditor>,
}

/// JSON body returned when a request is rejected
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
