//! HTTP request building and selective retry.

use std::sync::atomic::{AtomicU32, Ordering};

use tokio_retry::RetryIf;

use crate::error_handling::{
    get_retry_strategy, is_retriable_error, is_retriable_status, InfoType, ProcessingStats,
};

/// Browser-like request headers for the page fetch.
///
/// Some sites serve a stripped page (or none) to clients that do not look
/// like a browser, which would hide their structured data.
pub(crate) struct RequestHeaders;

impl RequestHeaders {
    /// Applies the standard page-fetch headers to a `reqwest::RequestBuilder`.
    pub(crate) fn apply_to_request_builder(
        builder: reqwest::RequestBuilder,
    ) -> reqwest::RequestBuilder {
        builder
            .header(
                reqwest::header::ACCEPT,
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            )
            .header(reqwest::header::ACCEPT_LANGUAGE, "en-US,en;q=0.9")
            .header(reqwest::header::UPGRADE_INSECURE_REQUESTS, "1")
    }
}

/// A failed attempt, kept apart so the last transient response can still be
/// handed back to the caller.
enum Attempt {
    Transport(reqwest::Error),
    Transient(reqwest::Response),
}

/// Sends a request built by `build`, retrying transient failures.
///
/// Timeouts, connection failures, 5xx and 429 responses are retried up to
/// `retries` times with exponential backoff. Any other response is returned
/// as is, whatever its status. When retries run out on a transient status the
/// last response is returned so the caller can report its status.
///
/// # Errors
///
/// Returns the last transport error if no response was received.
pub(crate) async fn send_with_retry<F>(
    build: F,
    retries: usize,
    stats: &ProcessingStats,
) -> Result<reqwest::Response, reqwest::Error>
where
    F: Fn() -> reqwest::RequestBuilder,
{
    let attempts = AtomicU32::new(0);

    let result = RetryIf::start(
        get_retry_strategy(retries),
        || {
            let attempt = attempts.fetch_add(1, Ordering::SeqCst);
            if attempt > 0 {
                stats.increment_info(InfoType::RequestRetried);
                log::debug!("Retrying request (attempt {})", attempt + 1);
            }
            let request = build();
            async move {
                match request.send().await {
                    Ok(response) if is_retriable_status(response.status().as_u16()) => {
                        Err(Attempt::Transient(response))
                    }
                    Ok(response) => Ok(response),
                    Err(e) => Err(Attempt::Transport(e)),
                }
            }
        },
        |attempt: &Attempt| match attempt {
            Attempt::Transport(e) => is_retriable_error(e),
            Attempt::Transient(_) => true,
        },
    )
    .await;

    match result {
        Ok(response) | Err(Attempt::Transient(response)) => Ok(response),
        Err(Attempt::Transport(e)) => Err(e),
    }
}
