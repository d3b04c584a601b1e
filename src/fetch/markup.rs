//! Target page fetch.

use log::warn;

use crate::error_handling::{
    describe_reqwest_error, AuditError, ErrorType, ProcessingStats, WarningType,
};

use super::request::{send_with_retry, RequestHeaders};

/// Fetches the raw markup of `url`.
///
/// This is a separate request from the scoring calls. A non-2xx answer is
/// not an error: the body is returned and parsed like any other page, and a
/// `NonSuccessMarkupStatus` warning is recorded.
///
/// # Errors
///
/// Returns `AuditError::MarkupFetch` if no response arrives (DNS, connect,
/// timeout, invalid URL) or its body cannot be read.
pub async fn fetch_markup(
    client: &reqwest::Client,
    url: &str,
    retries: usize,
    stats: &ProcessingStats,
) -> Result<String, AuditError> {
    log::debug!("Fetching markup for {url}");

    let response = send_with_retry(
        || RequestHeaders::apply_to_request_builder(client.get(url)),
        retries,
        stats,
    )
    .await
    .map_err(|e| markup_error(stats, e))?;

    let status = response.status();
    if !status.is_success() {
        warn!("Page {url} answered {status}; parsing the returned body anyway");
        stats.increment_warning(WarningType::NonSuccessMarkupStatus);
    }

    response.text().await.map_err(|e| markup_error(stats, e))
}

fn markup_error(stats: &ProcessingStats, error: reqwest::Error) -> AuditError {
    stats.increment_error(ErrorType::MarkupFetchError);
    AuditError::MarkupFetch {
        message: describe_reqwest_error(error),
    }
}
