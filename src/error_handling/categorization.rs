//! Error categorization and retry strategy.
//!
//! This module maps transport errors and HTTP statuses onto `ErrorType`
//! counters and decides which failures are worth one more attempt.

use std::time::Duration;
use tokio_retry::strategy::ExponentialBackoff;

use crate::config::{
    HTTP_STATUS_TOO_MANY_REQUESTS, RETRY_FACTOR, RETRY_INITIAL_DELAY_MS, RETRY_MAX_DELAY_SECS,
};

use super::types::ErrorType;

/// Creates an exponential backoff retry strategy yielding `retries` delays.
///
/// The iterator length is the number of retries after the initial attempt,
/// so `get_retry_strategy(0)` disables retrying.
pub fn get_retry_strategy(retries: usize) -> impl Iterator<Item = Duration> {
    ExponentialBackoff::from_millis(RETRY_INITIAL_DELAY_MS)
        .factor(RETRY_FACTOR)
        .max_delay(Duration::from_secs(RETRY_MAX_DELAY_SECS))
        .take(retries)
}

/// Categorizes an HTTP status code into an `ErrorType`.
pub fn categorize_status(status: u16) -> ErrorType {
    match status {
        400 => ErrorType::HttpRequestBadRequest,
        401 => ErrorType::HttpRequestUnauthorized,
        403 => ErrorType::HttpRequestForbidden,
        404 => ErrorType::HttpRequestNotFound,
        HTTP_STATUS_TOO_MANY_REQUESTS => ErrorType::HttpRequestTooManyRequests,
        500 => ErrorType::HttpRequestInternalServerError,
        503 => ErrorType::HttpRequestServiceUnavailable,
        _ => ErrorType::HttpRequestOtherError,
    }
}

/// Categorizes a `reqwest::Error` into an `ErrorType`.
pub fn categorize_reqwest_error(error: &reqwest::Error) -> ErrorType {
    if let Some(status) = error.status() {
        return categorize_status(status.as_u16());
    }

    if error.is_builder() {
        ErrorType::HttpRequestBuilderError
    } else if error.is_timeout() {
        ErrorType::HttpRequestTimeoutError
    } else if error.is_connect() {
        ErrorType::HttpRequestConnectError
    } else if error.is_request() {
        ErrorType::HttpRequestRequestError
    } else if error.is_body() {
        ErrorType::HttpRequestBodyError
    } else if error.is_decode() {
        ErrorType::HttpRequestDecodeError
    } else {
        ErrorType::HttpRequestOtherError
    }
}

/// User-facing description of a transport error.
///
/// The request URL is stripped (it may carry the API key) and the source
/// chain is appended, followed by the error category, so a timeout and a
/// refused connection read differently.
pub fn describe_reqwest_error(error: reqwest::Error) -> String {
    let category = categorize_reqwest_error(&error);
    let error = error.without_url();
    let mut message = error.to_string();
    let mut source = std::error::Error::source(&error);
    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !message.contains(&cause_text) {
            message.push_str(": ");
            message.push_str(&cause_text);
        }
        source = cause.source();
    }
    format!("{message} ({category})")
}

/// Whether an HTTP status is transient (5xx or 429).
pub fn is_retriable_status(status: u16) -> bool {
    status == HTTP_STATUS_TOO_MANY_REQUESTS || (500..600).contains(&status)
}

/// Whether a transport error is transient.
///
/// Timeouts, connection failures and request-phase failures are retried;
/// builder, redirect and decode errors are permanent.
pub fn is_retriable_error(error: &reqwest::Error) -> bool {
    if let Some(status) = error.status() {
        return is_retriable_status(status.as_u16());
    }
    if error.is_builder() || error.is_redirect() || error.is_decode() {
        return false;
    }
    error.is_timeout() || error.is_connect() || error.is_request()
}
