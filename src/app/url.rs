//! URL normalization and submission gating.

use crate::error_handling::AuditError;
use crate::models::AuditRequest;

/// Ensures a URL starts with `http://` or `https://`.
///
/// The prefix check is exact and case-sensitive; anything else gets
/// `https://` prepended. No other validation is done.
pub fn normalize_url(raw: &str) -> String {
    if raw.starts_with("http://") || raw.starts_with("https://") {
        raw.to_string()
    } else {
        format!("https://{raw}")
    }
}

/// Gates a submission: surrounding whitespace is dropped, empty input is
/// rejected before any request is made, the rest is normalized.
///
/// # Errors
///
/// Returns `AuditError::InvalidInput` for empty or whitespace-only input.
pub fn validate_submission(raw: &str) -> Result<AuditRequest, AuditError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(AuditError::InvalidInput);
    }
    Ok(AuditRequest {
        target_url: normalize_url(trimmed),
    })
}
