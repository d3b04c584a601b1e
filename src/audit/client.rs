//! PageSpeed Insights client.

use std::fmt;
use std::sync::Arc;

use log::{info, warn};
use reqwest::StatusCode;
use url::Url;

use crate::config::MAX_ERROR_BODY_CHARS;
use crate::error_handling::{
    categorize_reqwest_error, categorize_status, describe_reqwest_error, AuditError, ErrorType,
    ProcessingStats,
};
use crate::fetch::send_with_retry;
use crate::models::{DeviceProfile, PerformanceResult, ProfileOutcome};

use super::response::{ApiErrorEnvelope, PageSpeedResponse};

/// Calls the PageSpeed Insights API for one URL and device profile at a time.
///
/// The API key is injected at construction and only ever placed in the query
/// string; it is never included in errors or logs.
#[derive(Clone)]
pub struct PageSpeedClient {
    client: Arc<reqwest::Client>,
    endpoint: String,
    api_key: String,
    retries: usize,
}

impl fmt::Debug for PageSpeedClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageSpeedClient")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"<redacted>")
            .field("retries", &self.retries)
            .finish()
    }
}

impl PageSpeedClient {
    pub fn new(
        client: Arc<reqwest::Client>,
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        retries: usize,
    ) -> Self {
        PageSpeedClient {
            client,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            retries,
        }
    }

    fn request_url(&self, url: &str, profile: DeviceProfile) -> Result<Url, AuditError> {
        Url::parse_with_params(
            &self.endpoint,
            &[
                ("url", url),
                ("strategy", profile.as_str()),
                ("key", self.api_key.as_str()),
            ],
        )
        .map_err(|e| AuditError::Config(format!("invalid endpoint '{}': {e}", self.endpoint)))
    }

    /// Runs a single PageSpeed audit.
    ///
    /// # Errors
    ///
    /// Returns `AuditError::Fetch` attributed to `profile` when no response
    /// arrives, the status is not 200, or the body lacks the score or one of
    /// the three display values.
    pub async fn run_audit(
        &self,
        url: &str,
        profile: DeviceProfile,
        stats: &ProcessingStats,
    ) -> Result<PerformanceResult, AuditError> {
        let request_url = self.request_url(url, profile)?;
        log::debug!("Requesting {profile} PageSpeed audit for {url}");

        let fetch_error = |status: Option<u16>, message: String| AuditError::Fetch {
            profile,
            status,
            message,
        };

        let response = send_with_retry(
            || self.client.get(request_url.clone()),
            self.retries,
            stats,
        )
        .await
        .map_err(|e| {
            stats.increment_error(categorize_reqwest_error(&e));
            fetch_error(None, describe_reqwest_error(e))
        })?;

        let status = response.status();
        if status != StatusCode::OK {
            stats.increment_error(categorize_status(status.as_u16()));
            let body = response.text().await.unwrap_or_default();
            let message = match upstream_error_message(&body) {
                Some(detail) => format!("PageSpeed returned HTTP {}: {detail}", status.as_u16()),
                None => format!("PageSpeed returned HTTP {}", status.as_u16()),
            };
            return Err(fetch_error(Some(status.as_u16()), message));
        }

        let body = response.text().await.map_err(|e| {
            stats.increment_error(categorize_reqwest_error(&e));
            fetch_error(Some(status.as_u16()), describe_reqwest_error(e))
        })?;

        let parsed: PageSpeedResponse = serde_json::from_str(&body).map_err(|e| {
            stats.increment_error(ErrorType::UnexpectedPageSpeedResponse);
            fetch_error(Some(status.as_u16()), format!("invalid JSON response: {e}"))
        })?;

        parsed.into_performance_result(profile).map_err(|missing| {
            stats.increment_error(ErrorType::UnexpectedPageSpeedResponse);
            fetch_error(
                Some(status.as_u16()),
                format!("unexpected response: missing {missing}"),
            )
        })
    }

    /// Audits `url` for every profile, mobile first, one after the other.
    ///
    /// Each profile's outcome is independent: a failure is recorded against
    /// that profile only and the next profile still runs.
    pub async fn run_all_profiles(&self, url: &str, stats: &ProcessingStats) -> Vec<ProfileOutcome> {
        let mut outcomes = Vec::with_capacity(DeviceProfile::ALL.len());
        for profile in DeviceProfile::ALL {
            let result = self.run_audit(url, profile, stats).await;
            match &result {
                Ok(performance) => info!(
                    "{profile} score for {url}: {}/100",
                    performance.score
                ),
                Err(e) => warn!("{e}"),
            }
            outcomes.push(ProfileOutcome::from_result(profile, result));
        }
        outcomes
    }
}

/// Pulls `error.message` out of a Google API error body, truncated.
fn upstream_error_message(body: &str) -> Option<String> {
    let envelope: ApiErrorEnvelope = serde_json::from_str(body).ok()?;
    let message = envelope.error.message?;
    let message = message.trim();
    if message.is_empty() {
        return None;
    }
    if message.chars().count() > MAX_ERROR_BODY_CHARS {
        let truncated: String = message.chars().take(MAX_ERROR_BODY_CHARS).collect();
        Some(format!("{truncated}..."))
    } else {
        Some(message.to_string())
    }
}
