//! PageSpeed Insights response model.
//!
//! Only the fields the auditor reads are modelled; everything else in the
//! (large) Lighthouse report is ignored during deserialization.

use std::collections::HashMap;

use serde::Deserialize;

use crate::config::{
    AUDIT_FIRST_CONTENTFUL_PAINT, AUDIT_LARGEST_CONTENTFUL_PAINT, AUDIT_TOTAL_BLOCKING_TIME,
};
use crate::models::{DeviceProfile, PerformanceResult};

// Top-level runPagespeed response
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSpeedResponse {
    pub lighthouse_result: Option<LighthouseResult>,
}

#[derive(Debug, Deserialize)]
pub struct LighthouseResult {
    #[serde(default)]
    pub categories: Categories,
    #[serde(default)]
    pub audits: HashMap<String, Audit>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Categories {
    pub performance: Option<Category>,
}

// Lighthouse reports a null score when the category could not be computed
#[derive(Debug, Deserialize)]
pub struct Category {
    pub score: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Audit {
    pub display_value: Option<String>,
}

// Google API error envelope: {"error": {"code": 400, "message": "..."}}
#[derive(Debug, Deserialize)]
pub struct ApiErrorEnvelope {
    pub error: ApiError,
}

#[derive(Debug, Deserialize)]
pub struct ApiError {
    pub message: Option<String>,
}

/// Converts a 0-1 Lighthouse ratio into a 0-100 integer score.
///
/// Rounds to the nearest integer (0.873 -> 87) and clamps out-of-range input.
pub fn score_to_percent(ratio: f64) -> u8 {
    (ratio * 100.0).round().clamp(0.0, 100.0) as u8
}

impl PageSpeedResponse {
    /// Extracts the performance score and the three display values.
    ///
    /// Returns the JSON path of the first missing field on failure.
    pub fn into_performance_result(
        self,
        profile: DeviceProfile,
    ) -> Result<PerformanceResult, String> {
        let mut lighthouse = self
            .lighthouse_result
            .ok_or_else(|| "lighthouseResult".to_string())?;

        let ratio = lighthouse
            .categories
            .performance
            .and_then(|category| category.score)
            .ok_or_else(|| "lighthouseResult.categories.performance.score".to_string())?;

        let mut display_value = |audit_id: &str| {
            lighthouse
                .audits
                .remove(audit_id)
                .and_then(|audit| audit.display_value)
                .ok_or_else(|| format!("lighthouseResult.audits.{audit_id}.displayValue"))
        };

        Ok(PerformanceResult {
            device_profile: profile,
            score: score_to_percent(ratio),
            first_contentful_paint: display_value(AUDIT_FIRST_CONTENTFUL_PAINT)?,
            largest_contentful_paint: display_value(AUDIT_LARGEST_CONTENTFUL_PAINT)?,
            total_blocking_time: display_value(AUDIT_TOTAL_BLOCKING_TIME)?,
        })
    }
}
