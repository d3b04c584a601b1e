//! Data carried through a single audit invocation.
//!
//! Nothing here outlives the request that produced it.

use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;
use strum_macros::EnumIter as EnumIterMacro;

use crate::error_handling::AuditError;

/// A validated submission: a non-empty, schemed URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditRequest {
    pub target_url: String,
}

/// PageSpeed device profile, sent as the `strategy` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, EnumIterMacro)]
#[serde(rename_all = "lowercase")]
pub enum DeviceProfile {
    Mobile,
    Desktop,
}

impl DeviceProfile {
    /// Profiles in the order they are audited.
    pub const ALL: [DeviceProfile; 2] = [DeviceProfile::Mobile, DeviceProfile::Desktop];

    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceProfile::Mobile => "mobile",
            DeviceProfile::Desktop => "desktop",
        }
    }
}

impl fmt::Display for DeviceProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metrics extracted from one PageSpeed response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceResult {
    pub device_profile: DeviceProfile,
    /// 0-100, the upstream 0-1 ratio scaled and rounded to the nearest integer.
    pub score: u8,
    /// Pre-rendered display values (units included), e.g. `"1.2 s"`.
    pub first_contentful_paint: String,
    pub largest_contentful_paint: String,
    pub total_blocking_time: String,
}

/// Outcome of one profile's audit: either a result or an attributed failure.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileOutcome {
    pub profile: DeviceProfile,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<PerformanceResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ProfileOutcome {
    pub fn from_result(profile: DeviceProfile, result: Result<PerformanceResult, AuditError>) -> Self {
        match result {
            Ok(result) => ProfileOutcome {
                profile,
                result: Some(result),
                error: None,
            },
            Err(e) => ProfileOutcome {
                profile,
                result: None,
                error: Some(e.to_string()),
            },
        }
    }

    pub fn is_success(&self) -> bool {
        self.result.is_some()
    }
}

/// Schema.org types discovered on the page and what the catalog still lacks.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SchemaFindings {
    pub found: BTreeSet<String>,
    pub missing: Vec<String>,
    /// JSON-LD blocks skipped because their content was not valid JSON.
    pub malformed_blocks: usize,
}

/// Everything produced by one audit run, ready for rendering.
#[derive(Debug, Clone, Serialize)]
pub struct AuditReport {
    pub url: String,
    /// RFC 3339 timestamp of when the audit started.
    pub audited_at: String,
    pub profiles: Vec<ProfileOutcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<SchemaFindings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema_error: Option<String>,
}

impl AuditReport {
    /// Looks up the outcome for a profile.
    pub fn profile(&self, profile: DeviceProfile) -> Option<&ProfileOutcome> {
        self.profiles.iter().find(|p| p.profile == profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_device_profile_strategy_values() {
        assert_eq!(DeviceProfile::Mobile.as_str(), "mobile");
        assert_eq!(DeviceProfile::Desktop.as_str(), "desktop");
        assert_eq!(DeviceProfile::Desktop.to_string(), "desktop");
    }

    #[test]
    fn test_device_profile_order() {
        // Mobile is always audited first
        let iterated: Vec<_> = DeviceProfile::iter().collect();
        assert_eq!(iterated, DeviceProfile::ALL.to_vec());
        assert_eq!(DeviceProfile::ALL[0], DeviceProfile::Mobile);
    }

    #[test]
    fn test_profile_outcome_from_error_keeps_attribution() {
        let outcome = ProfileOutcome::from_result(
            DeviceProfile::Mobile,
            Err(AuditError::Fetch {
                profile: DeviceProfile::Mobile,
                status: Some(500),
                message: "boom".to_string(),
            }),
        );
        assert!(!outcome.is_success());
        let message = outcome.error.unwrap();
        assert!(message.contains("mobile"));
        assert!(!message.contains("desktop"));
    }

    #[test]
    fn test_report_serializes_profiles_lowercase() {
        let report = AuditReport {
            url: "https://example.com".to_string(),
            audited_at: "2024-01-01T00:00:00Z".to_string(),
            profiles: vec![ProfileOutcome::from_result(
                DeviceProfile::Desktop,
                Ok(PerformanceResult {
                    device_profile: DeviceProfile::Desktop,
                    score: 91,
                    first_contentful_paint: "0.6 s".to_string(),
                    largest_contentful_paint: "1.0 s".to_string(),
                    total_blocking_time: "0 ms".to_string(),
                }),
            )],
            schema: None,
            schema_error: Some("markup fetch failed".to_string()),
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["profiles"][0]["profile"], "desktop");
        assert_eq!(json["profiles"][0]["result"]["score"], 91);
        assert!(json["profiles"][0].get("error").is_none());
        assert!(json.get("schema").is_none());
        assert_eq!(json["schema_error"], "markup fetch failed");
    }
}
