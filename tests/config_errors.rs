//! Tests that configuration problems are reported before any request is made.

use std::sync::Arc;

use page_audit::{Config, InitializationError, PageAuditor, ProcessingStats};

#[test]
fn test_missing_api_key_is_a_config_error() {
    let config = Config::default();
    let err = PageAuditor::new(config, Arc::new(ProcessingStats::new()))
        .expect_err("an auditor without a key must not be built");
    assert!(matches!(err, InitializationError::ConfigError(_)));
    let message = err.to_string();
    assert!(message.contains("PAGESPEED_API_KEY"), "got: {message}");
}

#[test]
fn test_whitespace_api_key_is_rejected() {
    let config = Config {
        api_key: "   ".to_string(),
        ..Default::default()
    };
    assert!(config.validate().is_err());
}

#[test]
fn test_invalid_endpoint_is_rejected() {
    for endpoint in ["", "not a url", "ftp://example.com/run"] {
        let config = Config {
            api_key: "key".to_string(),
            endpoint: endpoint.to_string(),
            ..Default::default()
        };
        let err = config.validate().expect_err(endpoint);
        assert!(err.to_string().starts_with("Configuration error"));
    }
}

#[test]
fn test_debug_output_does_not_leak_key() {
    let config = Config {
        api_key: "very-secret".to_string(),
        ..Default::default()
    };
    let auditor = PageAuditor::new(config, Arc::new(ProcessingStats::new())).unwrap();
    let debug = format!("{auditor:?}");
    assert!(debug.contains("<redacted>"));
    assert!(!debug.contains("very-secret"));
}
