// Shared test helpers for mock PageSpeed backends and auditor setup.

use std::sync::Arc;

use httptest::{matchers::*, responders::*, Expectation, Server};
use serde_json::json;

use page_audit::{Config, LogFormat, LogLevel, MatchMode, PageAuditor, ProcessingStats};

/// A PageSpeed response body with the given score ratio.
pub fn pagespeed_body(score: f64) -> serde_json::Value {
    json!({
        "lighthouseResult": {
            "categories": {"performance": {"score": score}},
            "audits": {
                "first-contentful-paint": {"displayValue": "1.1 s"},
                "largest-contentful-paint": {"displayValue": "2.5 s"},
                "total-blocking-time": {"displayValue": "120 ms"}
            }
        }
    })
}

/// Expects one PageSpeed call for `strategy` and answers with `responder`.
#[allow(dead_code)] // Used by other test files
pub fn expect_profile(
    server: &Server,
    strategy: &'static str,
    responder: impl httptest::responders::Responder + 'static,
) {
    server.expect(
        Expectation::matching(all_of![
            request::method_path("GET", "/runPagespeed"),
            request::query(url_decoded(contains(("strategy", strategy)))),
        ])
        .respond_with(responder),
    );
}

/// Serves `html` at `path` once.
#[allow(dead_code)] // Used by other test files
pub fn expect_page(server: &Server, path: &'static str, html: &'static str) {
    server.expect(
        Expectation::matching(request::method_path("GET", path))
            .respond_with(status_code(200).body(html)),
    );
}

/// Test configuration pointing the PageSpeed endpoint at `server`.
pub fn test_config(server: &Server) -> Config {
    Config {
        endpoint: server.url("/runPagespeed").to_string(),
        api_key: "integration-test-key".to_string(),
        timeout_seconds: 5,
        user_agent: "page_audit-test/1.0".to_string(),
        retry_attempts: 0,
        match_mode: MatchMode::Exact,
        log_level: LogLevel::Error,
        log_format: LogFormat::Plain,
    }
}

#[allow(dead_code)] // Used by other test files
pub fn test_auditor(config: Config) -> (PageAuditor, Arc<ProcessingStats>) {
    let stats = Arc::new(ProcessingStats::new());
    let auditor =
        PageAuditor::new(config, Arc::clone(&stats)).expect("Failed to create test auditor");
    (auditor, stats)
}

#[allow(dead_code)] // Used by other test files
pub fn ok_json(score: f64) -> impl httptest::responders::Responder {
    json_encoded(pagespeed_body(score))
}
