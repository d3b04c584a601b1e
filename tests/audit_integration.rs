//! End-to-end tests of `PageAuditor::audit` against mock servers.
//!
//! One `httptest::Server` plays both the PageSpeed API (`/runPagespeed`) and
//! the audited site, so no real network access is needed.

mod helpers;

use httptest::{matchers::*, responders::*, Expectation, Server};

use helpers::{expect_page, expect_profile, ok_json, test_auditor, test_config};
use page_audit::error_handling::{ErrorType, InfoType, WarningType};
use page_audit::recommend::RECOMMENDED_SCHEMA_TYPES;
use page_audit::{AuditError, DeviceProfile, MatchMode};

#[tokio::test]
async fn test_full_audit_happy_path() {
    let server = Server::run();
    expect_profile(&server, "mobile", ok_json(0.873));
    expect_profile(&server, "desktop", ok_json(0.99));
    expect_page(
        &server,
        "/home",
        r#"<html><head>
            <script type="application/ld+json">{"@context": "https://schema.org", "@type": "Organization"}</script>
        </head><body itemscope itemtype="https://schema.org/WebPage"></body></html>"#,
    );
    let (auditor, stats) = test_auditor(test_config(&server));

    let url = server.url("/home").to_string();
    let report = auditor.audit(&url).await.expect("audit should run");

    assert_eq!(report.url, url);
    assert!(chrono::DateTime::parse_from_rfc3339(&report.audited_at).is_ok());

    let mobile = report.profile(DeviceProfile::Mobile).unwrap();
    assert_eq!(mobile.result.as_ref().unwrap().score, 87);
    let desktop = report.profile(DeviceProfile::Desktop).unwrap();
    assert_eq!(desktop.result.as_ref().unwrap().score, 99);
    assert_eq!(
        desktop.result.as_ref().unwrap().largest_contentful_paint,
        "2.5 s"
    );

    let schema = report.schema.as_ref().expect("markup was fetched");
    assert_eq!(
        schema.found.iter().map(String::as_str).collect::<Vec<_>>(),
        vec!["Organization", "WebPage"]
    );
    assert_eq!(
        schema.missing,
        vec![
            "LocalBusiness",
            "WebSite",
            "BreadcrumbList",
            "Article",
            "Product",
            "FAQPage",
            "Review"
        ]
    );
    assert!(report.schema_error.is_none());
    assert_eq!(stats.total_errors(), 0);
}

#[tokio::test]
async fn test_mobile_failure_does_not_affect_desktop() {
    let server = Server::run();
    expect_profile(
        &server,
        "mobile",
        status_code(500).body(r#"{"error": {"code": 500, "message": "Lighthouse returned error: NO_FCP"}}"#),
    );
    expect_profile(&server, "desktop", ok_json(0.5));
    expect_page(&server, "/", "<html></html>");
    let (auditor, stats) = test_auditor(test_config(&server));

    let report = auditor
        .audit(&server.url("/").to_string())
        .await
        .expect("audit should run");

    let mobile = report.profile(DeviceProfile::Mobile).unwrap();
    assert!(mobile.result.is_none());
    let error = mobile.error.as_deref().unwrap();
    assert!(error.starts_with("mobile audit failed"));
    assert!(error.contains("NO_FCP"));
    assert!(!error.contains("integration-test-key"));

    let desktop = report.profile(DeviceProfile::Desktop).unwrap();
    assert!(desktop.error.is_none());
    assert_eq!(desktop.result.as_ref().unwrap().score, 50);

    assert_eq!(
        stats.get_error_count(ErrorType::HttpRequestInternalServerError),
        1
    );
}

#[tokio::test]
async fn test_malformed_json_ld_is_skipped() {
    let server = Server::run();
    expect_profile(&server, "mobile", ok_json(0.7));
    expect_profile(&server, "desktop", ok_json(0.8));
    expect_page(
        &server,
        "/mixed",
        r#"<script type="application/ld+json">{"@type": "Organization"}</script>
           <script type="application/ld+json">{"@type": "Product",</script>"#,
    );
    let (auditor, stats) = test_auditor(test_config(&server));

    let report = auditor
        .audit(&server.url("/mixed").to_string())
        .await
        .unwrap();

    let schema = report.schema.expect("extraction step must not fail");
    assert_eq!(schema.found.len(), 1);
    assert!(schema.found.contains("Organization"));
    assert_eq!(schema.malformed_blocks, 1);
    assert_eq!(stats.get_warning_count(WarningType::MalformedJsonLd), 1);
}

#[tokio::test]
async fn test_page_without_annotations_misses_whole_catalog() {
    let server = Server::run();
    expect_profile(&server, "mobile", ok_json(1.0));
    expect_profile(&server, "desktop", ok_json(1.0));
    expect_page(&server, "/plain", "<html><body><p>Hello</p></body></html>");
    let (auditor, _stats) = test_auditor(test_config(&server));

    let report = auditor
        .audit(&server.url("/plain").to_string())
        .await
        .unwrap();

    let schema = report.schema.unwrap();
    assert!(schema.found.is_empty());
    assert_eq!(schema.missing, RECOMMENDED_SCHEMA_TYPES.to_vec());
}

#[tokio::test]
async fn test_markup_fetch_failure_keeps_scores() {
    let server = Server::run();
    expect_profile(&server, "mobile", ok_json(0.6));
    expect_profile(&server, "desktop", ok_json(0.9));
    let (auditor, stats) = test_auditor(test_config(&server));

    // Nothing listens on the discard port
    let report = auditor.audit("http://127.0.0.1:9/").await.unwrap();

    assert!(report.profiles.iter().all(|p| p.is_success()));
    assert!(report.schema.is_none());
    assert!(report
        .schema_error
        .as_deref()
        .unwrap()
        .starts_with("Could not fetch page markup"));
    assert_eq!(stats.get_error_count(ErrorType::MarkupFetchError), 1);
}

#[tokio::test]
async fn test_case_insensitive_matching_is_opt_in() {
    let page = r#"<script type="application/ld+json">{"@type": "webpage"}</script>"#;

    let server = Server::run();
    expect_profile(&server, "mobile", ok_json(0.5));
    expect_profile(&server, "desktop", ok_json(0.5));
    expect_page(&server, "/", page);
    let (auditor, _) = test_auditor(test_config(&server));
    let exact = auditor.audit(&server.url("/").to_string()).await.unwrap();
    assert!(exact.schema.unwrap().missing.contains(&"WebPage".to_string()));

    let server = Server::run();
    expect_profile(&server, "mobile", ok_json(0.5));
    expect_profile(&server, "desktop", ok_json(0.5));
    expect_page(&server, "/", page);
    let mut config = test_config(&server);
    config.match_mode = MatchMode::CaseInsensitive;
    let (auditor, _) = test_auditor(config);
    let relaxed = auditor.audit(&server.url("/").to_string()).await.unwrap();
    assert!(!relaxed.schema.unwrap().missing.contains(&"WebPage".to_string()));
}

#[tokio::test]
async fn test_empty_submission_sends_nothing() {
    // No expectations: any request would fail the test on drop
    let server = Server::run();
    let (auditor, _) = test_auditor(test_config(&server));

    for input in ["", "   ", "\t\n"] {
        let err = auditor.audit(input).await.expect_err("empty input");
        assert!(matches!(err, AuditError::InvalidInput));
        assert_eq!(err.to_string(), "Please enter a URL to audit");
    }
}

#[tokio::test]
async fn test_transient_failure_is_retried() {
    let server = Server::run();
    server.expect(
        Expectation::matching(all_of![
            request::method_path("GET", "/runPagespeed"),
            request::query(url_decoded(contains(("strategy", "mobile")))),
        ])
        .times(2)
        .respond_with(httptest::cycle![status_code(503), ok_json(0.42)]),
    );
    expect_profile(&server, "desktop", ok_json(0.42));
    expect_page(&server, "/", "<html></html>");
    let mut config = test_config(&server);
    config.retry_attempts = 1;
    let (auditor, stats) = test_auditor(config);

    let report = auditor.audit(&server.url("/").to_string()).await.unwrap();

    assert_eq!(
        report
            .profile(DeviceProfile::Mobile)
            .unwrap()
            .result
            .as_ref()
            .unwrap()
            .score,
        42
    );
    assert_eq!(stats.get_info_count(InfoType::RequestRetried), 1);
}

#[tokio::test]
async fn test_client_error_is_not_retried() {
    let server = Server::run();
    expect_profile(&server, "mobile", status_code(400));
    expect_profile(&server, "desktop", status_code(400));
    expect_page(&server, "/", "<html></html>");
    let mut config = test_config(&server);
    config.retry_attempts = 3;
    let (auditor, stats) = test_auditor(config);

    let report = auditor.audit(&server.url("/").to_string()).await.unwrap();

    assert!(report.profiles.iter().all(|p| !p.is_success()));
    assert_eq!(stats.get_info_count(InfoType::RequestRetried), 0);
    assert_eq!(stats.get_error_count(ErrorType::HttpRequestBadRequest), 2);
}

#[tokio::test]
async fn test_slow_profile_times_out_alone() {
    let server = Server::run();
    expect_profile(
        &server,
        "mobile",
        delay_and_then(std::time::Duration::from_secs(3), ok_json(0.9)),
    );
    expect_profile(&server, "desktop", ok_json(0.9));
    expect_page(&server, "/", "<html></html>");
    let mut config = test_config(&server);
    config.timeout_seconds = 1;
    let (auditor, stats) = test_auditor(config);

    let report = auditor.audit(&server.url("/").to_string()).await.unwrap();

    let mobile = report.profile(DeviceProfile::Mobile).unwrap();
    assert!(mobile.result.is_none());
    let error = mobile.error.as_deref().unwrap();
    assert!(error.starts_with("mobile audit failed"), "got: {error}");
    assert!(error.contains("timeout"), "got: {error}");

    let desktop = report.profile(DeviceProfile::Desktop).unwrap();
    assert_eq!(desktop.result.as_ref().unwrap().score, 90);

    assert_eq!(stats.get_error_count(ErrorType::HttpRequestTimeoutError), 1);
}
