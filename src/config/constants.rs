//! Configuration constants.
//!
//! Defaults for the scoring endpoint, timeouts, retry policy and the
//! PageSpeed audit identifiers read from each response.

/// PageSpeed Insights v5 endpoint queried once per device profile.
pub const DEFAULT_PAGESPEED_ENDPOINT: &str =
    "https://www.googleapis.com/pagespeedonline/v5/runPagespeed";

/// Environment variable holding the PageSpeed API key.
pub const API_KEY_ENV_VAR: &str = "PAGESPEED_API_KEY";

/// Per-request timeout in seconds.
///
/// PageSpeed runs a full Lighthouse pass server-side, so a single call
/// routinely takes 10-20s.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// TCP connection timeout in seconds
pub const TCP_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Default User-Agent string for HTTP requests.
///
/// Users can override this via the `--user-agent` CLI flag.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

/// Default port for `serve`.
pub const DEFAULT_SERVER_PORT: u16 = 8080;

// Retry strategy
/// Initial delay in milliseconds before the first retry
pub const RETRY_INITIAL_DELAY_MS: u64 = 500;
/// Factor by which retry delay is multiplied on each attempt
pub const RETRY_FACTOR: u64 = 2;
/// Maximum delay between retries in seconds
pub const RETRY_MAX_DELAY_SECS: u64 = 5;
/// Retries after the initial attempt for transient failures.
/// Set to 1 = initial attempt + 1 retry.
pub const DEFAULT_RETRY_ATTEMPTS: usize = 1;

// PageSpeed audit identifiers
pub const AUDIT_FIRST_CONTENTFUL_PAINT: &str = "first-contentful-paint";
pub const AUDIT_LARGEST_CONTENTFUL_PAINT: &str = "largest-contentful-paint";
pub const AUDIT_TOTAL_BLOCKING_TIME: &str = "total-blocking-time";

// HTTP status codes (for clarity and consistency)
pub const HTTP_STATUS_TOO_MANY_REQUESTS: u16 = 429;

/// Maximum characters of an upstream error body kept in an error message.
pub const MAX_ERROR_BODY_CHARS: usize = 300;
