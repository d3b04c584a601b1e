//! page_audit library: PageSpeed scoring and schema.org recommendations
//!
//! For one page this library runs Google's PageSpeed Insights analysis twice
//! (mobile, then desktop), fetches the page itself to collect the schema.org
//! types it declares (JSON-LD and microdata), and lists the types from a fixed
//! catalog that the page does not declare.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use page_audit::{Config, PageAuditor, ProcessingStats};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     api_key: std::env::var("PAGESPEED_API_KEY")?,
//!     ..Default::default()
//! };
//!
//! let auditor = PageAuditor::new(config, Arc::new(ProcessingStats::new()))?;
//! let report = auditor.audit("example.com").await?;
//! println!("{}", page_audit::app::render_plain(&report));
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

pub mod app;
pub mod audit;
pub mod config;
pub mod error_handling;
mod fetch;
pub mod initialization;
pub mod models;
pub mod parse;
pub mod recommend;
pub mod server;
mod utils;

// Re-export public API
pub use config::{Config, LogFormat, LogLevel, MatchMode, OutputFormat};
pub use error_handling::{AuditError, InitializationError, ProcessingStats};
pub use models::{AuditReport, DeviceProfile, PerformanceResult, ProfileOutcome, SchemaFindings};
pub use run::PageAuditor;

// Internal run module (one audit invocation, end to end)
mod run {
    use std::sync::Arc;

    use chrono::Utc;
    use log::{info, warn};

    use crate::app::validate_submission;
    use crate::audit::PageSpeedClient;
    use crate::config::Config;
    use crate::error_handling::{AuditError, InitializationError, ProcessingStats};
    use crate::fetch::fetch_markup;
    use crate::initialization::init_client;
    use crate::models::{AuditReport, SchemaFindings};
    use crate::parse::{extract_schema_types, SchemaTypes};
    use crate::recommend::{self, RECOMMENDED_SCHEMA_TYPES};

    /// Runs audits with one shared HTTP client and one set of counters.
    ///
    /// Cheap to share behind an `Arc`; nothing in it is mutated per audit
    /// except the atomic counters in `ProcessingStats`.
    #[derive(Debug)]
    pub struct PageAuditor {
        client: Arc<reqwest::Client>,
        pagespeed: PageSpeedClient,
        config: Config,
        stats: Arc<ProcessingStats>,
    }

    impl PageAuditor {
        /// Validates `config` and builds the HTTP client.
        ///
        /// # Errors
        ///
        /// Returns `InitializationError::ConfigError` for an invalid
        /// configuration (missing API key, zero timeout, bad endpoint) and
        /// `InitializationError::HttpClientError` if the client cannot be
        /// built.
        pub fn new(config: Config, stats: Arc<ProcessingStats>) -> Result<Self, InitializationError> {
            config.validate()?;
            let client = init_client(&config)?;
            let pagespeed = PageSpeedClient::new(
                Arc::clone(&client),
                config.endpoint.clone(),
                config.api_key.clone(),
                config.retry_attempts,
            );
            Ok(PageAuditor {
                client,
                pagespeed,
                config,
                stats,
            })
        }

        pub fn config(&self) -> &Config {
            &self.config
        }

        pub fn stats(&self) -> &Arc<ProcessingStats> {
            &self.stats
        }

        /// Fetches `url` and extracts the schema.org types it declares.
        ///
        /// # Errors
        ///
        /// Returns `AuditError::MarkupFetch` if the page cannot be fetched;
        /// no partial set is produced.
        pub async fn extract_types(&self, url: &str) -> Result<SchemaTypes, AuditError> {
            let html = fetch_markup(&self.client, url, self.config.retry_attempts, &self.stats).await?;
            Ok(extract_schema_types(&html, &self.stats))
        }

        /// Audits one submitted URL.
        ///
        /// Runs the mobile and desktop scoring calls and then the markup
        /// extraction, one after the other. Failures of any of these steps
        /// are recorded in the report; the other steps still run.
        ///
        /// # Errors
        ///
        /// Returns `AuditError::InvalidInput` if `raw_url` is empty or
        /// whitespace. Nothing is fetched in that case.
        pub async fn audit(&self, raw_url: &str) -> Result<AuditReport, AuditError> {
            let request = validate_submission(raw_url)?;
            let url = request.target_url;
            let audited_at = Utc::now().to_rfc3339();
            info!("Auditing {url}");

            let profiles = self.pagespeed.run_all_profiles(&url, &self.stats).await;

            let (schema, schema_error) = match self.extract_types(&url).await {
                Ok(SchemaTypes {
                    types,
                    malformed_blocks,
                }) => {
                    let missing = recommend::missing(
                        &RECOMMENDED_SCHEMA_TYPES,
                        &types,
                        self.config.match_mode,
                    );
                    info!(
                        "{url} declares {} schema type(s), {} recommended type(s) missing",
                        types.len(),
                        missing.len()
                    );
                    let findings = SchemaFindings {
                        found: types,
                        missing,
                        malformed_blocks,
                    };
                    (Some(findings), None)
                }
                Err(e) => {
                    warn!("{e}");
                    (None, Some(e.to_string()))
                }
            };

            Ok(AuditReport {
                url,
                audited_at,
                profiles,
                schema,
                schema_error,
            })
        }
    }
}
