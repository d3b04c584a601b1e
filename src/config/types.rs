//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::fmt;

use clap::{Parser, Subcommand, ValueEnum};

use crate::config::constants::{
    API_KEY_ENV_VAR, DEFAULT_PAGESPEED_ENDPOINT, DEFAULT_RETRY_ATTEMPTS, DEFAULT_SERVER_PORT,
    DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT,
};
use crate::error_handling::AuditError;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// How an audit report is written to stdout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable metric blocks and schema lists
    Plain,
    /// One JSON document per audited URL
    Json,
}

/// How discovered schema types are compared against the recommendation catalog.
///
/// `Exact` is the default: `webpage` does not satisfy `WebPage`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum MatchMode {
    /// Case-sensitive string equality
    #[default]
    Exact,
    /// ASCII case-insensitive equality
    CaseInsensitive,
}

/// Library configuration (no CLI dependencies).
///
/// # Examples
///
/// ```no_run
/// use page_audit::Config;
///
/// let config = Config {
///     api_key: "my-key".to_string(),
///     timeout_seconds: 45,
///     ..Default::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone)]
pub struct Config {
    /// PageSpeed Insights endpoint
    pub endpoint: String,

    /// PageSpeed API key (injected into the auditor, never logged)
    pub api_key: String,

    /// Per-request timeout in seconds
    pub timeout_seconds: u64,

    /// HTTP User-Agent header value used for the page fetch
    pub user_agent: String,

    /// Retries after the initial attempt for transient failures (0 disables)
    pub retry_attempts: usize,

    /// Catalog comparison mode
    pub match_mode: MatchMode,

    /// Log level
    pub log_level: LogLevel,

    /// Log format
    pub log_format: LogFormat,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"<redacted>")
            .field("timeout_seconds", &self.timeout_seconds)
            .field("user_agent", &self.user_agent)
            .field("retry_attempts", &self.retry_attempts)
            .field("match_mode", &self.match_mode)
            .field("log_level", &self.log_level)
            .field("log_format", &self.log_format)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_PAGESPEED_ENDPOINT.to_string(),
            api_key: String::new(),
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            retry_attempts: DEFAULT_RETRY_ATTEMPTS,
            match_mode: MatchMode::Exact,
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
        }
    }
}

impl Config {
    /// Checks the configuration before any network resource is built.
    ///
    /// # Errors
    ///
    /// Returns `AuditError::Config` if the API key is missing, the timeout is
    /// zero, or the endpoint is not an absolute http(s) URL.
    pub fn validate(&self) -> Result<(), AuditError> {
        if self.api_key.trim().is_empty() {
            return Err(AuditError::Config(format!(
                "missing PageSpeed API key: set {API_KEY_ENV_VAR} or pass --api-key"
            )));
        }
        if self.timeout_seconds == 0 {
            return Err(AuditError::Config(
                "timeout must be at least 1 second".to_string(),
            ));
        }
        match url::Url::parse(&self.endpoint) {
            Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => Ok(()),
            Ok(parsed) => Err(AuditError::Config(format!(
                "unsupported endpoint scheme '{}'",
                parsed.scheme()
            ))),
            Err(e) => Err(AuditError::Config(format!(
                "invalid endpoint '{}': {e}",
                self.endpoint
            ))),
        }
    }
}

/// Command-line options.
#[derive(Debug, Parser)]
#[command(
    name = "page_audit",
    version,
    about = "Runs PageSpeed Insights (mobile and desktop) against a page and suggests missing schema.org types."
)]
pub struct Opt {
    /// PageSpeed Insights API key
    #[arg(long, env = API_KEY_ENV_VAR, hide_env_values = true, global = true)]
    pub api_key: Option<String>,

    /// PageSpeed Insights endpoint
    #[arg(long, default_value = DEFAULT_PAGESPEED_ENDPOINT, global = true)]
    pub endpoint: String,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS, global = true)]
    pub timeout_seconds: u64,

    /// Retries after the first attempt for transient network failures (0 disables)
    #[arg(long, default_value_t = DEFAULT_RETRY_ATTEMPTS, global = true)]
    pub retry_attempts: usize,

    /// Catalog comparison: exact|case-insensitive
    #[arg(long, value_enum, default_value_t = MatchMode::Exact, global = true)]
    pub match_mode: MatchMode,

    /// HTTP User-Agent header value for the page fetch
    #[arg(long, default_value = DEFAULT_USER_AGENT, global = true)]
    pub user_agent: String,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Info, global = true)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain, global = true)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Command,
}

/// What the binary does once configured.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Audit one or more URLs. Pass `-` to read URLs interactively from stdin.
    Audit {
        /// URLs to audit (scheme optional, `https://` is assumed)
        #[arg(required = true)]
        urls: Vec<String>,

        /// Report format: plain|json
        #[arg(long, value_enum, default_value_t = OutputFormat::Plain)]
        format: OutputFormat,
    },
    /// Serve `GET /audit?url=...` as JSON for a browser front end.
    Serve {
        /// Port to listen on (127.0.0.1)
        #[arg(long, default_value_t = DEFAULT_SERVER_PORT)]
        port: u16,
    },
}

impl From<&Opt> for Config {
    fn from(opt: &Opt) -> Self {
        Config {
            endpoint: opt.endpoint.clone(),
            api_key: opt.api_key.clone().unwrap_or_default(),
            timeout_seconds: opt.timeout_seconds,
            user_agent: opt.user_agent.clone(),
            retry_attempts: opt.retry_attempts,
            match_mode: opt.match_mode,
            log_level: opt.log_level.clone(),
            log_format: opt.log_format.clone(),
        }
    }
}
