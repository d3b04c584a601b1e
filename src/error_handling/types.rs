//! Error type definitions.
//!
//! This module defines all error, warning, and info types used throughout the application.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

use crate::models::DeviceProfile;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),

    /// The configuration was rejected before any resource was built.
    #[error("{0}")]
    ConfigError(#[from] AuditError),
}

/// Errors surfaced by an audit.
///
/// `Fetch` and `MarkupFetch` are captured per step and rendered into the
/// report; `InvalidInput` rejects a submission before any request is sent;
/// `Config` is fatal at startup.
#[derive(Error, Debug)]
pub enum AuditError {
    /// The submitted URL was empty.
    #[error("Please enter a URL to audit")]
    InvalidInput,

    /// A PageSpeed call failed for one device profile.
    #[error("{profile} audit failed: {message}")]
    Fetch {
        profile: DeviceProfile,
        /// HTTP status, when the upstream answered at all.
        status: Option<u16>,
        message: String,
    },

    /// Fetching the target page failed; no schema types are reported.
    #[error("Could not fetch page markup: {message}")]
    MarkupFetch { message: String },

    /// Missing or invalid configuration (e.g. no API key).
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AuditError {
    /// Profile the error is attributed to, if any.
    pub fn profile(&self) -> Option<DeviceProfile> {
        match self {
            AuditError::Fetch { profile, .. } => Some(*profile),
            _ => None,
        }
    }
}

/// Types of errors that can occur while auditing a URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum ErrorType {
    // HTTP/Network errors
    HttpRequestBuilderError,
    HttpRequestTimeoutError,
    HttpRequestRequestError,
    HttpRequestConnectError,
    HttpRequestBodyError,
    HttpRequestDecodeError,
    HttpRequestOtherError,
    HttpRequestTooManyRequests,
    // Specific HTTP status code errors
    HttpRequestBadRequest,          // 400 - usually an unreachable or invalid target URL
    HttpRequestUnauthorized,        // 401
    HttpRequestForbidden,           // 403 - invalid or restricted API key
    HttpRequestNotFound,            // 404
    HttpRequestInternalServerError, // 500 - Lighthouse could not load the page
    HttpRequestServiceUnavailable,  // 503
    // Response handling
    UnexpectedPageSpeedResponse, // 200 with a body missing the expected fields
    MarkupFetchError,
}

/// Types of warnings that can occur while auditing a URL.
///
/// Warnings never fail a step but are worth surfacing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum WarningType {
    MalformedJsonLd,       // JSON-LD block skipped, content was not valid JSON
    JsonLdMissingType,     // JSON-LD item without @type, reported as "Unknown"
    NonSuccessMarkupStatus, // Page answered non-2xx; body parsed anyway
}

/// Informational metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum InfoType {
    RequestRetried, // A transient failure was retried
}

impl std::fmt::Display for ErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ErrorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorType::HttpRequestBuilderError => "HTTP request builder error",
            ErrorType::HttpRequestTimeoutError => "HTTP request timeout error",
            ErrorType::HttpRequestRequestError => "HTTP request error",
            ErrorType::HttpRequestConnectError => "HTTP request connect error",
            ErrorType::HttpRequestBodyError => "HTTP request body error",
            ErrorType::HttpRequestDecodeError => "HTTP request decode error",
            ErrorType::HttpRequestOtherError => "HTTP request other error",
            ErrorType::HttpRequestTooManyRequests => "Too many requests",
            ErrorType::HttpRequestBadRequest => "Bad Request (400)",
            ErrorType::HttpRequestUnauthorized => "Unauthorized (401)",
            ErrorType::HttpRequestForbidden => "Forbidden (403)",
            ErrorType::HttpRequestNotFound => "Not Found (404)",
            ErrorType::HttpRequestInternalServerError => "Internal Server Error (500)",
            ErrorType::HttpRequestServiceUnavailable => "Service Unavailable (503)",
            ErrorType::UnexpectedPageSpeedResponse => "Unexpected PageSpeed response",
            ErrorType::MarkupFetchError => "Markup fetch error",
        }
    }
}

impl WarningType {
    /// Returns a human-readable string representation of the warning type.
    pub fn as_str(&self) -> &'static str {
        match self {
            WarningType::MalformedJsonLd => "Malformed JSON-LD block",
            WarningType::JsonLdMissingType => "JSON-LD item without @type",
            WarningType::NonSuccessMarkupStatus => "Non-success status for page markup",
        }
    }
}

impl InfoType {
    /// Returns a human-readable string representation of the info type.
    pub fn as_str(&self) -> &'static str {
        match self {
            InfoType::RequestRetried => "Request retried",
        }
    }
}
