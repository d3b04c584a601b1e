//! Error handling and audit statistics.
//!
//! This module provides:
//! - Error type definitions (`AuditError`, `InitializationError`)
//! - Counters for errors, warnings and info events
//! - Retry strategy configuration and error categorization
//!
//! Counters are categorized into:
//! - **Errors**: Failures of an audit step
//! - **Warnings**: Data skipped without failing a step (malformed JSON-LD, ...)
//! - **Info**: Notable events such as retries

mod categorization;
mod stats;
mod types;

// Re-export public API
pub use categorization::{
    categorize_reqwest_error, categorize_status, describe_reqwest_error, get_retry_strategy,
    is_retriable_error, is_retriable_status,
};
pub use stats::ProcessingStats;
pub use types::{AuditError, ErrorType, InfoType, InitializationError, WarningType};

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use strum::IntoEnumIterator;

    #[test]
    fn test_processing_stats_initialization() {
        let stats = ProcessingStats::new();
        for error_type in ErrorType::iter() {
            assert_eq!(stats.get_error_count(error_type), 0);
        }
        for warning_type in WarningType::iter() {
            assert_eq!(stats.get_warning_count(warning_type), 0);
        }
        for info_type in InfoType::iter() {
            assert_eq!(stats.get_info_count(info_type), 0);
        }
    }

    #[test]
    fn test_processing_stats_increment() {
        let stats = ProcessingStats::new();
        stats.increment_error(ErrorType::HttpRequestForbidden);
        assert_eq!(stats.get_error_count(ErrorType::HttpRequestForbidden), 1);

        stats.increment_warning(WarningType::MalformedJsonLd);
        stats.add_warnings(WarningType::MalformedJsonLd, 2);
        assert_eq!(stats.get_warning_count(WarningType::MalformedJsonLd), 3);

        stats.increment_info(InfoType::RequestRetried);
        assert_eq!(stats.get_info_count(InfoType::RequestRetried), 1);

        assert_eq!(stats.total_errors(), 1);
        assert_eq!(stats.total_warnings(), 3);
        assert_eq!(stats.total_info(), 1);
    }

    #[test]
    fn test_add_zero_warnings_is_noop() {
        let stats = ProcessingStats::new();
        stats.add_warnings(WarningType::JsonLdMissingType, 0);
        assert_eq!(stats.total_warnings(), 0);
    }

    #[test]
    fn test_processing_stats_concurrent_increments() {
        let stats = Arc::new(ProcessingStats::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let stats = Arc::clone(&stats);
                std::thread::spawn(move || {
                    for _ in 0..100 {
                        stats.increment_error(ErrorType::MarkupFetchError);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().expect("thread panicked");
        }
        assert_eq!(stats.get_error_count(ErrorType::MarkupFetchError), 800);
    }
}
