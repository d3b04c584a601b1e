//! Audit statistics tracking.
//!
//! Atomic counters for errors, warnings and informational events, shared
//! between the CLI loop and the server handlers.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use strum::IntoEnumIterator;

use super::types::{ErrorType, InfoType, WarningType};

/// Thread-safe audit statistics tracker.
///
/// Every variant of `ErrorType`, `WarningType` and `InfoType` gets a counter
/// at construction, so lookups never miss. Share it with `Arc`.
#[derive(Debug)]
pub struct ProcessingStats {
    errors: HashMap<ErrorType, AtomicUsize>,
    warnings: HashMap<WarningType, AtomicUsize>,
    info: HashMap<InfoType, AtomicUsize>,
}

impl Default for ProcessingStats {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessingStats {
    pub fn new() -> Self {
        ProcessingStats {
            errors: ErrorType::iter().map(|e| (e, AtomicUsize::new(0))).collect(),
            warnings: WarningType::iter()
                .map(|w| (w, AtomicUsize::new(0)))
                .collect(),
            info: InfoType::iter().map(|i| (i, AtomicUsize::new(0))).collect(),
        }
    }

    pub fn increment_error(&self, error: ErrorType) {
        match self.errors.get(&error) {
            Some(counter) => {
                counter.fetch_add(1, Ordering::Relaxed);
            }
            None => log::error!("No counter for error type {:?}", error),
        }
    }

    pub fn increment_warning(&self, warning: WarningType) {
        self.add_warnings(warning, 1);
    }

    /// Adds `count` occurrences of a warning at once.
    pub fn add_warnings(&self, warning: WarningType, count: usize) {
        if count == 0 {
            return;
        }
        match self.warnings.get(&warning) {
            Some(counter) => {
                counter.fetch_add(count, Ordering::Relaxed);
            }
            None => log::error!("No counter for warning type {:?}", warning),
        }
    }

    pub fn increment_info(&self, info_type: InfoType) {
        match self.info.get(&info_type) {
            Some(counter) => {
                counter.fetch_add(1, Ordering::Relaxed);
            }
            None => log::error!("No counter for info type {:?}", info_type),
        }
    }

    pub fn get_error_count(&self, error: ErrorType) -> usize {
        self.errors
            .get(&error)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    pub fn get_warning_count(&self, warning: WarningType) -> usize {
        self.warnings
            .get(&warning)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    pub fn get_info_count(&self, info_type: InfoType) -> usize {
        self.info
            .get(&info_type)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    /// Get total error count across all error types.
    pub fn total_errors(&self) -> usize {
        ErrorType::iter().map(|e| self.get_error_count(e)).sum()
    }

    /// Get total warning count across all warning types.
    pub fn total_warnings(&self) -> usize {
        WarningType::iter().map(|w| self.get_warning_count(w)).sum()
    }

    /// Get total info count across all info types.
    pub fn total_info(&self) -> usize {
        InfoType::iter().map(|i| self.get_info_count(i)).sum()
    }

    /// Logs every non-zero counter at `info` level.
    pub fn log_summary(&self) {
        if self.total_errors() + self.total_warnings() + self.total_info() == 0 {
            log::info!("No errors or warnings recorded");
            return;
        }
        for error in ErrorType::iter() {
            let count = self.get_error_count(error);
            if count > 0 {
                log::info!("   {}: {}", error.as_str(), count);
            }
        }
        for warning in WarningType::iter() {
            let count = self.get_warning_count(warning);
            if count > 0 {
                log::info!("   {}: {}", warning.as_str(), count);
            }
        }
        for info_type in InfoType::iter() {
            let count = self.get_info_count(info_type);
            if count > 0 {
                log::info!("   {}: {}", info_type.as_str(), count);
            }
        }
    }
}
