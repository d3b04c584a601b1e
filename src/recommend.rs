//! Schema.org recommendations.
//!
//! Compares the types a page declares against a fixed catalog of types most
//! sites benefit from and lists what is missing.

use std::collections::BTreeSet;

use crate::config::MatchMode;

/// Recommended schema.org types, in reporting order.
pub const RECOMMENDED_SCHEMA_TYPES: [&str; 9] = [
    "Organization",
    "LocalBusiness",
    "WebSite",
    "WebPage",
    "BreadcrumbList",
    "Article",
    "Product",
    "FAQPage",
    "Review",
];

/// Catalog entries not present in `found`, in catalog order.
///
/// With `MatchMode::Exact` a discovered `webpage` does not satisfy `WebPage`;
/// `MatchMode::CaseInsensitive` compares ASCII-case-insensitively.
pub fn missing(catalog: &[&str], found: &BTreeSet<String>, mode: MatchMode) -> Vec<String> {
    catalog
        .iter()
        .filter(|entry| !is_declared(entry, found, mode))
        .map(|entry| entry.to_string())
        .collect()
}

fn is_declared(entry: &str, found: &BTreeSet<String>, mode: MatchMode) -> bool {
    match mode {
        MatchMode::Exact => found.contains(entry),
        MatchMode::CaseInsensitive => found.iter().any(|t| t.eq_ignore_ascii_case(entry)),
    }
}
