//! HTML parsing and structured-data extraction.
//!
//! All parsing is done using CSS selectors via the `scraper` crate.

mod structured;

// Re-export public API
pub use structured::{extract_schema_types, itemtype_name, SchemaTypes, UNKNOWN_SCHEMA_TYPE};
