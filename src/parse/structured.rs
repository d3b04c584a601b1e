//! Schema.org type extraction.
//!
//! Two embedding conventions are read:
//! - JSON-LD (`<script type="application/ld+json">`): the `@type` of the
//!   top-level object, or of every element when the block is a list
//! - Microdata (`itemscope` + `itemtype`): the last path segment of the
//!   `itemtype` URL

use std::collections::BTreeSet;

use log::warn;
use scraper::Html;
use serde_json::Value;
use url::Url;

use crate::error_handling::{ProcessingStats, WarningType};
use crate::utils::parse_selector_unsafe;

/// Type name recorded for a JSON-LD item that declares no usable `@type`.
pub const UNKNOWN_SCHEMA_TYPE: &str = "Unknown";

const JSON_LD_CONTENT_TYPE: &str = "application/ld+json";

/// Schema types declared by one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaTypes {
    /// Deduplicated type names from both sources.
    pub types: BTreeSet<String>,
    /// JSON-LD blocks skipped because they were not valid JSON.
    pub malformed_blocks: usize,
}

/// Extracts every declared schema.org type from an HTML document.
///
/// A malformed JSON-LD block is skipped (and counted) without affecting the
/// other blocks or the microdata pass.
pub fn extract_schema_types(html: &str, stats: &ProcessingStats) -> SchemaTypes {
    let document = Html::parse_document(html);
    let mut types = BTreeSet::new();
    let mut malformed_blocks = 0;

    for (index, block) in json_ld_blocks(&document).into_iter().enumerate() {
        match serde_json::from_str::<Value>(block.trim()) {
            Ok(value) => collect_json_ld_types(&value, &mut types, stats),
            Err(e) => {
                malformed_blocks += 1;
                warn!("Skipping malformed JSON-LD block #{}: {e}", index + 1);
            }
        }
    }
    stats.add_warnings(WarningType::MalformedJsonLd, malformed_blocks);

    types.extend(microdata_types(&document));

    SchemaTypes {
        types,
        malformed_blocks,
    }
}

/// Text content of every script whose `type` marks it as JSON-LD.
///
/// The content type is compared ASCII case-insensitively, ignoring
/// surrounding whitespace.
fn json_ld_blocks(document: &Html) -> Vec<String> {
    let selector = parse_selector_unsafe("script[type]", "JSON-LD extraction");
    document
        .select(&selector)
        .filter(|script| {
            script
                .value()
                .attr("type")
                .is_some_and(|t| t.trim().eq_ignore_ascii_case(JSON_LD_CONTENT_TYPE))
        })
        .map(|script| script.text().collect::<String>())
        .collect()
}

fn collect_json_ld_types(value: &Value, types: &mut BTreeSet<String>, stats: &ProcessingStats) {
    match value {
        Value::Array(items) => {
            for item in items {
                collect_item_type(item, types, stats);
            }
        }
        item => collect_item_type(item, types, stats),
    }
}

fn collect_item_type(item: &Value, types: &mut BTreeSet<String>, stats: &ProcessingStats) {
    let declared: Vec<&str> = match item.get("@type") {
        Some(Value::String(name)) => vec![name.as_str()],
        Some(Value::Array(names)) => names.iter().filter_map(Value::as_str).collect(),
        _ => Vec::new(),
    };
    // Names are kept verbatim; only an empty string counts as undeclared
    let declared: Vec<&str> = declared.into_iter().filter(|name| !name.is_empty()).collect();

    if declared.is_empty() {
        stats.increment_warning(WarningType::JsonLdMissingType);
        types.insert(UNKNOWN_SCHEMA_TYPE.to_string());
    } else {
        types.extend(declared.into_iter().map(str::to_string));
    }
}

fn microdata_types(document: &Html) -> Vec<String> {
    let selector = parse_selector_unsafe("[itemscope][itemtype]", "microdata extraction");
    document
        .select(&selector)
        .flat_map(|element| {
            element
                .value()
                .attr("itemtype")
                .unwrap_or_default()
                .split_whitespace()
                .filter_map(itemtype_name)
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Type name from an `itemtype` URL: the last non-empty path segment.
///
/// A trailing slash after a segment is ignored (`https://schema.org/Thing/`
/// -> `Thing`), but a URL with an empty path yields nothing
/// (`https://schema.org/` is not a type). Values that are not absolute URLs
/// fall back to the text after the final `/`, so `Event` is returned as is.
pub fn itemtype_name(itemtype: &str) -> Option<String> {
    let itemtype = itemtype.trim();
    let name = match Url::parse(itemtype) {
        Ok(url) if !url.cannot_be_a_base() => url
            .path_segments()
            .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
            .map(str::to_string),
        _ => itemtype
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .map(str::to_string),
    };
    name.map(|n| n.trim().to_string()).filter(|n| !n.is_empty())
}
