//! Application-level helpers around the audit core.
//!
//! URL gating/normalization on the way in, report rendering on the way out.

pub mod render;
pub mod url;

// Re-export public API
pub use render::{render_json, render_plain, PlainReport};
pub use url::{normalize_url, validate_submission};
