//! HTTP fetching.
//!
//! - `request`: browser-like page headers and the selective retry loop
//!   shared by the scoring calls and the page fetch
//! - `markup`: the target page fetch feeding the structured-data extractor

mod markup;
mod request;

pub use markup::fetch_markup;
pub(crate) use request::send_with_retry;
