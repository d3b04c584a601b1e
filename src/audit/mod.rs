//! Performance auditing through the PageSpeed Insights API.
//!
//! One call per device profile (`strategy=mobile`, then `strategy=desktop`);
//! each call yields the performance score and the FCP, LCP and TBT display
//! values, or a failure attributed to that profile alone.

mod client;
mod response;

pub use client::PageSpeedClient;
pub use response::score_to_percent;
