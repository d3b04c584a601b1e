//! Report rendering for the CLI and the HTTP front end.

use std::fmt;

use crate::models::{AuditReport, DeviceProfile, ProfileOutcome};

/// Plain-text view of an `AuditReport`.
pub struct PlainReport<'a>(pub &'a AuditReport);

impl fmt::Display for PlainReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;
        writeln!(f, "PageSpeed report for {}", report.url)?;

        for outcome in &report.profiles {
            write_profile(f, outcome)?;
        }

        writeln!(f)?;
        match (&report.schema, &report.schema_error) {
            (Some(schema), _) => {
                if schema.found.is_empty() {
                    writeln!(f, "Schema types found: none")?;
                } else {
                    let found: Vec<&str> = schema.found.iter().map(String::as_str).collect();
                    writeln!(f, "Schema types found: {}", found.join(", "))?;
                }
                if schema.missing.is_empty() {
                    writeln!(f, "✅ All recommended schema types are present")?;
                } else {
                    writeln!(
                        f,
                        "Missing recommended types: {}",
                        schema.missing.join(", ")
                    )?;
                }
                match schema.malformed_blocks {
                    0 => {}
                    1 => writeln!(f, "(1 malformed JSON-LD block skipped)")?,
                    n => writeln!(f, "({n} malformed JSON-LD blocks skipped)")?,
                }
            }
            (None, Some(error)) => writeln!(f, "❌ {error}")?,
            (None, None) => writeln!(f, "Schema types: not checked")?,
        }
        Ok(())
    }
}

fn write_profile(f: &mut fmt::Formatter<'_>, outcome: &ProfileOutcome) -> fmt::Result {
    let label = match outcome.profile {
        DeviceProfile::Mobile => "📱 Mobile",
        DeviceProfile::Desktop => "🖥️ Desktop",
    };
    writeln!(f)?;
    writeln!(f, "{label}")?;
    match (&outcome.result, &outcome.error) {
        (Some(result), _) => {
            writeln!(f, "   Score: {} / 100", result.score)?;
            writeln!(
                f,
                "   First Contentful Paint: {}",
                result.first_contentful_paint
            )?;
            writeln!(
                f,
                "   Largest Contentful Paint: {}",
                result.largest_contentful_paint
            )?;
            writeln!(f, "   Total Blocking Time: {}", result.total_blocking_time)
        }
        (None, Some(error)) => writeln!(f, "   ❌ {error}"),
        (None, None) => writeln!(f, "   not run"),
    }
}

pub fn render_plain(report: &AuditReport) -> String {
    PlainReport(report).to_string()
}

pub fn render_json(report: &AuditReport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}
