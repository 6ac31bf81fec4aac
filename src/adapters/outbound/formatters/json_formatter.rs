use crate::image_stats::domain::{RateLimit, Report};
use crate::ports::outbound::ReportFormatter;
use crate::shared::Result;
use serde::Serialize;

#[derive(Serialize)]
struct JsonDocument<'a> {
    rate_limits: &'a [RateLimit],
    report: &'a Report,
}

/// JsonFormatter adapter producing a pretty-printed JSON document
///
/// Top-level keys are `rate_limits` (successful queries only) and `report`.
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for JsonFormatter {
    fn format(&self, report: &Report, rate_limits: &[RateLimit]) -> Result<String> {
        let document = JsonDocument {
            rate_limits,
            report,
        };
        let mut json = serde_json::to_string_pretty(&document)?;
        json.push('\n');
        Ok(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image_stats::domain::{ImageIdentity, Period, ReportRow, ReportSummary};
    use serde_json::Value;

    fn report() -> Report {
        Report {
            rows: vec![ReportRow {
                rank: 1,
                identity: ImageIdentity::parse("repo/a:v1").unwrap(),
                count: 2,
                in_use: true,
            }],
            summary: ReportSummary {
                total_pulls: 2,
                unique_images: 1,
                active_images: 1,
                period: Period::Hours(48),
            },
        }
    }

    #[test]
    fn test_json_structure() {
        let output = JsonFormatter::new().format(&report(), &[]).unwrap();
        let value: Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["rate_limits"], Value::Array(vec![]));
        assert_eq!(value["report"]["rows"][0]["rank"], 1);
        assert_eq!(value["report"]["rows"][0]["identity"], "repo/a");
        assert_eq!(value["report"]["rows"][0]["count"], 2);
        assert_eq!(value["report"]["rows"][0]["in_use"], true);
        assert_eq!(value["report"]["summary"]["total_pulls"], 2);
        assert_eq!(value["report"]["summary"]["period"], "Last 48 hours");
    }

    #[test]
    fn test_json_includes_rate_limits() {
        let limits = vec![RateLimit::new("Docker Hub", 100, 40).with_source("203.0.113.7")];
        let output = JsonFormatter::new().format(&report(), &limits).unwrap();
        let value: Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["rate_limits"][0]["registry"], "Docker Hub");
        assert_eq!(value["rate_limits"][0]["used"], 60);
        assert_eq!(value["rate_limits"][0]["source"], "203.0.113.7");
        assert_eq!(value["rate_limits"][0]["reset"], Value::Null);
    }
}
