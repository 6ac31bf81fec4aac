use crate::image_stats::domain::{RateLimit, Report};
use crate::ports::outbound::ReportFormatter;
use crate::shared::Result;
use std::fmt::Write;

const TABLE_RULE_WIDTH: usize = 71;
const RATE_LIMIT_RULE: &str = "================================";
/// Spaces between table columns
const COLUMN_PADDING: usize = 3;
const RESET_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const TABLE_HEADER: [&str; 4] = ["No.", "Image Name", "Pull Count", "In Use"];

/// TextFormatter adapter rendering the aligned plain-text table
pub struct TextFormatter;

impl TextFormatter {
    pub fn new() -> Self {
        Self
    }

    fn rate_limit_title(rate_limit: &RateLimit) -> String {
        if rate_limit.is_docker_hub() {
            let mode = if rate_limit.authenticated {
                "Authenticated"
            } else {
                "Anonymous"
            };
            format!("{} Rate Limits ({}):", rate_limit.registry, mode)
        } else {
            format!("{} Rate Limits:", rate_limit.registry)
        }
    }

    fn render_rate_limit(output: &mut String, rate_limit: &RateLimit) -> std::fmt::Result {
        writeln!(output)?;
        writeln!(output, "{}", Self::rate_limit_title(rate_limit))?;
        writeln!(output, "{}", RATE_LIMIT_RULE)?;
        writeln!(output, "Limit: {}", rate_limit.limit)?;
        writeln!(output, "Remaining: {}", rate_limit.remaining)?;
        writeln!(output, "Used: {}", rate_limit.used)?;
        if let Some(reset) = &rate_limit.reset {
            writeln!(output, "Reset Time: {}", reset.format(RESET_TIME_FORMAT))?;
        }
        if let Some(source) = &rate_limit.source {
            writeln!(output, "Source: {}", source)?;
        }
        writeln!(output, "{}", RATE_LIMIT_RULE)
    }

    /// Pads every cell but the last to its column width.
    fn render_table(output: &mut String, rows: &[[String; 4]]) -> std::fmt::Result {
        let mut widths = [0usize; 4];
        for row in rows {
            for (width, cell) in widths.iter_mut().zip(row.iter()) {
                *width = (*width).max(cell.chars().count());
            }
        }

        for (index, row) in rows.iter().enumerate() {
            let mut line = String::new();
            for (column, cell) in row.iter().enumerate() {
                if column + 1 == row.len() {
                    line.push_str(cell);
                } else {
                    write!(line, "{:<width$}", cell, width = widths[column] + COLUMN_PADDING)?;
                }
            }
            writeln!(output, "{}", line.trim_end())?;
            if index == 0 {
                writeln!(output, "{}", "-".repeat(TABLE_RULE_WIDTH))?;
            }
        }
        Ok(())
    }

    fn render(
        report: &Report,
        rate_limits: &[RateLimit],
    ) -> std::result::Result<String, std::fmt::Error> {
        let mut output = String::new();

        for rate_limit in rate_limits {
            Self::render_rate_limit(&mut output, rate_limit)?;
        }

        let mut rows = vec![TABLE_HEADER.map(str::to_string)];
        rows.extend(report.rows.iter().map(|row| {
            [
                row.rank.to_string(),
                row.identity.to_string(),
                row.count.to_string(),
                if row.in_use { "Yes" } else { "No" }.to_string(),
            ]
        }));

        let summary = &report.summary;
        writeln!(output)?;
        writeln!(output, "Image Pull Statistics ({}):", summary.period)?;
        writeln!(output, "{}", "=".repeat(TABLE_RULE_WIDTH))?;
        Self::render_table(&mut output, &rows)?;
        writeln!(output, "{}", "=".repeat(TABLE_RULE_WIDTH))?;

        writeln!(output)?;
        writeln!(output, "Summary:")?;
        writeln!(output, "- Period: {}", summary.period)?;
        writeln!(output, "- Total pull events: {}", summary.total_pulls)?;
        writeln!(output, "- Unique images with pulls: {}", summary.unique_images)?;
        writeln!(output, "- Currently active images: {}", summary.active_images)?;

        Ok(output)
    }
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for TextFormatter {
    fn format(&self, report: &Report, rate_limits: &[RateLimit]) -> Result<String> {
        Ok(Self::render(report, rate_limits)?)
    }
}
