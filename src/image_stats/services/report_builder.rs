use crate::image_stats::domain::{
    LiveImageSet, Period, PullCount, PullCounts, Report, ReportRow, ReportSummary,
};

/// ReportBuilder - ranks pull counts and joins them with the live inventory
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportBuilder {
    in_use_only: bool,
}

impl ReportBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts the rows (and therefore the summary) to images in use
    pub fn in_use_only(mut self, in_use_only: bool) -> Self {
        self.in_use_only = in_use_only;
        self
    }

    /// Builds the ranked report.
    ///
    /// Rows are ordered by count descending. The sort is stable, so equal
    /// counts keep the order in which images were first seen in the log.
    pub fn build(&self, counts: &PullCounts, live_images: &LiveImageSet, period: Period) -> Report {
        let mut ranked: Vec<&PullCount> = counts.entries().iter().collect();
        ranked.sort_by(|a, b| b.count().cmp(&a.count()));

        let rows: Vec<ReportRow> = ranked
            .into_iter()
            .map(|entry| (entry, live_images.contains(entry.identity())))
            .filter(|(_, in_use)| !self.in_use_only || *in_use)
            .enumerate()
            .map(|(idx, (entry, in_use))| ReportRow {
                rank: idx + 1,
                identity: entry.identity().clone(),
                count: entry.count(),
                in_use,
            })
            .collect();

        let summary = ReportSummary {
            total_pulls: rows.iter().map(|row| row.count).sum(),
            unique_images: rows.len(),
            active_images: rows.iter().filter(|row| row.in_use).count(),
            period,
        };

        Report { rows, summary }
    }
}
