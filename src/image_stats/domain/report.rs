use super::image_reference::ImageIdentity;
use super::period::Period;
use serde::Serialize;

/// One ranked line of the pull report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    /// 1-based position after ranking
    pub rank: usize,
    pub identity: ImageIdentity,
    pub count: usize,
    pub in_use: bool,
}

/// Totals shown under the table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportSummary {
    pub total_pulls: usize,
    pub unique_images: usize,
    pub active_images: usize,
    pub period: Period,
}

/// Ranked pull statistics joined against the live pod inventory
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub rows: Vec<ReportRow>,
    pub summary: ReportSummary,
}

impl Report {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row for an identity, if it was pulled
    pub fn row(&self, identity: &str) -> Option<&ReportRow> {
        self.rows.iter().find(|row| row.identity.as_str() == identity)
    }
}
