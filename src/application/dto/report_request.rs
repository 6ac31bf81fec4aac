use crate::image_stats::domain::Period;

/// ReportRequest - input of the report generation use case
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportRequest {
    /// Window for pull-event retrieval
    pub period: Period,
    /// Only rank images that are currently in use
    pub in_use_only: bool,
}

impl ReportRequest {
    pub fn new(period: Period, in_use_only: bool) -> Self {
        Self {
            period,
            in_use_only,
        }
    }
}
