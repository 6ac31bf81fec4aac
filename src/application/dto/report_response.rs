use crate::image_stats::domain::{LiveImageSet, Report};

/// ReportResponse - output of the report generation use case
#[derive(Debug, Clone)]
pub struct ReportResponse {
    pub report: Report,
    /// Live inventory the report was joined against
    pub live_images: LiveImageSet,
    /// Lines delivered by the log source
    pub log_lines: usize,
    /// Lines that carried no usable image reference
    pub skipped_lines: usize,
}
