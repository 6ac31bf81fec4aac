use crate::image_stats::domain::{RateLimit, Report};
use crate::shared::Result;

/// ReportFormatter port for rendering the final output
///
/// Implementations render the rate-limit sections that succeeded (possibly
/// none) followed by the ranked pull report.
pub trait ReportFormatter {
    /// # Errors
    /// Returns an error if serialization fails
    fn format(&self, report: &Report, rate_limits: &[RateLimit]) -> Result<String>;
}
