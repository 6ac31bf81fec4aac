use crate::ports::outbound::ProgressReporter;
use owo_colors::{OwoColorize, Stream};

/// StderrProgressReporter adapter for reporting progress to stderr
///
/// Writing to stderr keeps stdout reserved for the report itself. Warnings
/// are colored when stderr is a terminal that supports it.
#[derive(Debug, Default, Clone, Copy)]
pub struct StderrProgressReporter;

impl StderrProgressReporter {
    pub fn new() -> Self {
        Self
    }
}

impl ProgressReporter for StderrProgressReporter {
    fn report(&self, message: &str) {
        eprintln!("{}", message);
    }

    fn report_warning(&self, message: &str) {
        eprintln!(
            "{}",
            message.if_supports_color(Stream::Stderr, |text| text.yellow())
        );
    }

    fn report_completion(&self, message: &str) {
        eprintln!();
        eprintln!(
            "{}",
            message.if_supports_color(Stream::Stderr, |text| text.green())
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reporter_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<StderrProgressReporter>();
    }

    #[test]
    fn test_report_methods_do_not_panic() {
        let reporter = StderrProgressReporter::new();
        reporter.report("🔍 Listing pods in all namespaces...");
        reporter.report_warning("⚠️  Warning: Failed to get Docker Hub rate limit");
        reporter.report_completion("✅ Report generated");
    }
}
