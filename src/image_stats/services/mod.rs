mod log_event_extractor;
mod pull_event_aggregator;
mod report_builder;

pub use log_event_extractor::{ExtractionStrategy, LogEventExtractor, DEFAULT_MARKERS};
pub use pull_event_aggregator::PullEventAggregator;
pub use report_builder::ReportBuilder;
