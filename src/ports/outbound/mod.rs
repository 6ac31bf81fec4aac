/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define how the application core reaches the cluster API,
/// the runtime journal, registries and the console.
pub mod log_source;
pub mod output_presenter;
pub mod pod_lister;
pub mod progress_reporter;
pub mod rate_limit_client;
pub mod report_formatter;

pub use log_source::LogSource;
pub use output_presenter::OutputPresenter;
pub use pod_lister::{PodImages, PodLister};
pub use progress_reporter::ProgressReporter;
pub use rate_limit_client::RateLimitClient;
pub use report_formatter::ReportFormatter;
