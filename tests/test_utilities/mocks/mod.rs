/// Mock implementations for testing
mod mock_log_source;
mod mock_pod_lister;
mod mock_progress_reporter;
mod mock_rate_limit_client;

pub use mock_log_source::MockLogSource;
pub use mock_pod_lister::MockPodLister;
pub use mock_progress_reporter::MockProgressReporter;
pub use mock_rate_limit_client::MockRateLimitClient;
