pub mod image_reference;
pub mod live_image_set;
pub mod period;
pub mod pull_count;
pub mod pull_event;
pub mod rate_limit;
pub mod report;

pub use image_reference::{normalize, ImageIdentity, ImageReference};
pub use live_image_set::LiveImageSet;
pub use period::Period;
pub use pull_count::{PullCount, PullCounts};
pub use pull_event::PullEvent;
pub use rate_limit::{RateLimit, DOCKER_HUB};
pub use report::{Report, ReportRow, ReportSummary};
