use crate::image_stats::domain::RateLimit;
use crate::shared::Result;
use async_trait::async_trait;

/// RateLimitClient port for querying a registry's pull quota
///
/// Each client is independent and best-effort: a failure only removes that
/// registry's section from the output.
#[async_trait]
pub trait RateLimitClient: Send + Sync {
    /// Registry display name
    fn registry(&self) -> &str;

    async fn fetch_rate_limit(&self) -> Result<RateLimit>;
}
