use async_trait::async_trait;
use pullwatch::prelude::*;

/// Mock RateLimitClient returning a fixed quota or a failure
pub struct MockRateLimitClient {
    registry: String,
    limit: Option<RateLimit>,
}

#[allow(dead_code)]
impl MockRateLimitClient {
    pub fn new(limit: RateLimit) -> Self {
        Self {
            registry: limit.registry.clone(),
            limit: Some(limit),
        }
    }

    pub fn failing(registry: &str) -> Self {
        Self {
            registry: registry.to_string(),
            limit: None,
        }
    }
}

#[async_trait]
impl RateLimitClient for MockRateLimitClient {
    fn registry(&self) -> &str {
        &self.registry
    }

    async fn fetch_rate_limit(&self) -> Result<RateLimit> {
        match &self.limit {
            Some(limit) => Ok(limit.clone()),
            None => anyhow::bail!("operation timed out"),
        }
    }
}
