use crate::image_stats::domain::RateLimit;
use crate::ports::outbound::RateLimitClient;
use crate::shared::error::PullwatchError;
use crate::shared::Result;
use async_trait::async_trait;
use chrono::{DateTime, Local};
use reqwest::header::ACCEPT;
use serde::Deserialize;
use std::time::Duration;

const REGISTRY: &str = "GitHub Container Registry";
const API_BASE_URL: &str = "https://api.github.com";
const RATE_LIMIT_PATH: &str = "/rate_limit";
const GITHUB_MEDIA_TYPE: &str = "application/vnd.github.v3+json";

#[derive(Debug, Deserialize)]
struct RateLimitResponse {
    resources: Resources,
}

#[derive(Debug, Deserialize)]
struct Resources {
    core: CoreLimit,
}

#[derive(Debug, Deserialize)]
struct CoreLimit {
    limit: u64,
    remaining: u64,
    /// Unix timestamp (seconds)
    reset: i64,
    #[serde(default)]
    used: Option<u64>,
}

impl From<CoreLimit> for RateLimit {
    fn from(core: CoreLimit) -> Self {
        let mut rate_limit = RateLimit::new(REGISTRY, core.limit, core.remaining).authenticated(true);
        if let Some(used) = core.used {
            rate_limit = rate_limit.with_used(used);
        }
        if let Some(reset) = DateTime::from_timestamp(core.reset, 0) {
            rate_limit = rate_limit.with_reset(reset.with_timezone(&Local));
        }
        rate_limit
    }
}

/// GitHubClient adapter for the GitHub API core rate limit
///
/// Only constructed when a token is supplied.
pub struct GitHubClient {
    client: reqwest::Client,
    token: String,
    api_url: String,
}

impl GitHubClient {
    pub fn new(token: impl Into<String>, timeout: Duration) -> Result<Self> {
        let user_agent = format!("pullwatch/{}", env!("CARGO_PKG_VERSION"));
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            token: token.into(),
            api_url: API_BASE_URL.to_string(),
        })
    }

    /// Uses another API host (GitHub Enterprise, tests)
    pub fn with_base_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into().trim_end_matches('/').to_string();
        self
    }

    fn error(details: impl Into<String>) -> anyhow::Error {
        PullwatchError::RateLimit {
            registry: REGISTRY.to_string(),
            details: details.into(),
        }
        .into()
    }
}

fn parse_rate_limit(body: &str) -> Result<RateLimit> {
    let response: RateLimitResponse = serde_json::from_str(body)
        .map_err(|e| GitHubClient::error(format!("failed to decode response: {}", e)))?;
    Ok(response.resources.core.into())
}

#[async_trait]
impl RateLimitClient for GitHubClient {
    fn registry(&self) -> &str {
        REGISTRY
    }

    async fn fetch_rate_limit(&self) -> Result<RateLimit> {
        let response = self
            .client
            .get(format!("{}{}", self.api_url, RATE_LIMIT_PATH))
            .bearer_auth(&self.token)
            .header(ACCEPT, GITHUB_MEDIA_TYPE)
            .send()
            .await
            .map_err(|e| Self::error(format!("failed to send request: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::error(format!("GitHub API returned status code {}", status)));
        }

        let body = response
            .text()
            .await
            .map_err(|e| Self::error(format!("failed to read response: {}", e)))?;
        parse_rate_limit(&body)
    }
}
