use crate::image_stats::domain::{RateLimit, DOCKER_HUB};
use crate::ports::outbound::RateLimitClient;
use crate::shared::error::PullwatchError;
use crate::shared::Result;
use async_trait::async_trait;
use chrono::{DateTime, Local};
use reqwest::header::{HeaderMap, ACCEPT};
use serde::Deserialize;
use std::time::Duration;

const REGISTRY: &str = DOCKER_HUB;
const AUTH_BASE_URL: &str = "https://auth.docker.io";
const REGISTRY_BASE_URL: &str = "https://registry-1.docker.io";
const TOKEN_PATH: &str =
    "/token?service=registry.docker.io&scope=repository:ratelimitpreview/test:pull";
const MANIFEST_PATH: &str = "/v2/ratelimitpreview/test/manifests/latest";
const MANIFEST_MEDIA_TYPE: &str = "application/vnd.docker.distribution.manifest.v2+json";

const LIMIT_HEADER: &str = "ratelimit-limit";
const REMAINING_HEADER: &str = "ratelimit-remaining";
const SOURCE_HEADER: &str = "docker-ratelimit-source";

/// Docker Hub credentials; all fields optional
#[derive(Debug, Clone, Default)]
pub struct DockerHubAuth {
    pub username: Option<String>,
    pub password: Option<String>,
    pub token: Option<String>,
}

impl DockerHubAuth {
    /// Username and secret for basic auth against the token service.
    ///
    /// A password wins over an access token when both are set.
    fn basic_credentials(&self) -> Option<(&str, &str)> {
        let username = self.username.as_deref().filter(|u| !u.is_empty())?;
        let secret = self
            .password
            .as_deref()
            .filter(|p| !p.is_empty())
            .or_else(|| self.token.as_deref().filter(|t| !t.is_empty()))?;
        Some((username, secret))
    }

    pub fn is_authenticated(&self) -> bool {
        self.basic_credentials().is_some()
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    token: String,
}

/// DockerHubClient adapter for the anonymous/authenticated pull quota
///
/// Docker Hub exposes the quota only as response headers of a manifest
/// request against the `ratelimitpreview/test` repository. A `HEAD` request
/// does not count as a pull.
pub struct DockerHubClient {
    client: reqwest::Client,
    auth: DockerHubAuth,
    auth_url: String,
    registry_url: String,
}

impl DockerHubClient {
    pub fn new(auth: DockerHubAuth, timeout: Duration) -> Result<Self> {
        if auth.username.is_none() && auth.token.is_some() {
            tracing::warn!("--docker-token given without --docker-username; querying anonymously");
        }

        let user_agent = format!("pullwatch/{}", env!("CARGO_PKG_VERSION"));
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            auth,
            auth_url: AUTH_BASE_URL.to_string(),
            registry_url: REGISTRY_BASE_URL.to_string(),
        })
    }

    /// Points the token service and the registry at other hosts (mirrors, tests)
    pub fn with_base_urls(
        mut self,
        auth_url: impl Into<String>,
        registry_url: impl Into<String>,
    ) -> Self {
        self.auth_url = auth_url.into().trim_end_matches('/').to_string();
        self.registry_url = registry_url.into().trim_end_matches('/').to_string();
        self
    }

    fn error(details: impl Into<String>) -> anyhow::Error {
        PullwatchError::RateLimit {
            registry: REGISTRY.to_string(),
            details: details.into(),
        }
        .into()
    }

    async fn fetch_token(&self) -> Result<String> {
        let mut request = self.client.get(format!("{}{}", self.auth_url, TOKEN_PATH));
        if let Some((username, secret)) = self.auth.basic_credentials() {
            request = request.basic_auth(username, Some(secret));
        }

        let response = request
            .send()
            .await
            .map_err(|e| Self::error(format!("failed to get auth token: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Self::error(format!(
                "auth request failed with status {}: {}",
                status,
                body.trim()
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| Self::error(format!("failed to decode token response: {}", e)))?;
        Ok(token.token)
    }
}

/// Numeric part of a quota header such as `100;w=21600`
fn parse_quota(value: &str) -> Option<u64> {
    value.split(';').next()?.trim().parse().ok()
}

/// Window length in seconds from a quota header such as `100;w=21600`
fn parse_window(value: &str) -> Option<i64> {
    value
        .split(';')
        .skip(1)
        .find_map(|part| part.trim().strip_prefix("w="))
        .and_then(|window| window.trim_end_matches(['[', ']']).parse().ok())
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}

/// Builds a snapshot from manifest response headers.
///
/// The reset time is the end of the window measured from `now`.
fn rate_limit_from_headers(
    headers: &HeaderMap,
    authenticated: bool,
    now: DateTime<Local>,
) -> Result<RateLimit> {
    let limit_header = header_str(headers, LIMIT_HEADER);
    let limit = limit_header.and_then(parse_quota);
    let remaining = header_str(headers, REMAINING_HEADER).and_then(parse_quota);
    let source = header_str(headers, SOURCE_HEADER)
        .map(|s| s.trim_matches(['[', ']']).to_string())
        .filter(|s| !s.is_empty());

    if limit.is_none() && remaining.is_none() && source.is_none() {
        return Err(DockerHubClient::error(
            "no rate limit information found in response headers",
        ));
    }

    let mut rate_limit = RateLimit::new(REGISTRY, limit.unwrap_or(0), remaining.unwrap_or(0))
        .authenticated(authenticated);

    if let Some(reset) = limit_header
        .and_then(parse_window)
        .and_then(chrono::Duration::try_seconds)
        .and_then(|window| now.checked_add_signed(window))
    {
        rate_limit = rate_limit.with_reset(reset);
    }
    if let Some(source) = source {
        rate_limit = rate_limit.with_source(source);
    }

    Ok(rate_limit)
}

#[async_trait]
impl RateLimitClient for DockerHubClient {
    fn registry(&self) -> &str {
        REGISTRY
    }

    async fn fetch_rate_limit(&self) -> Result<RateLimit> {
        let token = self.fetch_token().await?;

        let response = self
            .client
            .head(format!("{}{}", self.registry_url, MANIFEST_PATH))
            .bearer_auth(token)
            .header(ACCEPT, MANIFEST_MEDIA_TYPE)
            .send()
            .await
            .map_err(|e| Self::error(format!("failed to get rate limit: {}", e)))?;

        tracing::debug!(status = %response.status(), "Docker Hub manifest probe");
        rate_limit_from_headers(response.headers(), self.auth.is_authenticated(), Local::now())
    }
}
