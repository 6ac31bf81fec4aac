use chrono::{DateTime, Local};
use serde::Serialize;

/// Registry name of Docker Hub snapshots; its quota depends on whether the
/// query was authenticated.
pub const DOCKER_HUB: &str = "Docker Hub";

/// Snapshot of a registry's pull quota at query time
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RateLimit {
    /// Registry display name (e.g. "Docker Hub")
    pub registry: String,
    pub limit: u64,
    pub remaining: u64,
    pub used: u64,
    /// When the window resets, if the registry reports it
    pub reset: Option<DateTime<Local>>,
    /// Who the quota is accounted to (Docker Hub reports the client IP or account)
    pub source: Option<String>,
    pub authenticated: bool,
}

impl RateLimit {
    /// Creates a snapshot; `used` is derived from limit and remaining.
    pub fn new(registry: impl Into<String>, limit: u64, remaining: u64) -> Self {
        Self {
            registry: registry.into(),
            limit,
            remaining,
            used: limit.saturating_sub(remaining),
            reset: None,
            source: None,
            authenticated: false,
        }
    }

    pub fn with_used(mut self, used: u64) -> Self {
        self.used = used;
        self
    }

    pub fn with_reset(mut self, reset: DateTime<Local>) -> Self {
        self.reset = Some(reset);
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn authenticated(mut self, authenticated: bool) -> Self {
        self.authenticated = authenticated;
        self
    }

    /// True when no pulls are left in the current window
    pub fn is_exhausted(&self) -> bool {
        self.limit > 0 && self.remaining == 0
    }

    pub fn is_docker_hub(&self) -> bool {
        self.registry == DOCKER_HUB
    }
}
