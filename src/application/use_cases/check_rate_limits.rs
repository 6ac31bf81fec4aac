use crate::image_stats::domain::RateLimit;
use crate::ports::outbound::{ProgressReporter, RateLimitClient};

/// CheckRateLimitsUseCase - best-effort registry quota checks
///
/// Every client is queried once. Failures become warnings and the failing
/// registry is left out of the result; nothing here can abort the run.
pub struct CheckRateLimitsUseCase<PR> {
    clients: Vec<Box<dyn RateLimitClient>>,
    progress_reporter: PR,
}

impl<PR: ProgressReporter> CheckRateLimitsUseCase<PR> {
    pub fn new(clients: Vec<Box<dyn RateLimitClient>>, progress_reporter: PR) -> Self {
        Self {
            clients,
            progress_reporter,
        }
    }

    /// Queries every registry in order and returns the successful results
    pub async fn execute(&self) -> Vec<RateLimit> {
        let mut limits = Vec::with_capacity(self.clients.len());

        for client in &self.clients {
            self.progress_reporter.report(&format!(
                "🔎 Checking {} rate limits...",
                client.registry()
            ));

            match client.fetch_rate_limit().await {
                Ok(limit) => {
                    if limit.is_exhausted() {
                        self.progress_reporter
                            .report_warning(&exhausted_warning(&limit));
                    }
                    limits.push(limit);
                }
                Err(e) => {
                    tracing::debug!(registry = client.registry(), error = %e, "rate limit query failed");
                    self.progress_reporter.report_warning(&format!(
                        "⚠️  Warning: Failed to get {} rate limit: {}",
                        client.registry(),
                        e
                    ));
                }
            }
        }

        limits
    }
}

fn exhausted_warning(limit: &RateLimit) -> String {
    match &limit.reset {
        Some(reset) => format!(
            "⚠️  Warning: {} pull quota is exhausted until {}",
            limit.registry,
            reset.format("%Y-%m-%d %H:%M:%S")
        ),
        None => format!("⚠️  Warning: {} pull quota is exhausted", limit.registry),
    }
}
