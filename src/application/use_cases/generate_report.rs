use crate::application::dto::{ReportRequest, ReportResponse};
use crate::image_stats::domain::LiveImageSet;
use crate::image_stats::services::{LogEventExtractor, PullEventAggregator, ReportBuilder};
use crate::ports::outbound::{LogSource, PodImages, PodLister, ProgressReporter};
use crate::shared::error::PullwatchError;
use crate::shared::Result;
use std::collections::HashSet;

/// GenerateReportUseCase - Core use case for the image pull report
///
/// Orchestrates the pipeline: live pod inventory, log retrieval, extraction,
/// aggregation and reconciliation. All infrastructure is injected.
///
/// # Type Parameters
/// * `PL` - PodLister implementation
/// * `LS` - LogSource implementation
/// * `PR` - ProgressReporter implementation
pub struct GenerateReportUseCase<PL, LS, PR> {
    pod_lister: PL,
    log_source: LS,
    extractor: LogEventExtractor,
    progress_reporter: PR,
}

impl<PL, LS, PR> GenerateReportUseCase<PL, LS, PR>
where
    PL: PodLister,
    LS: LogSource,
    PR: ProgressReporter,
{
    /// Creates a new GenerateReportUseCase with injected dependencies
    pub fn new(
        pod_lister: PL,
        log_source: LS,
        extractor: LogEventExtractor,
        progress_reporter: PR,
    ) -> Self {
        Self {
            pod_lister,
            log_source,
            extractor,
            progress_reporter,
        }
    }

    /// Executes the report generation use case
    ///
    /// # Errors
    /// Fails when the cluster cannot be listed, the log source cannot be
    /// read, or the log source returns no lines for the window. Lines that
    /// carry no image reference are not errors.
    pub async fn execute(&self, request: ReportRequest) -> Result<ReportResponse> {
        // Step 1: Live inventory
        self.progress_reporter
            .report("☸️  Listing pods across all namespaces...");

        let pods = self
            .pod_lister
            .list_pods()
            .await
            .map_err(into_cluster_error)?;
        for pod in &pods {
            tracing::trace!(
                namespace = %pod.namespace,
                pod = %pod.name,
                images = ?pod.images().collect::<Vec<_>>(),
                "pod images"
            );
        }
        let live_images = LiveImageSet::from_references(pods.iter().flat_map(PodImages::images));
        let namespaces: HashSet<&str> = pods.iter().map(|pod| pod.namespace.as_str()).collect();

        self.progress_reporter.report(&format!(
            "✅ Found {} image(s) in use across {} pod(s) in {} namespace(s)",
            live_images.len(),
            pods.len(),
            namespaces.len()
        ));
        tracing::debug!(
            pods = pods.len(),
            images = live_images.len(),
            "live image inventory collected"
        );

        // Step 2: Raw log lines
        self.progress_reporter.report(&format!(
            "📜 Reading pull events from {} ({})",
            self.log_source.describe(),
            request.period
        ));

        let lines = self.log_source.fetch_log_lines(&request.period).await?;
        if lines.is_empty() {
            return Err(PullwatchError::NoPullEvents {
                period: request.period.window_phrase(),
            }
            .into());
        }

        // Step 3: Extraction and aggregation
        let mut aggregator = PullEventAggregator::new();
        for line in &lines {
            let event = self.extractor.event(line);
            if !aggregator.record(&event) {
                tracing::trace!(line = %event.raw(), "no image reference in line");
            }
        }
        let skipped_lines = aggregator.skipped();
        let counts = aggregator.finish();

        self.progress_reporter.report(&format!(
            "✅ Parsed {} pull event(s) for {} image(s)",
            counts.total(),
            counts.len()
        ));
        tracing::debug!(
            lines = lines.len(),
            skipped = skipped_lines,
            strategy = %self.extractor.strategy(),
            "log lines aggregated"
        );

        // Step 4: Reconciliation
        let report = ReportBuilder::new()
            .in_use_only(request.in_use_only)
            .build(&counts, &live_images, request.period);

        self.progress_reporter.report_completion(&format!(
            "✅ Report ready: {} image(s), {} in use, {} pull(s)",
            report.summary.unique_images, report.summary.active_images, report.summary.total_pulls
        ));

        Ok(ReportResponse {
            report,
            live_images,
            log_lines: lines.len(),
            skipped_lines,
        })
    }
}

/// Keeps typed cluster errors from the adapter and wraps anything else.
fn into_cluster_error(error: anyhow::Error) -> anyhow::Error {
    if error.downcast_ref::<PullwatchError>().is_some() {
        return error;
    }
    PullwatchError::ClusterQuery {
        details: format!("{:#}", error),
    }
    .into()
}
