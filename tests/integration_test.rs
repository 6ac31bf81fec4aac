/// Integration tests for the application layer
mod test_utilities;

use test_utilities::mocks::*;
use pullwatch::prelude::*;
use pullwatch::shared::error::PullwatchError;

const DIGEST: &str = "4bf108485f738856b2a56dbcfb3848c8fb9161b97c967a7cd479a60855e13370";

fn use_case(
    pods: MockPodLister,
    logs: MockLogSource,
    reporter: MockProgressReporter,
) -> GenerateReportUseCase<MockPodLister, MockLogSource, MockProgressReporter> {
    GenerateReportUseCase::new(pods, logs, LogEventExtractor::default(), reporter)
}

#[tokio::test]
async fn test_generate_report_scenario() {
    let pods = MockPodLister::new().with_pod("default", "web-0", &["repo/a:v3"]);
    let logs = MockLogSource::with_pulls(&["repo/a:v1", "repo/a:v2", "repo/b@sha256:deadbeef"]);

    let response = use_case(pods, logs, MockProgressReporter::new())
        .execute(ReportRequest::default())
        .await
        .unwrap();

    let report = &response.report;
    assert_eq!(report.rows.len(), 2);

    let first = &report.rows[0];
    assert_eq!(first.rank, 1);
    assert_eq!(first.identity.as_str(), "repo/a");
    assert_eq!(first.count, 2);
    assert!(first.in_use);

    let second = &report.rows[1];
    assert_eq!(second.rank, 2);
    assert_eq!(second.identity.as_str(), "repo/b");
    assert_eq!(second.count, 1);
    assert!(!second.in_use);

    assert_eq!(report.summary.total_pulls, 3);
    assert_eq!(report.summary.unique_images, 2);
    assert_eq!(report.summary.active_images, 1);
    assert_eq!(response.log_lines, 3);
    assert_eq!(response.skipped_lines, 0);
}

#[tokio::test]
async fn test_init_container_images_count_as_in_use() {
    let pods = MockPodLister::new()
        .with_pod("kube-system", "calico-node-x", &["quay.io/calico/node:v3.27.0"])
        .with_init_images(&["quay.io/calico/cni:v3.27.0"]);
    let cni_by_digest = format!("quay.io/calico/cni@sha256:{}", DIGEST);
    let logs = MockLogSource::with_pulls(&[cni_by_digest.as_str()]);

    let response = use_case(pods, logs, MockProgressReporter::new())
        .execute(ReportRequest::default())
        .await
        .unwrap();

    let row = response.report.row("quay.io/calico/cni").unwrap();
    assert!(row.in_use);
    assert_eq!(response.live_images.len(), 2);
}

#[tokio::test]
async fn test_registry_port_is_kept_in_identity() {
    let pods = MockPodLister::new().with_pod("ci", "runner", &["registry.local:5000/team/builder:1.4"]);
    let logs = MockLogSource::with_pulls(&[
        "registry.local:5000/team/builder:1.3",
        "registry.local:5000/team/builder:1.4",
    ]);

    let response = use_case(pods, logs, MockProgressReporter::new())
        .execute(ReportRequest::default())
        .await
        .unwrap();

    let row = response.report.row("registry.local:5000/team/builder").unwrap();
    assert_eq!(row.count, 2);
    assert!(row.in_use);
}

#[tokio::test]
async fn test_unparsable_lines_give_empty_report() {
    let logs = MockLogSource::new(&[
        "Jan 15 10:00:00 node-1 crio[812]: Checking image status: repo/a:v1",
        "-- Boot 1234 --",
    ]);

    let response = use_case(MockPodLister::new(), logs, MockProgressReporter::new())
        .execute(ReportRequest::default())
        .await
        .unwrap();

    assert!(response.report.is_empty());
    assert_eq!(response.report.summary.total_pulls, 0);
    assert_eq!(response.skipped_lines, 2);
}

#[tokio::test]
async fn test_empty_log_window_is_fatal() {
    let error = use_case(MockPodLister::new(), MockLogSource::new(&[]), MockProgressReporter::new())
        .execute(ReportRequest::new(Period::Hours(48), false))
        .await
        .unwrap_err();

    assert!(matches!(
        error.downcast_ref::<PullwatchError>(),
        Some(PullwatchError::NoPullEvents { .. })
    ));
    assert!(format!("{}", error).contains("No pull events found in logs in the last 48 hours"));
}

#[tokio::test]
async fn test_cluster_failure_is_fatal_and_skips_logs() {
    let logs = MockLogSource::with_pulls(&["repo/a:v1"]);
    let error = use_case(MockPodLister::failing(), logs.clone(), MockProgressReporter::new())
        .execute(ReportRequest::default())
        .await
        .unwrap_err();

    assert!(format!("{}", error).contains("Failed to list pods in the cluster"));
    assert!(logs.requested_periods().is_empty());
}

#[tokio::test]
async fn test_log_source_failure_is_fatal() {
    let result = use_case(MockPodLister::new(), MockLogSource::failing(), MockProgressReporter::new())
        .execute(ReportRequest::default())
        .await;

    assert!(result.is_err());
}

#[tokio::test]
async fn test_period_is_passed_to_log_source() {
    let logs = MockLogSource::with_pulls(&["repo/a:v1"]);
    let period: Period = "2024-01-01 08:00".parse().unwrap();

    let response = use_case(MockPodLister::new(), logs.clone(), MockProgressReporter::new())
        .execute(ReportRequest::new(period.clone(), false))
        .await
        .unwrap();

    assert_eq!(logs.requested_periods(), vec![period.clone()]);
    assert_eq!(response.report.summary.period, period);
}

#[tokio::test]
async fn test_in_use_only_filters_rows() {
    let pods = MockPodLister::new().with_pod("default", "web-0", &["repo/a:v3"]);
    let logs = MockLogSource::with_pulls(&["repo/b:v1", "repo/b:v2", "repo/a:v1"]);

    let response = use_case(pods, logs, MockProgressReporter::new())
        .execute(ReportRequest::new(Period::default(), true))
        .await
        .unwrap();

    assert_eq!(response.report.rows.len(), 1);
    assert_eq!(response.report.rows[0].identity.as_str(), "repo/a");
    assert_eq!(response.report.rows[0].rank, 1);
}

#[tokio::test]
async fn test_progress_messages_are_reported() {
    let reporter = MockProgressReporter::new();
    let logs = MockLogSource::with_pulls(&["repo/a:v1"]);

    use_case(MockPodLister::new(), logs, reporter.clone())
        .execute(ReportRequest::default())
        .await
        .unwrap();

    let messages = reporter.get_messages();
    assert!(messages.iter().any(|m| m.contains("Listing pods")));
    assert!(messages.iter().any(|m| m.contains("mock journal")));
    assert!(reporter.warnings().is_empty());
}

#[tokio::test]
async fn test_completion_and_namespaces_are_reported() {
    let reporter = MockProgressReporter::new();
    let pods = MockPodLister::new()
        .with_pod("default", "web-0", &["repo/a:v3"])
        .with_pod("default", "web-1", &["repo/a:v3"])
        .with_pod("kube-system", "dns-0", &["coredns:1.11"]);
    let logs = MockLogSource::with_pulls(&["repo/a:v1", "repo/b:v1"]);

    use_case(pods, logs, reporter.clone())
        .execute(ReportRequest::default())
        .await
        .unwrap();

    let messages = reporter.get_messages();
    assert!(messages
        .iter()
        .any(|m| m.contains("2 image(s) in use across 3 pod(s) in 2 namespace(s)")));
    assert_eq!(
        messages.last().map(String::as_str),
        Some("Completed: ✅ Report ready: 2 image(s), 1 in use, 2 pull(s)")
    );
}

#[tokio::test]
async fn test_structured_lines() {
    let logs = MockLogSource::new(&[
        r#"{"MESSAGE":"time=\"2024-01-15T10:00:00Z\" level=info msg=\"Pulled image: repo/a:v1\"","_SYSTEMD_UNIT":"crio.service"}"#,
        r#"{"image":"repo/a@sha256:deadbeef","level":"info"}"#,
        r#"{"MESSAGE":"Pulled image: repo/b:v1"#,
    ]);
    let use_case = GenerateReportUseCase::new(
        MockPodLister::new(),
        logs,
        LogEventExtractor::new(ExtractionStrategy::Structured),
        MockProgressReporter::new(),
    );

    let response = use_case.execute(ReportRequest::default()).await.unwrap();
    assert_eq!(response.report.row("repo/a").unwrap().count, 2);
}

#[tokio::test]
async fn test_rate_limit_failures_are_warnings() {
    let reporter = MockProgressReporter::new();
    let clients: Vec<Box<dyn RateLimitClient>> = vec![
        Box::new(MockRateLimitClient::failing("GitHub Container Registry")),
        Box::new(MockRateLimitClient::new(RateLimit::new("Docker Hub", 100, 76))),
    ];

    let limits = CheckRateLimitsUseCase::new(clients, reporter.clone())
        .execute()
        .await;

    assert_eq!(limits.len(), 1);
    assert_eq!(limits[0].registry, "Docker Hub");
    let warnings = reporter.warnings();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("Failed to get GitHub Container Registry rate limit"));
}

#[tokio::test]
async fn test_full_text_rendering() {
    let pods = MockPodLister::new().with_pod("default", "web-0", &["repo/a:v3"]);
    let logs = MockLogSource::with_pulls(&["repo/a:v1", "repo/a:v2", "repo/b@sha256:deadbeef"]);
    let response = use_case(pods, logs, MockProgressReporter::new())
        .execute(ReportRequest::default())
        .await
        .unwrap();

    let limits = vec![RateLimit::new("Docker Hub", 100, 76).with_source("203.0.113.7")];
    let output = TextFormatter::new().format(&response.report, &limits).unwrap();

    assert!(output.contains("Docker Hub Rate Limits (Anonymous):"));
    assert!(output.contains("Image Pull Statistics (Last 24 hours):"));
    assert!(output.contains("1     repo/a       2            Yes"));
    assert!(output.contains("2     repo/b       1            No"));
    assert!(output.contains("- Currently active images: 1"));
}
