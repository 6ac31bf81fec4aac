//! pullwatch - container image pull statistics for Kubernetes nodes
//!
//! This library counts image pull events recorded by the container runtime
//! (CRI-O) in the node journal, joins them against the images referenced by
//! running pods, and renders a ranked report. It can also report the pull
//! quotas of Docker Hub and the GitHub Container Registry.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`image_stats`): Image identities, pull counting and report building
//! - **Application Layer** (`application`): Use cases, DTOs and factories
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Kubernetes, journal, registry, console and file implementations
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use pullwatch::prelude::*;
//! use std::time::Duration;
//!
//! # async fn example() -> Result<()> {
//! let timeout = Duration::from_secs(10);
//! let pod_lister = KubePodLister::from_kubeconfig(None, timeout).await?;
//! let log_source = JournalctlLogSource::new(
//!     "crio",
//!     ExtractionStrategy::Plain,
//!     vec!["Pulled image:".to_string()],
//!     timeout,
//! );
//!
//! let use_case = GenerateReportUseCase::new(
//!     pod_lister,
//!     log_source,
//!     LogEventExtractor::default(),
//!     StderrProgressReporter::new(),
//! );
//!
//! let response = use_case.execute(ReportRequest::default()).await?;
//! let output = TextFormatter::new().format(&response.report, &[])?;
//! println!("{}", output);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod cli;
pub mod config;
pub mod image_stats;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{FileSystemWriter, StdoutPresenter};
    pub use crate::adapters::outbound::formatters::{JsonFormatter, TextFormatter};
    pub use crate::adapters::outbound::journal::{FileLogSource, JournalctlLogSource};
    pub use crate::adapters::outbound::kubernetes::KubePodLister;
    pub use crate::adapters::outbound::network::{DockerHubAuth, DockerHubClient, GitHubClient};
    pub use crate::application::dto::{OutputFormat, ReportRequest, ReportResponse};
    pub use crate::application::use_cases::{CheckRateLimitsUseCase, GenerateReportUseCase};
    pub use crate::image_stats::domain::{
        normalize, ImageIdentity, ImageReference, LiveImageSet, Period, PullCounts, RateLimit,
        Report, ReportRow, ReportSummary,
    };
    pub use crate::image_stats::services::{
        ExtractionStrategy, LogEventExtractor, PullEventAggregator, ReportBuilder,
    };
    pub use crate::ports::outbound::{
        LogSource, OutputPresenter, PodImages, PodLister, ProgressReporter, RateLimitClient,
        ReportFormatter,
    };
    pub use crate::shared::Result;
}
