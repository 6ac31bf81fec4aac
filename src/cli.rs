use clap::Parser;
use std::path::PathBuf;

use crate::application::dto::OutputFormat;
use crate::image_stats::services::ExtractionStrategy;

/// Count container image pulls on this node and match them against running pods
#[derive(Parser, Debug, Default)]
#[command(name = "pullwatch")]
#[command(version)]
#[command(
    about = "Count container image pulls from the CRI-O journal and check registry rate limits",
    long_about = None
)]
pub struct Args {
    /// Time window: a number of hours (e.g. 48) or a date ("2024-01-01", "2024-01-01 12:00:00") [default: 24]
    #[arg(long, value_name = "HOURS|DATE")]
    pub since: Option<String>,

    /// Path to the kubeconfig file [default: $HOME/.kube/config]
    #[arg(long, value_name = "PATH")]
    pub kubeconfig: Option<PathBuf>,

    /// GitHub token; enables the GitHub Container Registry rate-limit report
    #[arg(long)]
    pub github_token: Option<String>,

    /// Docker Hub username
    #[arg(long)]
    pub docker_username: Option<String>,

    /// Docker Hub password
    #[arg(long)]
    pub docker_password: Option<String>,

    /// Docker Hub personal access token
    #[arg(long)]
    pub docker_token: Option<String>,

    /// Output format: text or json [default: text]
    #[arg(short, long)]
    pub format: Option<OutputFormat>,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// How journal lines are parsed: plain or structured [default: plain]
    #[arg(long, value_name = "FORMAT")]
    pub log_format: Option<ExtractionStrategy>,

    /// systemd unit of the container runtime [default: crio]
    #[arg(long, value_name = "UNIT")]
    pub unit: Option<String>,

    /// Read pull events from an exported journal file instead of running journalctl
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Only list images that are used by a running pod
    #[arg(long)]
    pub in_use_only: bool,

    /// Do not query registry rate limits
    #[arg(long)]
    pub skip_rate_limits: bool,

    /// Timeout in seconds for each cluster, journal and registry call [default: 10]
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// Path to a config file (defaults to ./pullwatch.config.yml when present)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable debug logging on stderr (RUST_LOG takes precedence)
    #[arg(short, long)]
    pub verbose: bool,
}
