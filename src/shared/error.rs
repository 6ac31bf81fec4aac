use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// Rate-limit sub-reports never change the exit code; only failures that
/// prevent the pull report from being produced do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Report produced (rate-limit warnings included)
    Success = 0,
    /// Cluster, log source, config or output error
    ApplicationError = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::ApplicationError => write!(f, "Application Error (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
        }
    }
}

/// Application-specific errors for image pull reporting.
///
/// Everything except `RateLimit` aborts the run.
#[derive(Debug, Error)]
pub enum PullwatchError {
    #[error("Failed to load cluster configuration: {source_name}\nDetails: {details}\n\n💡 Hint: Check the --kubeconfig path or run inside a cluster with a service account")]
    ClusterConfig {
        source_name: String,
        details: String,
    },

    #[error("Failed to list pods in the cluster\nDetails: {details}\n\n💡 Hint: Verify that the current context can list pods in all namespaces")]
    ClusterQuery { details: String },

    #[error("Failed to read pull events from {source_name}\nDetails: {details}\n\n💡 Hint: {hint}")]
    LogSource {
        source_name: String,
        details: String,
        hint: String,
    },

    #[error("No pull events found in logs {period}\n\n💡 Hint: Widen the window with --since or check that the runtime logs image pulls")]
    NoPullEvents { period: String },

    #[error("Invalid --since value: {value}\nReason: {reason}\n\n💡 Hint: Use a number of hours (e.g. 48) or a date such as 2024-01-01 or \"2024-01-01 12:00:00\"")]
    InvalidSince { value: String, reason: String },

    #[error("Failed to read file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file exists and you have read permissions")]
    FileReadError { path: PathBuf, details: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    #[error("{registry} rate limit query failed: {details}")]
    RateLimit { registry: String, details: String },
}
