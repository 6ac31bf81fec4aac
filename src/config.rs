//! Configuration file support for pullwatch.
//!
//! Provides YAML-based configuration through `pullwatch.config.yml` files,
//! and merges it with the command line into the [`Settings`] of one run.
//! Command-line values always win over file values.

use anyhow::{bail, Context};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::adapters::outbound::journal::DEFAULT_UNIT;
use crate::application::dto::OutputFormat;
use crate::cli::Args;
use crate::image_stats::domain::Period;
use crate::image_stats::services::{ExtractionStrategy, DEFAULT_MARKERS};
use crate::shared::Result;

const CONFIG_FILENAME: &str = "pullwatch.config.yml";

/// Timeout for every outbound call when none is configured
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub since: Option<String>,
    pub kubeconfig: Option<PathBuf>,
    pub log_format: Option<ExtractionStrategy>,
    pub journal_unit: Option<String>,
    pub markers: Option<Vec<String>>,
    pub timeout_secs: Option<u64>,
    pub in_use_only: Option<bool>,
    pub skip_rate_limits: Option<bool>,
    pub format: Option<OutputFormat>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    tracing::debug!(path = %path.display(), "loaded config file");
    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    if config.timeout_secs == Some(0) {
        bail!(
            "Invalid config: timeout_secs must be greater than zero.\n\n\
             💡 Hint: Remove the field to use the default of {} seconds.",
            DEFAULT_TIMEOUT_SECS
        );
    }

    if let Some(ref markers) = config.markers {
        for (i, marker) in markers.iter().enumerate() {
            if marker.trim().is_empty() {
                bail!(
                    "Invalid config: markers[{}] must not be empty.\n\n\
                     💡 Hint: Each marker is a phrase that precedes the image reference (e.g., \"Pulled image:\").",
                    i
                );
            }
        }
    }
    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    for key in config.unknown_fields.keys() {
        eprintln!(
            "⚠️  Warning: Unknown config field '{}' will be ignored.",
            key
        );
    }
}

/// Fully resolved options for one run
#[derive(Debug, Clone)]
pub struct Settings {
    pub period: Period,
    pub kubeconfig: Option<PathBuf>,
    pub log_format: ExtractionStrategy,
    pub journal_unit: String,
    pub markers: Vec<String>,
    pub log_file: Option<PathBuf>,
    pub timeout: Duration,
    pub in_use_only: bool,
    pub skip_rate_limits: bool,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
    pub github_token: Option<String>,
    pub docker_username: Option<String>,
    pub docker_password: Option<String>,
    pub docker_token: Option<String>,
}

impl Settings {
    /// Loads the config file named by `--config`, or the one discovered in
    /// the working directory, and merges it with the arguments.
    pub fn load(args: Args) -> Result<Self> {
        let file = match &args.config {
            Some(path) => Some(load_config_from_path(path)?),
            None => {
                let cwd = std::env::current_dir().context("Failed to determine working directory")?;
                discover_config(&cwd)?
            }
        };
        Self::resolve(args, file.unwrap_or_default())
    }

    /// Merges arguments over file values over defaults.
    ///
    /// # Errors
    /// Fails when the resulting `since` value is not a valid window.
    pub fn resolve(args: Args, file: ConfigFile) -> Result<Self> {
        let period = match args.since.or(file.since) {
            Some(since) => since.parse::<Period>()?,
            None => Period::default(),
        };

        let markers = file
            .markers
            .unwrap_or_else(|| DEFAULT_MARKERS.iter().map(|m| m.to_string()).collect());

        let timeout_secs = args
            .timeout
            .or(file.timeout_secs)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Ok(Self {
            period,
            kubeconfig: args.kubeconfig.or(file.kubeconfig),
            log_format: args.log_format.or(file.log_format).unwrap_or_default(),
            journal_unit: args
                .unit
                .or(file.journal_unit)
                .unwrap_or_else(|| DEFAULT_UNIT.to_string()),
            markers,
            log_file: args.log_file,
            timeout: Duration::from_secs(timeout_secs),
            in_use_only: args.in_use_only || file.in_use_only.unwrap_or(false),
            skip_rate_limits: args.skip_rate_limits || file.skip_rate_limits.unwrap_or(false),
            format: args.format.or(file.format).unwrap_or_default(),
            output: args.output,
            github_token: args.github_token.filter(|token| !token.is_empty()),
            docker_username: args.docker_username,
            docker_password: args.docker_password,
            docker_token: args.docker_token,
        })
    }
}
