use crate::image_stats::domain::Period;
use crate::image_stats::services::ExtractionStrategy;
use crate::ports::outbound::LogSource;
use crate::shared::error::PullwatchError;
use crate::shared::Result;
use async_trait::async_trait;
use std::time::Duration;
use tokio::process::Command;

/// Container runtime unit whose journal is searched by default
pub const DEFAULT_UNIT: &str = "crio";

const JOURNALCTL: &str = "journalctl";

/// journalctl exits with 1 when `-g` matched nothing, but also on real
/// failures; only a silent exit 1 counts as "no matches".
const NO_MATCH_EXIT_CODE: i32 = 1;

/// Characters that must be escaped to use a marker inside a PCRE pattern
const REGEX_META: &[char] = &[
    '\\', '.', '^', '$', '|', '?', '*', '+', '(', ')', '[', ']', '{', '}',
];

/// JournalctlLogSource adapter reading pull events from the systemd journal
///
/// Runs `journalctl -u <unit> --since <window> -g <markers>` once, bounded by
/// a timeout. With the structured strategy records are requested as JSON.
pub struct JournalctlLogSource {
    program: String,
    unit: String,
    strategy: ExtractionStrategy,
    markers: Vec<String>,
    timeout: Duration,
}

impl JournalctlLogSource {
    pub fn new(
        unit: impl Into<String>,
        strategy: ExtractionStrategy,
        markers: Vec<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            program: JOURNALCTL.to_string(),
            unit: unit.into(),
            strategy,
            markers,
            timeout,
        }
    }

    /// Uses a different executable (e.g. a wrapper script)
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Command-line arguments for the given window
    pub fn args(&self, since: &Period) -> Vec<String> {
        let mut args = vec![
            "-u".to_string(),
            self.unit.clone(),
            "--since".to_string(),
            since.journal_arg(),
            "--no-pager".to_string(),
            "-q".to_string(),
        ];

        if let Some(pattern) = grep_pattern(&self.markers) {
            args.push("-g".to_string());
            args.push(pattern);
        }

        if self.strategy == ExtractionStrategy::Structured {
            args.push("-o".to_string());
            args.push("json".to_string());
        }

        args
    }

    fn error(&self, details: impl Into<String>, hint: &str) -> anyhow::Error {
        PullwatchError::LogSource {
            source_name: self.describe(),
            details: details.into(),
            hint: hint.to_string(),
        }
        .into()
    }
}

#[async_trait]
impl LogSource for JournalctlLogSource {
    fn describe(&self) -> String {
        format!("{} -u {}", self.program, self.unit)
    }

    async fn fetch_log_lines(&self, since: &Period) -> Result<Vec<String>> {
        let args = self.args(since);
        tracing::debug!(program = %self.program, ?args, "running journal query");

        let output = tokio::time::timeout(
            self.timeout,
            Command::new(&self.program)
                .args(&args)
                .kill_on_drop(true)
                .output(),
        )
        .await
        .map_err(|_| {
            self.error(
                format!("timed out after {}s", self.timeout.as_secs()),
                "Narrow the window with --since or raise --timeout",
            )
        })?
        .map_err(|e| {
            self.error(
                e.to_string(),
                "journalctl must be installed and on PATH; use --log-file to read an exported journal instead",
            )
        })?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);

        if !output.status.success() {
            if output.status.code() == Some(NO_MATCH_EXIT_CODE)
                && stdout.trim().is_empty()
                && stderr.trim().is_empty()
            {
                tracing::debug!("journal query matched no entries");
                return Ok(Vec::new());
            }
            return Err(self.error(
                format!("{}: {}", output.status, stderr.trim()),
                "Run as a user allowed to read the system journal (root or the systemd-journal group)",
            ));
        }

        Ok(split_lines(&stdout))
    }
}

/// Case-insensitive pattern matching any marker; journalctl compares
/// case-insensitively when the pattern has no uppercase characters.
fn grep_pattern(markers: &[String]) -> Option<String> {
    let alternatives: Vec<String> = markers
        .iter()
        .map(|marker| marker.trim().to_lowercase())
        .filter(|marker| !marker.is_empty())
        .map(|marker| {
            marker
                .chars()
                .flat_map(|c| {
                    if REGEX_META.contains(&c) {
                        vec!['\\', c]
                    } else {
                        vec![c]
                    }
                })
                .collect()
        })
        .collect();

    if alternatives.is_empty() {
        None
    } else {
        Some(alternatives.join("|"))
    }
}

/// Non-blank lines, minus journalctl's own `-- ... --` banners
pub(crate) fn split_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim_end)
        .filter(|line| !line.trim().is_empty() && !line.starts_with("-- "))
        .map(String::from)
        .collect()
}
