use crate::shared::error::PullwatchError;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Serialize, Serializer};
use std::str::FromStr;

/// Default window when `--since` is not given
pub const DEFAULT_HOURS: u32 = 24;

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"];

/// Time window for pull-event retrieval.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Period {
    /// The last N hours
    Hours(u32),
    /// Everything since an absolute date or date-time, kept as typed
    Since(String),
}

impl Default for Period {
    fn default() -> Self {
        Period::Hours(DEFAULT_HOURS)
    }
}

impl Period {
    /// Value for `journalctl --since`
    pub fn journal_arg(&self) -> String {
        match self {
            Period::Hours(hours) => format!("{}h ago", hours),
            Period::Since(date) => date.clone(),
        }
    }

    /// Human-readable label used in the report title and summary
    pub fn description(&self) -> String {
        match self {
            Period::Hours(1) => "Last 1 hour".to_string(),
            Period::Hours(hours) => format!("Last {} hours", hours),
            Period::Since(date) => format!("Since {}", date),
        }
    }

    /// Phrase that completes "No pull events found in logs ..."
    pub fn window_phrase(&self) -> String {
        match self {
            Period::Hours(1) => "in the last hour".to_string(),
            Period::Hours(hours) => format!("in the last {} hours", hours),
            Period::Since(date) => format!("since {}", date),
        }
    }
}

impl FromStr for Period {
    type Err = PullwatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();
        let invalid = |reason: &str| PullwatchError::InvalidSince {
            value: s.to_string(),
            reason: reason.to_string(),
        };

        if value.is_empty() {
            return Err(invalid("value is empty"));
        }

        if value.chars().all(|c| c.is_ascii_digit()) {
            let hours: u32 = value
                .parse()
                .map_err(|_| invalid("number of hours is too large"))?;
            if hours == 0 {
                return Err(invalid("number of hours must be greater than zero"));
            }
            return Ok(Period::Hours(hours));
        }

        let is_date = NaiveDate::parse_from_str(value, DATE_FORMAT).is_ok();
        let is_datetime = DATETIME_FORMATS
            .iter()
            .any(|format| NaiveDateTime::parse_from_str(value, format).is_ok());
        if is_date || is_datetime {
            return Ok(Period::Since(value.to_string()));
        }

        Err(invalid("expected a number of hours or a date"))
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

impl Serialize for Period {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.description())
    }
}
