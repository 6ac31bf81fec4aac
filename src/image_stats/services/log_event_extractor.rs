use crate::image_stats::domain::{ImageReference, PullEvent};
use serde::Deserialize;
use serde_json::{Map, Value};

/// Marker used by CRI-O when an image pull completes
pub const DEFAULT_MARKERS: &[&str] = &["Pulled image:"];

/// Journal fields that carry the log message in structured records
const MESSAGE_FIELDS: [&str; 3] = ["MESSAGE", "message", "msg"];

/// Key holding the reference in flat structured records
const IMAGE_KEY: &str = "image";

/// How raw log lines are interpreted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractionStrategy {
    /// Plain journal text; the reference follows a marker phrase
    #[default]
    Plain,
    /// One JSON object per line (`journalctl -o json` or a JSON logging driver)
    Structured,
}

impl std::str::FromStr for ExtractionStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "plain" | "text" => Ok(ExtractionStrategy::Plain),
            "structured" | "json" => Ok(ExtractionStrategy::Structured),
            _ => Err(format!(
                "Invalid log format: {}. Please specify 'plain' or 'structured'",
                s
            )),
        }
    }
}

impl std::fmt::Display for ExtractionStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExtractionStrategy::Plain => write!(f, "plain"),
            ExtractionStrategy::Structured => write!(f, "structured"),
        }
    }
}

/// LogEventExtractor - pulls image references out of log lines
///
/// Extraction is total: a line that matches nothing, is truncated, or is not
/// valid JSON simply yields no reference.
#[derive(Debug, Clone)]
pub struct LogEventExtractor {
    strategy: ExtractionStrategy,
    markers: Vec<String>,
}

impl Default for LogEventExtractor {
    fn default() -> Self {
        Self::new(ExtractionStrategy::default())
    }
}

impl LogEventExtractor {
    /// Creates an extractor with the default marker phrases
    pub fn new(strategy: ExtractionStrategy) -> Self {
        Self {
            strategy,
            markers: DEFAULT_MARKERS.iter().map(|m| m.to_string()).collect(),
        }
    }

    /// Replaces the marker phrases. Blank markers are ignored; if none
    /// remain the defaults are kept.
    pub fn with_markers(mut self, markers: Vec<String>) -> Self {
        let markers: Vec<String> = markers
            .into_iter()
            .filter(|marker| !marker.trim().is_empty())
            .collect();
        if !markers.is_empty() {
            self.markers = markers;
        }
        self
    }

    pub fn strategy(&self) -> ExtractionStrategy {
        self.strategy
    }

    pub fn markers(&self) -> &[String] {
        &self.markers
    }

    /// Extracts the image reference a line refers to, if any
    pub fn extract(&self, line: &str) -> Option<ImageReference> {
        match self.strategy {
            ExtractionStrategy::Plain => self.extract_after_marker(line),
            ExtractionStrategy::Structured => self.extract_structured(line),
        }
    }

    /// Wraps a line and its extracted reference into a pull event
    pub fn event(&self, line: &str) -> PullEvent {
        PullEvent::new(line, self.extract(line))
    }

    /// Converts every line into a pull event, keeping source order
    pub fn events<I, S>(&self, lines: I) -> Vec<PullEvent>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        lines
            .into_iter()
            .map(|line| self.event(line.as_ref()))
            .collect()
    }

    fn extract_after_marker(&self, text: &str) -> Option<ImageReference> {
        self.markers.iter().find_map(|marker| {
            let idx = text.find(marker.as_str())?;
            take_reference(&text[idx + marker.len()..])
        })
    }

    fn extract_structured(&self, line: &str) -> Option<ImageReference> {
        match serde_json::from_str::<Value>(line.trim()) {
            Ok(Value::Object(record)) => self.extract_from_record(&record),
            Ok(_) => None,
            Err(_) => scan_image_key(line),
        }
    }

    fn extract_from_record(&self, record: &Map<String, Value>) -> Option<ImageReference> {
        if let Some(reference) = record
            .get(IMAGE_KEY)
            .and_then(Value::as_str)
            .and_then(ImageReference::new)
        {
            return Some(reference);
        }

        MESSAGE_FIELDS
            .iter()
            .filter_map(|field| record.get(*field))
            .filter_map(message_text)
            .find_map(|message| self.extract_after_marker(&message))
    }
}

/// Takes the reference that starts right after a marker.
///
/// Leading quotes are dropped, the text is cut at the next quote or
/// backslash (logging pipelines append `" id=... name=...` metadata) and
/// only the first token is kept.
fn take_reference(rest: &str) -> Option<ImageReference> {
    let rest = rest.trim_start();
    let rest = rest
        .strip_prefix("\\\"")
        .or_else(|| rest.strip_prefix('"'))
        .unwrap_or(rest);
    let end = rest.find(['"', '\\']).unwrap_or(rest.len());
    let candidate = rest[..end].split_whitespace().next()?;
    ImageReference::new(candidate)
}

/// Journald emits MESSAGE as a byte array when it is not valid UTF-8.
fn message_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Array(items) => {
            let bytes: Option<Vec<u8>> = items
                .iter()
                .map(|item| item.as_u64().and_then(|b| u8::try_from(b).ok()))
                .collect();
            bytes.map(|b| String::from_utf8_lossy(&b).into_owned())
        }
        _ => None,
    }
}

/// Fallback for records that are not valid JSON (e.g. truncated lines):
/// finds `"image"`, an optional-whitespace colon and a quoted value.
fn scan_image_key(line: &str) -> Option<ImageReference> {
    let key = format!("\"{}\"", IMAGE_KEY);
    let mut search_from = 0;

    while let Some(found) = line[search_from..].find(&key) {
        let after_key = search_from + found + key.len();
        search_from = after_key;

        let rest = line[after_key..].trim_start();
        let Some(rest) = rest.strip_prefix(':') else {
            continue;
        };
        let Some(value) = rest.trim_start().strip_prefix('"') else {
            continue;
        };
        let Some(end) = value.find('"') else {
            continue;
        };
        if let Some(reference) = ImageReference::new(&value[..end]) {
            return Some(reference);
        }
    }

    None
}
