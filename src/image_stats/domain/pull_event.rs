use super::image_reference::{ImageIdentity, ImageReference};

/// A single log record that may describe an image pull.
///
/// Events are created by the extractor, consumed once by the aggregator and
/// then dropped. Order is whatever the log source delivered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullEvent {
    raw: String,
    reference: Option<ImageReference>,
}

impl PullEvent {
    pub fn new(raw: impl Into<String>, reference: Option<ImageReference>) -> Self {
        Self {
            raw: raw.into(),
            reference,
        }
    }

    /// The log line or record the event was extracted from
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn reference(&self) -> Option<&ImageReference> {
        self.reference.as_ref()
    }

    /// Normalized identity, or `None` when the line carried no usable reference.
    pub fn identity(&self) -> Option<ImageIdentity> {
        self.reference.as_ref().and_then(ImageReference::identity)
    }
}
