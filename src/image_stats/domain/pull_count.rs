use super::image_reference::ImageIdentity;
use std::collections::HashMap;

/// Number of pulls observed for one image identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullCount {
    identity: ImageIdentity,
    count: usize,
}

impl PullCount {
    pub fn identity(&self) -> &ImageIdentity {
        &self.identity
    }

    pub fn count(&self) -> usize {
        self.count
    }
}

/// Pull counts keyed by identity, remembering first-discovery order.
///
/// Discovery order is what the report uses to break ties between images
/// with the same count, so two runs over identical input rank identically.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PullCounts {
    entries: Vec<PullCount>,
    index: HashMap<ImageIdentity, usize>,
}

impl PullCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one pull for `identity`.
    pub(crate) fn record(&mut self, identity: ImageIdentity) {
        if let Some(&position) = self.index.get(&identity) {
            self.entries[position].count += 1;
            return;
        }
        self.index.insert(identity.clone(), self.entries.len());
        self.entries.push(PullCount { identity, count: 1 });
    }

    /// Entries in first-discovery order
    pub fn entries(&self) -> &[PullCount] {
        &self.entries
    }

    /// Count for an identity, 0 when it was never pulled
    pub fn get(&self, identity: &str) -> usize {
        self.index
            .get(identity)
            .map_or(0, |&position| self.entries[position].count)
    }

    /// Sum of all counts
    pub fn total(&self) -> usize {
        self.entries.iter().map(PullCount::count).sum()
    }

    /// Number of distinct identities
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
