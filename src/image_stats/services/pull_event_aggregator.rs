use crate::image_stats::domain::{PullCounts, PullEvent};

/// PullEventAggregator - folds pull events into per-image counts
///
/// Created fresh for each run. Events without a usable reference are
/// counted as skipped and otherwise ignored.
#[derive(Debug, Default)]
pub struct PullEventAggregator {
    counts: PullCounts,
    skipped: usize,
}

impl PullEventAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts a single event. Returns whether it contributed to the totals.
    pub fn record(&mut self, event: &PullEvent) -> bool {
        match event.identity() {
            Some(identity) => {
                self.counts.record(identity);
                true
            }
            None => {
                self.skipped += 1;
                false
            }
        }
    }

    /// Number of events dropped so far
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn finish(self) -> PullCounts {
        self.counts
    }

    /// Single-pass convenience over a whole batch of events
    pub fn aggregate<'a, I>(events: I) -> PullCounts
    where
        I: IntoIterator<Item = &'a PullEvent>,
    {
        let mut aggregator = Self::new();
        for event in events {
            aggregator.record(event);
        }
        aggregator.finish()
    }
}
