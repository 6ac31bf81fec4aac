use crate::image_stats::domain::Period;
use crate::shared::Result;
use async_trait::async_trait;

/// LogSource port for retrieving raw runtime log lines
///
/// This port abstracts where pull events come from (journalctl, an exported
/// file, ...). Lines are returned in source order; blank lines are dropped.
#[async_trait]
pub trait LogSource: Send + Sync {
    /// Short name used in messages (e.g. "journalctl -u crio")
    fn describe(&self) -> String;

    /// Fetches the log lines covering `since`
    ///
    /// # Errors
    /// Returns an error if the underlying log facility is unavailable.
    /// An empty window is not an error here; the use case decides.
    async fn fetch_log_lines(&self, since: &Period) -> Result<Vec<String>>;
}

#[async_trait]
impl<T: LogSource + ?Sized> LogSource for Box<T> {
    fn describe(&self) -> String {
        (**self).describe()
    }

    async fn fetch_log_lines(&self, since: &Period) -> Result<Vec<String>> {
        (**self).fetch_log_lines(since).await
    }
}
