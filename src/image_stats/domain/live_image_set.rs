use super::image_reference::ImageIdentity;
use std::collections::HashSet;

/// Identities referenced by pod specs at the moment the cluster was queried.
///
/// Built once per run. It is not refreshed while the report is assembled, so
/// it may be slightly out of step with the pull-event window.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LiveImageSet {
    identities: HashSet<ImageIdentity>,
}

impl LiveImageSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalizes every reference and collects the non-empty identities.
    pub fn from_references<I, S>(references: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let identities = references
            .into_iter()
            .filter_map(|reference| ImageIdentity::parse(reference.as_ref()))
            .collect();
        Self { identities }
    }

    pub fn contains(&self, identity: &ImageIdentity) -> bool {
        self.identities.contains(identity)
    }

    pub fn len(&self) -> usize {
        self.identities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.identities.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_references_collapses_tags() {
        let set = LiveImageSet::from_references([
            "repo/a:v1",
            "repo/a:v2",
            "repo/a@sha256:deadbeef",
            "repo/b",
        ]);
        assert_eq!(set.len(), 2);
        assert!(set.contains(&ImageIdentity::parse("repo/a").unwrap()));
        assert!(set.contains(&ImageIdentity::parse("repo/b").unwrap()));
    }

    #[test]
    fn test_from_references_skips_empty() {
        let set = LiveImageSet::from_references(["", "  ", ":latest"]);
        assert!(set.is_empty());
    }
}
