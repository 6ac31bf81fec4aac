use serde::Serialize;

/// Digest separator recognised anywhere in a reference
const DIGEST_SEPARATOR: &str = "@sha256:";

/// Strips the tag and digest from an image reference.
///
/// The digest (`@sha256:...`) is removed first, then a tag separator is
/// searched for only in the last path segment, so the port of a registry
/// host such as `host:5000/team/app:v1` is left alone. Both suffixes are
/// removed when present, which keeps the function idempotent.
///
/// An empty (or whitespace-only) input yields an empty string; callers treat
/// that as an unparsable reference.
///
/// # Examples
/// ```
/// use pullwatch::image_stats::domain::normalize;
///
/// assert_eq!(normalize("quay.io/calico/cni:v3.27.0"), "quay.io/calico/cni");
/// assert_eq!(normalize("registry:5000/app@sha256:abc"), "registry:5000/app");
/// assert_eq!(normalize("nginx"), "nginx");
/// ```
pub fn normalize(reference: &str) -> String {
    let mut name = reference.trim();

    if let Some(idx) = name.find(DIGEST_SEPARATOR) {
        name = &name[..idx];
    }

    let segment_start = name.rfind('/').map_or(0, |idx| idx + 1);
    if let Some(idx) = name[segment_start..].find([':', '@']) {
        name = &name[..segment_start + idx];
    }

    name.trim().to_string()
}

/// An image reference as it appeared in a log line or pod spec,
/// possibly carrying a tag or digest.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageReference(String);

impl ImageReference {
    /// Wraps a raw reference, returning `None` when it is blank.
    pub fn new(reference: impl Into<String>) -> Option<Self> {
        let reference = reference.into();
        let trimmed = reference.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Normalized identity of this reference, if anything is left after
    /// stripping the tag and digest.
    pub fn identity(&self) -> Option<ImageIdentity> {
        ImageIdentity::parse(&self.0)
    }
}

impl std::fmt::Display for ImageReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Normalized image identity: repository without tag or digest.
///
/// This is the join key between pull events and the live pod inventory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ImageIdentity(String);

impl ImageIdentity {
    /// Normalizes `reference`; `None` if the result is empty.
    pub fn parse(reference: &str) -> Option<Self> {
        let normalized = normalize(reference);
        if normalized.is_empty() {
            None
        } else {
            Some(Self(normalized))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::borrow::Borrow<str> for ImageIdentity {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ImageIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
