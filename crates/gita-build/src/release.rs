use std::fmt;

use gita_core::ReleaseConfig;

const TAG_PREFIX: &str = "refs/tags/";

/// Release tag from a version-control reference.
///
/// `refs/tags/v1.2.0` and a bare `v1.2.0` both give `v1.2.0`. Branch and
/// other `refs/` references, and empty input, give `None`.
pub fn tag_from_ref(reference: &str) -> Option<&str> {
    let reference = reference.trim();
    let tag = match reference.strip_prefix(TAG_PREFIX) {
        Some(tag) => tag,
        None if reference.starts_with("refs/") => return None,
        None => reference,
    };
    (!tag.is_empty()).then_some(tag)
}

/// Registry image reference `<user>/<repository>:<tag>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef {
    pub user: String,
    pub repository: String,
    pub tag: String,
}

impl ImageRef {
    /// Image published for `release_tag`: the tag is folded into the
    /// repository name and the image tag is the configured one.
    pub fn for_release(user: &str, config: &ReleaseConfig, release_tag: &str) -> Self {
        Self {
            user: user.to_owned(),
            repository: format!("{}-{}", config.image_prefix, release_tag),
            tag: config.image_tag.clone(),
        }
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}:{}", self.user, self.repository, self.tag)
    }
}
