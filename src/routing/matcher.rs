//! Prefix matching for mount points.
//!
//! # Responsibilities
//! - Decide whether a path falls under a mount prefix
//! - Compute the path as seen from inside the mount
//!
//! # Design Decisions
//! - Literal, case-sensitive string prefix (no patterns, no decoding)
//! - A prefix without a trailing slash only matches on a segment boundary
//! - A prefix with a trailing slash strips literally, boundary included

/// Matches request paths against a fixed mount prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixMatcher {
    prefix: String,
    trailing_slash: bool,
}

impl PrefixMatcher {
    /// Create a matcher for `prefix`.
    pub fn new(prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        let trailing_slash = prefix.ends_with('/');
        Self {
            prefix,
            trailing_slash,
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn has_trailing_slash(&self) -> bool {
        self.trailing_slash
    }

    /// Strip the prefix from `path`.
    ///
    /// Returns the path as seen from inside the mount, or `None` when
    /// `path` is not under the prefix. An exact match yields `/`.
    pub fn strip(&self, path: &str) -> Option<String> {
        let rest = path.strip_prefix(self.prefix.as_str())?;
        let stripped = if rest.is_empty() { "/" } else { rest };

        if !self.trailing_slash && !stripped.starts_with('/') {
            return None;
        }

        Some(stripped.to_string())
    }

    pub fn matches(&self, path: &str) -> bool {
        self.strip(path).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strip(prefix: &str, path: &str) -> Option<String> {
        PrefixMatcher::new(prefix).strip(path)
    }

    #[test]
    fn test_unrelated_path_does_not_match() {
        assert_eq!(strip("/images/", "/lkajsldkjf"), None);
        assert_eq!(strip("/images", "/other/images"), None);
    }

    #[test]
    fn test_exact_match_becomes_root() {
        assert_eq!(strip("/images", "/images").as_deref(), Some("/"));
    }

    #[test]
    fn test_exact_match_with_trailing_slash_in_path() {
        assert_eq!(strip("/images", "/images/").as_deref(), Some("/"));
    }

    #[test]
    fn test_trailing_slash_prefix_needs_the_slash() {
        assert_eq!(strip("/images/", "/images"), None);
        assert_eq!(strip("/images/", "/images/").as_deref(), Some("/"));
    }

    #[test]
    fn test_trailing_slash_prefix_strips_literally() {
        assert_eq!(strip("/images/", "/images/asdf").as_deref(), Some("asdf"));
    }

    #[test]
    fn test_nested_path() {
        assert_eq!(strip("/images", "/images/xxx").as_deref(), Some("/xxx"));
        assert_eq!(strip("/api/v1", "/api/v1/users/123").as_deref(), Some("/users/123"));
    }

    #[test]
    fn test_partial_segment_rejected() {
        assert_eq!(strip("/images", "/imagesxyz"), None);
        assert_eq!(strip("/prefix", "/prefixlaksjdf"), None);
        assert_eq!(strip("/prefix", "/prefixed"), None);
    }

    #[test]
    fn test_case_sensitive() {
        assert_eq!(strip("/api", "/API/users"), None);
    }

    #[test]
    fn test_no_match_iff_property() {
        let prefixes = ["/a", "/a/", "/ab", "/a/b", "/a/b/"];
        let paths = ["/", "/a", "/a/", "/ab", "/abc", "/a/b", "/a/b/", "/a/bc", "/b", ""];

        for prefix in prefixes {
            for path in paths {
                let expected_no_match = match path.strip_prefix(prefix) {
                    None => true,
                    Some(rest) => {
                        !prefix.ends_with('/') && !rest.is_empty() && !rest.starts_with('/')
                    }
                };
                assert_eq!(
                    strip(prefix, path).is_none(),
                    expected_no_match,
                    "prefix {prefix:?} path {path:?}"
                );
            }
        }
    }

    #[test]
    fn test_flags() {
        assert!(PrefixMatcher::new("/a/").has_trailing_slash());
        assert!(!PrefixMatcher::new("/a").has_trailing_slash());
        assert!(PrefixMatcher::new("/a").matches("/a/b"));
        assert_eq!(PrefixMatcher::new("/a").prefix(), "/a");
    }
}
