//! Canonical dot-paths for heading titles and lookup queries.
//!
//! Titles such as `{key}.OPTIONS`, `authors[item].name` or `DATABASES__NAME`
//! and queries such as `DATABASES__default__NAME` all reduce to the same shape:
//! an ordered list of non-empty segments. Placeholders (`{..}` and `[..]`) carry
//! no literal text and vanish; runs of `__` act as a `.` separator.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

static PLACEHOLDER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{[^}]+\}|\[[^\]]+\]").unwrap());

static DOUBLE_UNDERSCORE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?:__)+").unwrap());

/// A normalized identifier path. Segments keep their original casing for
/// display; [`NormalizedPath::key`] gives the case-folded form used for matching.
#[derive(Debug, Clone, PartialEq, Eq, Default, Hash)]
pub struct NormalizedPath {
    segments: Vec<String>,
}

impl NormalizedPath {
    pub fn new(raw: &str) -> NormalizedPath {
        let without_placeholders = PLACEHOLDER_RE.replace_all(raw, "");
        let dotted = DOUBLE_UNDERSCORE_RE.replace_all(&without_placeholders, ".");

        let segments = dotted
            .split('.')
            .map(str::trim)
            .filter(|segment| !segment.is_empty())
            .map(String::from)
            .collect();

        NormalizedPath { segments }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// The last segment, if any.
    pub fn leaf(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    /// Case-folded, dot-joined form of the path.
    pub fn key(&self) -> String {
        fold(&self.to_string())
    }
}

impl fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}

impl From<&str> for NormalizedPath {
    fn from(value: &str) -> Self {
        NormalizedPath::new(value)
    }
}

/// Case folding applied to every index key and query.
pub fn fold(text: &str) -> String {
    text.to_lowercase()
}

/// Last segment of an already case-folded, dot-joined key.
pub(crate) fn key_leaf(key: &str) -> &str {
    key.rsplit('.').next().unwrap_or(key)
}

/// The fragment a user is still typing: everything after the last separator.
///
/// Unlike [`NormalizedPath::leaf`] a trailing separator is significant here,
/// `"DATABASES__"` yields an empty fragment.
pub fn trailing_fragment(raw: &str) -> String {
    let dotted = DOUBLE_UNDERSCORE_RE.replace_all(raw, ".");
    dotted.rsplit('.').next().unwrap_or_default().to_string()
}
