use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use regex::Regex;
use smallvec::SmallVec;

/// Maximum number of path variables before heap allocation.
/// Most URL templates bind at most a handful of variables.
pub const MAX_INLINE_VARS: usize = 8;

/// Stack-allocated path-variable storage.
///
/// Variable names come from the compiled pattern and are shared as
/// `Arc<str>`; values are per-request data extracted from the URL.
pub type PathVars = SmallVec<[(Arc<str>, String); MAX_INLINE_VARS]>;

/// A compiled URL template pattern.
///
/// Normalised so that every non-empty pattern starts with `/`
/// (normalisation is idempotent). The empty pattern matches only the root
/// path. Equality and hashing are over the normalised pattern text.
#[derive(Debug, Clone)]
pub struct PathPattern {
    raw: String,
    regex: Regex,
    var_names: Vec<Arc<str>>,
    literal_segments: usize,
    wildcard_segments: usize,
    multi_segments: usize,
}

impl PathPattern {
    /// Compile a pattern, normalising it first.
    #[must_use]
    pub fn new(pattern: &str) -> Self {
        let raw = normalize(pattern);
        let mut builder = String::from("^");
        let mut var_names: Vec<Arc<str>> = Vec::new();
        let mut literal_segments = 0;
        let mut wildcard_segments = 0;
        let mut multi_segments = 0;

        for segment in raw.split('/').filter(|s| !s.is_empty()) {
            if segment == "**" {
                multi_segments += 1;
                builder.push_str("(?:/[^/]+)*");
                continue;
            }
            builder.push('/');
            let mut has_wildcard = false;
            let mut chars = segment.chars().peekable();
            while let Some(c) = chars.next() {
                match c {
                    '{' => {
                        let mut name = String::new();
                        let mut closed = false;
                        for n in chars.by_ref() {
                            if n == '}' {
                                closed = true;
                                break;
                            }
                            name.push(n);
                        }
                        if closed {
                            has_wildcard = true;
                            builder.push_str("([^/]+)");
                            var_names.push(Arc::from(name.as_str()));
                        } else {
                            // Unterminated brace: treat literally.
                            builder.push_str(&regex::escape("{"));
                            builder.push_str(&regex::escape(&name));
                        }
                    }
                    '*' => {
                        has_wildcard = true;
                        builder.push_str("[^/]*");
                    }
                    '?' => {
                        has_wildcard = true;
                        builder.push_str("[^/]");
                    }
                    other => {
                        let mut buf = [0u8; 4];
                        builder.push_str(&regex::escape(other.encode_utf8(&mut buf)));
                    }
                }
            }
            if has_wildcard {
                wildcard_segments += 1;
            } else {
                literal_segments += 1;
            }
        }
        // Match irrespective of a trailing slash.
        builder.push_str("/?$");

        // The builder only emits escaped literals and fixed constructs, so
        // compilation cannot fail on user input.
        #[allow(clippy::expect_used)]
        let regex = Regex::new(&builder).expect("compiled pattern regex is always valid");

        Self {
            raw,
            regex,
            var_names,
            literal_segments,
            wildcard_segments,
            multi_segments,
        }
    }

    /// The normalised pattern text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Whether the pattern text uses any wildcard or variable syntax.
    #[must_use]
    pub fn is_literal(&self) -> bool {
        self.wildcard_segments == 0 && self.multi_segments == 0
    }

    /// Test a request path without extracting variables.
    #[must_use]
    pub fn matches(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }

    /// Match a request path, extracting `{name}` variable bindings.
    ///
    /// Returns `None` if the path does not match.
    #[must_use]
    pub fn capture(&self, path: &str) -> Option<PathVars> {
        let caps = self.regex.captures(path)?;
        let mut vars = PathVars::new();
        for (i, name) in self.var_names.iter().enumerate() {
            if let Some(m) = caps.get(i + 1) {
                vars.push((Arc::clone(name), m.as_str().to_string()));
            }
        }
        Some(vars)
    }

    /// Join this pattern (group scope) with another (endpoint scope) the way
    /// URL segments join:
    ///
    /// - an empty side yields the other side; both empty yields the empty
    ///   pattern
    /// - a trailing `/*` on the left is replaced by the right side
    /// - otherwise the two are joined with a single `/`, dropping empty
    ///   segments
    #[must_use]
    pub fn combine(&self, other: &PathPattern) -> PathPattern {
        PathPattern::new(&combine_text(&self.raw, &other.raw))
    }

    /// Specificity ordering: [`Ordering::Less`] means `self` is more
    /// specific. Compares multi-segment wildcard count, then wildcard
    /// segment count, then literal segment count, then pattern length.
    #[must_use]
    pub fn specificity_cmp(&self, other: &PathPattern) -> Ordering {
        self.multi_segments
            .cmp(&other.multi_segments)
            .then(self.wildcard_segments.cmp(&other.wildcard_segments))
            .then(other.literal_segments.cmp(&self.literal_segments))
            .then(other.raw.len().cmp(&self.raw.len()))
    }
}

impl PartialEq for PathPattern {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Eq for PathPattern {}

impl Hash for PathPattern {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.raw.hash(state);
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Prepend a leading `/` to non-empty patterns. Idempotent.
fn normalize(pattern: &str) -> String {
    if pattern.is_empty() || pattern.starts_with('/') {
        pattern.to_string()
    } else {
        format!("/{pattern}")
    }
}

fn combine_text(p1: &str, p2: &str) -> String {
    if p1.is_empty() {
        return p2.to_string();
    }
    if p2.is_empty() {
        return p1.to_string();
    }
    if let Some(head) = p1.strip_suffix("/*") {
        // "/hotels/*" + "/booking" -> "/hotels/booking"
        return format!("{head}{p2}");
    }
    format!("{}{}", p1.trim_end_matches('/'), p2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalization_prepends_slash_and_is_idempotent() {
        assert_eq!(PathPattern::new("items").as_str(), "/items");
        assert_eq!(PathPattern::new("/items").as_str(), "/items");
        let once = PathPattern::new("items");
        let twice = PathPattern::new(once.as_str());
        assert_eq!(once, twice);
    }

    #[test]
    fn empty_pattern_matches_root_only() {
        let p = PathPattern::new("");
        assert!(p.matches("/"));
        assert!(!p.matches("/items"));
    }

    #[test]
    fn literal_pattern_matches_exactly() {
        let p = PathPattern::new("/items");
        assert!(p.matches("/items"));
        assert!(p.matches("/items/"));
        assert!(!p.matches("/items/1"));
        assert!(!p.matches("/item"));
    }

    #[test]
    fn variables_are_captured() {
        let p = PathPattern::new("/users/{user_id}/posts/{post_id}");
        let vars = p.capture("/users/7/posts/42").unwrap();
        assert_eq!(vars.len(), 2);
        assert_eq!(vars[0], (Arc::from("user_id"), "7".to_string()));
        assert_eq!(vars[1], (Arc::from("post_id"), "42".to_string()));
        assert!(p.capture("/users/7/posts").is_none());
    }

    #[test]
    fn question_mark_matches_single_character() {
        let p = PathPattern::new("/file?.txt");
        assert!(p.matches("/file1.txt"));
        assert!(!p.matches("/file12.txt"));
        assert!(!p.matches("/file.txt"));
    }

    #[test]
    fn single_star_stays_within_a_segment() {
        let p = PathPattern::new("/items/*");
        assert!(p.matches("/items/1"));
        assert!(p.matches("/items/abc"));
        assert!(!p.matches("/items/1/details"));
    }

    #[test]
    fn double_star_spans_segments() {
        let p = PathPattern::new("/api/**");
        assert!(p.matches("/api"));
        assert!(p.matches("/api/items"));
        assert!(p.matches("/api/items/1/details"));
        assert!(!p.matches("/other"));

        let mid = PathPattern::new("/a/**/z");
        assert!(mid.matches("/a/z"));
        assert!(mid.matches("/a/b/c/z"));
        assert!(!mid.matches("/a/b/c"));
    }

    #[test]
    fn combine_joins_like_url_segments() {
        let api = PathPattern::new("/api");
        let items = PathPattern::new("/items/{id}");
        assert_eq!(api.combine(&items).as_str(), "/api/items/{id}");

        let trailing = PathPattern::new("/api/");
        assert_eq!(trailing.combine(&items).as_str(), "/api/items/{id}");
    }

    #[test]
    fn combine_replaces_trailing_single_wildcard() {
        let hotels = PathPattern::new("/hotels/*");
        let booking = PathPattern::new("/booking");
        assert_eq!(hotels.combine(&booking).as_str(), "/hotels/booking");
    }

    #[test]
    fn combine_keeps_trailing_multi_wildcard() {
        let hotels = PathPattern::new("/hotels/**");
        let booking = PathPattern::new("/booking");
        assert_eq!(hotels.combine(&booking).as_str(), "/hotels/**/booking");
    }

    #[test]
    fn combine_with_empty_sides() {
        let empty = PathPattern::new("");
        let items = PathPattern::new("/items");
        assert_eq!(empty.combine(&items), items);
        assert_eq!(items.combine(&empty), items);
        assert_eq!(empty.combine(&empty).as_str(), "");
    }

    #[test]
    fn specificity_exact_beats_wildcard_beats_multi() {
        let exact = PathPattern::new("/items/all");
        let var = PathPattern::new("/items/{id}");
        let multi = PathPattern::new("/items/**");
        assert_eq!(exact.specificity_cmp(&var), Ordering::Less);
        assert_eq!(var.specificity_cmp(&multi), Ordering::Less);
        assert_eq!(multi.specificity_cmp(&exact), Ordering::Greater);
        assert_eq!(var.specificity_cmp(&var), Ordering::Equal);
    }
}
