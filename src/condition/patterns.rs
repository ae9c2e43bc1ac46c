use std::fmt;
use std::hash::{Hash, Hasher};

use super::Condition;
use crate::pattern::{PathPattern, PathVars};
use crate::request::RequestParts;

/// A logical disjunction (`' || '`) condition matching a request path
/// against a set of URL patterns.
///
/// A condition with no patterns matches every request. Insertion order is
/// kept for diagnostic printing; equality and hashing are set-based.
#[derive(Debug, Clone)]
pub struct PatternsCondition {
    patterns: Vec<PathPattern>,
}

impl PatternsCondition {
    /// Compile the given patterns, normalising each and dropping duplicates.
    #[must_use]
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut compiled: Vec<PathPattern> = Vec::new();
        for pattern in patterns {
            let compiled_pattern = PathPattern::new(pattern.as_ref());
            if !compiled.contains(&compiled_pattern) {
                compiled.push(compiled_pattern);
            }
        }
        Self { patterns: compiled }
    }

    #[must_use]
    pub fn empty() -> Self {
        Self {
            patterns: Vec::new(),
        }
    }

    pub(crate) fn from_patterns(patterns: Vec<PathPattern>) -> Self {
        let mut deduped: Vec<PathPattern> = Vec::new();
        for pattern in patterns {
            if !deduped.contains(&pattern) {
                deduped.push(pattern);
            }
        }
        Self { patterns: deduped }
    }

    /// The compiled patterns, in declaration order.
    pub fn patterns(&self) -> impl Iterator<Item = &PathPattern> {
        self.patterns.iter()
    }

    /// Find the most specific pattern matching `path` and its variable
    /// bindings. An empty condition matches any path with no bindings,
    /// reported as `(None, empty vars)`.
    #[must_use]
    pub fn best_match(&self, path: &str) -> Option<(Option<&PathPattern>, PathVars)> {
        if self.patterns.is_empty() {
            return Some((None, PathVars::new()));
        }
        self.patterns
            .iter()
            .filter_map(|p| p.capture(path).map(|vars| (p, vars)))
            .min_by(|(a, _), (b, _)| a.specificity_cmp(b))
            .map(|(p, vars)| (Some(p), vars))
    }
}

impl Condition for PatternsCondition {
    /// Cartesian join: every left pattern combined with every right pattern
    /// using the URL-segment combine rule. An empty side yields the other
    /// side; two empty sides yield the single empty pattern (the implicit
    /// root, refined further at installation time).
    fn combine(&self, other: &Self) -> Self {
        if self.patterns.is_empty() && other.patterns.is_empty() {
            return Self {
                patterns: vec![PathPattern::new("")],
            };
        }
        if self.patterns.is_empty() {
            return other.clone();
        }
        if other.patterns.is_empty() {
            return self.clone();
        }
        let mut combined = Vec::with_capacity(self.patterns.len() * other.patterns.len());
        for p1 in &self.patterns {
            for p2 in &other.patterns {
                combined.push(p1.combine(p2));
            }
        }
        Self::from_patterns(combined)
    }

    fn matches(&self, request: &RequestParts) -> bool {
        self.best_match(request.path()).is_some()
    }

    fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

impl PartialEq for PatternsCondition {
    fn eq(&self, other: &Self) -> bool {
        sorted_texts(&self.patterns) == sorted_texts(&other.patterns)
    }
}

impl Eq for PatternsCondition {}

impl Hash for PatternsCondition {
    fn hash<H: Hasher>(&self, state: &mut H) {
        sorted_texts(&self.patterns).hash(state);
    }
}

impl fmt::Display for PatternsCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        super::fmt_bracketed(f, &self.patterns, " || ")
    }
}

fn sorted_texts(patterns: &[PathPattern]) -> Vec<&str> {
    let mut texts: Vec<&str> = patterns.iter().map(PathPattern::as_str).collect();
    texts.sort_unstable();
    texts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_ignores_declaration_order() {
        let a = PatternsCondition::new(["/a", "/b"]);
        let b = PatternsCondition::new(["/b", "/a"]);
        assert_eq!(a, b);
    }

    #[test]
    fn combine_is_cartesian() {
        let groups = PatternsCondition::new(["/api", "/admin"]);
        let endpoints = PatternsCondition::new(["/items", "/users"]);
        let combined = groups.combine(&endpoints);
        let texts: Vec<&str> = combined.patterns().map(PathPattern::as_str).collect();
        assert_eq!(
            texts,
            vec!["/api/items", "/api/users", "/admin/items", "/admin/users"]
        );
    }

    #[test]
    fn combine_empty_sides() {
        let empty = PatternsCondition::empty();
        let items = PatternsCondition::new(["/items"]);
        assert_eq!(empty.combine(&items), items);
        assert_eq!(items.combine(&empty), items);

        let both = empty.combine(&PatternsCondition::empty());
        let texts: Vec<&str> = both.patterns().map(PathPattern::as_str).collect();
        assert_eq!(texts, vec![""]);
    }

    #[test]
    fn best_match_prefers_most_specific() {
        let cond = PatternsCondition::new(["/items/**", "/items/{id}", "/items/special"]);
        let (pattern, _) = cond.best_match("/items/special").unwrap();
        assert_eq!(pattern.unwrap().as_str(), "/items/special");

        let (pattern, vars) = cond.best_match("/items/42").unwrap();
        assert_eq!(pattern.unwrap().as_str(), "/items/{id}");
        assert_eq!(vars[0].1, "42");
    }

    #[test]
    fn empty_condition_matches_any_path() {
        let cond = PatternsCondition::empty();
        let (pattern, vars) = cond.best_match("/anything/at/all").unwrap();
        assert!(pattern.is_none());
        assert!(vars.is_empty());
    }
}
