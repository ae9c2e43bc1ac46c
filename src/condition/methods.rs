use std::fmt;

use http::Method;

use super::Condition;
use crate::request::RequestParts;

/// A logical disjunction (`' || '`) condition matching a request against a
/// set of HTTP methods.
///
/// An empty set matches any method. Methods are stored sorted so that
/// structural equality ignores declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodsCondition {
    methods: Vec<Method>,
}

impl MethodsCondition {
    #[must_use]
    pub fn new<I>(methods: I) -> Self
    where
        I: IntoIterator<Item = Method>,
    {
        let mut methods: Vec<Method> = methods.into_iter().collect();
        methods.sort_unstable_by(|a, b| a.as_str().cmp(b.as_str()));
        methods.dedup();
        Self { methods }
    }

    #[must_use]
    pub fn empty() -> Self {
        Self {
            methods: Vec::new(),
        }
    }

    pub fn methods(&self) -> impl Iterator<Item = &Method> {
        self.methods.iter()
    }
}

impl Condition for MethodsCondition {
    /// Set union. Two empty sides stay empty ("match any method"); once
    /// either scope lists a concrete method, the union keeps every
    /// explicitly listed method from both sides.
    fn combine(&self, other: &Self) -> Self {
        Self::new(self.methods.iter().chain(other.methods.iter()).cloned())
    }

    fn matches(&self, request: &RequestParts) -> bool {
        self.methods.is_empty() || self.methods.contains(request.method())
    }

    fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }
}

impl fmt::Display for MethodsCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        super::fmt_bracketed(f, &self.methods, " || ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_matches_any_method() {
        let cond = MethodsCondition::empty();
        assert!(cond.matches(&RequestParts::new(Method::DELETE, "/x")));
    }

    #[test]
    fn non_empty_restricts() {
        let cond = MethodsCondition::new([Method::GET, Method::HEAD]);
        assert!(cond.matches(&RequestParts::new(Method::GET, "/x")));
        assert!(!cond.matches(&RequestParts::new(Method::POST, "/x")));
    }

    #[test]
    fn combine_is_a_union() {
        let group = MethodsCondition::new([Method::GET]);
        let endpoint = MethodsCondition::new([Method::POST, Method::GET]);
        let combined = group.combine(&endpoint);
        let names: Vec<&str> = combined.methods().map(Method::as_str).collect();
        assert_eq!(names, vec!["GET", "POST"]);

        let empty = MethodsCondition::empty();
        assert_eq!(empty.combine(&group), group);
        assert!(empty.combine(&MethodsCondition::empty()).is_empty());
    }

    #[test]
    fn equality_ignores_declaration_order() {
        let a = MethodsCondition::new([Method::GET, Method::POST]);
        let b = MethodsCondition::new([Method::POST, Method::GET]);
        assert_eq!(a, b);
    }
}
