use std::fmt;

use super::{Condition, InvalidExpressionError, NameValueExpression};
use crate::request::RequestParts;

/// A logical conjunction (`' && '`) condition matching a request's headers
/// against a set of name-value expressions.
///
/// Header names compare case-insensitively. Expressions naming `Accept` or
/// `Content-Type` are discarded at construction; those headers are owned by
/// the produces and consumes conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HeadersCondition {
    expressions: Vec<NameValueExpression>,
}

impl HeadersCondition {
    /// Parse `name[=value]`-style header expressions, silently dropping any
    /// that name the reserved content-negotiation headers.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidExpressionError`] for an empty or nameless
    /// expression.
    pub fn new<I, S>(headers: I) -> Result<Self, InvalidExpressionError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut expressions = Vec::new();
        for header in headers {
            let expr = NameValueExpression::header(header.as_ref())?;
            if is_reserved(expr.name()) {
                continue;
            }
            expressions.push(expr);
        }
        Ok(Self::from_expressions(expressions))
    }

    #[must_use]
    pub fn empty() -> Self {
        Self {
            expressions: Vec::new(),
        }
    }

    pub(crate) fn from_expressions(mut expressions: Vec<NameValueExpression>) -> Self {
        expressions.retain(|expr| !is_reserved(expr.name()));
        expressions.sort_unstable();
        expressions.dedup();
        Self { expressions }
    }

    pub fn expressions(&self) -> impl Iterator<Item = &NameValueExpression> {
        self.expressions.iter()
    }
}

/// `Accept` and `Content-Type` belong to the produces/consumes conditions.
fn is_reserved(name: &str) -> bool {
    name.eq_ignore_ascii_case("accept") || name.eq_ignore_ascii_case("content-type")
}

impl Condition for HeadersCondition {
    /// Conjunctive set union of the header expressions from both scopes.
    fn combine(&self, other: &Self) -> Self {
        Self::from_expressions(
            self.expressions
                .iter()
                .chain(other.expressions.iter())
                .cloned()
                .collect(),
        )
    }

    fn matches(&self, request: &RequestParts) -> bool {
        self.expressions
            .iter()
            .all(|expr| expr.matches_in(request.headers()))
    }

    fn is_empty(&self) -> bool {
        self.expressions.is_empty()
    }
}

impl fmt::Display for HeadersCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        super::fmt_bracketed(f, &self.expressions, " && ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::Method;

    #[test]
    fn reserved_negotiation_headers_are_dropped() {
        let cond = HeadersCondition::new(["Accept=text/plain", "Content-Type=application/json", "X-Flag"])
            .unwrap();
        assert_eq!(cond.expressions().count(), 1);
        assert_eq!(cond.expressions().next().unwrap().name(), "X-Flag");
    }

    #[test]
    fn negated_equality_matches_absent_header() {
        let cond = HeadersCondition::new(["X-Flag!=off"]).unwrap();
        let on = RequestParts::new(Method::GET, "/x").with_header("X-Flag", "on");
        let absent = RequestParts::new(Method::GET, "/x");
        let off = RequestParts::new(Method::GET, "/x").with_header("X-Flag", "off");
        assert!(cond.matches(&on));
        assert!(cond.matches(&absent));
        assert!(!cond.matches(&off));
    }

    #[test]
    fn header_names_are_case_insensitive() {
        let cond = HeadersCondition::new(["x-trace=1"]).unwrap();
        let req = RequestParts::new(Method::GET, "/x").with_header("X-Trace", "1");
        assert!(cond.matches(&req));
    }

    #[test]
    fn combine_accumulates() {
        let group = HeadersCondition::new(["X-Tenant=acme"]).unwrap();
        let endpoint = HeadersCondition::new(["X-Flag"]).unwrap();
        let combined = group.combine(&endpoint);
        assert_eq!(combined.expressions().count(), 2);
    }
}
