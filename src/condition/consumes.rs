use std::cmp::Ordering;
use std::fmt;

use super::{Condition, MediaTypeExpression};
use crate::media_type::{InvalidMediaTypeError, MediaType};
use crate::request::RequestParts;

/// A disjunctive (`' || '`) condition matching a request's `Content-Type`
/// against a set of media-type expressions, negations included.
///
/// Combining is last-declared-wins: a non-empty endpoint-scope declaration
/// replaces the group-scope one outright.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConsumesCondition {
    expressions: Vec<MediaTypeExpression>,
}

impl ConsumesCondition {
    /// Parse media-type expressions, each optionally prefixed with `!`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidMediaTypeError`] if any expression fails to parse as
    /// a media type.
    pub fn new<I, S>(consumes: I) -> Result<Self, InvalidMediaTypeError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let expressions = consumes
            .into_iter()
            .map(|c| MediaTypeExpression::parse(c.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::from_expressions(expressions))
    }

    #[must_use]
    pub fn empty() -> Self {
        Self {
            expressions: Vec::new(),
        }
    }

    pub(crate) fn from_expressions(mut expressions: Vec<MediaTypeExpression>) -> Self {
        expressions.sort_unstable_by(|a, b| {
            a.specificity_cmp(b).then_with(|| a.to_string().cmp(&b.to_string()))
        });
        expressions.dedup();
        Self { expressions }
    }

    pub fn expressions(&self) -> impl Iterator<Item = &MediaTypeExpression> {
        self.expressions.iter()
    }

    /// The non-negated media types this condition will accept, for
    /// unsupported-media-type error payloads.
    #[must_use]
    pub fn consumable_media_types(&self) -> Vec<MediaType> {
        self.expressions
            .iter()
            .filter(|expr| !expr.is_negated())
            .map(|expr| expr.media_type().clone())
            .collect()
    }

    /// Compare by most specific expression, an empty condition standing in
    /// for `*/*`.
    pub(crate) fn specificity_cmp(&self, other: &Self) -> Ordering {
        super::leading_media_cmp(self.expressions.first(), other.expressions.first())
    }
}

impl Condition for ConsumesCondition {
    /// Last-declared-wins: the endpoint scope replaces the group scope
    /// whenever it declares anything at all.
    fn combine(&self, other: &Self) -> Self {
        if other.expressions.is_empty() {
            self.clone()
        } else {
            other.clone()
        }
    }

    /// A request with no `Content-Type` passes. Otherwise the declared type
    /// must be compatible with some non-negated expression and with no
    /// negated one.
    fn matches(&self, request: &RequestParts) -> bool {
        if self.expressions.is_empty() {
            return true;
        }
        let Some(content_type) = request.content_type() else {
            return true;
        };
        let excluded = self
            .expressions
            .iter()
            .filter(|e| e.is_negated())
            .any(|e| e.media_type().is_compatible_with(&content_type));
        if excluded {
            return false;
        }
        self.expressions
            .iter()
            .filter(|e| !e.is_negated())
            .any(|e| e.media_type().is_compatible_with(&content_type))
    }

    fn is_empty(&self) -> bool {
        self.expressions.is_empty()
    }
}

impl fmt::Display for ConsumesCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        super::fmt_bracketed(f, &self.expressions, " || ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::Method;

    fn req(content_type: Option<&str>) -> RequestParts {
        let mut r = RequestParts::new(Method::POST, "/items");
        if let Some(ct) = content_type {
            r = r.with_header("Content-Type", ct);
        }
        r
    }

    #[test]
    fn empty_condition_matches_anything() {
        let cond = ConsumesCondition::empty();
        assert!(cond.matches(&req(Some("application/json"))));
        assert!(cond.matches(&req(None)));
    }

    #[test]
    fn missing_content_type_passes() {
        let cond = ConsumesCondition::new(["application/json"]).unwrap();
        assert!(cond.matches(&req(None)));
    }

    #[test]
    fn wildcard_subtype_is_compatible() {
        let cond = ConsumesCondition::new(["application/*"]).unwrap();
        assert!(cond.matches(&req(Some("application/json"))));
        assert!(!cond.matches(&req(Some("text/plain"))));
    }

    #[test]
    fn negated_expression_excludes() {
        let cond = ConsumesCondition::new(["application/*", "!application/xml"]).unwrap();
        assert!(cond.matches(&req(Some("application/json"))));
        assert!(!cond.matches(&req(Some("application/xml"))));
    }

    #[test]
    fn combine_is_last_declared_wins() {
        let group = ConsumesCondition::new(["application/json"]).unwrap();
        let endpoint = ConsumesCondition::new(["text/plain"]).unwrap();
        assert_eq!(group.combine(&endpoint), endpoint);
        assert_eq!(group.combine(&ConsumesCondition::empty()), group);
    }

    #[test]
    fn expressions_sort_most_specific_first() {
        let cond = ConsumesCondition::new(["*/*", "application/json", "application/*"]).unwrap();
        let rendered: Vec<String> = cond.expressions().map(ToString::to_string).collect();
        assert_eq!(rendered, ["application/json", "application/*", "*/*"]);
    }
}
