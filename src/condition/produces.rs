use std::cmp::Ordering;
use std::fmt;

use super::{Condition, MediaTypeExpression};
use crate::media_type::{InvalidMediaTypeError, MediaType};
use crate::request::RequestParts;

/// A disjunctive (`' || '`) condition matching a request's `Accept` header
/// against a set of media-type expressions, negations included.
///
/// Like [`ConsumesCondition`](super::ConsumesCondition), combining is
/// last-declared-wins.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProducesCondition {
    expressions: Vec<MediaTypeExpression>,
}

impl ProducesCondition {
    /// Parse media-type expressions, each optionally prefixed with `!`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidMediaTypeError`] if any expression fails to parse as
    /// a media type.
    pub fn new<I, S>(produces: I) -> Result<Self, InvalidMediaTypeError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let expressions = produces
            .into_iter()
            .map(|p| MediaTypeExpression::parse(p.as_ref()))
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

    /// The non-negated media types this condition can produce, for
    /// not-acceptable error payloads.
    #[must_use]
    pub fn producible_media_types(&self) -> Vec<MediaType> {
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

impl Condition for ProducesCondition {
    /// Last-declared-wins: the endpoint scope replaces the group scope
    /// whenever it declares anything at all.
    fn combine(&self, other: &Self) -> Self {
        if other.expressions.is_empty() {
            self.clone()
        } else {
            other.clone()
        }
    }

    /// An accepted type satisfies a plain expression when compatible, and a
    /// negated expression when incompatible. An absent or unparseable
    /// `Accept` header means `*/*`.
    fn matches(&self, request: &RequestParts) -> bool {
        if self.expressions.is_empty() {
            return true;
        }
        let accepted = request.accepted_media_types();
        accepted.iter().any(|accept| {
            self.expressions
                .iter()
                .any(|e| e.media_type().is_compatible_with(accept) != e.is_negated())
        })
    }

    fn is_empty(&self) -> bool {
        self.expressions.is_empty()
    }
}

impl fmt::Display for ProducesCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        super::fmt_bracketed(f, &self.expressions, " || ")
    }
}
