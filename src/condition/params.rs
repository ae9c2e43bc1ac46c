use std::fmt;

use super::{Condition, InvalidExpressionError, NameValueExpression};
use crate::request::RequestParts;

/// A logical conjunction (`' && '`) condition matching a request's query
/// parameters against a set of name-value expressions.
///
/// Parameter names compare case-sensitively. Expressions are stored in
/// canonical sorted order so that structural equality ignores declaration
/// order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParamsCondition {
    expressions: Vec<NameValueExpression>,
}

impl ParamsCondition {
    /// Parse `name[=value]`-style expressions.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidExpressionError`] for an empty or nameless
    /// expression.
    pub fn new<I, S>(params: I) -> Result<Self, InvalidExpressionError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let expressions = params
            .into_iter()
            .map(|p| NameValueExpression::param(p.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::from_expressions(expressions))
    }

    #[must_use]
    pub fn empty() -> Self {
        Self {
            expressions: Vec::new(),
        }
    }

    pub(crate) fn from_expressions(mut expressions: Vec<NameValueExpression>) -> Self {
        expressions.sort_unstable();
        expressions.dedup();
        Self { expressions }
    }

    pub fn expressions(&self) -> impl Iterator<Item = &NameValueExpression> {
        self.expressions.iter()
    }
}

impl Condition for ParamsCondition {
    /// Conjunctive set union: a request must satisfy every expression
    /// accumulated from both scopes.
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
            .all(|expr| expr.matches_in(request.query_params()))
    }

    fn is_empty(&self) -> bool {
        self.expressions.is_empty()
    }
}

impl fmt::Display for ParamsCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        super::fmt_bracketed(f, &self.expressions, " && ")
    }
}
