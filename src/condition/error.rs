use std::fmt;

/// Name-value expression parse error
///
/// Returned when a `["!"] name (("=" | "!=") value)?` expression string is
/// malformed, most notably when it is empty or names nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidExpressionError {
    expression: String,
    reason: &'static str,
}

impl InvalidExpressionError {
    pub(crate) fn new(expression: &str, reason: &'static str) -> Self {
        Self {
            expression: expression.to_string(),
            reason,
        }
    }

    /// The expression string that failed to parse.
    #[must_use]
    pub fn expression(&self) -> &str {
        &self.expression
    }
}

impl fmt::Display for InvalidExpressionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid expression '{}': {}", self.expression, self.reason)
    }
}

impl std::error::Error for InvalidExpressionError {}
