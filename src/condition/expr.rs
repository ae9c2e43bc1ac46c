use std::fmt;

use super::error::InvalidExpressionError;

/// A parsed `name`, `!name`, `name=value`, or `name!=value` expression.
///
/// Used for both header and query-parameter conditions. The name-comparison
/// policy is fixed per aspect at construction time: header names compare
/// case-insensitively, parameter names case-sensitively. Value comparison is
/// always case-sensitive. Immutable once parsed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NameValueExpression {
    name: String,
    value: Option<String>,
    negated: bool,
    case_sensitive_name: bool,
}

impl NameValueExpression {
    /// Parse a header expression (case-insensitive name lookup).
    pub fn header(expression: &str) -> Result<Self, InvalidExpressionError> {
        Self::parse(expression, false)
    }

    /// Parse a query-parameter expression (case-sensitive name lookup).
    pub fn param(expression: &str) -> Result<Self, InvalidExpressionError> {
        Self::parse(expression, true)
    }

    fn parse(
        expression: &str,
        case_sensitive_name: bool,
    ) -> Result<Self, InvalidExpressionError> {
        if expression.is_empty() {
            return Err(InvalidExpressionError::new(
                expression,
                "expression must not be empty",
            ));
        }

        let (name, value, negated) = if let Some(idx) = expression.find('=') {
            if idx > 0 && expression.as_bytes()[idx - 1] == b'!' {
                (
                    &expression[..idx - 1],
                    Some(expression[idx + 1..].to_string()),
                    true,
                )
            } else {
                (
                    &expression[..idx],
                    Some(expression[idx + 1..].to_string()),
                    false,
                )
            }
        } else if let Some(bare) = expression.strip_prefix('!') {
            (bare, None, true)
        } else {
            (expression, None, false)
        };

        if name.is_empty() {
            return Err(InvalidExpressionError::new(
                expression,
                "expression names nothing",
            ));
        }

        Ok(Self {
            name: name.to_string(),
            value,
            negated,
            case_sensitive_name,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    #[must_use]
    pub fn is_negated(&self) -> bool {
        self.negated
    }

    /// Find the actual value for this expression's name among `(name, value)`
    /// pairs, honouring the configured name case sensitivity.
    pub(crate) fn lookup<'a>(
        &self,
        mut pairs: impl Iterator<Item = (&'a str, &'a str)>,
    ) -> Option<&'a str> {
        if self.case_sensitive_name {
            pairs.find(|(k, _)| *k == self.name).map(|(_, v)| v)
        } else {
            pairs
                .find(|(k, _)| k.eq_ignore_ascii_case(&self.name))
                .map(|(_, v)| v)
        }
    }

    /// Evaluate the expression against the actual value, if any:
    ///
    /// - `name`: true iff a value is present
    /// - `!name`: true iff no value is present
    /// - `name=value`: true iff present and equal
    /// - `name!=value`: true iff absent, or present and not equal
    #[must_use]
    pub fn matches_value(&self, actual: Option<&str>) -> bool {
        match &self.value {
            None => {
                if self.negated {
                    actual.is_none()
                } else {
                    actual.is_some()
                }
            }
            Some(expected) => {
                let equal = actual.is_some_and(|a| a == expected);
                if self.negated {
                    !equal
                } else {
                    equal
                }
            }
        }
    }

    /// Evaluate against a set of `(name, value)` pairs in one step.
    pub(crate) fn matches_in<'a>(
        &self,
        pairs: impl Iterator<Item = (&'a str, &'a str)>,
    ) -> bool {
        self.matches_value(self.lookup(pairs))
    }
}

impl fmt::Display for NameValueExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.value, self.negated) {
            (None, true) => write!(f, "!{}", self.name),
            (None, false) => f.write_str(&self.name),
            (Some(v), true) => write!(f, "{}!={v}", self.name),
            (Some(v), false) => write!(f, "{}={v}", self.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_the_four_syntaxes() {
        let bare = NameValueExpression::param("debug").unwrap();
        assert_eq!(bare.name(), "debug");
        assert_eq!(bare.value(), None);
        assert!(!bare.is_negated());

        let absent = NameValueExpression::param("!debug").unwrap();
        assert!(absent.is_negated());
        assert_eq!(absent.value(), None);

        let equals = NameValueExpression::param("mode=fast").unwrap();
        assert_eq!(equals.value(), Some("fast"));
        assert!(!equals.is_negated());

        let not_equals = NameValueExpression::param("mode!=slow").unwrap();
        assert_eq!(not_equals.value(), Some("slow"));
        assert!(not_equals.is_negated());
    }

    #[test]
    fn rejects_empty_and_nameless_expressions() {
        assert!(NameValueExpression::param("").is_err());
        assert!(NameValueExpression::param("!").is_err());
        assert!(NameValueExpression::param("=value").is_err());
        assert!(NameValueExpression::param("!=value").is_err());
    }

    #[test]
    fn presence_and_absence() {
        let present = NameValueExpression::param("debug").unwrap();
        assert!(present.matches_value(Some("anything")));
        assert!(!present.matches_value(None));

        let absent = NameValueExpression::param("!debug").unwrap();
        assert!(absent.matches_value(None));
        assert!(!absent.matches_value(Some("x")));
    }

    #[test]
    fn equality_and_negated_equality() {
        let eq = NameValueExpression::param("mode=fast").unwrap();
        assert!(eq.matches_value(Some("fast")));
        assert!(!eq.matches_value(Some("slow")));
        assert!(!eq.matches_value(None));

        let ne = NameValueExpression::param("mode!=slow").unwrap();
        assert!(ne.matches_value(Some("fast")));
        assert!(ne.matches_value(None));
        assert!(!ne.matches_value(Some("slow")));
    }

    #[test]
    fn header_names_compare_case_insensitively() {
        let expr = NameValueExpression::header("X-Flag=on").unwrap();
        let pairs = [("x-flag", "on")];
        assert!(expr.matches_in(pairs.iter().copied()));

        let param = NameValueExpression::param("X-Flag=on").unwrap();
        assert!(!param.matches_in(pairs.iter().copied()));
    }

    #[test]
    fn renders_canonically() {
        assert_eq!(
            NameValueExpression::param("mode!=slow").unwrap().to_string(),
            "mode!=slow"
        );
        assert_eq!(
            NameValueExpression::param("!debug").unwrap().to_string(),
            "!debug"
        );
    }
}
