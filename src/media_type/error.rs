use std::fmt;

/// Media type parse error
///
/// Returned by [`MediaType::parse`](super::MediaType::parse) and
/// [`MediaType::parse_list`](super::MediaType::parse_list) when a
/// specification string does not match `type "/" subtype (";" attr "=" value)*`.
/// Carries the offending input so registration failures can be reported
/// verbatim at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidMediaTypeError {
    value: String,
    reason: &'static str,
}

impl InvalidMediaTypeError {
    pub(crate) fn new(value: &str, reason: &'static str) -> Self {
        Self {
            value: value.to_string(),
            reason,
        }
    }

    /// The specification string that failed to parse.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Why the string was rejected.
    #[must_use]
    pub fn reason(&self) -> &'static str {
        self.reason
    }
}

impl fmt::Display for InvalidMediaTypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid media type '{}': {}", self.value, self.reason)
    }
}

impl std::error::Error for InvalidMediaTypeError {}
