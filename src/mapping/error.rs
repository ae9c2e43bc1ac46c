use std::fmt;

use crate::condition::InvalidExpressionError;
use crate::media_type::InvalidMediaTypeError;

/// Failure while building a [`MappingInfo`](super::MappingInfo) from string
/// declarations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MappingError {
    /// A consumes/produces declaration, or an `Accept`/`Content-Type` header
    /// expression value, failed to parse as a media type.
    MediaType(InvalidMediaTypeError),
    /// A params or headers declaration failed to parse as a name-value
    /// expression.
    Expression(InvalidExpressionError),
}

impl fmt::Display for MappingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MediaType(err) => write!(f, "{err}"),
            Self::Expression(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for MappingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::MediaType(err) => Some(err),
            Self::Expression(err) => Some(err),
        }
    }
}

impl From<InvalidMediaTypeError> for MappingError {
    fn from(err: InvalidMediaTypeError) -> Self {
        Self::MediaType(err)
    }
}

impl From<InvalidExpressionError> for MappingError {
    fn from(err: InvalidExpressionError) -> Self {
        Self::Expression(err)
    }
}
