use std::cmp::Ordering;
use std::fmt;

use crate::media_type::{specificity_cmp, InvalidMediaTypeError, MediaType};

/// A media-type expression, optionally negated: `text/plain` or `!text/plain`.
///
/// Equality and ordering are structural; ordering delegates to the media
/// type's specificity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MediaTypeExpression {
    media_type: MediaType,
    negated: bool,
}

impl MediaTypeExpression {
    /// Parse an expression, stripping a leading `!` before media-type parsing.
    pub fn parse(expression: &str) -> Result<Self, InvalidMediaTypeError> {
        let (negated, spec) = match expression.strip_prefix('!') {
            Some(rest) => (true, rest),
            None => (false, expression),
        };
        Ok(Self {
            media_type: MediaType::parse(spec)?,
            negated,
        })
    }

    pub(crate) fn new(media_type: MediaType, negated: bool) -> Self {
        Self { media_type, negated }
    }

    #[must_use]
    pub fn media_type(&self) -> &MediaType {
        &self.media_type
    }

    #[must_use]
    pub fn is_negated(&self) -> bool {
        self.negated
    }

    /// Specificity ordering of the underlying media types.
    #[must_use]
    pub fn specificity_cmp(&self, other: &Self) -> Ordering {
        specificity_cmp(&self.media_type, &other.media_type)
    }
}

impl fmt::Display for MediaTypeExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negated {
            f.write_str("!")?;
        }
        write!(f, "{}", self.media_type)
    }
}
