use http::Method;

use crate::condition::{
    ConsumesCondition, HeadersCondition, MediaTypeExpression, MethodsCondition,
    NameValueExpression, ParamsCondition, PatternsCondition, ProducesCondition,
};
use crate::media_type::MediaType;

use super::{MappingError, MappingInfo};

/// Accumulates string declarations and assembles them into a
/// [`MappingInfo`].
///
/// `Accept` and `Content-Type` header expressions with a value are routed
/// into the produces and consumes conditions rather than the headers
/// condition; media-type matching always goes through those two aspects.
#[derive(Debug, Default, Clone)]
pub struct MappingInfoBuilder {
    name: Option<String>,
    paths: Vec<String>,
    methods: Vec<Method>,
    params: Vec<String>,
    headers: Vec<String>,
    consumes: Vec<String>,
    produces: Vec<String>,
}

impl MappingInfoBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Diagnostic name for the mapping. Names join with `#` on combine and
    /// never take part in equality.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn paths<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.paths.extend(paths.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn methods<I>(mut self, methods: I) -> Self
    where
        I: IntoIterator<Item = Method>,
    {
        self.methods.extend(methods);
        self
    }

    #[must_use]
    pub fn get(self) -> Self {
        self.methods([Method::GET])
    }

    #[must_use]
    pub fn post(self) -> Self {
        self.methods([Method::POST])
    }

    #[must_use]
    pub fn put(self) -> Self {
        self.methods([Method::PUT])
    }

    #[must_use]
    pub fn delete(self) -> Self {
        self.methods([Method::DELETE])
    }

    #[must_use]
    pub fn patch(self) -> Self {
        self.methods([Method::PATCH])
    }

    /// Query-parameter expressions: `name`, `!name`, `name=value`,
    /// `name!=value`.
    #[must_use]
    pub fn params<I, S>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.params.extend(params.into_iter().map(Into::into));
        self
    }

    /// Header expressions, same syntaxes as [`Self::params`].
    #[must_use]
    pub fn headers<I, S>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.headers.extend(headers.into_iter().map(Into::into));
        self
    }

    /// Request content types the endpoint consumes, each optionally prefixed
    /// with `!`.
    #[must_use]
    pub fn consumes<I, S>(mut self, consumes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.consumes.extend(consumes.into_iter().map(Into::into));
        self
    }

    /// Response types the endpoint produces, each optionally prefixed with
    /// `!`.
    #[must_use]
    pub fn produces<I, S>(mut self, produces: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.produces.extend(produces.into_iter().map(Into::into));
        self
    }

    /// Parse every accumulated declaration into its condition.
    ///
    /// # Errors
    ///
    /// Returns [`MappingError`] on the first malformed expression or media
    /// type.
    pub fn build(self) -> Result<MappingInfo, MappingError> {
        let patterns = PatternsCondition::new(&self.paths);
        let methods = MethodsCondition::new(self.methods);
        let params = ParamsCondition::new(&self.params)?;

        let mut consume_exprs: Vec<MediaTypeExpression> = self
            .consumes
            .iter()
            .map(|c| MediaTypeExpression::parse(c))
            .collect::<Result<_, _>>()?;
        let mut produce_exprs: Vec<MediaTypeExpression> = self
            .produces
            .iter()
            .map(|p| MediaTypeExpression::parse(p))
            .collect::<Result<_, _>>()?;

        let mut header_exprs = Vec::new();
        for header in &self.headers {
            let expr = NameValueExpression::header(header)?;
            if let Some(routed) = media_expressions_for(&expr)? {
                if expr.name().eq_ignore_ascii_case("accept") {
                    produce_exprs.extend(routed);
                } else {
                    consume_exprs.extend(routed);
                }
            } else {
                header_exprs.push(expr);
            }
        }

        Ok(MappingInfo::from_parts(
            self.name,
            patterns,
            methods,
            params,
            HeadersCondition::from_expressions(header_exprs),
            ConsumesCondition::from_expressions(consume_exprs),
            ProducesCondition::from_expressions(produce_exprs),
        ))
    }
}

/// Convert an `Accept=...` or `Content-Type=...` header expression into
/// media-type expressions carrying the header's negation. Other headers, and
/// the reserved names without a value, yield `None`.
fn media_expressions_for(
    expr: &NameValueExpression,
) -> Result<Option<Vec<MediaTypeExpression>>, MappingError> {
    let reserved = expr.name().eq_ignore_ascii_case("accept")
        || expr.name().eq_ignore_ascii_case("content-type");
    if !reserved {
        return Ok(None);
    }
    let Some(value) = expr.value() else {
        return Ok(None);
    };
    let media_types = MediaType::parse_list(value)?;
    Ok(Some(
        media_types
            .into_iter()
            .map(|mt| MediaTypeExpression::new(mt, expr.is_negated()))
            .collect(),
    ))
}
