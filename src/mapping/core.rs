use std::fmt;
use std::hash::{Hash, Hasher};

use crate::condition::{
    Condition, ConsumesCondition, HeadersCondition, MethodsCondition, ParamsCondition,
    PatternsCondition, ProducesCondition,
};
use crate::request::RequestParts;

use super::MappingInfoBuilder;

/// The composite declaration of what requests an endpoint handles: six
/// per-aspect conditions plus an optional diagnostic name.
///
/// Immutable once built. Equality and hashing cover the six conditions only,
/// never the name, so two mappings that admit the same requests compare
/// equal regardless of labelling.
#[derive(Debug, Clone)]
pub struct MappingInfo {
    name: Option<String>,
    patterns: PatternsCondition,
    methods: MethodsCondition,
    params: ParamsCondition,
    headers: HeadersCondition,
    consumes: ConsumesCondition,
    produces: ProducesCondition,
}

impl MappingInfo {
    #[must_use]
    pub fn builder() -> MappingInfoBuilder {
        MappingInfoBuilder::new()
    }

    pub(crate) fn from_parts(
        name: Option<String>,
        patterns: PatternsCondition,
        methods: MethodsCondition,
        params: ParamsCondition,
        headers: HeadersCondition,
        consumes: ConsumesCondition,
        produces: ProducesCondition,
    ) -> Self {
        Self {
            name,
            patterns,
            methods,
            params,
            headers,
            consumes,
            produces,
        }
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    #[must_use]
    pub fn patterns(&self) -> &PatternsCondition {
        &self.patterns
    }

    #[must_use]
    pub fn methods(&self) -> &MethodsCondition {
        &self.methods
    }

    #[must_use]
    pub fn params(&self) -> &ParamsCondition {
        &self.params
    }

    #[must_use]
    pub fn headers(&self) -> &HeadersCondition {
        &self.headers
    }

    #[must_use]
    pub fn consumes(&self) -> &ConsumesCondition {
        &self.consumes
    }

    #[must_use]
    pub fn produces(&self) -> &ProducesCondition {
        &self.produces
    }

    /// Merge a group-scope declaration (`self`) with an endpoint-scope one
    /// (`other`), aspect by aspect. Names join with `#` when both are set.
    #[must_use]
    pub fn combine(&self, other: &Self) -> Self {
        let name = match (&self.name, &other.name) {
            (Some(a), Some(b)) => Some(format!("{a}#{b}")),
            (Some(a), None) => Some(a.clone()),
            (None, Some(b)) => Some(b.clone()),
            (None, None) => None,
        };
        Self {
            name,
            patterns: self.patterns.combine(&other.patterns),
            methods: self.methods.combine(&other.methods),
            params: self.params.combine(&other.params),
            headers: self.headers.combine(&other.headers),
            consumes: self.consumes.combine(&other.consumes),
            produces: self.produces.combine(&other.produces),
        }
    }

    /// Whether the request satisfies all six conditions.
    #[must_use]
    pub fn matches(&self, request: &RequestParts) -> bool {
        self.patterns.matches(request)
            && self.methods.matches(request)
            && self.params.matches(request)
            && self.headers.matches(request)
            && self.consumes.matches(request)
            && self.produces.matches(request)
    }
}

impl PartialEq for MappingInfo {
    fn eq(&self, other: &Self) -> bool {
        self.patterns == other.patterns
            && self.methods == other.methods
            && self.params == other.params
            && self.headers == other.headers
            && self.consumes == other.consumes
            && self.produces == other.produces
    }
}

impl Eq for MappingInfo {}

impl Hash for MappingInfo {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.patterns.hash(state);
        self.methods.hash(state);
        self.params.hash(state);
        self.headers.hash(state);
        self.consumes.hash(state);
        self.produces.hash(state);
    }
}

impl fmt::Display for MappingInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{{},methods={},params={},headers={},consumes={},produces={}}}",
            self.patterns, self.methods, self.params, self.headers, self.consumes, self.produces,
        )
    }
}
