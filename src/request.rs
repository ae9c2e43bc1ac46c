//! Request view consumed by condition matching.
//!
//! Dispatch does not depend on any particular HTTP server: the host hands
//! the registry a [`RequestParts`] carrying the method, path, query
//! parameters, and headers it parsed from the wire. Content negotiation
//! inputs (`Content-Type`, `Accept`) are derived lazily from the headers.

use http::Method;
use tracing::debug;

use crate::media_type::{MediaType, ALL};

/// The slice of an HTTP request that request-mapping conditions evaluate.
///
/// Header lookup is case-insensitive per RFC 7230; query-parameter lookup is
/// case-sensitive. Duplicate names keep the first occurrence for lookup,
/// matching typical header semantics.
#[derive(Debug, Clone)]
pub struct RequestParts {
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    headers: Vec<(String, String)>,
}

impl RequestParts {
    /// Create a request view for the given method and path.
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            headers: Vec::new(),
        }
    }

    /// Append a query parameter.
    #[must_use]
    pub fn with_query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    /// Append a header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Look up a header value by name, case-insensitively.
    #[inline]
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Look up a query parameter by exact name.
    #[inline]
    #[must_use]
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Iterate all headers as `(name, value)` pairs.
    pub fn headers(&self) -> impl Iterator<Item = (&str, &str)> {
        self.headers.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Iterate all query parameters as `(name, value)` pairs.
    pub fn query_params(&self) -> impl Iterator<Item = (&str, &str)> {
        self.query.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// The declared request content type, if present and parseable.
    ///
    /// An unparseable `Content-Type` header is treated as undeclared; the
    /// consumes condition then does not constrain the request.
    #[must_use]
    pub fn content_type(&self) -> Option<MediaType> {
        let raw = self.header("content-type")?;
        match MediaType::parse(raw) {
            Ok(mt) => Some(mt),
            Err(err) => {
                debug!(header = raw, %err, "Ignoring unparseable Content-Type header");
                None
            }
        }
    }

    /// The media types the client accepts, parsed from the `Accept` header.
    ///
    /// Defaults to `*/*` when the header is absent, empty, or unparseable.
    #[must_use]
    pub fn accepted_media_types(&self) -> Vec<MediaType> {
        let Some(raw) = self.header("accept") else {
            return vec![ALL.clone()];
        };
        match MediaType::parse_list(raw) {
            Ok(list) if !list.is_empty() => list,
            Ok(_) => vec![ALL.clone()],
            Err(err) => {
                debug!(header = raw, %err, "Ignoring unparseable Accept header");
                vec![ALL.clone()]
            }
        }
    }
}
