use std::fmt;

use http::Method;

use crate::media_type::MediaType;

/// Installation failure reported by
/// [`RegistryBuilder::install`](super::RegistryBuilder::install).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// Two different targets were installed under structurally equal
    /// mappings. The registry cannot decide between them, so installation is
    /// fatal rather than silently last-wins.
    AmbiguousMapping {
        /// Canonical rendering of the conflicting mapping.
        mapping: String,
    },
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AmbiguousMapping { mapping } => {
                write!(f, "ambiguous mapping: {mapping} is already installed for a different target")
            }
        }
    }
}

impl std::error::Error for RegistryError {}

/// Why a request failed to resolve to a target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    /// No installed mapping matched the request's path, method, params, or
    /// headers.
    NoRouteMatched { method: Method, path: String },
    /// Some mapping matched everything but the request's `Content-Type`.
    /// Carries the media types those near-miss mappings consume.
    UnsupportedMediaType { supported: Vec<MediaType> },
    /// Some mapping matched everything but the request's `Accept` header.
    /// Carries the media types those near-miss mappings produce.
    NotAcceptable { producible: Vec<MediaType> },
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoRouteMatched { method, path } => {
                write!(f, "no route matched {method} {path}")
            }
            Self::UnsupportedMediaType { supported } => {
                write!(f, "unsupported media type, expected one of [{}]", join(supported))
            }
            Self::NotAcceptable { producible } => {
                write!(f, "not acceptable, can produce [{}]", join(producible))
            }
        }
    }
}

impl std::error::Error for DispatchError {}

fn join(media_types: &[MediaType]) -> String {
    media_types
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
