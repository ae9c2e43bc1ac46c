//! # Path Pattern Module
//!
//! URL template patterns used by the patterns condition. Patterns are
//! compiled to regexes once at registration time and matched against request
//! paths at dispatch time.
//!
//! ## Syntax
//!
//! - literal segments match exactly (`/items`)
//! - `?` matches a single character within a segment
//! - `*` matches any run of characters within a single segment
//! - `**` as a whole segment matches any number of segments, including none
//! - `{name}` matches one segment and binds it as a path variable
//!
//! ## Overview
//!
//! Two-phase, like the router this crate grew out of:
//!
//! 1. **Compilation**: patterns are normalised (leading `/` prepended) and
//!    converted into regexes that match and extract path variables.
//! 2. **Matching**: request paths are tested against the compiled regex;
//!    variable bindings are captured for the argument-binding collaborator.
//!
//! Patterns also know how to [`combine`](PathPattern::combine) like URL
//! segments (group prefix joined with an endpoint suffix) and expose a
//! specificity ordering used for dispatch tie-breaks: exact segments outrank
//! wildcard segments, which outrank multi-segment wildcards.

mod core;

pub use self::core::{PathPattern, PathVars, MAX_INLINE_VARS};
