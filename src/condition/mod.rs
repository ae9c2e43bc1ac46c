//! # Condition Module
//!
//! The six per-aspect request conditions and the expression types they are
//! built from. Each condition is an immutable predicate value object for one
//! matching aspect:
//!
//! - [`PatternsCondition`] — URL path patterns (disjunctive, `" || "`)
//! - [`MethodsCondition`] — HTTP methods (disjunctive)
//! - [`ParamsCondition`] — query-parameter expressions (conjunctive, `" && "`)
//! - [`HeadersCondition`] — header expressions (conjunctive)
//! - [`ConsumesCondition`] — request content-type expressions (disjunctive)
//! - [`ProducesCondition`] — acceptable response-type expressions (disjunctive)
//!
//! All six share one contract, the [`Condition`] trait: they merge via
//! `combine` (group-scope declaration on the left, endpoint-scope on the
//! right), evaluate requests via `matches`, and their contents drive
//! structural equality, hashing, and a canonical bracketed string form.
//!
//! The merge rule differs per aspect: patterns join Cartesian-style like URL
//! segments, methods/params/headers take the set union, and
//! consumes/produces are last-declared-wins (a non-empty endpoint-scope
//! declaration replaces the group-scope one outright).

mod consumes;
mod error;
mod expr;
mod headers;
mod media_expr;
mod methods;
mod params;
mod patterns;
mod produces;

use std::cmp::Ordering;
use std::fmt;

use crate::media_type::{specificity_cmp, ALL};
use crate::request::RequestParts;

pub use self::consumes::ConsumesCondition;
pub use self::error::InvalidExpressionError;
pub use self::expr::NameValueExpression;
pub use self::headers::HeadersCondition;
pub use self::media_expr::MediaTypeExpression;
pub use self::methods::MethodsCondition;
pub use self::params::ParamsCondition;
pub use self::patterns::PatternsCondition;
pub use self::produces::ProducesCondition;

/// The common contract of the per-aspect request conditions.
pub trait Condition: Sized {
    /// Merge this condition (group-scope declaration) with another
    /// (endpoint-scope declaration) into one effective condition.
    #[must_use]
    fn combine(&self, other: &Self) -> Self;

    /// Evaluate the condition against a request.
    fn matches(&self, request: &RequestParts) -> bool;

    /// Whether the condition holds no expressions and so matches every
    /// request.
    fn is_empty(&self) -> bool;
}

/// Canonical bracketed rendering shared by all conditions: contents joined
/// with the aspect's infix (`" && "` conjunctive, `" || "` disjunctive).
fn fmt_bracketed<T: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    items: &[T],
    infix: &str,
) -> fmt::Result {
    f.write_str("[")?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(infix)?;
        }
        write!(f, "{item}")?;
    }
    f.write_str("]")
}

/// Compare two media-expression lists by their most specific entry, with an
/// absent list standing in for `*/*`. Used for dispatch tie-breaks between
/// consumes/produces conditions.
fn leading_media_cmp(
    a: Option<&MediaTypeExpression>,
    b: Option<&MediaTypeExpression>,
) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => specificity_cmp(x.media_type(), y.media_type()),
        (Some(x), None) => specificity_cmp(x.media_type(), &ALL),
        (None, Some(y)) => specificity_cmp(&ALL, y.media_type()),
        (None, None) => Ordering::Equal,
    }
}
