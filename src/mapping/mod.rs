//! # Mapping Module
//!
//! Composite request mappings. A [`MappingInfo`] bundles the six per-aspect
//! conditions (patterns, methods, params, headers, consumes, produces) into
//! one immutable value: the full declaration of what requests an endpoint
//! handles. Composites merge across scopes with [`MappingInfo::combine`]
//! (group on the left, endpoint on the right) and are built from string
//! declarations with [`MappingInfoBuilder`].
//!
//! ## Example
//!
//! ```
//! use routemap::mapping::MappingInfo;
//!
//! let group = MappingInfo::builder().paths(["/api"]).build()?;
//! let endpoint = MappingInfo::builder()
//!     .paths(["/items/{id}"])
//!     .get()
//!     .produces(["application/json"])
//!     .build()?;
//! let effective = group.combine(&endpoint);
//! assert_eq!(
//!     effective.patterns().patterns().next().unwrap().to_string(),
//!     "/api/items/{id}",
//! );
//! # Ok::<(), routemap::mapping::MappingError>(())
//! ```

mod builder;
mod core;
mod error;

pub use self::builder::MappingInfoBuilder;
pub use self::core::MappingInfo;
pub use self::error::MappingError;
