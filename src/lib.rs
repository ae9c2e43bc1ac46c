//! # routemap
//!
//! **routemap** is a request-mapping library for HTTP services: composable
//! matching conditions, a two-scope merge algebra, and a conflict-checked
//! dispatch table that resolves each request to exactly one target.
//!
//! ## Overview
//!
//! Endpoints declare *what they handle* along six aspects: URL patterns,
//! HTTP methods, query-parameter expressions, header expressions, consumed
//! content types, and produced content types. Declarations written at group
//! scope (a controller, a mount point) merge with endpoint-scope
//! declarations into one effective [`mapping::MappingInfo`] per endpoint,
//! each aspect with its own merge rule. Installed into a
//! [`registry::RegistryBuilder`], mappings are checked for ambiguity up
//! front; the sealed [`registry::MappingRegistry`] then resolves requests,
//! preferring the most specific match and explaining every rejection.
//!
//! ## Architecture
//!
//! - **[`media_type`]** - media-type parsing, compatibility, and specificity
//! - **[`pattern`]** - URL patterns with `?`, `*`, `**`, and `{var}` bindings
//! - **[`condition`]** - the six per-aspect conditions and their expressions
//! - **[`mapping`]** - the composite mapping, its builder, and scope merging
//! - **[`registry`]** - the conflict-checked, sealable dispatch table
//! - **[`request`]** - the request view the conditions evaluate against
//!
//! ## Example
//!
//! ```
//! use http::Method;
//! use routemap::mapping::MappingInfo;
//! use routemap::registry::RegistryBuilder;
//! use routemap::request::RequestParts;
//!
//! let group = MappingInfo::builder().paths(["/api"]).build()?;
//! let endpoint = MappingInfo::builder()
//!     .paths(["/items/{id}"])
//!     .get()
//!     .produces(["application/json"])
//!     .build()?;
//!
//! let mut builder = RegistryBuilder::new();
//! builder.install(group.combine(&endpoint), "get_item")?;
//! let registry = builder.seal();
//!
//! let request = RequestParts::new(Method::GET, "/api/items/42")
//!     .with_header("Accept", "application/json");
//! let matched = registry.match_request(&request)?;
//! assert_eq!(*matched.target(), "get_item");
//! assert_eq!(matched.path_var("id"), Some("42"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod condition;
pub mod mapping;
pub mod media_type;
pub mod pattern;
pub mod registry;
pub mod request;

pub use condition::Condition;
pub use mapping::{MappingError, MappingInfo, MappingInfoBuilder};
pub use media_type::MediaType;
pub use pattern::{PathPattern, PathVars};
pub use registry::{DispatchError, MappingRegistry, RegistryBuilder, RegistryError};
pub use request::RequestParts;
