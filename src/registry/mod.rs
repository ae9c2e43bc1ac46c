//! # Registry Module
//!
//! The conflict-checked dispatch table. A [`RegistryBuilder`] accepts
//! `(MappingInfo, target)` installations, rejects ambiguous pairs at
//! installation time, and forwards one [`RouteDescriptor`] per URL pattern
//! to an attached [`RouteTable`]. Sealing the builder yields an immutable
//! [`MappingRegistry`] that resolves requests to their targets.
//!
//! ## Example
//!
//! ```
//! use http::Method;
//! use routemap::mapping::MappingInfo;
//! use routemap::registry::RegistryBuilder;
//! use routemap::request::RequestParts;
//!
//! let mut builder = RegistryBuilder::new();
//! let mapping = MappingInfo::builder()
//!     .paths(["/items/{id}"])
//!     .get()
//!     .build()
//!     .unwrap();
//! builder.install(mapping, "get_item").unwrap();
//!
//! let registry = builder.seal();
//! let request = RequestParts::new(Method::GET, "/items/42");
//! let matched = registry.match_request(&request).unwrap();
//! assert_eq!(*matched.target(), "get_item");
//! assert_eq!(matched.path_var("id"), Some("42"));
//! ```

mod core;
mod error;
mod table;

pub use self::core::{MappingRegistry, Matched, RegistryBuilder};
pub use self::error::{DispatchError, RegistryError};
pub use self::table::{NoopTable, RouteDescriptor, RouteTable};
