//! # Media Type Module
//!
//! Parses and compares media-type specifications (`type/subtype;attr=value`)
//! as they appear in `consumes`/`produces` declarations and in the
//! `Content-Type` and `Accept` request headers.
//!
//! ## Overview
//!
//! The module provides:
//! - Parsing of single media types and comma-separated lists, honouring
//!   quoted parameter values
//! - Wildcard-aware compatibility checks (`*/*`, `text/*`)
//! - A specificity ordering used to sort candidate lists so that the most
//!   specific media type is considered first during negotiation
//! - Quality (`q`) parameter handling with range validation
//!
//! Media types are immutable value objects: they are parsed once at
//! registration time and never mutated afterwards.
//!
//! ## Example
//!
//! ```rust
//! use routemap::media_type::MediaType;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let json = MediaType::parse("application/json")?;
//! let any_app = MediaType::parse("application/*")?;
//! assert!(json.is_compatible_with(&any_app));
//! # Ok(())
//! # }
//! ```

mod core;
mod error;

pub use self::core::{specificity_cmp, MediaType, ALL, WILDCARD};
pub use self::error::InvalidMediaTypeError;
