//! # esbconfig
//!
//! A typed, validating loader and serializer for a legacy ESB
//! integration-platform configuration file format: connectors, endpoints,
//! routers, transaction managers, pooling profiles, security managers and
//! friends.
//!
//! Instead of a generated class per schema element, one static shape table
//! describes every element type (attributes, defaults, child slots and
//! their cardinality) and a single generic engine loads, validates and
//! serializes against it. Parsing accumulates validation errors rather
//! than failing fast, so authoring tools see every problem in one pass;
//! unrecognized attributes and elements are preserved verbatim so
//! schema-extension content survives a round trip.
//!
//! ## Example
//!
//! ```rust
//! use esbconfig::{parse_str, serialize_to_string};
//!
//! let xml = r#"<mule-configuration version="1.0"><model name="main"/></mule-configuration>"#;
//! let (document, report) = parse_str(xml).unwrap();
//! assert!(report.is_valid());
//!
//! let model = document.configuration().unwrap().child("model").unwrap();
//! assert_eq!(model.enum_attr("type").unwrap().name(), "seda"); // schema default
//! assert!(!model.is_set("type"));
//!
//! assert_eq!(serialize_to_string(&document).unwrap(), xml);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod documents;
pub mod enums;
pub mod error;
pub mod loader;
pub mod model;
pub mod namespaces;
pub mod serializer;
pub mod shapes;

// Re-exports for convenience
pub use enums::{lookup_by_name, lookup_by_ordinal, EnumKind, EnumLiteral};
pub use error::{Error, Result, ValidationError, ValidationErrorKind, ValidationReport};
pub use loader::{parse, parse_str, validate};
pub use model::{AttrValue, ConfigElement, ContentNode, DocumentRoot};
pub use serializer::{serialize, serialize_to_string};
pub use shapes::ROOT_TAG;

/// Version of the esbconfig library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
