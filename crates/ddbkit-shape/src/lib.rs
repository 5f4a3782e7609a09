//! Schema-driven shape engine.
//!
//! Parses an API definition document into [`ShapeSpec`]s and materializes
//! them on demand into a tree of typed [`Shape`]s. Every shape converts values
//! between their wire form and their native form:
//!
//! ```
//! use ddbkit_shape::{ApiContext, Protocol, ShapeOptions, ShapeSpec, Value};
//!
//! let ctx = ApiContext::from_shapes(
//!     Protocol::Json,
//!     [("Limit".to_owned(), ShapeSpec::of_type("long"))],
//!     ShapeOptions::default(),
//! );
//! let limit = ctx.shape("Limit").unwrap();
//! assert_eq!(limit.to_type(&Value::from("25")).unwrap(), Value::Integer(25));
//! ```
//!
//! Child shapes (structure members, list elements, map keys and values) are
//! built the first time they are read and cached, so recursive definitions
//! such as DynamoDB's `AttributeValue` are cheap to load.

pub mod context;
pub mod definition;
pub mod error;
pub mod factory;
pub mod lazy;
pub mod registry;
pub mod shape;
pub mod spec;
pub mod value;

pub use context::{ApiContext, Operation, ShapeOptions};
pub use definition::{ApiDefinition, ApiMetadata, HttpBinding, OperationSpec, Protocol};
pub use error::{ShapeError, ShapeResult};
pub use factory::ShapeSource;
pub use lazy::LazyShape;
pub use registry::ShapeType;
pub use shape::{
    ListShape, MapShape, Shape, ShapeAttributes, ShapeKind, StructureShape, TimestampShape,
};
pub use spec::{Location, ShapeSpec, TimestampFormat, XmlNamespace};
pub use value::Value;
