//! Materialized shapes.
//!
//! A [`Shape`] is one node of the typed tree built from an API definition:
//! resolved [`ShapeAttributes`], a variant-specific [`ShapeKind`], and the two
//! conversions [`Shape::to_type`] (wire to native) and [`Shape::to_wire_format`]
//! (native to wire).

mod attributes;
mod list;
mod map;
mod scalar;
mod structure;
mod timestamp;

use crate::context::ApiContext;
use crate::definition::Protocol;
use crate::error::ShapeResult;
use crate::registry::ShapeType;
use crate::spec::{Location, ShapeSpec, TimestampFormat};
use crate::value::Value;

pub use attributes::ShapeAttributes;
pub use list::ListShape;
pub use map::MapShape;
pub use structure::StructureShape;
pub use timestamp::{TimestampShape, format_timestamp, parse_timestamp};

/// Variant-specific state of a shape.
#[derive(Debug)]
pub enum ShapeKind {
    /// Named members.
    Structure(StructureShape),
    /// Ordered elements.
    List(ListShape),
    /// Key/value pairs.
    Map(MapShape),
    /// Text.
    String,
    /// Integer.
    Integer,
    /// Floating-point number.
    Float,
    /// Boolean.
    Boolean,
    /// Timestamp with its resolved wire format.
    Timestamp(TimestampShape),
    /// Base64-encoded bytes.
    Binary,
    /// Base64-encoded bytes.
    Base64,
}

/// A materialized shape.
#[derive(Debug)]
pub struct Shape {
    attributes: ShapeAttributes,
    kind: ShapeKind,
    protocol: Protocol,
}

impl Shape {
    /// Build a shape of `shape_type` from `spec`, inheriting from `base` when
    /// `spec` extends a shared shape.
    pub(crate) fn build(
        spec: &ShapeSpec,
        base: Option<&Shape>,
        shape_type: ShapeType,
        member_name: Option<&str>,
        context: &ApiContext,
    ) -> ShapeResult<Self> {
        let attributes = ShapeAttributes::resolve(
            spec,
            base.map(Shape::attributes),
            member_name,
            context.options(),
        );
        let protocol = context.protocol();

        let kind = match shape_type {
            ShapeType::Structure => ShapeKind::Structure(StructureShape::build(
                spec,
                base.and_then(Shape::as_structure),
                &attributes,
                context,
            )),
            ShapeType::List => {
                ShapeKind::List(ListShape::build(spec, base.and_then(Shape::as_list), context))
            }
            ShapeType::Map => {
                ShapeKind::Map(MapShape::build(spec, base.and_then(Shape::as_map), context)?)
            }
            ShapeType::Timestamp => ShapeKind::Timestamp(TimestampShape::resolve(
                spec,
                base.and_then(Shape::timestamp_format),
                &attributes,
                protocol,
            )),
            ShapeType::String => ShapeKind::String,
            ShapeType::Integer => ShapeKind::Integer,
            ShapeType::Float => ShapeKind::Float,
            ShapeType::Boolean => ShapeKind::Boolean,
            ShapeType::Binary => ShapeKind::Binary,
            ShapeType::Base64 => ShapeKind::Base64,
        };

        Ok(Self {
            attributes,
            kind,
            protocol,
        })
    }

    /// Canonical type.
    #[must_use]
    pub fn shape_type(&self) -> ShapeType {
        match &self.kind {
            ShapeKind::Structure(_) => ShapeType::Structure,
            ShapeKind::List(_) => ShapeType::List,
            ShapeKind::Map(_) => ShapeType::Map,
            ShapeKind::String => ShapeType::String,
            ShapeKind::Integer => ShapeType::Integer,
            ShapeKind::Float => ShapeType::Float,
            ShapeKind::Boolean => ShapeType::Boolean,
            ShapeKind::Timestamp(_) => ShapeType::Timestamp,
            ShapeKind::Binary => ShapeType::Binary,
            ShapeKind::Base64 => ShapeType::Base64,
        }
    }

    /// Variant-specific state.
    #[must_use]
    pub fn kind(&self) -> &ShapeKind {
        &self.kind
    }

    /// Resolved attributes.
    #[must_use]
    pub fn attributes(&self) -> &ShapeAttributes {
        &self.attributes
    }

    /// Display name. A flattened list is named after its element when the
    /// element has a name.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match &self.kind {
            ShapeKind::List(list) if self.attributes.flattened => {
                list.flattened_name(self.attributes.name.as_deref())
            }
            _ => self.attributes.name.as_deref(),
        }
    }

    /// Binding location.
    #[must_use]
    pub fn location(&self) -> Location {
        self.attributes.location
    }

    /// Protocol of the owning API.
    #[must_use]
    pub fn protocol(&self) -> Protocol {
        self.protocol
    }

    /// Whether this shape owns child shapes.
    #[must_use]
    pub fn is_composite(&self) -> bool {
        self.shape_type().is_composite()
    }

    /// Resolved wire format of a timestamp shape.
    #[must_use]
    pub fn timestamp_format(&self) -> Option<TimestampFormat> {
        match &self.kind {
            ShapeKind::Timestamp(timestamp) => Some(timestamp.format()),
            _ => None,
        }
    }

    /// Structure state, if this is a structure.
    #[must_use]
    pub fn as_structure(&self) -> Option<&StructureShape> {
        match &self.kind {
            ShapeKind::Structure(structure) => Some(structure),
            _ => None,
        }
    }

    /// List state, if this is a list.
    #[must_use]
    pub fn as_list(&self) -> Option<&ListShape> {
        match &self.kind {
            ShapeKind::List(list) => Some(list),
            _ => None,
        }
    }

    /// Map state, if this is a map.
    #[must_use]
    pub fn as_map(&self) -> Option<&MapShape> {
        match &self.kind {
            ShapeKind::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Whether a structure member is required. Always `false` for other shapes.
    #[must_use]
    pub fn is_required(&self, member: &str) -> bool {
        self.as_structure()
            .is_some_and(|structure| structure.is_required(member))
    }

    /// Empty value a translator starts from: an empty map for structures and
    /// maps, an empty list for lists, null otherwise.
    #[must_use]
    pub fn default_value(&self) -> Value {
        match &self.kind {
            ShapeKind::Structure(_) | ShapeKind::Map(_) => Value::Map(Vec::new()),
            ShapeKind::List(_) => Value::List(Vec::new()),
            _ => Value::Null,
        }
    }

    /// Convert a wire value to its native form.
    ///
    /// # Errors
    ///
    /// Returns a conversion error when the value cannot be read as this shape's type.
    pub fn to_type(&self, value: &Value) -> ShapeResult<Value> {
        match &self.kind {
            ShapeKind::String => {
                scalar::string_to_type(value, self.protocol, self.attributes.is_json_value)
            }
            ShapeKind::Integer => scalar::to_integer(value),
            ShapeKind::Float => scalar::to_float(value),
            ShapeKind::Boolean => Ok(scalar::boolean_to_type(value)),
            ShapeKind::Timestamp(timestamp) => timestamp.to_type(value),
            ShapeKind::Binary | ShapeKind::Base64 => scalar::binary_to_type(value),
            ShapeKind::Structure(_) | ShapeKind::List(_) | ShapeKind::Map(_) => Ok(value.clone()),
        }
    }

    /// Convert a native value to its wire form.
    ///
    /// # Errors
    ///
    /// Returns a conversion error when the value cannot be written as this shape's type.
    pub fn to_wire_format(&self, value: &Value) -> ShapeResult<Value> {
        match &self.kind {
            ShapeKind::String => scalar::string_to_wire(value, self.attributes.is_json_value),
            ShapeKind::Integer => scalar::to_integer(value),
            ShapeKind::Float => scalar::to_float(value),
            ShapeKind::Timestamp(timestamp) => timestamp.to_wire_format(value),
            ShapeKind::Binary | ShapeKind::Base64 => scalar::binary_to_wire(value),
            ShapeKind::Boolean
            | ShapeKind::Structure(_)
            | ShapeKind::List(_)
            | ShapeKind::Map(_) => Ok(scalar::default_to_wire(value)),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use super::*;
    use crate::context::ShapeOptions;
    use crate::error::ShapeError;

    fn context(protocol: Protocol, shapes: serde_json::Value) -> Arc<ApiContext> {
        let shapes: Vec<(String, ShapeSpec)> = shapes
            .as_object()
            .unwrap()
            .iter()
            .map(|(name, value)| (name.clone(), ShapeSpec::from_json(value.clone()).unwrap()))
            .collect();
        ApiContext::from_shapes(protocol, shapes, ShapeOptions::default())
    }

    fn create(ctx: &ApiContext, spec: serde_json::Value) -> Arc<Shape> {
        ctx.create(&ShapeSpec::from_json(spec).unwrap(), None).unwrap()
    }

    #[test]
    #[allow(clippy::approx_constant)]
    fn test_should_round_trip_scalars() {
        let ctx = context(Protocol::Json, json!({}));
        let cases = [
            ("integer", Value::Integer(42)),
            ("float", Value::Float(3.14)),
            ("boolean", Value::Bool(true)),
            ("blob", Value::from(vec![0u8, 1, 2, 255])),
            ("base64", Value::from(vec![0u8, 1, 2, 255])),
        ];
        for (tag, native) in cases {
            let shape = ctx.create(&ShapeSpec::of_type(tag), None).unwrap();
            let wire = shape.to_wire_format(&native).unwrap();
            assert_eq!(shape.to_type(&wire).unwrap(), native, "tag {tag}");
        }
    }

    #[test]
    fn test_should_convert_base64_like_binary() {
        let ctx = context(Protocol::Json, json!({}));
        let base64 = create(&ctx, json!({"type": "base64"}));
        let binary = create(&ctx, json!({"type": "binary"}));
        assert_eq!(base64.shape_type(), ShapeType::Base64);

        for native in [Value::from(b"dynamo".to_vec()), Value::Null] {
            assert_eq!(
                base64.to_wire_format(&native).unwrap(),
                binary.to_wire_format(&native).unwrap()
            );
        }
        assert_eq!(
            base64.to_type(&Value::from("ZHluYW1v")).unwrap(),
            Value::from(b"dynamo".to_vec())
        );
        assert!(matches!(
            base64.to_type(&Value::from("not base64!")),
            Err(ShapeError::Base64(_))
        ));
    }

    #[test]
    fn test_should_encode_binary_as_base64_text() {
        let ctx = context(Protocol::Json, json!({}));
        let shape = create(&ctx, json!({"type": "binary"}));
        assert_eq!(
            shape.to_wire_format(&Value::from(vec![0u8, 1, 2, 255])).unwrap(),
            Value::from("AAEC/w==")
        );
        assert!(matches!(
            shape.to_type(&Value::from("not base64!")),
            Err(ShapeError::Base64(_))
        ));
    }

    #[test]
    fn test_should_report_default_values() {
        let ctx = context(Protocol::Json, json!({}));
        assert_eq!(create(&ctx, json!({"members": {}})).default_value(), Value::Map(vec![]));
        assert_eq!(
            create(&ctx, json!({"member": {"type": "string"}})).default_value(),
            Value::List(vec![])
        );
        assert_eq!(
            create(&ctx, json!({"key": {"type": "string"}})).default_value(),
            Value::Map(vec![])
        );
        assert_eq!(create(&ctx, json!({"type": "string"})).default_value(), Value::Null);
    }

    #[test]
    fn test_should_write_null_composite_as_empty_string() {
        let ctx = context(Protocol::Json, json!({}));
        let shape = create(&ctx, json!({"members": {}}));
        assert_eq!(shape.to_wire_format(&Value::Null).unwrap(), Value::from(""));
        assert!(shape.is_composite());
        assert!(!create(&ctx, json!({"type": "long"})).is_composite());
    }

    #[test]
    fn test_should_answer_required_only_for_structures() {
        let ctx = context(Protocol::Json, json!({}));
        let structure = create(
            &ctx,
            json!({"required": ["Id", "Name"], "members": {"Id": {}, "Name": {}, "Other": {}}}),
        );
        assert!(structure.is_required("Id"));
        assert!(structure.is_required("Name"));
        assert!(!structure.is_required("Other"));

        let string = create(&ctx, json!({"type": "string"}));
        assert!(!string.is_required("Id"));
    }

    #[test]
    fn test_should_expose_timestamp_format_only_on_timestamps() {
        let ctx = context(Protocol::Json, json!({}));
        assert_eq!(
            create(&ctx, json!({"type": "timestamp"})).timestamp_format(),
            Some(TimestampFormat::UnixTimestamp)
        );
        assert_eq!(create(&ctx, json!({"type": "string"})).timestamp_format(), None);
    }
}
