//! The shape registry: canonical type tags and their aliases.
//!
//! Both tables are constants; nothing registers shape types at runtime.

use std::fmt;

use crate::spec::ShapeSpec;

/// Canonical shape type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeType {
    /// Named members.
    Structure,
    /// Ordered elements of one member shape.
    List,
    /// Key/value pairs.
    Map,
    /// Text.
    String,
    /// Base-10 integer.
    Integer,
    /// Floating-point number.
    Float,
    /// Boolean.
    Boolean,
    /// Timestamp.
    Timestamp,
    /// Base64-encoded bytes.
    Binary,
    /// Base64-encoded bytes; identical to [`ShapeType::Binary`].
    Base64,
}

impl ShapeType {
    /// The canonical type tag.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Structure => "structure",
            Self::List => "list",
            Self::Map => "map",
            Self::String => "string",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Boolean => "boolean",
            Self::Timestamp => "timestamp",
            Self::Binary => "binary",
            Self::Base64 => "base64",
        }
    }

    /// Whether shapes of this type own child shapes.
    #[must_use]
    pub fn is_composite(self) -> bool {
        matches!(self, Self::Structure | Self::List | Self::Map)
    }
}

impl fmt::Display for ShapeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical type tag to shape variant.
pub const SHAPE_TYPES: &[(&str, ShapeType)] = &[
    ("structure", ShapeType::Structure),
    ("list", ShapeType::List),
    ("map", ShapeType::Map),
    ("boolean", ShapeType::Boolean),
    ("timestamp", ShapeType::Timestamp),
    ("float", ShapeType::Float),
    ("integer", ShapeType::Integer),
    ("string", ShapeType::String),
    ("base64", ShapeType::Base64),
    ("binary", ShapeType::Binary),
];

/// Type alias to canonical type tag.
pub const NORMALIZED_TYPES: &[(&str, &str)] = &[
    ("character", "string"),
    ("double", "float"),
    ("long", "integer"),
    ("short", "integer"),
    ("biginteger", "integer"),
    ("bigdecimal", "float"),
    ("blob", "binary"),
];

/// Map an alias to its canonical tag. Non-aliases are returned unchanged.
#[must_use]
pub fn normalize(tag: &str) -> &str {
    NORMALIZED_TYPES
        .iter()
        .find_map(|(alias, canonical)| (*alias == tag).then_some(*canonical))
        .unwrap_or(tag)
}

/// Look up a canonical tag in the registry.
#[must_use]
pub fn lookup(tag: &str) -> Option<ShapeType> {
    SHAPE_TYPES
        .iter()
        .find_map(|(name, shape_type)| (*name == tag).then_some(*shape_type))
}

/// The type tag of a spec, inferred from its children when absent.
#[must_use]
pub fn infer_type(spec: &ShapeSpec) -> &str {
    if let Some(tag) = &spec.type_tag {
        tag
    } else if spec.members.is_some() {
        "structure"
    } else if spec.member.is_some() {
        "list"
    } else if spec.key.is_some() {
        "map"
    } else {
        "string"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_normalize_aliases() {
        assert_eq!(normalize("double"), "float");
        assert_eq!(normalize("bigdecimal"), "float");
        assert_eq!(normalize("long"), "integer");
        assert_eq!(normalize("short"), "integer");
        assert_eq!(normalize("biginteger"), "integer");
        assert_eq!(normalize("character"), "string");
        assert_eq!(normalize("blob"), "binary");
        assert_eq!(normalize("structure"), "structure");
        assert_eq!(normalize("union"), "union");
    }

    #[test]
    fn test_should_look_up_every_canonical_tag() {
        for (tag, shape_type) in SHAPE_TYPES {
            assert_eq!(lookup(tag), Some(*shape_type));
            assert_eq!(shape_type.as_str(), *tag);
        }
        assert_eq!(lookup("long"), None);
        assert_eq!(lookup("document"), None);
    }

    #[test]
    fn test_should_infer_type_from_children() {
        let mut spec = ShapeSpec::default();
        assert_eq!(infer_type(&spec), "string");

        spec.key = Some(Box::new(ShapeSpec::of_type("string")));
        assert_eq!(infer_type(&spec), "map");

        spec.member = Some(Box::new(ShapeSpec::of_type("string")));
        assert_eq!(infer_type(&spec), "list");

        spec.members = Some(vec![]);
        assert_eq!(infer_type(&spec), "structure");

        spec.type_tag = Some("long".to_owned());
        assert_eq!(infer_type(&spec), "long");
    }
}
