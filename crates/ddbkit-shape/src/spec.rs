//! Raw shape definitions as they appear in an API definition document.
//!
//! A [`ShapeSpec`] is the declarative, unresolved form of a shape. It may name
//! a shared shape through `shape`, in which case the factory layers its
//! own fields over the referenced shape.

use serde::Deserialize;

use crate::error::{ShapeError, ShapeResult};

/// Where a member is bound in an HTTP request or response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    /// The request or response body.
    #[default]
    Body,
    /// A single HTTP header.
    Header,
    /// A set of HTTP headers sharing a prefix.
    Headers,
    /// A URI path label.
    Uri,
    /// A query string parameter.
    Querystring,
    /// The HTTP status code.
    #[serde(rename = "statusCode")]
    StatusCode,
}

impl Location {
    /// The identifier used in API definitions.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Body => "body",
            Self::Header => "header",
            Self::Headers => "headers",
            Self::Uri => "uri",
            Self::Querystring => "querystring",
            Self::StatusCode => "statusCode",
        }
    }
}

/// Wire format of a timestamp shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum TimestampFormat {
    /// `YYYY-MM-DDTHH:MM:SSZ`.
    #[serde(rename = "iso8601")]
    Iso8601,
    /// `Www, DD Mmm YYYY HH:MM:SS GMT`.
    #[serde(rename = "rfc822")]
    Rfc822,
    /// Seconds since the Unix epoch.
    #[serde(rename = "unixTimestamp")]
    UnixTimestamp,
}

impl TimestampFormat {
    /// The identifier used in API definitions.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Iso8601 => "iso8601",
            Self::Rfc822 => "rfc822",
            Self::UnixTimestamp => "unixTimestamp",
        }
    }
}

/// XML namespace of a structure, either a bare URI or a prefixed URI.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum XmlNamespace {
    /// `"xmlNamespace": "http://..."`.
    Uri(String),
    /// `"xmlNamespace": {"prefix": "...", "uri": "..."}`.
    Qualified {
        /// Namespace prefix.
        prefix: Option<String>,
        /// Namespace URI.
        uri: Option<String>,
    },
}

impl XmlNamespace {
    /// The namespace URI.
    #[must_use]
    pub fn uri(&self) -> Option<&str> {
        match self {
            Self::Uri(uri) => Some(uri),
            Self::Qualified { uri, .. } => uri.as_deref(),
        }
    }

    /// The namespace prefix, if qualified.
    #[must_use]
    pub fn prefix(&self) -> Option<&str> {
        match self {
            Self::Uri(_) => None,
            Self::Qualified { prefix, .. } => prefix.as_deref(),
        }
    }
}

/// A raw shape definition.
///
/// Field names follow the API definition document; unknown fields are ignored.
#[allow(missing_docs, clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeSpec {
    /// Name of the shared shape this spec extends.
    #[serde(rename = "shape")]
    pub reference: Option<String>,
    /// Type tag, possibly an alias such as `long` or `blob`.
    #[serde(rename = "type")]
    pub type_tag: Option<String>,
    /// Structure members in declaration order.
    #[serde(default, deserialize_with = "ordered::deserialize_option")]
    pub members: Option<Vec<(String, ShapeSpec)>>,
    /// List element spec.
    pub member: Option<Box<ShapeSpec>>,
    /// Map key spec.
    pub key: Option<Box<ShapeSpec>>,
    /// Map value spec.
    pub value: Option<Box<ShapeSpec>>,
    #[serde(rename = "enum")]
    pub enum_values: Option<Vec<String>>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub pattern: Option<String>,
    pub location: Option<Location>,
    pub location_name: Option<String>,
    pub xml_name: Option<String>,
    pub query_name: Option<String>,
    /// Explicit member ordering for XML serialization.
    pub xml_order: Option<Vec<String>>,
    #[serde(default)]
    pub flattened: bool,
    /// Required member names in declaration order.
    pub required: Option<Vec<String>>,
    pub result_wrapper: Option<String>,
    pub payload: Option<String>,
    pub xml_namespace: Option<XmlNamespace>,
    #[serde(default)]
    pub xml_attribute: bool,
    #[serde(default)]
    pub streaming: bool,
    pub requires_length: Option<bool>,
    #[serde(default)]
    pub idempotency_token: bool,
    #[serde(default, rename = "jsonvalue")]
    pub json_value: bool,
    #[serde(default)]
    pub sensitive: bool,
    #[serde(default, rename = "eventstream")]
    pub event_stream: bool,
    #[serde(default)]
    pub event: bool,
    #[serde(default, rename = "eventpayload")]
    pub event_payload: bool,
    #[serde(default, rename = "eventheader")]
    pub event_header: bool,
    pub timestamp_format: Option<TimestampFormat>,
    #[serde(default, rename = "endpointdiscoveryid")]
    pub endpoint_discovery_id: bool,
    #[serde(default)]
    pub host_label: bool,
    pub documentation: Option<String>,
    pub documentation_url: Option<String>,
}

impl ShapeSpec {
    /// A spec with only a type tag.
    #[must_use]
    pub fn of_type(tag: impl Into<String>) -> Self {
        Self {
            type_tag: Some(tag.into()),
            ..Self::default()
        }
    }

    /// A spec that only references a shared shape.
    #[must_use]
    pub fn reference(name: impl Into<String>) -> Self {
        Self {
            reference: Some(name.into()),
            ..Self::default()
        }
    }

    /// Parse a spec from a JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError::InvalidDefinition`] if the value is not a valid spec.
    pub fn from_json(value: serde_json::Value) -> ShapeResult<Self> {
        serde_json::from_value(value).map_err(ShapeError::InvalidDefinition)
    }
}

/// Deserialization of JSON objects into insertion-ordered `(key, value)` pairs.
pub(crate) mod ordered {
    use std::fmt;
    use std::marker::PhantomData;

    use serde::de::{MapAccess, Visitor};
    use serde::{Deserialize, Deserializer};

    pub(crate) fn deserialize<'de, D, T>(deserializer: D) -> Result<Vec<(String, T)>, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de>,
    {
        deserializer.deserialize_map(OrderedVisitor(PhantomData))
    }

    pub(crate) fn deserialize_option<'de, D, T>(
        deserializer: D,
    ) -> Result<Option<Vec<(String, T)>>, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de>,
    {
        deserialize(deserializer).map(Some)
    }

    struct OrderedVisitor<T>(PhantomData<T>);

    impl<'de, T: Deserialize<'de>> Visitor<'de> for OrderedVisitor<T> {
        type Value = Vec<(String, T)>;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            formatter.write_str("a JSON object")
        }

        fn visit_map<M: MapAccess<'de>>(self, mut map: M) -> Result<Self::Value, M::Error> {
            let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some((key, value)) = map.next_entry::<String, T>()? {
                entries.push((key, value));
            }
            Ok(entries)
        }
    }
}
