//! Descriptive attributes shared by every shape variant.

use crate::context::ShapeOptions;
use crate::spec::{Location, ShapeSpec};

/// Attributes resolved from a spec, layered over a base shape's attributes
/// when `spec` extends a shared shape.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShapeAttributes {
    /// Name of the shared shape this shape extends.
    pub reference: Option<String>,
    /// Display name.
    pub name: Option<String>,
    /// Binding location.
    pub location: Location,
    /// Allowed values.
    pub enum_values: Option<Vec<String>>,
    /// Lower bound on length or value.
    pub min: Option<f64>,
    /// Upper bound on length or value.
    pub max: Option<f64>,
    /// Regular expression the value must match.
    pub pattern: Option<String>,
    /// Whether the value is streamed.
    pub is_streaming: bool,
    /// Whether a streamed body needs a known length.
    pub requires_length: Option<bool>,
    /// Whether the list or map is serialized without a wrapper element.
    pub flattened: bool,
    /// Whether the shape named itself through `queryName`.
    pub is_query_name: bool,
    /// Whether the shape named itself through `locationName`.
    pub is_location_name: bool,
    /// Whether the member is filled with an idempotency token.
    pub is_idempotent: bool,
    /// Whether the string carries JSON text.
    pub is_json_value: bool,
    /// Whether the value must be kept out of logs.
    pub is_sensitive: bool,
    /// Whether the member is an event stream.
    pub is_event_stream: bool,
    /// Whether the structure is an event.
    pub is_event: bool,
    /// Whether the member is an event payload.
    pub is_event_payload: bool,
    /// Whether the member is an event header.
    pub is_event_header: bool,
    /// Whether a timestamp format was set explicitly, here or on the base.
    pub is_timestamp_format_set: bool,
    /// Whether the member is an endpoint discovery identifier.
    pub endpoint_discovery_id: bool,
    /// Whether the member is bound to a host label.
    pub host_label: bool,
    /// Whether the member is serialized as an XML attribute.
    pub is_xml_attribute: bool,
    /// Documentation, kept only with the documentation option.
    pub documentation: Option<String>,
    /// Documentation URL, kept only with the documentation option.
    pub documentation_url: Option<String>,
}

impl ShapeAttributes {
    /// Resolve attributes for `spec`.
    ///
    /// Inherited from `base` when `spec` leaves them out: name, location,
    /// enum, bounds, pattern, length requirement and documentation. Streaming,
    /// sensitivity, flattening, XML attribute and explicit timestamp format
    /// hold when set on either. The remaining flags come from `spec` alone.
    pub(crate) fn resolve(
        spec: &ShapeSpec,
        base: Option<&Self>,
        member_name: Option<&str>,
        options: ShapeOptions,
    ) -> Self {
        let inherit = |own: &Option<String>, from_base: fn(&Self) -> &Option<String>| {
            own.clone().or_else(|| base.and_then(|b| from_base(b).clone()))
        };
        let either = |own: bool, from_base: fn(&Self) -> bool| own || base.is_some_and(from_base);

        let name = base
            .and_then(|b| b.name.clone())
            .or_else(|| spec.xml_name.clone())
            .or_else(|| spec.query_name.clone())
            .or_else(|| spec.location_name.clone())
            .or_else(|| member_name.map(str::to_owned));

        let (documentation, documentation_url) = if options.documentation {
            (
                inherit(&spec.documentation, |b| &b.documentation),
                inherit(&spec.documentation_url, |b| &b.documentation_url),
            )
        } else {
            (None, None)
        };

        Self {
            reference: inherit(&spec.reference, |b| &b.reference),
            name,
            location: spec
                .location
                .or_else(|| base.map(|b| b.location))
                .unwrap_or_default(),
            enum_values: spec
                .enum_values
                .clone()
                .or_else(|| base.and_then(|b| b.enum_values.clone())),
            min: spec.min.or_else(|| base.and_then(|b| b.min)),
            max: spec.max.or_else(|| base.and_then(|b| b.max)),
            pattern: inherit(&spec.pattern, |b| &b.pattern),
            is_streaming: either(spec.streaming, |b| b.is_streaming),
            requires_length: spec
                .requires_length
                .or_else(|| base.and_then(|b| b.requires_length)),
            flattened: either(spec.flattened, |b| b.flattened),
            is_query_name: spec.query_name.is_some(),
            is_location_name: spec.location_name.is_some(),
            is_idempotent: spec.idempotency_token,
            is_json_value: spec.json_value,
            is_sensitive: either(spec.sensitive, |b| b.is_sensitive),
            is_event_stream: spec.event_stream,
            is_event: spec.event,
            is_event_payload: spec.event_payload,
            is_event_header: spec.event_header,
            is_timestamp_format_set: either(spec.timestamp_format.is_some(), |b| {
                b.is_timestamp_format_set
            }),
            endpoint_discovery_id: spec.endpoint_discovery_id,
            host_label: spec.host_label,
            is_xml_attribute: either(spec.xml_attribute, |b| b.is_xml_attribute),
            documentation,
            documentation_url,
        }
    }
}
