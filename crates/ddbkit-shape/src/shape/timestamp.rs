//! Timestamp shapes and their wire formats.

use chrono::{DateTime, NaiveDateTime, Utc};

use super::ShapeAttributes;
use crate::definition::Protocol;
use crate::error::{ShapeError, ShapeResult};
use crate::spec::{Location, ShapeSpec, TimestampFormat};
use crate::value::Value;

const ISO8601: &str = "%Y-%m-%dT%H:%M:%SZ";
const RFC822: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// A timestamp with its wire format resolved at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimestampShape {
    format: TimestampFormat,
}

impl TimestampShape {
    /// Resolution order: `spec`'s own format, the base's format when that
    /// was set explicitly, `rfc822` for headers, `iso8601` for query strings,
    /// then the protocol default.
    pub(super) fn resolve(
        spec: &ShapeSpec,
        base_format: Option<TimestampFormat>,
        attributes: &ShapeAttributes,
        protocol: Protocol,
    ) -> Self {
        let inherited = base_format.filter(|_| attributes.is_timestamp_format_set);
        let format = spec
            .timestamp_format
            .or(inherited)
            .unwrap_or(match attributes.location {
                Location::Header => TimestampFormat::Rfc822,
                Location::Querystring => TimestampFormat::Iso8601,
                _ => protocol.default_timestamp_format(),
            });
        Self { format }
    }

    /// The resolved wire format.
    #[must_use]
    pub fn format(&self) -> TimestampFormat {
        self.format
    }

    pub(super) fn to_type(self, value: &Value) -> ShapeResult<Value> {
        match value {
            Value::Timestamp(t) => Ok(Value::Timestamp(*t)),
            Value::String(_) | Value::Integer(_) | Value::Float(_) => {
                parse_timestamp(value).map(Value::Timestamp)
            }
            _ => Ok(Value::Null),
        }
    }

    pub(super) fn to_wire_format(self, value: &Value) -> ShapeResult<Value> {
        let timestamp = match value {
            Value::Null => return Ok(Value::Null),
            Value::Timestamp(t) => *t,
            Value::String(_) | Value::Integer(_) | Value::Float(_) => parse_timestamp(value)?,
            other => {
                return Err(ShapeError::UnexpectedValue {
                    expected: "timestamp",
                    found: other.type_name(),
                });
            }
        };
        Ok(format_timestamp(timestamp, self.format))
    }
}

/// Parse epoch seconds (numbers or numeric text), RFC 3339 / ISO 8601 text,
/// or RFC 822 text.
///
/// # Errors
///
/// Returns [`ShapeError::InvalidTimestamp`] when the value is none of these.
#[allow(clippy::cast_possible_truncation)]
pub fn parse_timestamp(value: &Value) -> ShapeResult<DateTime<Utc>> {
    let invalid = || ShapeError::InvalidTimestamp(value.to_string());
    let from_seconds = |seconds: f64| {
        DateTime::from_timestamp_millis((seconds * 1000.0).round() as i64).ok_or_else(invalid)
    };

    match value {
        Value::Timestamp(t) => Ok(*t),
        Value::Integer(i) => DateTime::from_timestamp(*i, 0).ok_or_else(invalid),
        Value::Float(f) if f.is_finite() => from_seconds(*f),
        Value::String(text) => {
            let text = text.trim();
            if let Some(seconds) = text.parse::<f64>().ok().filter(|s| s.is_finite()) {
                return from_seconds(seconds);
            }
            DateTime::parse_from_rfc3339(text)
                .or_else(|_| DateTime::parse_from_rfc2822(text))
                .map(|t| t.with_timezone(&Utc))
                .or_else(|_| {
                    NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S").map(|t| t.and_utc())
                })
                .map_err(|_| invalid())
        }
        _ => Err(invalid()),
    }
}

/// Format a timestamp for the wire. Unix timestamps are integers when they
/// fall on a whole second and floats otherwise.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn format_timestamp(timestamp: DateTime<Utc>, format: TimestampFormat) -> Value {
    match format {
        TimestampFormat::Iso8601 => Value::String(timestamp.format(ISO8601).to_string()),
        TimestampFormat::Rfc822 => Value::String(timestamp.format(RFC822).to_string()),
        TimestampFormat::UnixTimestamp => {
            let millis = timestamp.timestamp_millis();
            if millis % 1000 == 0 {
                Value::Integer(millis / 1000)
            } else {
                Value::Float(millis as f64 / 1000.0)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::TimeZone;
    use serde_json::json;

    use super::*;
    use crate::context::{ApiContext, ShapeOptions};
    use crate::shape::Shape;

    fn create(
        protocol: Protocol,
        shared: serde_json::Value,
        spec: serde_json::Value,
    ) -> Arc<Shape> {
        let shapes: Vec<(String, ShapeSpec)> = shared
            .as_object()
            .unwrap()
            .iter()
            .map(|(name, value)| (name.clone(), ShapeSpec::from_json(value.clone()).unwrap()))
            .collect();
        let ctx = ApiContext::from_shapes(protocol, shapes, ShapeOptions::default());
        ctx.create(&ShapeSpec::from_json(spec).unwrap(), None).unwrap()
    }

    fn sample() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2015, 8, 30, 12, 36, 0).unwrap()
    }

    #[test]
    fn test_should_resolve_format_from_location_and_protocol() {
        let fmt = |protocol, spec| create(protocol, json!({}), spec).timestamp_format();

        assert_eq!(
            fmt(Protocol::RestJson, json!({"type": "timestamp", "location": "header"})),
            Some(TimestampFormat::Rfc822)
        );
        assert_eq!(
            fmt(Protocol::RestJson, json!({"type": "timestamp", "location": "querystring"})),
            Some(TimestampFormat::Iso8601)
        );
        assert_eq!(
            fmt(Protocol::Json, json!({"type": "timestamp"})),
            Some(TimestampFormat::UnixTimestamp)
        );
        assert_eq!(
            fmt(Protocol::RestXml, json!({"type": "timestamp"})),
            Some(TimestampFormat::Iso8601)
        );
        assert_eq!(
            fmt(
                Protocol::Json,
                json!({"type": "timestamp", "location": "header", "timestampFormat": "iso8601"})
            ),
            Some(TimestampFormat::Iso8601)
        );
    }

    #[test]
    fn test_should_inherit_only_explicit_base_format() {
        let shared = json!({
            "Explicit": {"type": "timestamp", "timestampFormat": "iso8601"},
            "Implicit": {"type": "timestamp"}
        });

        let explicit = create(
            Protocol::Json,
            shared.clone(),
            json!({"shape": "Explicit", "location": "header"}),
        );
        assert!(explicit.attributes().is_timestamp_format_set);
        assert_eq!(explicit.timestamp_format(), Some(TimestampFormat::Iso8601));

        let implicit = create(
            Protocol::Json,
            shared,
            json!({"shape": "Implicit", "location": "header"}),
        );
        assert!(!implicit.attributes().is_timestamp_format_set);
        assert_eq!(implicit.timestamp_format(), Some(TimestampFormat::Rfc822));
    }

    #[test]
    fn test_should_format_each_wire_format() {
        assert_eq!(
            format_timestamp(sample(), TimestampFormat::Iso8601),
            Value::from("2015-08-30T12:36:00Z")
        );
        assert_eq!(
            format_timestamp(sample(), TimestampFormat::Rfc822),
            Value::from("Sun, 30 Aug 2015 12:36:00 GMT")
        );
        assert_eq!(
            format_timestamp(sample(), TimestampFormat::UnixTimestamp),
            Value::Integer(1_440_938_160)
        );
        let with_millis = sample() + chrono::Duration::milliseconds(250);
        assert_eq!(
            format_timestamp(with_millis, TimestampFormat::UnixTimestamp),
            Value::Float(1_440_938_160.25)
        );
    }

    #[test]
    fn test_should_parse_wire_timestamps() {
        for wire in [
            Value::Integer(1_440_938_160),
            Value::Float(1_440_938_160.0),
            Value::from("1440938160"),
            Value::from("2015-08-30T12:36:00Z"),
            Value::from("2015-08-30T12:36:00.000Z"),
            Value::from("Sun, 30 Aug 2015 12:36:00 GMT"),
        ] {
            assert_eq!(parse_timestamp(&wire).unwrap(), sample(), "wire {wire}");
        }
        assert!(matches!(
            parse_timestamp(&Value::from("yesterday")),
            Err(ShapeError::InvalidTimestamp(_))
        ));
    }

    #[test]
    fn test_should_convert_through_shape() {
        let shape = create(
            Protocol::RestJson,
            json!({}),
            json!({"type": "timestamp", "location": "header"}),
        );
        assert_eq!(
            shape.to_wire_format(&Value::Timestamp(sample())).unwrap(),
            Value::from("Sun, 30 Aug 2015 12:36:00 GMT")
        );
        assert_eq!(
            shape.to_type(&Value::from("Sun, 30 Aug 2015 12:36:00 GMT")).unwrap(),
            Value::Timestamp(sample())
        );
        assert_eq!(shape.to_type(&Value::Null).unwrap(), Value::Null);
        assert_eq!(shape.to_type(&Value::Bool(true)).unwrap(), Value::Null);
    }
}
