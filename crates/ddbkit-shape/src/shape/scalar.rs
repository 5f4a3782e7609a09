//! Conversions of the leaf shape variants.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use bytes::Bytes;
use chrono::SecondsFormat;

use crate::definition::Protocol;
use crate::error::{ShapeError, ShapeResult};
use crate::value::Value;

/// Null becomes an empty string; everything else passes through.
pub(super) fn default_to_wire(value: &Value) -> Value {
    match value {
        Value::Null => Value::String(String::new()),
        other => other.clone(),
    }
}

pub(super) fn string_to_type(
    value: &Value,
    protocol: Protocol,
    json_value: bool,
) -> ShapeResult<Value> {
    let value = match value {
        v if protocol.coerces_null_strings() && is_falsy(v) => Value::String(String::new()),
        other => other.clone(),
    };

    if json_value {
        return match value {
            Value::String(text) => serde_json::from_str::<serde_json::Value>(&text)
                .map(Value::from)
                .map_err(ShapeError::Json),
            other => Ok(other),
        };
    }

    // Falsy scalars pass through unchanged.
    Ok(match value {
        v if is_falsy(&v) => v,
        Value::Bool(b) => Value::String(b.to_string()),
        Value::Integer(i) => Value::String(i.to_string()),
        Value::Float(f) => Value::String(f.to_string()),
        Value::Timestamp(t) => Value::String(t.to_rfc3339_opts(SecondsFormat::Secs, true)),
        other => other,
    })
}

#[allow(clippy::float_cmp)]
fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) | Value::Integer(0) => true,
        Value::Float(f) => *f == 0.0 || f.is_nan(),
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

pub(super) fn string_to_wire(value: &Value, json_value: bool) -> ShapeResult<Value> {
    if json_value {
        return serde_json::to_string(value)
            .map(Value::String)
            .map_err(ShapeError::Json);
    }
    Ok(value.clone())
}

/// Integer conversion, used in both directions. Text is read up to the first
/// character that cannot belong to a base-10 integer; floats are truncated.
#[allow(clippy::cast_possible_truncation)]
pub(super) fn to_integer(value: &Value) -> ShapeResult<Value> {
    match value {
        Value::Null => Ok(Value::Null),
        Value::Integer(i) => Ok(Value::Integer(*i)),
        Value::Float(f) if f.is_finite() => Ok(Value::Integer(f.trunc() as i64)),
        Value::String(text) => parse_integer_prefix(text)
            .map(Value::Integer)
            .ok_or_else(|| ShapeError::InvalidNumber(text.clone())),
        other => Err(ShapeError::InvalidNumber(other.to_string())),
    }
}

fn parse_integer_prefix(text: &str) -> Option<i64> {
    let text = text.trim_start();
    let digits_start = usize::from(text.starts_with(['+', '-']));
    let digits_end = text[digits_start..]
        .find(|c: char| !c.is_ascii_digit())
        .map_or(text.len(), |i| i + digits_start);
    if digits_end == digits_start {
        return None;
    }
    text[..digits_end].parse().ok()
}

/// Float conversion, used in both directions. Text is read up to the end of
/// its longest leading decimal literal.
#[allow(clippy::cast_precision_loss)]
pub(super) fn to_float(value: &Value) -> ShapeResult<Value> {
    match value {
        Value::Null => Ok(Value::Null),
        Value::Float(f) => Ok(Value::Float(*f)),
        Value::Integer(i) => Ok(Value::Float(*i as f64)),
        Value::String(text) => parse_float_prefix(text)
            .map(Value::Float)
            .ok_or_else(|| ShapeError::InvalidNumber(text.clone())),
        other => Err(ShapeError::InvalidNumber(other.to_string())),
    }
}

fn parse_float_prefix(text: &str) -> Option<f64> {
    let text = text.trim_start();
    let bytes = text.as_bytes();
    let digits_from = |start: usize| {
        bytes[start..]
            .iter()
            .position(|b| !b.is_ascii_digit())
            .map_or(bytes.len(), |i| i + start)
    };

    let mut end = usize::from(text.starts_with(['+', '-']));
    let int_end = digits_from(end);
    let mut mantissa_digits = int_end - end;
    end = int_end;
    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        mantissa_digits += frac_end - end - 1;
        end = frac_end;
    }
    if mantissa_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let sign = usize::from(matches!(bytes.get(end + 1), Some(b'+' | b'-')));
        let exp_end = digits_from(end + 1 + sign);
        if exp_end > end + 1 + sign {
            end = exp_end;
        }
    }
    text[..end].parse().ok()
}

pub(super) fn boolean_to_type(value: &Value) -> Value {
    match value {
        Value::Bool(b) => Value::Bool(*b),
        Value::Null => Value::Null,
        other => Value::Bool(other.as_str() == Some("true")),
    }
}

pub(super) fn binary_to_type(value: &Value) -> ShapeResult<Value> {
    match value {
        Value::Null => Ok(Value::Null),
        Value::Binary(bytes) => Ok(Value::Binary(bytes.clone())),
        Value::String(text) => Ok(Value::Binary(Bytes::from(BASE64.decode(text)?))),
        other => Err(ShapeError::UnexpectedValue {
            expected: "base64 text",
            found: other.type_name(),
        }),
    }
}

pub(super) fn binary_to_wire(value: &Value) -> ShapeResult<Value> {
    match value {
        Value::Null => Ok(Value::Null),
        Value::Binary(bytes) => Ok(Value::String(BASE64.encode(bytes))),
        other => Err(ShapeError::UnexpectedValue {
            expected: "binary",
            found: other.type_name(),
        }),
    }
}
