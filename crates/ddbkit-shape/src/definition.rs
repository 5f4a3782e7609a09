//! API definition documents.
//!
//! An API definition is the JSON service model a client is generated from:
//! service metadata, the named shared shapes, and the operations with their
//! input and output specs.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::{ShapeError, ShapeResult};
use crate::spec::{ShapeSpec, TimestampFormat, ordered};

/// Wire protocol of a service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum Protocol {
    /// AWS JSON (DynamoDB's protocol).
    #[serde(rename = "json")]
    Json,
    /// REST with JSON bodies.
    #[serde(rename = "rest-json")]
    RestJson,
    /// REST with XML bodies.
    #[serde(rename = "rest-xml")]
    RestXml,
    /// AWS Query.
    #[serde(rename = "query")]
    Query,
    /// EC2 Query.
    #[serde(rename = "ec2")]
    Ec2,
}

impl Protocol {
    /// The protocol identifier.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::RestJson => "rest-json",
            Self::RestXml => "rest-xml",
            Self::Query => "query",
            Self::Ec2 => "ec2",
        }
    }

    /// Whether absent strings read back as empty strings under this protocol.
    #[must_use]
    pub fn coerces_null_strings(self) -> bool {
        matches!(self, Self::RestXml | Self::Query | Self::Ec2)
    }

    /// Timestamp format used when a shape sets none and its location implies none.
    #[must_use]
    pub fn default_timestamp_format(self) -> TimestampFormat {
        match self {
            Self::Json | Self::RestJson => TimestampFormat::UnixTimestamp,
            Self::RestXml | Self::Query | Self::Ec2 => TimestampFormat::Iso8601,
        }
    }
}

impl FromStr for Protocol {
    type Err = ShapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "json" => Ok(Self::Json),
            "rest-json" => Ok(Self::RestJson),
            "rest-xml" => Ok(Self::RestXml),
            "query" => Ok(Self::Query),
            "ec2" => Ok(Self::Ec2),
            _ => Err(ShapeError::UnknownProtocol(s.to_owned())),
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Service metadata.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiMetadata {
    /// Wire protocol.
    pub protocol: Protocol,
    /// API version, e.g. `2012-08-10`.
    pub api_version: Option<String>,
    /// Endpoint prefix, e.g. `dynamodb`.
    pub endpoint_prefix: Option<String>,
    /// JSON protocol version, e.g. `1.0`.
    pub json_version: Option<String>,
    /// Service identifier.
    pub service_id: Option<String>,
    /// Full service name.
    pub service_full_name: Option<String>,
    /// Signature version, e.g. `v4`.
    pub signature_version: Option<String>,
    /// Service name used in the credential scope, when it differs from the endpoint prefix.
    pub signing_name: Option<String>,
    /// `X-Amz-Target` prefix, e.g. `DynamoDB_20120810`.
    pub target_prefix: Option<String>,
}

impl ApiMetadata {
    /// The service name to sign requests for.
    #[must_use]
    pub fn signing_service(&self) -> Option<&str> {
        self.signing_name
            .as_deref()
            .or(self.endpoint_prefix.as_deref())
    }
}

/// HTTP binding of an operation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpBinding {
    /// HTTP method.
    pub method: String,
    /// Request URI template.
    pub request_uri: String,
}

/// A raw operation definition.
#[derive(Debug, Clone, Deserialize)]
pub struct OperationSpec {
    /// Operation name, e.g. `PutItem`.
    pub name: Option<String>,
    /// HTTP binding.
    pub http: Option<HttpBinding>,
    /// Input shape spec.
    pub input: Option<ShapeSpec>,
    /// Output shape spec.
    pub output: Option<ShapeSpec>,
    /// Documentation.
    pub documentation: Option<String>,
}

/// A parsed API definition document.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiDefinition {
    /// Service metadata.
    pub metadata: ApiMetadata,
    /// Operations in document order.
    #[serde(default, deserialize_with = "ordered::deserialize")]
    pub operations: Vec<(String, OperationSpec)>,
    /// Shared shapes in document order.
    #[serde(default, deserialize_with = "ordered::deserialize")]
    pub shapes: Vec<(String, ShapeSpec)>,
}

impl ApiDefinition {
    /// Parse an API definition from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError::InvalidDefinition`] if the text is not a valid definition.
    pub fn from_json(text: &str) -> ShapeResult<Self> {
        serde_json::from_str(text).map_err(ShapeError::InvalidDefinition)
    }

    /// Parse an API definition from JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError::InvalidDefinition`] if the bytes are not a valid definition.
    pub fn from_slice(bytes: &[u8]) -> ShapeResult<Self> {
        serde_json::from_slice(bytes).map_err(ShapeError::InvalidDefinition)
    }
}
