//! Shape engine error types.

/// Errors raised while materializing shapes or converting values.
#[derive(Debug, thiserror::Error)]
pub enum ShapeError {
    /// A spec references a shared shape that the API definition does not define.
    #[error("cannot find shape reference: {0}")]
    UnknownShapeReference(String),

    /// A type tag has no registered shape variant. Carries the tag as written,
    /// before alias normalization.
    #[error("unrecognized shape type: {0}")]
    UnrecognizedShapeType(String),

    /// The API definition has no operation with this name.
    #[error("unknown operation: {0}")]
    UnknownOperation(String),

    /// The protocol identifier is not supported.
    #[error("unknown protocol: {0}")]
    UnknownProtocol(String),

    /// The API definition document could not be parsed.
    #[error("invalid API definition: {0}")]
    InvalidDefinition(#[source] serde_json::Error),

    /// A JSON-valued string could not be decoded or encoded.
    #[error("invalid JSON value: {0}")]
    Json(#[source] serde_json::Error),

    /// Binary text is not valid base64.
    #[error("invalid base64 value: {0}")]
    Base64(#[from] base64::DecodeError),

    /// A value could not be parsed as a number.
    #[error("invalid number: {0}")]
    InvalidNumber(String),

    /// A value could not be parsed as a timestamp.
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),

    /// A value of the wrong kind was handed to a conversion.
    #[error("expected {expected} value, found {found}")]
    UnexpectedValue {
        /// The kind of value the shape accepts.
        expected: &'static str,
        /// The kind of value that was supplied.
        found: &'static str,
    },

    /// The API context that owns this shape tree has been dropped.
    #[error("API context has been released")]
    ContextReleased,
}

/// Convenience result type for shape operations.
pub type ShapeResult<T> = Result<T, ShapeError>;
