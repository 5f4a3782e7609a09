//! Error types for the ddbkit core.

/// Core error type for ddbkit configuration.
#[derive(Debug, thiserror::Error)]
pub enum DdbError {
    /// A required configuration value is missing or empty.
    #[error("client config must include {0}")]
    MissingConfig(&'static str),

    /// The configured port is not a valid TCP port.
    #[error("invalid port: {0}")]
    InvalidPort(String),
}

/// Convenience result type for ddbkit core operations.
pub type DdbResult<T> = Result<T, DdbError>;
