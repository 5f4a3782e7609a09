//! Core types and client configuration for ddbkit.
//!
//! This crate provides the building blocks shared by the ddbkit crates and
//! binaries: the DynamoDB client configuration (credentials, region, endpoint
//! derivation) and common AWS type definitions.

mod config;
mod error;
mod types;

pub use config::{ClientConfig, DEFAULT_PORT, HTTP_METHOD};
pub use error::{DdbError, DdbResult};
pub use types::AwsRegion;
