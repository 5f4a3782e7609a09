//! AWS Signature Version 4 signing-key derivation for ddbkit.
//!
//! This crate implements the client side of SigV4 key handling: deriving the
//! scoped signing key from a secret access key, a date stamp, a region and a
//! service name, plus the small helpers a request signer needs around it.
//!
//! # Overview
//!
//! The signing key is the result of an HMAC-SHA256 chain keyed by `"AWS4"`
//! followed by the secret key. It is valid for exactly one
//! `(date, region, service)` scope and is bit-compatible with any SigV4
//! verifier.
//!
//! # Usage
//!
//! ```rust
//! use ddbkit_auth::{SecretKey, derive_signing_key};
//!
//! let secret = SecretKey::from_bytes(b"wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY".to_vec());
//! let key = derive_signing_key(&secret, "20150830", "us-east-1", "iam").unwrap();
//! assert_eq!(
//!     hex::encode(key.as_bytes()),
//!     "c4afb1cc5771d871763a393e44b703571b55cc28424d1a5e86da6ed3c154a4b9"
//! );
//! ```
//!
//! # Modules
//!
//! - [`encoding`] - Text encodings for secret keys and derived keys
//! - [`error`] - Key derivation error types
//! - [`signing_key`] - The scoped signing-key derivation
//! - [`sigv4`] - Credential scope, string-to-sign and payload hashing helpers

pub mod encoding;
pub mod error;
pub mod signing_key;
pub mod sigv4;

pub use encoding::Encoding;
pub use error::AuthError;
pub use signing_key::{
    DateStamp, DerivedKey, HmacSha256Hash, KeyedHash, SecretKey, SigningKey, derive_signing_key,
    derive_signing_key_encoded, derive_signing_key_with,
};
pub use sigv4::{build_string_to_sign, credential_scope, hash_payload};
