//! SigV4 helpers around the signing key.
//!
//! A request signer combines these with [`crate::derive_signing_key`]:
//!
//! 1. Hash the payload with [`hash_payload`].
//! 2. Build the canonical request and hash it the same way.
//! 3. Build the string to sign from the timestamp, [`credential_scope`] and
//!    the canonical request hash.
//! 4. Sign it with [`crate::SigningKey::sign`].

use sha2::{Digest, Sha256};

use crate::signing_key::SCOPE_TERMINATOR;

/// The signing algorithm identifier.
pub const ALGORITHM: &str = "AWS4-HMAC-SHA256";

/// Build the credential scope `date/region/service/aws4_request`.
///
/// # Examples
///
/// ```
/// use ddbkit_auth::credential_scope;
///
/// assert_eq!(
///     credential_scope("20150830", "us-east-1", "dynamodb"),
///     "20150830/us-east-1/dynamodb/aws4_request"
/// );
/// ```
#[must_use]
pub fn credential_scope(date: &str, region: &str, service: &str) -> String {
    format!("{date}/{region}/{service}/{SCOPE_TERMINATOR}")
}

/// Build the SigV4 string to sign.
///
/// Format:
/// ```text
/// AWS4-HMAC-SHA256\n
/// <ISO8601 timestamp>\n
/// <credential_scope>\n
/// <hex(SHA256(canonical_request))>
/// ```
#[must_use]
pub fn build_string_to_sign(
    timestamp: &str,
    credential_scope: &str,
    canonical_request_hash: &str,
) -> String {
    format!("{ALGORITHM}\n{timestamp}\n{credential_scope}\n{canonical_request_hash}")
}

/// Compute the SHA-256 hash of the given payload and return it as a hex string.
///
/// # Examples
///
/// ```
/// use ddbkit_auth::hash_payload;
///
/// // SHA-256 of empty payload
/// assert_eq!(
///     hash_payload(b""),
///     "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
/// );
/// ```
#[must_use]
pub fn hash_payload(payload: &[u8]) -> String {
    hex::encode(Sha256::digest(payload))
}
