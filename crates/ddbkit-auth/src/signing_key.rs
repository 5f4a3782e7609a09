//! Scoped SigV4 signing-key derivation.
//!
//! ```text
//! DateKey              = HMAC-SHA256("AWS4" + secret_key, date)
//! DateRegionKey        = HMAC-SHA256(DateKey, region)
//! DateRegionServiceKey = HMAC-SHA256(DateRegionKey, service)
//! SigningKey           = HMAC-SHA256(DateRegionServiceKey, "aws4_request")
//! ```
//!
//! The main entry point is [`derive_signing_key`]. The keyed hash is behind the
//! [`KeyedHash`] trait so callers can substitute an instrumented implementation.

use std::borrow::Cow;
use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use hmac::{Hmac, KeyInit, Mac};
use sha2::Sha256;
use tracing::debug;

use crate::encoding::Encoding;
use crate::error::AuthError;

/// Bytes prepended to the secret key before the first HMAC round.
pub const KEY_PREFIX: &[u8; 4] = b"AWS4";

/// Final component of every SigV4 credential scope.
pub const SCOPE_TERMINATOR: &str = "aws4_request";

type HmacSha256 = Hmac<Sha256>;

/// A keyed hash producing 32-byte digests.
pub trait KeyedHash {
    /// Compute the keyed hash of `data` under `key`.
    fn mac(&self, key: &[u8], data: &[u8]) -> [u8; 32];
}

/// HMAC-SHA256, the keyed hash mandated by SigV4.
#[derive(Debug, Clone, Copy, Default)]
pub struct HmacSha256Hash;

impl KeyedHash for HmacSha256Hash {
    fn mac(&self, key: &[u8], data: &[u8]) -> [u8; 32] {
        let mut mac = HmacSha256::new_from_slice(key).expect("HMAC can accept keys of any length");
        mac.update(data);
        let mut out = [0u8; 32];
        out.copy_from_slice(&mac.finalize().into_bytes());
        out
    }
}

/// A secret access key as raw bytes.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretKey(Vec<u8>);

impl SecretKey {
    /// Wrap raw key bytes.
    #[must_use]
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// Decode a textual secret key.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidKeyEncoding`] if `text` is not valid in `encoding`.
    pub fn from_text(text: &str, encoding: Encoding) -> Result<Self, AuthError> {
        encoding.decode(text).map(Self)
    }

    /// The raw key bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    fn padded(&self) -> Vec<u8> {
        let mut padded = Vec::with_capacity(KEY_PREFIX.len() + self.0.len());
        padded.extend_from_slice(KEY_PREFIX);
        padded.extend_from_slice(&self.0);
        padded
    }
}

impl From<&str> for SecretKey {
    fn from(text: &str) -> Self {
        Self(text.as_bytes().to_vec())
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretKey(<redacted>)")
    }
}

/// The date component of a credential scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateStamp<'a> {
    /// A `yyyymmdd` string, validated before use.
    Text(&'a str),
    /// A calendar date, formatted as `yyyymmdd`.
    Date(NaiveDate),
}

impl DateStamp<'_> {
    /// Resolve into the 8-digit `yyyymmdd` form.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidDateStampFormat`] if a textual date stamp is
    /// not exactly eight ASCII digits.
    pub fn resolve(&self) -> Result<Cow<'_, str>, AuthError> {
        match self {
            Self::Text(text) if is_date_stamp(text) => Ok(Cow::Borrowed(*text)),
            Self::Text(text) => Err(AuthError::InvalidDateStampFormat((*text).to_owned())),
            Self::Date(date) => Ok(Cow::Owned(date.format("%Y%m%d").to_string())),
        }
    }
}

impl<'a> From<&'a str> for DateStamp<'a> {
    fn from(text: &'a str) -> Self {
        Self::Text(text)
    }
}

impl<'a> From<&'a String> for DateStamp<'a> {
    fn from(text: &'a String) -> Self {
        Self::Text(text)
    }
}

impl From<NaiveDate> for DateStamp<'_> {
    fn from(date: NaiveDate) -> Self {
        Self::Date(date)
    }
}

impl From<DateTime<Utc>> for DateStamp<'_> {
    fn from(timestamp: DateTime<Utc>) -> Self {
        Self::Date(timestamp.date_naive())
    }
}

fn is_date_stamp(text: &str) -> bool {
    text.len() == 8 && text.bytes().all(|b| b.is_ascii_digit())
}

/// A derived SigV4 signing key, valid for a single credential scope.
#[derive(Clone, PartialEq, Eq)]
pub struct SigningKey([u8; 32]);

impl SigningKey {
    /// The raw 32 key bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Encode the key as text.
    #[must_use]
    pub fn encode(&self, encoding: Encoding) -> String {
        encoding.encode(&self.0)
    }

    /// Sign a SigV4 string-to-sign, returning the hex-encoded signature.
    #[must_use]
    pub fn sign(&self, string_to_sign: &str) -> String {
        hex::encode(HmacSha256Hash.mac(&self.0, string_to_sign.as_bytes()))
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SigningKey(<redacted>)")
    }
}

/// A signing key as raw bytes or as encoded text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DerivedKey {
    /// No output encoding was requested.
    Bytes(SigningKey),
    /// The key encoded with the requested output encoding.
    Text(String),
}

impl DerivedKey {
    /// The encoded key, if an output encoding was requested.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Bytes(_) => None,
        }
    }

    /// The raw key, if no output encoding was requested.
    #[must_use]
    pub fn as_key(&self) -> Option<&SigningKey> {
        match self {
            Self::Bytes(key) => Some(key),
            Self::Text(_) => None,
        }
    }
}

/// Derive the SigV4 signing key for a `(date, region, service)` scope.
///
/// # Errors
///
/// Returns [`AuthError::InvalidDateStampFormat`] if a textual date stamp is not
/// `yyyymmdd`. No hash is computed in that case.
///
/// # Examples
///
/// ```
/// use ddbkit_auth::{SecretKey, derive_signing_key};
///
/// let secret = SecretKey::from("wJalrXUtnFEMI/K7MDENG/bPxRfiCYEXAMPLEKEY");
/// let key = derive_signing_key(&secret, "20130524", "us-east-1", "s3").unwrap();
/// assert_eq!(key.as_bytes().len(), 32);
/// ```
pub fn derive_signing_key<'a>(
    secret: &SecretKey,
    date_stamp: impl Into<DateStamp<'a>>,
    region: &str,
    service: &str,
) -> Result<SigningKey, AuthError> {
    derive_signing_key_with(&HmacSha256Hash, secret, date_stamp, region, service)
}

/// Derive the signing key using an explicit keyed hash implementation.
///
/// # Errors
///
/// Returns [`AuthError::InvalidDateStampFormat`] if a textual date stamp is not
/// `yyyymmdd`. `hash` is never invoked in that case.
pub fn derive_signing_key_with<'a, H: KeyedHash + ?Sized>(
    hash: &H,
    secret: &SecretKey,
    date_stamp: impl Into<DateStamp<'a>>,
    region: &str,
    service: &str,
) -> Result<SigningKey, AuthError> {
    let date_stamp = date_stamp.into();
    let date = date_stamp.resolve()?;

    debug!(date = %date, region, service, "deriving SigV4 signing key");

    let date_key = hash.mac(&secret.padded(), date.as_bytes());
    let date_region_key = hash.mac(&date_key, region.as_bytes());
    let date_region_service_key = hash.mac(&date_region_key, service.as_bytes());
    Ok(SigningKey(hash.mac(
        &date_region_service_key,
        SCOPE_TERMINATOR.as_bytes(),
    )))
}

/// Derive the signing key from a textual secret, with optional input and
/// output encodings.
///
/// The secret is decoded with `key_input_encoding` (UTF-8 when `None`). The key
/// is returned as raw bytes unless `output_encoding` is given.
///
/// # Errors
///
/// Returns [`AuthError::InvalidKeyEncoding`] if the secret cannot be decoded, or
/// [`AuthError::InvalidDateStampFormat`] if the date stamp is not `yyyymmdd`.
pub fn derive_signing_key_encoded<'a>(
    secret: &str,
    key_input_encoding: Option<Encoding>,
    date_stamp: impl Into<DateStamp<'a>>,
    region: &str,
    service: &str,
    output_encoding: Option<Encoding>,
) -> Result<DerivedKey, AuthError> {
    let date_stamp = date_stamp.into();
    // Reject a bad stamp before decoding the secret.
    date_stamp.resolve()?;

    let secret = SecretKey::from_text(secret, key_input_encoding.unwrap_or_default())?;
    let key = derive_signing_key(&secret, date_stamp, region, service)?;

    Ok(match output_encoding {
        Some(encoding) => DerivedKey::Text(key.encode(encoding)),
        None => DerivedKey::Bytes(key),
    })
}
