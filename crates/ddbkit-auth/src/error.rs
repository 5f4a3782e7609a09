//! Error types for signing-key derivation.

use crate::encoding::Encoding;

/// Errors that can occur while deriving a SigV4 signing key.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The date stamp is not an 8-digit `yyyymmdd` string.
    #[error("date stamp format must be yyyymmdd, got {0:?}")]
    InvalidDateStampFormat(String),

    /// The secret key text could not be decoded with the requested encoding.
    #[error("secret key is not valid {encoding}: {message}")]
    InvalidKeyEncoding {
        /// The encoding the key was expected to be in.
        encoding: Encoding,
        /// The decoder's error message.
        message: String,
    },

    /// The encoding name is not one of `utf8`, `hex` or `base64`.
    #[error("unsupported encoding: {0}")]
    UnsupportedEncoding(String),
}
