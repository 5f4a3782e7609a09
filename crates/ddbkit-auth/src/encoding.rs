//! Text encodings for key material.

use std::fmt;
use std::str::FromStr;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;

use crate::error::AuthError;

/// A text encoding for secret keys (input) and derived keys (output).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Encoding {
    /// UTF-8 text.
    #[default]
    Utf8,
    /// Lowercase hexadecimal.
    Hex,
    /// Standard base64 with padding.
    Base64,
}

impl Encoding {
    /// Decode text into raw bytes.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidKeyEncoding`] if `text` is not valid in this encoding.
    pub fn decode(self, text: &str) -> Result<Vec<u8>, AuthError> {
        match self {
            Self::Utf8 => Ok(text.as_bytes().to_vec()),
            Self::Hex => hex::decode(text).map_err(|e| AuthError::InvalidKeyEncoding {
                encoding: self,
                message: e.to_string(),
            }),
            Self::Base64 => BASE64
                .decode(text)
                .map_err(|e| AuthError::InvalidKeyEncoding {
                    encoding: self,
                    message: e.to_string(),
                }),
        }
    }

    /// Encode raw bytes as text. Invalid UTF-8 sequences are replaced when
    /// encoding as [`Encoding::Utf8`].
    #[must_use]
    pub fn encode(self, bytes: &[u8]) -> String {
        match self {
            Self::Utf8 => String::from_utf8_lossy(bytes).into_owned(),
            Self::Hex => hex::encode(bytes),
            Self::Base64 => BASE64.encode(bytes),
        }
    }

    /// The canonical name of this encoding.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Utf8 => "utf8",
            Self::Hex => "hex",
            Self::Base64 => "base64",
        }
    }
}

impl FromStr for Encoding {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "utf8" | "utf-8" => Ok(Self::Utf8),
            "hex" => Ok(Self::Hex),
            "base64" => Ok(Self::Base64),
            _ => Err(AuthError::UnsupportedEncoding(s.to_owned())),
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
