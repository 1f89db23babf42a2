//! Salt-carrying encryption envelopes.
//!
//! Internally an envelope is a typed `{ salt, ciphertext }` pair. The flat
//! wire string is produced and parsed only here:
//!
//! ```text
//! ┌──────────────────────────────┬───────────────────────────────────────┐
//! │ hex(salt)  (32 chars)        │ base64(nonce ‖ ciphertext ‖ tag)      │
//! └──────────────────────────────┴───────────────────────────────────────┘
//! ```
//!
//! The first 32 characters of every envelope string are the hex salt.

use std::fmt;
use std::str::FromStr;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use super::salt::Salt;
use super::SALT_HEX_LEN;
use crate::error::{Result, VaultError};

/// Salt plus opaque cipher output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    pub salt: Salt,
    pub ciphertext: Vec<u8>,
}

impl Envelope {
    pub fn new(salt: Salt, ciphertext: Vec<u8>) -> Self {
        Self { salt, ciphertext }
    }

    /// Encode as `hex(salt) ‖ base64(ciphertext)`.
    pub fn to_wire_string(&self) -> String {
        let mut out = self.salt.to_hex();
        out.push_str(&STANDARD.encode(&self.ciphertext));
        out
    }

    /// Parse a wire string produced by [`Envelope::to_wire_string`].
    pub fn from_wire_string(value: &str) -> Result<Self> {
        let (salt_hex, body) = split_prefix(value).ok_or_else(|| {
            VaultError::InvalidFormat(format!(
                "Envelope must start with a {}-character hex salt",
                SALT_HEX_LEN
            ))
        })?;
        if body.is_empty() {
            return Err(VaultError::InvalidFormat(
                "Envelope has no ciphertext".to_string(),
            ));
        }

        let salt = Salt::from_hex(salt_hex)?;
        let ciphertext = STANDARD
            .decode(body)
            .map_err(|e| VaultError::InvalidFormat(format!("Ciphertext is not base64: {}", e)))?;

        Ok(Self { salt, ciphertext })
    }
}

impl fmt::Display for Envelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_wire_string())
    }
}

impl FromStr for Envelope {
    type Err = VaultError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_wire_string(s)
    }
}

/// Split off the salt prefix, refusing to cut through a multi-byte character.
pub(crate) fn split_prefix(value: &str) -> Option<(&str, &str)> {
    if value.len() < SALT_HEX_LEN || !value.is_char_boundary(SALT_HEX_LEN) {
        return None;
    }
    Some(value.split_at(SALT_HEX_LEN))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_string_starts_with_salt() {
        let salt = Salt::from_bytes([0xab; 16]);
        let envelope = Envelope::new(salt, vec![1, 2, 3, 4]);
        let wire = envelope.to_wire_string();

        assert_eq!(&wire[..SALT_HEX_LEN], salt.to_hex());
        assert_eq!(Envelope::from_wire_string(&wire).unwrap(), envelope);
    }

    #[test]
    fn test_parse_via_from_str() {
        let envelope = Envelope::new(Salt::random(), b"opaque".to_vec());
        let parsed: Envelope = envelope.to_string().parse().unwrap();
        assert_eq!(parsed, envelope);
    }

    #[test]
    fn test_too_short_rejected() {
        assert!(Envelope::from_wire_string("").is_err());
        assert!(Envelope::from_wire_string("abcdef").is_err());
    }

    #[test]
    fn test_salt_only_rejected() {
        let wire = Salt::random().to_hex();
        let err = Envelope::from_wire_string(&wire).unwrap_err();
        assert!(err.to_string().contains("no ciphertext"));
    }

    #[test]
    fn test_bad_base64_rejected() {
        let wire = format!("{}!!!not-base64!!!", Salt::random().to_hex());
        assert!(Envelope::from_wire_string(&wire).is_err());
    }

    #[test]
    fn test_multibyte_prefix_rejected() {
        // 31 ASCII chars followed by a two-byte character straddling the boundary
        let wire = format!("{}é{}", "a".repeat(31), "AAAA");
        assert!(split_prefix(&wire).is_none());
        assert!(Envelope::from_wire_string(&wire).is_err());
    }
}
