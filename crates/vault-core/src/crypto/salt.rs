//! Salt source.
//!
//! Every fresh derivation draws a new salt from the operating system CSPRNG.
//! Decryption and signing reuse the salt carried alongside the ciphertext or
//! public key instead of drawing a new one.

use rand::rngs::OsRng;
use rand::RngCore;

use super::{SALT_HEX_LEN, SALT_SIZE};
use crate::error::{Result, VaultError};

/// A fixed-length (16-byte) random salt.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Salt([u8; SALT_SIZE]);

impl Salt {
    /// Draw a fresh salt from the OS CSPRNG.
    pub fn random() -> Self {
        let mut bytes = [0u8; SALT_SIZE];
        OsRng.fill_bytes(&mut bytes);
        Self(bytes)
    }

    pub fn from_bytes(bytes: [u8; SALT_SIZE]) -> Self {
        Self(bytes)
    }

    /// Parse a 32-character hex salt.
    pub fn from_hex(value: &str) -> Result<Self> {
        if value.len() != SALT_HEX_LEN {
            return Err(VaultError::InvalidFormat(format!(
                "Salt must be {} hex characters (got {})",
                SALT_HEX_LEN,
                value.len()
            )));
        }
        let mut bytes = [0u8; SALT_SIZE];
        hex::decode_to_slice(value, &mut bytes)
            .map_err(|e| VaultError::InvalidFormat(format!("Salt is not valid hex: {}", e)))?;
        Ok(Self(bytes))
    }

    /// Lowercase hex encoding (32 characters).
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    pub fn as_bytes(&self) -> &[u8; SALT_SIZE] {
        &self.0
    }
}

impl std::fmt::Debug for Salt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Salt").field(&self.to_hex()).finish()
    }
}

impl std::fmt::Display for Salt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Draw `size_bytes` random bytes from the OS CSPRNG.
///
/// Each call is independent; there is no seed state.
pub fn random_salt(size_bytes: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; size_bytes];
    OsRng.fill_bytes(&mut bytes);
    bytes
}
