//! Key derivation using PBKDF2-HMAC-SHA256.
//!
//! This module turns a master password plus a salt into a 256-bit symmetric
//! key. The derivation is deliberately slow (60000 iterations) to make
//! offline guessing expensive.

use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use zeroize::{ZeroizeOnDrop, Zeroizing};

use super::salt::Salt;
use super::{ITERATIONS, KEY_SIZE, KEY_SIZE_WORDS};
use crate::error::{Result, VaultError};

/// PBKDF2 parameters.
///
/// The default is the stored-data format and must be used for anything that
/// is persisted. Other values exist for callers that manage their own format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KdfParams {
    /// Output size in 32-bit words
    pub key_size_words: usize,
    pub iterations: u32,
}

impl Default for KdfParams {
    fn default() -> Self {
        Self {
            key_size_words: KEY_SIZE_WORDS,
            iterations: ITERATIONS,
        }
    }
}

impl KdfParams {
    /// Output size in bytes.
    pub fn key_size_bytes(&self) -> usize {
        self.key_size_words * 4
    }
}

/// A symmetric key derived from the master password.
///
/// Key material is zeroized when dropped. Never persisted; recomputed on
/// demand from (password, salt).
#[derive(Clone, ZeroizeOnDrop)]
pub struct DerivedKey {
    key: [u8; KEY_SIZE],
}

impl DerivedKey {
    pub(crate) fn from_bytes(bytes: [u8; KEY_SIZE]) -> Self {
        Self { key: bytes }
    }

    /// Get a reference to the raw key bytes.
    ///
    /// # Security
    ///
    /// Avoid storing or logging this value. Use only for immediate encryption operations.
    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.key
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DerivedKey")
            .field("key", &"[REDACTED]")
            .finish()
    }
}

/// Derive the 256-bit vault key from a password and salt.
///
/// Deterministic: the same password and salt always produce the same key.
/// An empty password is accepted and yields a key.
///
/// # Examples
///
/// ```
/// use vault_core::crypto::{derive_key, Salt};
///
/// let salt = Salt::from_bytes([7u8; 16]);
/// let a = derive_key("correct horse", &salt);
/// let b = derive_key("correct horse", &salt);
/// assert_eq!(a.as_bytes(), b.as_bytes());
/// ```
pub fn derive_key(password: &str, salt: &Salt) -> DerivedKey {
    tracing::trace!(iterations = ITERATIONS, "deriving vault key");
    let mut key = [0u8; KEY_SIZE];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), salt.as_bytes(), ITERATIONS, &mut key);
    DerivedKey::from_bytes(key)
}

/// Derive key material with explicit parameters.
///
/// `params.key_size_words` is converted to bytes (`words * 4`). Zero words or
/// zero iterations are rejected.
pub fn derive_key_with_params(
    password: &str,
    salt: &[u8],
    params: &KdfParams,
) -> Result<Zeroizing<Vec<u8>>> {
    if params.key_size_words == 0 {
        return Err(VaultError::InvalidInput(
            "Key size must be at least one word".to_string(),
        ));
    }
    if params.iterations == 0 {
        return Err(VaultError::InvalidInput(
            "Iteration count must be positive".to_string(),
        ));
    }

    let mut key = Zeroizing::new(vec![0u8; params.key_size_bytes()]);
    pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, params.iterations, &mut key);
    Ok(key)
}
