//! Symmetric encryption of vault records.
//!
//! Each call derives a fresh key from the master password and a new random
//! salt, then encrypts with AES-256-GCM under a random 96-bit nonce. The salt
//! travels in the envelope so decryption is self-describing.
//!
//! Decryption fails closed: a wrong password, a truncated envelope and a
//! tampered ciphertext all produce `None`, and nothing distinguishes them.

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce};
use rand::rngs::OsRng;
use rand::RngCore;

use super::envelope::Envelope;
use super::kdf::{derive_key, DerivedKey};
use super::salt::Salt;
use crate::error::{Result, VaultError};

/// AES-GCM nonce size in bytes.
pub const NONCE_SIZE: usize = 12;

/// Encrypt `plaintext` under `key`, returning `nonce ‖ ciphertext ‖ tag`.
pub(crate) fn seal(key: &DerivedKey, plaintext: &[u8]) -> Result<Vec<u8>> {
    let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
        .map_err(|e| VaultError::Crypto(format!("Invalid key: {}", e)))?;

    let mut nonce = [0u8; NONCE_SIZE];
    OsRng.fill_bytes(&mut nonce);

    let ciphertext = cipher
        .encrypt(Nonce::from_slice(&nonce), plaintext)
        .map_err(|_| VaultError::Crypto("Encryption failed".to_string()))?;

    let mut sealed = Vec::with_capacity(NONCE_SIZE + ciphertext.len());
    sealed.extend_from_slice(&nonce);
    sealed.extend_from_slice(&ciphertext);
    Ok(sealed)
}

/// Inverse of [`seal`]. Any failure yields `None`.
pub(crate) fn open(key: &DerivedKey, sealed: &[u8]) -> Option<Vec<u8>> {
    if sealed.len() < NONCE_SIZE {
        return None;
    }
    let (nonce, ciphertext) = sealed.split_at(NONCE_SIZE);
    let cipher = Aes256Gcm::new_from_slice(key.as_bytes()).ok()?;
    cipher.decrypt(Nonce::from_slice(nonce), ciphertext).ok()
}

/// Encrypt raw bytes under a key derived from `password` and a fresh salt.
pub fn encrypt_bytes(plaintext: &[u8], password: &str) -> Result<Envelope> {
    let salt = Salt::random();
    let key = derive_key(password, &salt);
    let ciphertext = seal(&key, plaintext)?;
    tracing::debug!(bytes = plaintext.len(), "sealed envelope");
    Ok(Envelope::new(salt, ciphertext))
}

/// Decrypt an envelope, re-deriving the key from its salt.
pub fn decrypt_bytes(envelope: &Envelope, password: &str) -> Option<Vec<u8>> {
    let key = derive_key(password, &envelope.salt);
    let plaintext = open(&key, &envelope.ciphertext);
    if plaintext.is_none() {
        tracing::debug!("envelope could not be unlocked");
    }
    plaintext
}

/// Encrypt a text value and return its envelope wire string.
///
/// # Examples
///
/// ```
/// use vault_core::crypto::{decrypt_text, encrypt_text};
///
/// let envelope = encrypt_text("hunter2", "master password").unwrap();
/// assert_eq!(decrypt_text(&envelope, "master password").as_deref(), Some("hunter2"));
/// assert_eq!(decrypt_text(&envelope, "wrong password"), None);
/// ```
pub fn encrypt_text(plaintext: &str, password: &str) -> Result<String> {
    Ok(encrypt_bytes(plaintext.as_bytes(), password)?.to_wire_string())
}

/// Decrypt an envelope wire string.
///
/// Returns `None` when the envelope is malformed, the password is wrong, the
/// ciphertext was modified, or the plaintext is not UTF-8.
pub fn decrypt_text(envelope: &str, password: &str) -> Option<String> {
    let envelope = match Envelope::from_wire_string(envelope) {
        Ok(envelope) => envelope,
        Err(_) => {
            tracing::debug!("envelope could not be unlocked");
            return None;
        }
    };
    let plaintext = decrypt_bytes(&envelope, password)?;
    String::from_utf8(plaintext).ok()
}
