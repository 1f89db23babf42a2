//! Cryptographic operations for the vault.
//!
//! This module provides the client-side crypto core:
//! - **Salt source**: CSPRNG-backed salts (`salt`)
//! - **Key derivation**: PBKDF2-HMAC-SHA256 over (password, salt) (`kdf`)
//! - **Symmetric cipher**: AES-256-GCM for record text and file attachments
//!   (`cipher`, `file`), wrapped in salt-carrying envelopes (`envelope`)
//! - **Identity**: deterministic secp256k1 keypairs derived from the master
//!   password, used to sign server-issued challenges (`identity`)
//!
//! ## Security Model
//!
//! - The master password and every key derived from it stay in the caller's
//!   memory for the duration of one operation and are zeroized on drop
//! - Only envelopes (salt + ciphertext) and the public key leave the client
//! - Decryption and signature verification fail closed: `None` / `false`,
//!   never an error that explains why
//!
//! ## Wire Format
//!
//! The KDF parameters below are part of the stored data format. Every envelope
//! ever written depends on them; they are constants, not configuration.

pub mod cipher;
pub mod envelope;
pub mod file;
pub mod identity;
pub mod kdf;
pub mod salt;

pub use cipher::{decrypt_bytes, decrypt_text, encrypt_bytes, encrypt_text};
pub use envelope::Envelope;
pub use file::{decrypt_file, encrypt_file, ensure_file_size, EncryptedFile, MAX_FILE_SIZE};
pub use identity::{
    generate_public_key, sign_challenge, split_salt_and_public_key, stored_public_key_for,
    verify_signature, KeyPair, SaltAndPublicKey, StoredPublicKey,
};
pub use kdf::{derive_key, derive_key_with_params, DerivedKey, KdfParams};
pub use salt::{random_salt, Salt};

/// Derived key size in 32-bit words (8 words = 256 bits).
pub const KEY_SIZE_WORDS: usize = 8;

/// Derived key size in bytes.
pub const KEY_SIZE: usize = KEY_SIZE_WORDS * 4;

/// Salt size in bytes.
pub const SALT_SIZE: usize = 16;

/// PBKDF2 iteration count.
pub const ITERATIONS: u32 = 60_000;

/// Length of a hex-encoded salt.
pub const SALT_HEX_LEN: usize = SALT_SIZE * 2;

/// Length of a hex-encoded uncompressed secp256k1 public key (65 bytes).
pub const PUBLIC_KEY_HEX_LEN: usize = 130;

/// Length of the stored "master password public key": hex salt + hex public key.
pub const STORED_PUBLIC_KEY_LEN: usize = SALT_HEX_LEN + PUBLIC_KEY_HEX_LEN;
