//! # Vault Core
//!
//! Client-side cryptography for a zero-knowledge password vault.
//!
//! Everything is derived from the master password and a per-value random
//! salt. Record fields and attachments are encrypted under a key the server
//! never sees, and the login "unlock" step proves knowledge of the password
//! by signing a server challenge with a password-derived secp256k1 key.
//!
//! ## Architecture
//!
//! - **crypto**: key derivation, salts, envelopes, symmetric encryption,
//!   file encryption and the password-derived identity
//! - **password**: master password policy
//! - **challenge**: challenge verification and the unlock state machine
//! - **store**: user and challenge store contracts, plus an in-memory store
//! - **fs**: atomic writes for encrypted blobs

pub mod challenge;
pub mod crypto;
pub mod error;
pub mod fs;
pub mod password;
pub mod store;

pub use challenge::{
    verify_challenge_response, Challenge, RejectReason, UnlockFlow, UnlockState, Verification,
};
pub use crypto::{
    decrypt_file, decrypt_text, encrypt_file, encrypt_text, generate_public_key, sign_challenge,
    split_salt_and_public_key, verify_signature, EncryptedFile, Envelope,
};
pub use error::{Result, VaultError};
pub use password::{validate_password, PasswordValidation};
pub use store::{ChallengeStore, MemoryStore, UserRecord, UserStore};

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
