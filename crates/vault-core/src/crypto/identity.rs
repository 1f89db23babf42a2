//! Password-derived secp256k1 identity.
//!
//! The user's EC keypair is never generated at random and never stored. It is
//! recomputed from (master password, salt) whenever it is needed:
//!
//! ```text
//! password ─┐
//!           ├─► PBKDF2 (60000 rounds) ─► 32 bytes ─► scalar mod n ─► secp256k1 keypair
//! salt ─────┘
//! ```
//!
//! The server stores `hex(salt) ‖ hex(uncompressed public key)` (162 chars).
//! To unlock, the client re-derives the private key from the password and the
//! stored salt and signs SHA-256(challenge); the server verifies against the
//! stored public key. Neither the password nor the private key leaves the
//! client.

use k256::ecdsa::signature::hazmat::{PrehashSigner, PrehashVerifier};
use k256::ecdsa::{Signature, SigningKey, VerifyingKey};
use k256::elliptic_curve::ops::Reduce;
use k256::{FieldBytes, NonZeroScalar, Scalar, U256};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use zeroize::Zeroize;

use super::envelope::split_prefix;
use super::kdf::derive_key;
use super::salt::Salt;
use super::{PUBLIC_KEY_HEX_LEN, SALT_HEX_LEN, STORED_PUBLIC_KEY_LEN};
use crate::error::{Result, VaultError};

/// A secp256k1 keypair derived from (password, salt).
///
/// Lives for a single operation. The secret scalar is zeroized on drop.
pub struct KeyPair {
    signing_key: SigningKey,
}

impl KeyPair {
    /// Re-derive the keypair for `password` and `salt`.
    ///
    /// The PBKDF2 output is reduced modulo the curve order to form the
    /// private scalar.
    pub fn derive(password: &str, salt: &Salt) -> Result<Self> {
        let key = derive_key(password, salt);
        let mut bytes = FieldBytes::clone_from_slice(key.as_bytes());
        let scalar = <Scalar as Reduce<U256>>::reduce_bytes(&bytes);
        bytes.as_mut_slice().zeroize();

        let secret = Option::<NonZeroScalar>::from(NonZeroScalar::new(scalar))
            .ok_or_else(|| VaultError::Crypto("Derived private key is zero".to_string()))?;

        Ok(Self {
            signing_key: SigningKey::from(secret),
        })
    }

    /// Uncompressed SEC1 public key as hex (130 characters).
    pub fn public_key_hex(&self) -> String {
        let point = self.signing_key.verifying_key().to_encoded_point(false);
        hex::encode(point.as_bytes())
    }

    /// Sign SHA-256(`message`) and return the DER signature as hex.
    pub fn sign(&self, message: &str) -> Result<String> {
        let digest = Sha256::digest(message.as_bytes());
        let signature: Signature = self
            .signing_key
            .sign_prehash(&digest)
            .map_err(|e| VaultError::Crypto(format!("Signing failed: {}", e)))?;
        Ok(hex::encode(signature.to_der().as_bytes()))
    }
}

impl std::fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyPair")
            .field("public_key", &self.public_key_hex())
            .field("private_key", &"[REDACTED]")
            .finish()
    }
}

/// Result of splitting a stored public key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaltAndPublicKey {
    pub salt: String,
    #[serde(rename = "publicKey")]
    pub public_key: String,
}

/// Build the stored public key for `password` under an explicit salt.
pub fn stored_public_key_for(password: &str, salt: &Salt) -> Result<String> {
    let keypair = KeyPair::derive(password, salt)?;
    Ok(format!("{}{}", salt.to_hex(), keypair.public_key_hex()))
}

/// Generate the "master password public key" for server-side storage.
///
/// Draws a fresh salt, derives the keypair and returns
/// `hex(salt) ‖ hex(uncompressed public key)`, always 162 characters.
pub fn generate_public_key(password: &str) -> Result<String> {
    let salt = Salt::random();
    let stored = stored_public_key_for(password, &salt)?;
    tracing::debug!("generated master password public key");
    Ok(stored)
}

/// Split a stored public key into its salt and public key parts.
///
/// Permissive: only the 32-character salt prefix is required. Callers that
/// gate authentication on the result should use [`StoredPublicKey::parse`].
pub fn split_salt_and_public_key(stored: &str) -> Result<SaltAndPublicKey> {
    let (salt, public_key) = split_prefix(stored).ok_or_else(|| {
        VaultError::InvalidFormat(format!(
            "Stored public key must start with a {}-character salt",
            SALT_HEX_LEN
        ))
    })?;
    Ok(SaltAndPublicKey {
        salt: salt.to_string(),
        public_key: public_key.to_string(),
    })
}

/// Re-derive the keypair from (`password`, `salt_hex`) and sign `challenge`.
///
/// Returns the DER-encoded ECDSA signature over SHA-256(challenge) as hex.
pub fn sign_challenge(challenge: &str, password: &str, salt_hex: &str) -> Result<String> {
    let salt = Salt::from_hex(salt_hex)?;
    let keypair = KeyPair::derive(password, &salt)?;
    keypair.sign(challenge)
}

/// Verify a DER signature over SHA-256(`challenge`).
///
/// Accepts either S form of a signature. Returns `false` for any malformed
/// input: bad hex, a point not on the curve, or a non-DER signature.
pub fn verify_signature(public_key_hex: &str, challenge: &str, signature_hex: &str) -> bool {
    let verifying_key = match hex::decode(public_key_hex)
        .ok()
        .and_then(|bytes| VerifyingKey::from_sec1_bytes(&bytes).ok())
    {
        Some(key) => key,
        None => {
            tracing::debug!("rejecting signature: unusable public key");
            return false;
        }
    };
    verify_with_key(&verifying_key, challenge, signature_hex)
}

fn verify_with_key(verifying_key: &VerifyingKey, challenge: &str, signature_hex: &str) -> bool {
    let signature = match hex::decode(signature_hex)
        .ok()
        .and_then(|bytes| Signature::from_der(&bytes).ok())
    {
        Some(signature) => signature,
        None => {
            tracing::debug!("rejecting signature: not valid DER");
            return false;
        }
    };
    // (r, s) and (r, n - s) are both valid; the verifier only takes low-S
    let signature = signature.normalize_s().unwrap_or(signature);
    let digest = Sha256::digest(challenge.as_bytes());
    verifying_key.verify_prehash(&digest, &signature).is_ok()
}

/// A validated stored public key.
///
/// Parsing enforces the 162-character format, hex encoding and a valid curve
/// point, so it can gate authentication decisions.
#[derive(Debug, Clone)]
pub struct StoredPublicKey {
    salt: Salt,
    public_key_hex: String,
    verifying_key: VerifyingKey,
}

impl StoredPublicKey {
    pub fn parse(stored: &str) -> Result<Self> {
        if stored.len() != STORED_PUBLIC_KEY_LEN {
            return Err(VaultError::InvalidFormat(format!(
                "Stored public key must be {} characters (got {})",
                STORED_PUBLIC_KEY_LEN,
                stored.len()
            )));
        }
        let parts = split_salt_and_public_key(stored)?;
        let salt = Salt::from_hex(&parts.salt)?;

        debug_assert_eq!(parts.public_key.len(), PUBLIC_KEY_HEX_LEN);
        let point = hex::decode(&parts.public_key).map_err(|e| {
            VaultError::InvalidFormat(format!("Public key is not valid hex: {}", e))
        })?;
        let verifying_key = VerifyingKey::from_sec1_bytes(&point)
            .map_err(|_| VaultError::InvalidFormat("Public key is not a curve point".to_string()))?;

        Ok(Self {
            salt,
            public_key_hex: parts.public_key,
            verifying_key,
        })
    }

    pub fn salt(&self) -> &Salt {
        &self.salt
    }

    pub fn public_key_hex(&self) -> &str {
        &self.public_key_hex
    }

    /// Verify a challenge signature against this key. Fails closed.
    pub fn verify(&self, challenge: &str, signature_hex: &str) -> bool {
        verify_with_key(&self.verifying_key, challenge, signature_hex)
    }
}

impl std::fmt::Display for StoredPublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.salt.to_hex(), self.public_key_hex)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PASSWORD: &str = "ValidPassword123!";
    const FIXTURE: &str = "f72d66b7cadcca8f0d61028a36509d4a0412a37643851786a81c0eb869401b0c969f7b2f32839a567e08f355ab674b6cd2389bc2b607172b512486048095dbf0c4ba5949653639b2d1d062df081e58e273";

    #[test]
    fn test_public_key_is_162_chars() {
        let stored = generate_public_key(PASSWORD).unwrap();
        assert_eq!(stored.len(), STORED_PUBLIC_KEY_LEN);
        assert!(stored.chars().all(|c| c.is_ascii_hexdigit()));
        // Uncompressed SEC1 point prefix
        assert_eq!(&stored[SALT_HEX_LEN..SALT_HEX_LEN + 2], "04");
    }

    #[test]
    fn test_empty_password_still_produces_key() {
        assert_eq!(generate_public_key("").unwrap().len(), STORED_PUBLIC_KEY_LEN);
    }

    #[test]
    fn test_split_reconstructs_original() {
        let stored = generate_public_key(PASSWORD).unwrap();
        let parts = split_salt_and_public_key(&stored).unwrap();

        assert_eq!(parts.salt.len(), SALT_HEX_LEN);
        assert_eq!(parts.public_key.len(), PUBLIC_KEY_HEX_LEN);
        assert_eq!(format!("{}{}", parts.salt, parts.public_key), stored);
    }

    #[test]
    fn test_split_known_fixture() {
        let parts = split_salt_and_public_key(FIXTURE).unwrap();
        assert_eq!(parts.salt, "f72d66b7cadcca8f0d61028a36509d4a");
        assert_eq!(parts.public_key, &FIXTURE[32..]);
        assert_eq!(parts.public_key.len(), 130);
    }

    #[test]
    fn test_split_rejects_short_input() {
        assert!(split_salt_and_public_key("abc").is_err());
    }

    #[test]
    fn test_keypair_deterministic_for_same_salt() {
        let salt = Salt::from_bytes([9u8; 16]);
        let a = stored_public_key_for(PASSWORD, &salt).unwrap();
        let b = stored_public_key_for(PASSWORD, &salt).unwrap();
        assert_eq!(a, b);

        let other = stored_public_key_for("Different-Password-1!", &salt).unwrap();
        assert_ne!(a, other);
    }

    #[test]
    fn test_sign_then_verify() {
        let stored = generate_public_key(PASSWORD).unwrap();
        let parts = split_salt_and_public_key(&stored).unwrap();

        let signature = sign_challenge("challenge-123", PASSWORD, &parts.salt).unwrap();
        assert!(verify_signature(&parts.public_key, "challenge-123", &signature));
    }

    #[test]
    fn test_wrong_password_signature_rejected() {
        let stored = generate_public_key(PASSWORD).unwrap();
        let parts = split_salt_and_public_key(&stored).unwrap();

        let signature = sign_challenge("challenge-123", "Wrong-Password-9!", &parts.salt).unwrap();
        assert!(!verify_signature(&parts.public_key, "challenge-123", &signature));
    }

    #[test]
    fn test_different_challenge_rejected() {
        let stored = generate_public_key(PASSWORD).unwrap();
        let parts = split_salt_and_public_key(&stored).unwrap();

        let signature = sign_challenge("challenge-a", PASSWORD, &parts.salt).unwrap();
        assert!(!verify_signature(&parts.public_key, "challenge-b", &signature));
    }

    #[test]
    fn test_bit_flips_rejected() {
        let salt = Salt::from_bytes([3u8; 16]);
        let keypair = KeyPair::derive(PASSWORD, &salt).unwrap();
        let public_key = keypair.public_key_hex();
        let signature = hex::decode(keypair.sign("nonce").unwrap()).unwrap();

        for index in 0..signature.len() {
            for bit in [0x01u8, 0x80] {
                let mut mutated = signature.clone();
                mutated[index] ^= bit;
                assert!(
                    !verify_signature(&public_key, "nonce", &hex::encode(&mutated)),
                    "flip of bit {:#x} in byte {} verified",
                    bit,
                    index
                );
            }
        }
    }

    #[test]
    fn test_high_s_signature_accepted() {
        let salt = Salt::from_bytes([6u8; 16]);
        let keypair = KeyPair::derive(PASSWORD, &salt).unwrap();
        let public_key = keypair.public_key_hex();
        let der = hex::decode(keypair.sign("challenge-hs").unwrap()).unwrap();
        let low = Signature::from_der(&der).unwrap();

        let (r, s) = low.split_scalars();
        let high = Signature::from_scalars(r.to_bytes(), (-*s).to_bytes()).unwrap();
        assert!(low.normalize_s().is_none());
        assert!(high.normalize_s().is_some());

        let high_hex = hex::encode(high.to_der().as_bytes());
        assert!(verify_signature(&public_key, "challenge-hs", &high_hex));
        assert!(!verify_signature(&public_key, "other", &high_hex));
    }

    #[test]
    fn test_malformed_inputs_return_false() {
        let salt = Salt::from_bytes([4u8; 16]);
        let keypair = KeyPair::derive(PASSWORD, &salt).unwrap();
        let public_key = keypair.public_key_hex();
        let signature = keypair.sign("c").unwrap();

        assert!(verify_signature(&public_key, "c", &signature));
        assert!(!verify_signature("zz", "c", &signature));
        assert!(!verify_signature("", "c", &signature));
        assert!(!verify_signature(&format!("04{}", "00".repeat(64)), "c", &signature));
        assert!(!verify_signature(&public_key, "c", "not-hex"));
        assert!(!verify_signature(&public_key, "c", ""));
        assert!(!verify_signature(&public_key, "c", "3006020101020101"));
    }

    #[test]
    fn test_sign_rejects_bad_salt() {
        assert!(sign_challenge("c", PASSWORD, "short").is_err());
        assert!(sign_challenge("c", PASSWORD, &"g".repeat(32)).is_err());
    }

    #[test]
    fn test_signatures_are_der_hex() {
        let salt = Salt::from_bytes([5u8; 16]);
        let signature = KeyPair::derive(PASSWORD, &salt).unwrap().sign("x").unwrap();
        let bytes = hex::decode(&signature).unwrap();
        // DER SEQUENCE tag
        assert_eq!(bytes[0], 0x30);
        assert!(Signature::from_der(&bytes).is_ok());
    }

    #[test]
    fn test_stored_public_key_parse() {
        let stored = generate_public_key(PASSWORD).unwrap();
        let parsed = StoredPublicKey::parse(&stored).unwrap();
        assert_eq!(parsed.to_string(), stored);

        let signature = sign_challenge("abc", PASSWORD, &parsed.salt().to_hex()).unwrap();
        assert!(parsed.verify("abc", &signature));
        assert!(!parsed.verify("abd", &signature));
    }

    #[test]
    fn test_stored_public_key_rejects_bad_values() {
        let stored = generate_public_key(PASSWORD).unwrap();

        assert!(StoredPublicKey::parse(&stored[..161]).is_err());
        assert!(StoredPublicKey::parse(&format!("{}0", stored)).is_err());

        let mut not_hex = stored.clone();
        not_hex.replace_range(100..101, "z");
        assert!(StoredPublicKey::parse(&not_hex).is_err());

        let off_curve = format!("{}04{}", &stored[..SALT_HEX_LEN], "00".repeat(64));
        assert!(StoredPublicKey::parse(&off_curve).is_err());
    }

    #[test]
    fn test_keypair_debug_redacts() {
        let keypair = KeyPair::derive(PASSWORD, &Salt::from_bytes([1u8; 16])).unwrap();
        let debug_output = format!("{:?}", keypair);
        assert!(debug_output.contains("REDACTED"));
    }
}
