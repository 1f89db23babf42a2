//! Server-side challenge verification.
//!
//! A challenge is a random string with an expiry. The client signs it with
//! its password-derived key and the server checks the signature against the
//! stored public key. Expiry is checked strictly before any signature math,
//! so an expired challenge is rejected even when the signature is valid.

pub mod flow;

use chrono::{DateTime, Duration, Utc};
use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::crypto::StoredPublicKey;

pub use flow::{ChallengeRequest, UnlockFlow, UnlockState};

/// Random bytes in a generated challenge (hex-encoded to 64 chars).
pub const CHALLENGE_BYTES: usize = 32;

/// Default challenge lifetime in seconds.
pub const DEFAULT_CHALLENGE_TTL_SECS: i64 = 300;

/// An outstanding challenge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Challenge {
    pub value: String,
    pub expires_at: DateTime<Utc>,
}

impl Challenge {
    pub fn new(value: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self {
            value: value.into(),
            expires_at,
        }
    }

    /// Draw a fresh random challenge that expires `ttl` from now.
    pub fn issue(ttl: Duration) -> Self {
        Self::issue_at(Utc::now(), ttl)
    }

    pub fn issue_at(now: DateTime<Utc>, ttl: Duration) -> Self {
        let mut bytes = [0u8; CHALLENGE_BYTES];
        OsRng.fill_bytes(&mut bytes);
        Self {
            value: hex::encode(bytes),
            expires_at: now + ttl,
        }
    }

    /// A challenge is expired from its `expires_at` instant onward.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Why a response was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    Expired,
    MalformedPublicKey,
    BadSignature,
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            RejectReason::Expired => "challenge expired",
            RejectReason::MalformedPublicKey => "stored public key is malformed",
            RejectReason::BadSignature => "signature did not verify",
        };
        f.write_str(text)
    }
}

/// Outcome of checking a challenge response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum Verification {
    Verified,
    Rejected(RejectReason),
}

impl Verification {
    pub fn is_verified(&self) -> bool {
        matches!(self, Verification::Verified)
    }
}

/// Check a signed challenge against a stored public key.
///
/// Order: expiry, stored key format, signature. Only a response that passes
/// all three is `Verified`.
pub fn verify_challenge_response(
    stored_public_key: &str,
    challenge: &Challenge,
    signature_hex: &str,
    now: DateTime<Utc>,
) -> Verification {
    if challenge.is_expired_at(now) {
        tracing::debug!("challenge rejected: expired");
        return Verification::Rejected(RejectReason::Expired);
    }

    let key = match StoredPublicKey::parse(stored_public_key) {
        Ok(key) => key,
        Err(_) => {
            tracing::debug!("challenge rejected: malformed stored public key");
            return Verification::Rejected(RejectReason::MalformedPublicKey);
        }
    };

    if key.verify(&challenge.value, signature_hex) {
        tracing::debug!("challenge verified");
        Verification::Verified
    } else {
        tracing::debug!("challenge rejected: bad signature");
        Verification::Rejected(RejectReason::BadSignature)
    }
}
