//! Unlock state machine.
//!
//! ```text
//! NoPublicKey ──register_public_key──► PublicKeySet
//! PublicKeySet ──request_challenge──► ChallengeIssued(expires_at)
//! ChallengeIssued ──submit_signature──► Verified | Rejected ──► PublicKeySet
//! ```
//!
//! A challenge is consumed by `submit_signature` whatever the outcome, so a
//! signature can never be replayed. Requesting a new challenge replaces the
//! outstanding one.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{verify_challenge_response, Challenge, Verification, DEFAULT_CHALLENGE_TTL_SECS};
use crate::crypto::StoredPublicKey;
use crate::error::{Result, VaultError};
use crate::store::{ChallengeStore, UserStore};

/// Where a user is in the unlock flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum UnlockState {
    NoPublicKey,
    PublicKeySet,
    ChallengeIssued { expires_at: DateTime<Utc> },
}

/// What the client needs to answer a challenge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeRequest {
    pub challenge: Challenge,
    /// Hex salt from the stored public key, for re-deriving the signing key
    pub salt: String,
}

/// Drives the unlock flow over a user store and a challenge store.
pub struct UnlockFlow<S> {
    store: S,
    ttl: Duration,
}

impl<S: UserStore + ChallengeStore> UnlockFlow<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            ttl: Duration::seconds(DEFAULT_CHALLENGE_TTL_SECS),
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Current state for `user_id`.
    pub fn state(&self, user_id: Uuid) -> Result<UnlockState> {
        self.state_at(user_id, Utc::now())
    }

    /// State as of `now`. An expired challenge counts as no challenge.
    pub fn state_at(&self, user_id: Uuid, now: DateTime<Utc>) -> Result<UnlockState> {
        let user = self
            .store
            .get_user(user_id)?
            .ok_or_else(|| VaultError::NotFound(format!("User {}", user_id)))?;

        if user.public_key.is_none() {
            return Ok(UnlockState::NoPublicKey);
        }

        match self.store.active_challenge(user_id)? {
            Some(challenge) if !challenge.is_expired_at(now) => Ok(UnlockState::ChallengeIssued {
                expires_at: challenge.expires_at,
            }),
            _ => Ok(UnlockState::PublicKeySet),
        }
    }

    /// Store the public key produced when the master password is set.
    ///
    /// The key is validated before it is stored. Any outstanding challenge
    /// is discarded since it was issued against the old key.
    pub fn register_public_key(&mut self, user_id: Uuid, stored_public_key: &str) -> Result<()> {
        StoredPublicKey::parse(stored_public_key)?;
        self.store.set_public_key(user_id, stored_public_key)?;
        self.store.take_challenge(user_id)?;
        tracing::debug!(%user_id, "public key registered");
        Ok(())
    }

    /// Issue a challenge for `user_id`.
    pub fn request_challenge(&mut self, user_id: Uuid) -> Result<ChallengeRequest> {
        self.request_challenge_at(user_id, Utc::now())
    }

    pub fn request_challenge_at(
        &mut self,
        user_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<ChallengeRequest> {
        let stored = self.stored_public_key(user_id)?;
        let salt = StoredPublicKey::parse(&stored)
            .map(|key| key.salt().to_hex())
            .map_err(|_| {
                VaultError::InvalidState(format!("User {} has a malformed public key", user_id))
            })?;

        let challenge = Challenge::issue_at(now, self.ttl);
        self.store.put_challenge(user_id, challenge.clone())?;
        tracing::debug!(%user_id, expires_at = %challenge.expires_at, "challenge issued");

        Ok(ChallengeRequest { challenge, salt })
    }

    /// Check the signature for the outstanding challenge and consume it.
    ///
    /// # Errors
    ///
    /// Returns `VaultError::InvalidState` if no challenge is outstanding.
    /// A bad or late signature is not an error; it yields
    /// `Verification::Rejected`.
    pub fn submit_signature(&mut self, user_id: Uuid, signature_hex: &str) -> Result<Verification> {
        self.submit_signature_at(user_id, signature_hex, Utc::now())
    }

    pub fn submit_signature_at(
        &mut self,
        user_id: Uuid,
        signature_hex: &str,
        now: DateTime<Utc>,
    ) -> Result<Verification> {
        let stored = self.stored_public_key(user_id)?;
        let challenge = self.store.take_challenge(user_id)?.ok_or_else(|| {
            VaultError::InvalidState(format!("No challenge outstanding for user {}", user_id))
        })?;

        let outcome = verify_challenge_response(&stored, &challenge, signature_hex, now);
        tracing::debug!(%user_id, verified = outcome.is_verified(), "signature submitted");
        Ok(outcome)
    }

    fn stored_public_key(&self, user_id: Uuid) -> Result<String> {
        let user = self
            .store
            .get_user(user_id)?
            .ok_or_else(|| VaultError::NotFound(format!("User {}", user_id)))?;
        user.public_key.ok_or_else(|| {
            VaultError::InvalidState(format!("User {} has no public key", user_id))
        })
    }
}
