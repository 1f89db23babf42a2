//! Store traits consumed by the unlock flow.

use uuid::Uuid;

use super::types::UserRecord;
use crate::challenge::Challenge;
use crate::error::Result;

/// Persistence for user records.
///
/// Implementations treat `public_key` and `totp_secret` as opaque strings.
pub trait UserStore {
    /// Look up a user. `Ok(None)` if the id is unknown.
    fn get_user(&self, id: Uuid) -> Result<Option<UserRecord>>;

    /// Insert or replace a user record.
    fn upsert_user(&mut self, user: UserRecord) -> Result<()>;

    /// Set the stored public key for an existing user.
    ///
    /// # Errors
    ///
    /// Returns `VaultError::NotFound` if the user does not exist.
    fn set_public_key(&mut self, id: Uuid, public_key: &str) -> Result<()>;
}

/// Persistence for outstanding challenges, one per user.
pub trait ChallengeStore {
    /// Store a challenge, replacing any previous one for the user.
    fn put_challenge(&mut self, user_id: Uuid, challenge: Challenge) -> Result<()>;

    /// The outstanding challenge, if any, without consuming it.
    fn active_challenge(&self, user_id: Uuid) -> Result<Option<Challenge>>;

    /// Remove and return the outstanding challenge.
    fn take_challenge(&mut self, user_id: Uuid) -> Result<Option<Challenge>>;
}
