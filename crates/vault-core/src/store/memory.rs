//! In-memory store.

use std::collections::HashMap;

use uuid::Uuid;

use super::traits::{ChallengeStore, UserStore};
use super::types::UserRecord;
use crate::challenge::Challenge;
use crate::error::{Result, VaultError};

/// `HashMap`-backed [`UserStore`] and [`ChallengeStore`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    users: HashMap<Uuid, UserRecord>,
    challenges: HashMap<Uuid, Challenge>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }
}

impl UserStore for MemoryStore {
    fn get_user(&self, id: Uuid) -> Result<Option<UserRecord>> {
        Ok(self.users.get(&id).cloned())
    }

    fn upsert_user(&mut self, user: UserRecord) -> Result<()> {
        self.users.insert(user.id, user);
        Ok(())
    }

    fn set_public_key(&mut self, id: Uuid, public_key: &str) -> Result<()> {
        let user = self
            .users
            .get_mut(&id)
            .ok_or_else(|| VaultError::NotFound(format!("User {}", id)))?;
        user.public_key = Some(public_key.to_string());
        Ok(())
    }
}

impl ChallengeStore for MemoryStore {
    fn put_challenge(&mut self, user_id: Uuid, challenge: Challenge) -> Result<()> {
        self.challenges.insert(user_id, challenge);
        Ok(())
    }

    fn active_challenge(&self, user_id: Uuid) -> Result<Option<Challenge>> {
        Ok(self.challenges.get(&user_id).cloned())
    }

    fn take_challenge(&mut self, user_id: Uuid) -> Result<Option<Challenge>> {
        Ok(self.challenges.remove(&user_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_upsert_and_get() {
        let mut store = MemoryStore::new();
        let user = UserRecord::new();
        store.upsert_user(user.clone()).unwrap();

        assert_eq!(store.get_user(user.id).unwrap(), Some(user));
        assert_eq!(store.get_user(Uuid::new_v4()).unwrap(), None);
        assert_eq!(store.user_count(), 1);
    }

    #[test]
    fn test_set_public_key_requires_user() {
        let mut store = MemoryStore::new();
        let err = store.set_public_key(Uuid::new_v4(), "key").unwrap_err();
        assert!(matches!(err, VaultError::NotFound(_)));
    }

    #[test]
    fn test_set_public_key_updates_record() {
        let mut store = MemoryStore::new();
        let user = UserRecord::new();
        store.upsert_user(user.clone()).unwrap();
        store.set_public_key(user.id, "abc").unwrap();

        let loaded = store.get_user(user.id).unwrap().unwrap();
        assert_eq!(loaded.public_key.as_deref(), Some("abc"));
    }

    #[test]
    fn test_challenge_replace_and_take() {
        let mut store = MemoryStore::new();
        let user_id = Uuid::new_v4();
        let first = Challenge::issue(Duration::seconds(60));
        let second = Challenge::issue(Duration::seconds(60));

        store.put_challenge(user_id, first).unwrap();
        store.put_challenge(user_id, second.clone()).unwrap();
        assert_eq!(store.active_challenge(user_id).unwrap(), Some(second.clone()));

        assert_eq!(store.take_challenge(user_id).unwrap(), Some(second));
        assert_eq!(store.take_challenge(user_id).unwrap(), None);
        assert_eq!(store.active_challenge(user_id).unwrap(), None);
    }
}
