//! Stored records handed to collaborators.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::crypto::{decrypt_text, encrypt_text};
use crate::error::Result;

/// A user as seen by the unlock flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: Uuid,

    /// `hex(salt) ‖ hex(public key)` (162 chars), or `None` until the master
    /// password is set
    pub public_key: Option<String>,

    /// TOTP secret as an encrypted envelope wire string
    pub totp_secret: Option<String>,
}

impl UserRecord {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            public_key: None,
            totp_secret: None,
        }
    }

    /// Encrypt and attach a TOTP secret under the master password.
    pub fn set_totp_secret(&mut self, secret: &str, password: &str) -> Result<()> {
        self.totp_secret = Some(encrypt_text(secret, password)?);
        Ok(())
    }

    /// Decrypt the TOTP secret. `None` if absent or the password is wrong.
    pub fn totp_secret(&self, password: &str) -> Option<String> {
        decrypt_text(self.totp_secret.as_deref()?, password)
    }
}

impl Default for UserRecord {
    fn default() -> Self {
        Self::new()
    }
}
