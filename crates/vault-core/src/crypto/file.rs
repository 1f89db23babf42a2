//! Encryption of file attachments.
//!
//! Files use the same derivation and cipher as text, but travel as structured
//! records: the salt, filename and filetype are separate fields rather than
//! being concatenated into one string.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

use super::cipher::{decrypt_bytes, encrypt_bytes};
use super::envelope::Envelope;
use super::salt::Salt;
use crate::error::{Result, VaultError};

/// Upload cap for attachments (10 MiB).
///
/// Enforced by callers before [`encrypt_file`]; the cipher itself has no limit.
pub const MAX_FILE_SIZE: usize = 10 * 1024 * 1024;

/// An encrypted attachment as handed to file storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedFile {
    /// base64(nonce ‖ ciphertext ‖ tag)
    pub ciphertext: String,
    /// Hex salt (32 characters)
    pub salt: String,
    pub filename: String,
    pub filetype: String,
}

impl EncryptedFile {
    /// Pretty JSON for writing a record to disk.
    pub fn to_json(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec_pretty(self)?)
    }

    /// Parse a record previously written with [`EncryptedFile::to_json`].
    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

/// Check an attachment against a size cap.
///
/// `max` is the caller's policy; it is clamped to [`MAX_FILE_SIZE`].
pub fn ensure_file_size(size: usize, max: usize) -> Result<()> {
    let max = max.min(MAX_FILE_SIZE);
    if size > max {
        return Err(VaultError::FileTooLarge { size, max });
    }
    Ok(())
}

/// Encrypt a file buffer under the master password.
pub fn encrypt_file(
    contents: &[u8],
    filename: &str,
    filetype: &str,
    password: &str,
) -> Result<EncryptedFile> {
    let envelope = encrypt_bytes(contents, password)?;
    tracing::debug!(bytes = contents.len(), filetype, "encrypted file");
    Ok(EncryptedFile {
        ciphertext: STANDARD.encode(&envelope.ciphertext),
        salt: envelope.salt.to_hex(),
        filename: filename.to_string(),
        filetype: filetype.to_string(),
    })
}

/// Decrypt a file record.
///
/// Returns `None` for a wrong password or any malformed field.
pub fn decrypt_file(file: &EncryptedFile, password: &str) -> Option<Vec<u8>> {
    let salt = Salt::from_hex(&file.salt).ok()?;
    let ciphertext = STANDARD.decode(&file.ciphertext).ok()?;
    decrypt_bytes(&Envelope::new(salt, ciphertext), password)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::SALT_HEX_LEN;

    const PASSWORD: &str = "File-Password-123!";

    #[test]
    fn test_file_round_trip() {
        let contents = b"%PDF-1.7 fake document bytes";
        let encrypted = encrypt_file(contents, "report.pdf", "application/pdf", PASSWORD).unwrap();

        assert_eq!(encrypted.filename, "report.pdf");
        assert_eq!(encrypted.filetype, "application/pdf");
        assert_eq!(encrypted.salt.len(), SALT_HEX_LEN);

        let decrypted = decrypt_file(&encrypted, PASSWORD).unwrap();
        assert_eq!(decrypted, contents);
    }

    #[test]
    fn test_wrong_password_yields_none() {
        let encrypted = encrypt_file(b"bytes", "a.bin", "application/octet-stream", PASSWORD)
            .unwrap();
        assert_eq!(decrypt_file(&encrypted, "Wrong-Password-123!"), None);
    }

    #[test]
    fn test_malformed_fields_yield_none() {
        let encrypted = encrypt_file(b"bytes", "a.bin", "application/octet-stream", PASSWORD)
            .unwrap();

        let mut bad_salt = encrypted.clone();
        bad_salt.salt = "nothex".to_string();
        assert_eq!(decrypt_file(&bad_salt, PASSWORD), None);

        let mut bad_ciphertext = encrypted;
        bad_ciphertext.ciphertext = "%%%".to_string();
        assert_eq!(decrypt_file(&bad_ciphertext, PASSWORD), None);
    }

    #[test]
    fn test_binary_contents_round_trip() {
        let contents: Vec<u8> = (0..=255u8).cycle().take(4096).collect();
        let encrypted = encrypt_file(&contents, "blob", "application/octet-stream", PASSWORD)
            .unwrap();
        assert_eq!(decrypt_file(&encrypted, PASSWORD).unwrap(), contents);
    }

    #[test]
    fn test_json_shape() {
        let encrypted = encrypt_file(b"x", "n.txt", "text/plain", PASSWORD).unwrap();
        let value = serde_json::to_value(&encrypted).unwrap();
        for field in ["ciphertext", "salt", "filename", "filetype"] {
            assert!(value.get(field).is_some(), "missing field {}", field);
        }
        let back: EncryptedFile = serde_json::from_value(value).unwrap();
        assert_eq!(back, encrypted);
    }

    #[test]
    fn test_record_json_helpers() {
        let encrypted = encrypt_file(b"x", "n.txt", "text/plain", PASSWORD).unwrap();
        let bytes = encrypted.to_json().unwrap();
        assert_eq!(EncryptedFile::from_json(&bytes).unwrap(), encrypted);

        assert!(matches!(
            EncryptedFile::from_json(b"{\"salt\": 1}"),
            Err(VaultError::Json { .. })
        ));
    }

    #[test]
    fn test_size_cap() {
        assert!(ensure_file_size(MAX_FILE_SIZE, MAX_FILE_SIZE).is_ok());
        assert!(matches!(
            ensure_file_size(MAX_FILE_SIZE + 1, MAX_FILE_SIZE),
            Err(VaultError::FileTooLarge { .. })
        ));
        // Policy can lower the cap but never raise it
        assert!(ensure_file_size(2048, 1024).is_err());
        assert!(ensure_file_size(MAX_FILE_SIZE + 1, usize::MAX).is_err());
    }
}
