//! Error types for vault core operations.
//!
//! Fail-closed operations (`decrypt_text`, `decrypt_file`, `verify_signature`)
//! never surface these errors: they return `None` or `false` so callers cannot
//! tell a wrong password apart from corrupted ciphertext. `VaultError` covers
//! caller misuse, wire-format problems, state-machine misuse and I/O.

use thiserror::Error;

/// Result type alias for vault operations.
pub type Result<T> = std::result::Result<T, VaultError>;

/// Core error type for vault operations.
#[derive(Debug, Error)]
pub enum VaultError {
    /// Encryption, key derivation or signing failure
    #[error("Crypto error: {0}")]
    Crypto(String),

    /// Invalid argument supplied by the caller
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Malformed envelope, salt, public key or other wire value
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// Operation not allowed in the current unlock state
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// File exceeds the upload cap
    #[error("File too large: {size} bytes (max {max} bytes)")]
    FileTooLarge { size: usize, max: usize },

    /// I/O error
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// JSON serialization/deserialization error
    #[error("JSON error: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_too_large_message() {
        let err = VaultError::FileTooLarge {
            size: 11,
            max: 10,
        };
        assert_eq!(err.to_string(), "File too large: 11 bytes (max 10 bytes)");
    }

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: VaultError = io.into();
        assert!(matches!(err, VaultError::Io { .. }));
    }

    #[test]
    fn test_json_error_converts() {
        let err: VaultError = serde_json::from_str::<u8>("nope").unwrap_err().into();
        assert!(matches!(err, VaultError::Json { .. }));
        assert!(err.to_string().starts_with("JSON error:"));
    }
}
