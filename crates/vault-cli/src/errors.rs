//! CLI error types that map to exit codes.

use std::fmt;

/// CLI-specific errors with associated exit codes.
#[derive(Debug)]
pub enum CliError {
    /// Input file or config not found
    NotFound { message: String, hint: String },

    /// Could not unlock or verify
    AuthFailed {
        message: String,
        hint: Option<String>,
    },

    /// Invalid user input
    InvalidInput(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::NotFound { message, hint } => write!(f, "{}\n{}", message, hint),
            CliError::AuthFailed { message, hint } => match hint {
                Some(h) => write!(f, "{}\n{}", message, h),
                None => write!(f, "{}", message),
            },
            CliError::InvalidInput(message) => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for CliError {}

impl CliError {
    pub fn not_found(message: impl Into<String>, hint: impl Into<String>) -> Self {
        CliError::NotFound {
            message: message.into(),
            hint: hint.into(),
        }
    }

    pub fn auth_failed(message: impl Into<String>) -> Self {
        CliError::AuthFailed {
            message: message.into(),
            hint: None,
        }
    }

    pub fn auth_failed_with_hint(message: impl Into<String>, hint: impl Into<String>) -> Self {
        CliError::AuthFailed {
            message: message.into(),
            hint: Some(hint.into()),
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        CliError::InvalidInput(message.into())
    }

    /// Get the exit code for this error.
    pub fn exit_code(&self) -> i32 {
        use super::constants::exit_codes;
        match self {
            CliError::NotFound { .. } => exit_codes::NOT_FOUND,
            CliError::AuthFailed { .. } => exit_codes::AUTH_FAILED,
            CliError::InvalidInput(_) => exit_codes::INVALID_INPUT,
        }
    }

    /// Split the display text into message and optional hint line.
    pub fn message_and_hint(&self) -> (String, Option<String>) {
        match self {
            CliError::NotFound { message, hint } => (message.clone(), Some(hint.clone())),
            CliError::AuthFailed { message, hint } => (message.clone(), hint.clone()),
            CliError::InvalidInput(message) => match message.find("\nHint:") {
                Some(idx) => (message[..idx].to_string(), Some(message[idx + 1..].to_string())),
                None => (message.clone(), None),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::exit_codes;

    #[test]
    fn test_exit_codes() {
        assert_eq!(
            CliError::not_found("missing", "Hint: x").exit_code(),
            exit_codes::NOT_FOUND
        );
        assert_eq!(
            CliError::auth_failed("nope").exit_code(),
            exit_codes::AUTH_FAILED
        );
        assert_eq!(
            CliError::invalid_input("bad").exit_code(),
            exit_codes::INVALID_INPUT
        );
    }

    #[test]
    fn test_display_includes_hint() {
        let err = CliError::auth_failed_with_hint("Could not unlock", "Hint: check password");
        assert_eq!(err.to_string(), "Could not unlock\nHint: check password");
    }

    #[test]
    fn test_inline_hint_split() {
        let err = CliError::invalid_input("Config exists\nHint: Use --force.");
        let (message, hint) = err.message_and_hint();
        assert_eq!(message, "Config exists");
        assert_eq!(hint.as_deref(), Some("Hint: Use --force."));
    }

    #[test]
    fn test_downcast_through_anyhow() {
        let err: anyhow::Error = CliError::invalid_input("bad").into();
        let cli = err.downcast_ref::<CliError>().unwrap();
        assert_eq!(cli.exit_code(), exit_codes::INVALID_INPUT);
    }
}
