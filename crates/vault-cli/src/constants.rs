//! Constants used throughout the CLI.

/// Exit codes for the CLI.
///
/// - 0: Success
/// - 1: General error (unhandled `anyhow` errors)
/// - 2: Usage error (reported by clap)
/// - 3+: Application-specific errors
pub mod exit_codes {
    /// Input file or config not found.
    pub const NOT_FOUND: i32 = 3;

    /// Invalid user input, including a password that fails the policy.
    pub const INVALID_INPUT: i32 = 4;

    /// Could not unlock: wrong password, tampered data, or a rejected signature.
    pub const AUTH_FAILED: i32 = 5;
}

/// Environment variables read by the CLI.
pub mod env_vars {
    /// Master password for non-interactive use.
    pub const PASSWORD: &str = "VAULT_PASSWORD";

    /// Explicit config file path.
    pub const CONFIG: &str = "VAULT_CONFIG";

    /// Log filter (tracing `EnvFilter` syntax).
    pub const LOG: &str = "VAULT_LOG";
}
