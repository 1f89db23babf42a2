//! Input and parsing helper functions for the CLI.

use std::io::{self, IsTerminal, Read};
use std::path::Path;

use chrono::{DateTime, Utc};
use dialoguer::Password;
use zeroize::Zeroizing;

use crate::constants::env_vars;

fn password_from_env() -> Option<Zeroizing<String>> {
    let value = Zeroizing::new(std::env::var(env_vars::PASSWORD).ok()?);
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Read the master password from `VAULT_PASSWORD`, or prompt for it.
pub fn prompt_password(interactive: bool) -> anyhow::Result<Zeroizing<String>> {
    if let Some(value) = password_from_env() {
        return Ok(value);
    }
    if !interactive {
        return Err(anyhow::anyhow!(
            "No password provided and no TTY available. Set {}.",
            env_vars::PASSWORD
        ));
    }
    Password::new()
        .with_prompt("Master password")
        .allow_empty_password(true)
        .interact()
        .map(Zeroizing::new)
        .map_err(|e| anyhow::anyhow!("Failed to read password: {}", e))
}

/// Read a new master password and its confirmation.
///
/// The two values are returned separately so the policy check can report a
/// mismatch alongside every other failure. With `VAULT_PASSWORD` set the
/// confirmation is the same value.
pub fn prompt_new_password(
    interactive: bool,
) -> anyhow::Result<(Zeroizing<String>, Zeroizing<String>)> {
    if let Some(value) = password_from_env() {
        let confirm = value.clone();
        return Ok((value, confirm));
    }
    if !interactive {
        return Err(anyhow::anyhow!(
            "No password provided and no TTY available. Set {}.",
            env_vars::PASSWORD
        ));
    }
    let password = Password::new()
        .with_prompt("New master password")
        .allow_empty_password(true)
        .interact()
        .map(Zeroizing::new)
        .map_err(|e| anyhow::anyhow!("Failed to read password: {}", e))?;
    let confirm = Password::new()
        .with_prompt("Confirm master password")
        .allow_empty_password(true)
        .interact()
        .map(Zeroizing::new)
        .map_err(|e| anyhow::anyhow!("Failed to read password: {}", e))?;
    Ok((password, confirm))
}

/// Use `value` when given, otherwise read all of stdin verbatim.
pub fn read_value_or_stdin(value: Option<&str>, what: &str) -> anyhow::Result<String> {
    if let Some(value) = value {
        return Ok(value.to_string());
    }
    if io::stdin().is_terminal() {
        return Err(anyhow::anyhow!(
            "No {} provided. Pass it as an argument or pipe it on stdin.",
            what
        ));
    }
    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .map_err(|e| anyhow::anyhow!("Failed to read stdin: {}", e))?;
    Ok(buffer)
}

/// Parse an RFC 3339 timestamp.
pub fn parse_datetime(value: &str) -> anyhow::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|parsed| parsed.with_timezone(&Utc))
        .map_err(|_| anyhow::anyhow!("Invalid timestamp (expected RFC 3339): {}", value))
}

/// Guess a MIME type from a file extension.
pub fn guess_filetype(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match extension.as_deref() {
        Some("txt") | Some("md") => "text/plain",
        Some("json") => "application/json",
        Some("pdf") => "application/pdf",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("csv") => "text/csv",
        Some("zip") => "application/zip",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_datetime() {
        let parsed = parse_datetime("2024-05-01T12:00:00Z").unwrap();
        assert_eq!(parsed.to_rfc3339(), "2024-05-01T12:00:00+00:00");
        assert!(parse_datetime("2024-05-01T12:00:00+02:00").is_ok());
        assert!(parse_datetime("yesterday").is_err());
    }

    #[test]
    fn test_guess_filetype() {
        assert_eq!(guess_filetype(Path::new("a/report.PDF")), "application/pdf");
        assert_eq!(guess_filetype(Path::new("notes.md")), "text/plain");
        assert_eq!(guess_filetype(Path::new("blob")), "application/octet-stream");
    }
}
