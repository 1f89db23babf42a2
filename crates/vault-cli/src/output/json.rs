//! JSON output formatting.

use vault_core::{RejectReason, Verification};

/// Print a JSON value to stdout.
pub fn print_json(value: &serde_json::Value) -> anyhow::Result<()> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| anyhow::anyhow!("JSON error: {}", e))?;
    println!("{}", text);
    Ok(())
}

/// JSON for a verification outcome.
pub fn verification_json(outcome: &Verification) -> serde_json::Value {
    let reason: Option<RejectReason> = match outcome {
        Verification::Verified => None,
        Verification::Rejected(reason) => Some(*reason),
    };
    serde_json::json!({
        "verified": outcome.is_verified(),
        "reason": reason,
    })
}
