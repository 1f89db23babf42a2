use chrono::{Duration, Utc};
use vault_core::crypto::{StoredPublicKey, STORED_PUBLIC_KEY_LEN};
use vault_core::{
    sign_challenge, verify_challenge_response, verify_signature, Challenge, RejectReason,
    Verification,
};

use crate::app::AppContext;
use crate::cli::{ChallengeArgs, SignArgs, VerifyArgs};
use crate::errors::CliError;
use crate::helpers::parse_datetime;
use crate::output::{verification_json, Report};
use crate::ui::Spinner;

pub fn handle_challenge(ctx: &AppContext, args: &ChallengeArgs) -> anyhow::Result<()> {
    let ui = ctx.ui_context();
    let ttl = match args.ttl {
        Some(ttl) => ttl,
        None => ctx.config()?.challenge.ttl_seconds,
    };
    if ttl <= 0 {
        return Err(CliError::invalid_input("Challenge lifetime must be positive").into());
    }

    let challenge = Challenge::issue(Duration::seconds(ttl));
    let expires = challenge.expires_at.to_rfc3339();

    Report::new(
        "Challenge issued",
        serde_json::to_value(&challenge).map_err(|e| anyhow::anyhow!("JSON error: {}", e))?,
    )
    .item("Challenge", challenge.value.clone())
    .item("Expires", expires)
    .primary(challenge.value.clone())
    .emit(&ui, ctx.quiet())
}

pub fn handle_sign(ctx: &AppContext, args: &SignArgs) -> anyhow::Result<()> {
    let ui = ctx.ui_context();
    let password = ctx.password()?;

    let signature = Spinner::run(&ui, "Signing", || {
        sign_challenge(&args.challenge, &password, args.salt.trim())
    })
    .map_err(|e| CliError::invalid_input(e.to_string()))?;

    Report::new("Challenge signed", serde_json::json!({ "signature": signature }))
        .item("Signature", signature.clone())
        .primary(signature)
        .emit(&ui, ctx.quiet())
}

/// Check a signature against a stored (162-char) or bare (130-char) public key.
///
/// With `--expires` the full server-side check runs, expiry first.
fn verify(args: &VerifyArgs) -> anyhow::Result<Verification> {
    let public_key = args.public_key.trim();
    let signature = args.signature.trim();

    if let Some(expires) = args.expires.as_deref() {
        let expires_at =
            parse_datetime(expires).map_err(|e| CliError::invalid_input(e.to_string()))?;
        let challenge = Challenge::new(args.challenge.as_str(), expires_at);
        return Ok(verify_challenge_response(
            public_key,
            &challenge,
            signature,
            Utc::now(),
        ));
    }

    let verified = if public_key.len() == STORED_PUBLIC_KEY_LEN {
        match StoredPublicKey::parse(public_key) {
            Ok(key) => key.verify(&args.challenge, signature),
            Err(_) => return Ok(Verification::Rejected(RejectReason::MalformedPublicKey)),
        }
    } else {
        verify_signature(public_key, &args.challenge, signature)
    };

    Ok(if verified {
        Verification::Verified
    } else {
        Verification::Rejected(RejectReason::BadSignature)
    })
}

pub fn handle_verify(ctx: &AppContext, args: &VerifyArgs) -> anyhow::Result<()> {
    let ui = ctx.ui_context();
    let outcome = verify(args)?;

    match outcome {
        Verification::Verified => Report::new("Signature verified", verification_json(&outcome))
            .item("Verified", "true")
            .primary("verified")
            .emit(&ui, ctx.quiet()),
        Verification::Rejected(reason) => {
            if ui.mode.is_json() {
                crate::output::print_json(&verification_json(&outcome))?;
            }
            Err(CliError::auth_failed(format!("Signature rejected: {}", reason)).into())
        }
    }
}
