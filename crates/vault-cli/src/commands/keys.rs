use vault_core::crypto::split_salt_and_public_key;
use vault_core::{generate_public_key, validate_password};

use crate::app::AppContext;
use crate::cli::SplitKeyArgs;
use crate::errors::CliError;
use crate::output::{password_report, Report};
use crate::ui::Spinner;

pub fn handle_keygen(ctx: &AppContext) -> anyhow::Result<()> {
    let ui = ctx.ui_context();
    let (password, confirm) = ctx.new_password()?;

    let validation = validate_password(&password, &confirm);
    if !validation.is_valid {
        if !ui.mode.is_json() {
            eprintln!("{}", password_report(&ui, &validation));
        }
        return Err(CliError::invalid_input(format!(
            "Password does not meet the policy: {}",
            validation.errors.join("; ")
        ))
        .into());
    }

    let stored = Spinner::run(&ui, "Deriving key", || generate_public_key(&password))?;
    let parts = split_salt_and_public_key(&stored)?;

    Report::new(
        "Public key generated",
        serde_json::json!({
            "storedPublicKey": stored,
            "salt": parts.salt,
            "publicKey": parts.public_key,
        }),
    )
    .item("Stored key", stored.clone())
    .item("Salt", parts.salt)
    .item("Public key", parts.public_key)
    .primary(stored)
    .emit(&ui, ctx.quiet())
}

pub fn handle_split_key(ctx: &AppContext, args: &SplitKeyArgs) -> anyhow::Result<()> {
    let ui = ctx.ui_context();
    let parts = split_salt_and_public_key(args.stored.trim())
        .map_err(|e| CliError::invalid_input(e.to_string()))?;

    Report::new(
        "Stored key split",
        serde_json::to_value(&parts).map_err(|e| anyhow::anyhow!("JSON error: {}", e))?,
    )
    .item("Salt", parts.salt.clone())
    .item("Public key", parts.public_key.clone())
    .primary(format!("{} {}", parts.salt, parts.public_key))
    .emit(&ui, ctx.quiet())
}
