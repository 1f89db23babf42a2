use vault_core::{decrypt_text, encrypt_text};

use crate::app::AppContext;
use crate::cli::{DecryptArgs, EncryptArgs};
use crate::errors::CliError;
use crate::helpers::read_value_or_stdin;
use crate::output::Report;
use crate::ui::Spinner;

pub fn handle_encrypt(ctx: &AppContext, args: &EncryptArgs) -> anyhow::Result<()> {
    let ui = ctx.ui_context();
    let plaintext = zeroize::Zeroizing::new(read_value_or_stdin(args.text.as_deref(), "text")?);
    let password = ctx.password()?;

    let envelope = Spinner::run(&ui, "Encrypting", || encrypt_text(&plaintext, &password))?;

    Report::new("Encrypted", serde_json::json!({ "envelope": envelope }))
        .item("Envelope", envelope.clone())
        .primary(envelope)
        .emit(&ui, ctx.quiet())
}

pub fn handle_decrypt(ctx: &AppContext, args: &DecryptArgs) -> anyhow::Result<()> {
    let ui = ctx.ui_context();
    let envelope = read_value_or_stdin(args.envelope.as_deref(), "envelope")?;
    let password = ctx.password()?;

    let plaintext = Spinner::run(&ui, "Decrypting", || {
        decrypt_text(envelope.trim(), &password)
    })
    .ok_or_else(|| {
        CliError::auth_failed_with_hint(
            "Could not unlock envelope",
            "Hint: Check the master password and that the envelope was copied in full.",
        )
    })?;
    let plaintext = zeroize::Zeroizing::new(plaintext);

    Report::new("Decrypted", serde_json::json!({ "plaintext": plaintext.as_str() }))
        .item("Plaintext", plaintext.as_str())
        .primary(plaintext.as_str())
        .emit(&ui, ctx.quiet())
}
