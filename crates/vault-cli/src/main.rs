//! Vault CLI
//!
//! Command-line front end for the vault core: text and file encryption,
//! password-derived public keys, challenge signing and verification, and the
//! master password policy.

mod app;
mod cli;
mod commands;
mod config;
mod constants;
mod errors;
mod helpers;
mod output;
mod ui;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::app::AppContext;
use crate::cli::{Cli, Commands};
use crate::commands::{challenge, config as config_cmd, files, keys, misc, password, text};
use crate::constants::env_vars;
use crate::errors::CliError;
use crate::ui::print_error;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let ctx = AppContext::new(&cli);

    if let Err(e) = run(&ctx, &cli) {
        let ui_ctx = ctx.ui_context();

        if let Some(cli_err) = e.downcast_ref::<CliError>() {
            let (message, hint) = cli_err.message_and_hint();
            print_error(&ui_ctx, &message, hint.as_deref());
            std::process::exit(cli_err.exit_code());
        }

        let error_msg = format!("{}", e);
        let hint = extract_error_hint(&error_msg);
        let message = match error_msg.find("\nHint:") {
            Some(idx) => error_msg[..idx].to_string(),
            None => error_msg.clone(),
        };
        print_error(&ui_ctx, &message, hint.as_deref());
        std::process::exit(1);
    }
}

/// Log to stderr. `VAULT_LOG` sets the filter; `--verbose` raises the default to debug.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(env_vars::LOG)
        .unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Pull an explicit hint out of an error message, or suggest one for common failures.
fn extract_error_hint(error: &str) -> Option<String> {
    if let Some(idx) = error.find("\nHint:") {
        return Some(error[idx + 1..].to_string());
    }

    let error_lower = error.to_lowercase();

    if error_lower.contains("no password provided") {
        return Some(format!(
            "Hint: Set {} or run in a terminal without --no-input.",
            env_vars::PASSWORD
        ));
    }

    if error_lower.contains("failed to parse config") {
        return Some("Hint: Run `vault config init --force` to write a fresh config.".to_string());
    }

    if error_lower.contains("salt") && error_lower.contains("invalid format") {
        return Some(
            "Hint: The salt is the first 32 characters of the stored public key.".to_string(),
        );
    }

    None
}

fn run(ctx: &AppContext, cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Keygen => keys::handle_keygen(ctx),
        Commands::SplitKey(args) => keys::handle_split_key(ctx, args),
        Commands::Encrypt(args) => text::handle_encrypt(ctx, args),
        Commands::Decrypt(args) => text::handle_decrypt(ctx, args),
        Commands::EncryptFile(args) => files::handle_encrypt_file(ctx, args),
        Commands::DecryptFile(args) => files::handle_decrypt_file(ctx, args),
        Commands::Challenge(args) => challenge::handle_challenge(ctx, args),
        Commands::Sign(args) => challenge::handle_sign(ctx, args),
        Commands::Verify(args) => challenge::handle_verify(ctx, args),
        Commands::CheckPassword => password::handle_check_password(ctx),
        Commands::Config(command) => config_cmd::handle_config(ctx, command),
        Commands::Completions { shell } => misc::handle_completions(*shell),
    }
}
