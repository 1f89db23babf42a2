use crate::app::{resolve_config_path, AppContext};
use crate::cli::ConfigSubcommand;
use crate::config::{write_config, VaultConfig};
use crate::errors::CliError;
use crate::output::Report;

pub fn handle_config(ctx: &AppContext, command: &ConfigSubcommand) -> anyhow::Result<()> {
    match command {
        ConfigSubcommand::Init { force } => handle_init(ctx, *force),
        ConfigSubcommand::Show => handle_show(ctx),
    }
}

fn handle_init(ctx: &AppContext, force: bool) -> anyhow::Result<()> {
    let ui = ctx.ui_context();
    let path = resolve_config_path(ctx.cli())?;
    if path.exists() && !force {
        return Err(CliError::invalid_input(format!(
            "Config already exists at {}\nHint: Use --force to overwrite.",
            path.display()
        ))
        .into());
    }

    write_config(&path, &VaultConfig::default())?;
    tracing::debug!(path = %path.display(), "wrote default config");

    let shown = path.display().to_string();
    Report::new("Config written", serde_json::json!({ "path": shown }))
        .item("Path", shown.clone())
        .primary(shown)
        .emit(&ui, ctx.quiet())
}

fn handle_show(ctx: &AppContext) -> anyhow::Result<()> {
    let ui = ctx.ui_context();
    let path = resolve_config_path(ctx.cli())?;
    let config = ctx.config()?;

    let shown = path.display().to_string();
    Report::new(
        "Configuration",
        serde_json::json!({
            "path": shown,
            "exists": path.exists(),
            "config": config,
        }),
    )
    .item("Path", shown)
    .item("Max file size", format!("{} bytes", config.max_file_size()))
    .item("Challenge TTL", format!("{}s", config.challenge.ttl_seconds))
    .item("Color", config.ui.color.to_string())
    .emit(&ui, ctx.quiet())
}
