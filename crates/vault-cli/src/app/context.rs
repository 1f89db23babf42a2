//! Application context for the Vault CLI.
//!
//! Bundles CLI arguments with lazily-loaded configuration.

use std::io::IsTerminal;

use once_cell::unsync::OnceCell;
use zeroize::Zeroizing;

use crate::cli::Cli;
use crate::config::{load_config, VaultConfig};
use crate::helpers::{prompt_new_password, prompt_password};
use crate::ui::UiContext;

use super::resolver::resolve_config_path;

pub struct AppContext<'a> {
    cli: &'a Cli,
    config: OnceCell<VaultConfig>,
}

impl<'a> AppContext<'a> {
    pub fn new(cli: &'a Cli) -> Self {
        Self {
            cli,
            config: OnceCell::new(),
        }
    }

    pub fn cli(&self) -> &Cli {
        self.cli
    }

    pub fn quiet(&self) -> bool {
        self.cli.quiet
    }

    /// Get the configuration, loading it on first use.
    pub fn config(&self) -> anyhow::Result<&VaultConfig> {
        self.config.get_or_try_init(|| {
            let path = resolve_config_path(self.cli)?;
            load_config(&path)
        })
    }

    /// Build the UI context. A config that fails to load falls back to defaults here.
    pub fn ui_context(&self) -> UiContext {
        let config_color = self.config().map(|c| c.ui.color).unwrap_or(true);
        UiContext::from_env(
            self.cli.json,
            !config_color || self.cli.no_color,
            self.cli.ascii,
        )
    }

    /// Whether prompts may be shown.
    pub fn interactive(&self) -> bool {
        !self.cli.no_input && std::io::stdin().is_terminal()
    }

    /// Master password from `VAULT_PASSWORD` or a hidden prompt.
    pub fn password(&self) -> anyhow::Result<Zeroizing<String>> {
        prompt_password(self.interactive())
    }

    /// New master password with confirmation, returned as (password, confirmation).
    pub fn new_password(&self) -> anyhow::Result<(Zeroizing<String>, Zeroizing<String>)> {
        prompt_new_password(self.interactive())
    }
}
