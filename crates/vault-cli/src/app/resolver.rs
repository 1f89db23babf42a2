//! Path resolution for the config file.

use std::path::PathBuf;

use crate::cli::Cli;
use crate::config::default_config_path;

/// Resolve the config path: `--config` / `VAULT_CONFIG`, then the XDG default.
pub fn resolve_config_path(cli: &Cli) -> anyhow::Result<PathBuf> {
    if let Some(path) = cli.config.as_deref() {
        if !path.trim().is_empty() {
            return Ok(PathBuf::from(path));
        }
    }
    default_config_path()
}
