use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use vault_core::challenge::DEFAULT_CHALLENGE_TTL_SECS;
use vault_core::crypto::MAX_FILE_SIZE;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct VaultConfig {
    #[serde(default)]
    pub files: FilesSection,
    #[serde(default)]
    pub challenge: ChallengeSection,
    #[serde(default)]
    pub ui: UiSection,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilesSection {
    /// Upload cap; values above 10 MiB are clamped
    pub max_size_bytes: usize,
}

impl Default for FilesSection {
    fn default() -> Self {
        Self {
            max_size_bytes: MAX_FILE_SIZE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeSection {
    pub ttl_seconds: i64,
}

impl Default for ChallengeSection {
    fn default() -> Self {
        Self {
            ttl_seconds: DEFAULT_CHALLENGE_TTL_SECS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiSection {
    pub color: bool,
}

impl Default for UiSection {
    fn default() -> Self {
        Self { color: true }
    }
}

impl VaultConfig {
    /// Effective upload cap.
    pub fn max_file_size(&self) -> usize {
        self.files.max_size_bytes.min(MAX_FILE_SIZE)
    }
}

pub fn default_config_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_config_dir()?.join("config.toml"))
}

/// Read a config file. A missing file yields the defaults.
pub fn load_config(path: &Path) -> anyhow::Result<VaultConfig> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return Ok(VaultConfig::default());
    }
    read_config(path)
}

pub fn read_config(path: &Path) -> anyhow::Result<VaultConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read config {}: {}", path.display(), e))?;
    let config: VaultConfig = toml::from_str(&contents)
        .map_err(|e| anyhow::anyhow!("Failed to parse config {}: {}", path.display(), e))?;
    if config.challenge.ttl_seconds <= 0 {
        return Err(anyhow::anyhow!(
            "Invalid config {}: challenge.ttl_seconds must be positive",
            path.display()
        ));
    }
    Ok(config)
}

pub fn write_config(path: &Path, config: &VaultConfig) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            anyhow::anyhow!(
                "Failed to create config directory {}: {}",
                parent.display(),
                e
            )
        })?;
    }
    let contents =
        toml::to_string_pretty(config).map_err(|e| anyhow::anyhow!("TOML error: {}", e))?;
    std::fs::write(path, contents)
        .map_err(|e| anyhow::anyhow!("Failed to write config {}: {}", path.display(), e))?;
    Ok(())
}

pub fn xdg_config_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_CONFIG_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("vault"));
        }
    }
    Ok(home_dir()?.join(".config").join("vault"))
}

fn home_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .map_err(|_| anyhow::anyhow!("HOME is not set; cannot resolve default paths"))?;
    Ok(PathBuf::from(home))
}
