use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_STATS_FILE_NAME: &str = "preview-stats.json";

/// Project-local config file, looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "chromastats.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Overridden by `--base-dir`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_dir: Option<PathBuf>,

    /// File name searched for when a command is given a directory
    pub stats_file_name: String,

    pub pretty: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_dir: None,
            stats_file_name: DEFAULT_STATS_FILE_NAME.to_string(),
            pretty: true,
        }
    }
}

impl Config {
    /// Resolve the config file to use:
    /// 1. Explicit `--config` path
    /// 2. `./chromastats.toml`
    /// 3. `<config dir>/chromastats/config.toml`
    ///
    /// Missing files yield the default config.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from(path);
        }

        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.exists() {
            return Self::load_from(&local);
        }

        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Invalid config {}", path.display()))?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("chromastats").join("config.toml"))
    }
}
