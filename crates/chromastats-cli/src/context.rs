use crate::config::Config;
use crate::types::OutputFormat;
use anyhow::{Context, Result};
use chromastats_core::discover_base_dir;
use chromastats_normalize::StatsNormalizer;
use chromastats_types::read_stats_file;
use serde_json::Value;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub struct ExecutionContext {
    pub config: Config,
    pub format: OutputFormat,
    normalizer: StatsNormalizer,
}

impl ExecutionContext {
    /// Base directory priority: `--base-dir`, config `base_dir`,
    /// `CHROMASTATS_BASE_DIR`, then the working directory.
    pub fn new(
        config_path: Option<&Path>,
        base_dir: Option<&str>,
        format: OutputFormat,
    ) -> Result<Self> {
        let config = Config::resolve(config_path)?;

        let explicit = base_dir.map(str::to_string).or_else(|| {
            config
                .base_dir
                .as_ref()
                .map(|dir| dir.to_string_lossy().into_owned())
        });
        let base_dir = discover_base_dir(explicit.as_deref())
            .context("Failed to determine base directory")?;

        let ctx = Self {
            config,
            format,
            normalizer: StatsNormalizer::with_base_dir(&base_dir),
        };
        tracing::debug!(base_dir = ctx.base_dir(), "resolved base directory");
        Ok(ctx)
    }

    pub fn normalizer(&self) -> &StatsNormalizer {
        &self.normalizer
    }

    pub fn base_dir(&self) -> &str {
        self.normalizer.resolver().base_dir()
    }

    /// A directory stands for the stats file directly inside it.
    pub fn resolve_stats_path(&self, path: &Path) -> Result<PathBuf> {
        let resolved = if path.is_dir() {
            path.join(&self.config.stats_file_name)
        } else {
            path.to_path_buf()
        };

        if !resolved.is_file() {
            anyhow::bail!("Stats file not found: {}", resolved.display());
        }
        Ok(resolved)
    }

    /// Every file below `dir` named like the configured stats file, sorted.
    /// `node_modules` directories are not descended into.
    pub fn find_stats_files(&self, dir: &Path) -> Vec<PathBuf> {
        WalkDir::new(dir)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| entry.file_name() != "node_modules")
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(err) => {
                    tracing::warn!("skipping unreadable entry: {}", err);
                    None
                }
            })
            .filter(|entry| {
                entry.file_type().is_file()
                    && entry.file_name().to_string_lossy() == self.config.stats_file_name
            })
            .map(|entry| entry.into_path())
            .collect()
    }

    pub fn load_stats(&self, path: &Path) -> Result<Value> {
        read_stats_file(path).with_context(|| format!("Failed to read stats {}", path.display()))
    }
}
