//! TestWorld pattern for declarative integration test setup.
//!
//! Provides a fluent interface for:
//! - Creating isolated test environments
//! - Writing stats documents into them
//! - Executing CLI commands with proper context

use anyhow::Result;
use assert_cmd::Command;
use chromastats_types::{read_stats_file, write_stats_file};
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::fixtures::SampleFiles;

/// Declarative test environment builder.
///
/// Every command runs inside the temp root with `--config` pointing at
/// `chromastats.toml` there, so the developer's own configuration never leaks in.
///
/// # Example
/// ```no_run
/// use chromastats_testing::TestWorld;
///
/// let world = TestWorld::new().with_base_dir("/workspace");
/// world.copy_sample("preview-stats.json", "dist/preview-stats.json").unwrap();
///
/// let result = world.run(&["check", "dist"]).unwrap();
/// assert!(result.success());
/// ```
pub struct TestWorld {
    temp_dir: TempDir,
    cwd: PathBuf,
    base_dir: Option<PathBuf>,
    format: &'static str,
    env_vars: HashMap<String, String>,
    samples: SampleFiles,
}

impl Default for TestWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl TestWorld {
    /// Create a new isolated test environment.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");

        Self {
            cwd: temp_dir.path().to_path_buf(),
            temp_dir,
            base_dir: None,
            format: "plain",
            env_vars: HashMap::new(),
            samples: SampleFiles::new(),
        }
    }

    /// Get the temp directory root.
    pub fn temp_dir(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Get the current working directory.
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Path of the config file passed to every command.
    pub fn config_path(&self) -> PathBuf {
        self.temp_dir.path().join("chromastats.toml")
    }

    /// Pass `--base-dir` to every command.
    pub fn with_base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(base_dir.into());
        self
    }

    /// Switch every command to `--format json`.
    pub fn json_output(mut self) -> Self {
        self.format = "json";
        self
    }

    /// Set an environment variable for CLI execution.
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env_vars.insert(key.into(), value.into());
        self
    }

    /// Write `chromastats.toml` with the given contents.
    pub fn with_config(self, contents: &str) -> Self {
        std::fs::write(self.config_path(), contents).expect("Failed to write config");
        self
    }

    /// Change the current working directory (relative to temp root).
    pub fn enter_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        let new_cwd = self.resolve(path);
        std::fs::create_dir_all(&new_cwd).expect("Failed to create directory");
        self.cwd = new_cwd;
        self
    }

    /// Resolve a path relative to the temp root.
    pub fn resolve<P: AsRef<Path>>(&self, path: P) -> PathBuf {
        if path.as_ref().is_absolute() {
            path.as_ref().to_path_buf()
        } else {
            self.temp_dir.path().join(path)
        }
    }

    /// Write a stats document (relative to temp root).
    pub fn write_stats<P: AsRef<Path>>(&self, path: P, document: &Value) -> Result<PathBuf> {
        let dest = self.resolve(path);
        write_stats_file(&dest, document, true)?;
        Ok(dest)
    }

    /// Read a stats document back (relative to temp root).
    pub fn read_stats<P: AsRef<Path>>(&self, path: P) -> Result<Value> {
        Ok(read_stats_file(&self.resolve(path))?)
    }

    /// Copy a recorded sample (relative to temp root).
    pub fn copy_sample<P: AsRef<Path>>(&self, sample_name: &str, dest: P) -> Result<PathBuf> {
        let dest = self.resolve(dest);
        self.samples.copy_to(sample_name, &dest)?;
        Ok(dest)
    }

    /// Configure a CLI command with this test environment's settings.
    pub fn configure_command<'a>(&self, cmd: &'a mut Command) -> &'a mut Command {
        cmd.arg("--config")
            .arg(self.config_path())
            .arg("--format")
            .arg(self.format);

        if let Some(base_dir) = &self.base_dir {
            cmd.arg("--base-dir").arg(base_dir);
        }

        cmd.current_dir(&self.cwd);
        cmd.env_remove("CHROMASTATS_BASE_DIR");
        cmd.env_remove("RUST_LOG");

        for (key, value) in &self.env_vars {
            cmd.env(key, value);
        }

        cmd
    }

    /// Execute a command using the project's binary and return the result.
    ///
    /// # Note
    /// This method uses `Command::cargo_bin()` which requires the
    /// `CARGO_BIN_EXE_` environment variable that cargo test sets for
    /// integration tests of the binary's own package.
    #[allow(deprecated)]
    pub fn run(&self, args: &[&str]) -> Result<CliResult> {
        let mut cmd = Command::cargo_bin("chromastats")
            .map_err(|e| anyhow::anyhow!("Failed to find chromastats binary: {}", e))?;

        self.configure_command(&mut cmd);
        cmd.args(args);

        let output = cmd.output()?;

        Ok(CliResult {
            status: output.status,
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}

/// Result of a CLI command execution.
#[derive(Debug)]
pub struct CliResult {
    pub status: std::process::ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl CliResult {
    /// Check if the command succeeded.
    pub fn success(&self) -> bool {
        self.status.success()
    }

    pub fn code(&self) -> Option<i32> {
        self.status.code()
    }

    /// Parse stdout as JSON.
    pub fn json(&self) -> Result<Value> {
        Ok(serde_json::from_str(&self.stdout)?)
    }

    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    pub fn stderr(&self) -> &str {
        &self.stderr
    }
}
