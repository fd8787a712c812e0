use crate::{Error, Result};
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Environment variable consulted when no explicit base directory is given
pub const BASE_DIR_ENV: &str = "CHROMASTATS_BASE_DIR";

/// Convert Windows separators to forward slashes
pub fn to_posix_path(path: &str) -> String {
    path.replace('\\', "/")
}

/// Check whether a posix-form path is absolute.
///
/// Recognizes `/abs`, drive-letter roots (`C:/abs`) and UNC roots (`//host`).
/// A bare `C:` is drive-relative, not absolute.
pub fn is_absolute_path(path: &str) -> bool {
    !path_root(path).is_empty()
}

fn path_root(path: &str) -> &str {
    if path.starts_with("//") {
        return "//";
    }
    if path.starts_with('/') {
        return "/";
    }

    let bytes = path.as_bytes();
    if bytes.len() >= 3 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':' && bytes[2] == b'/' {
        return &path[..3];
    }

    ""
}

/// Split the part after the root into segments, resolving `.` and `..`
fn lexical_segments(path: &str) -> Vec<&str> {
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }
    segments
}

fn same_root(a: &str, b: &str) -> bool {
    // drive letters compare case-insensitively
    a.eq_ignore_ascii_case(b)
}

/// Resolves bundler-reported paths against an explicit base directory.
///
/// The base directory is captured once; nothing here reads the process
/// working directory, so results only depend on the inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathResolver {
    base_dir: String,
}

impl PathResolver {
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        let base_dir = to_posix_path(&base_dir.as_ref().to_string_lossy());
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &str {
        &self.base_dir
    }

    /// Normalize a module path for comparison.
    ///
    /// Absolute paths become relative to the base directory; relative paths
    /// pass through unchanged apart from separator conversion. Empty input,
    /// or a path that resolves to the base directory itself, yields `None`.
    pub fn normalize_module_path(&self, raw: &str) -> Option<String> {
        if raw.is_empty() {
            return None;
        }

        let posix = to_posix_path(raw);
        let normalized = if is_absolute_path(&posix) {
            self.relative_to_base(&posix)
        } else {
            posix
        };

        if normalized.is_empty() {
            None
        } else {
            Some(normalized)
        }
    }

    /// Same as [`normalize_module_path`](Self::normalize_module_path) for an
    /// untyped JSON field; anything but a string fails closed.
    pub fn normalize_value(&self, raw: Option<&Value>) -> Option<String> {
        raw.and_then(Value::as_str)
            .and_then(|path| self.normalize_module_path(path))
    }

    fn relative_to_base(&self, path: &str) -> String {
        let base_root = path_root(&self.base_dir);
        // Against a posix base a leading `//` is just `/`
        let path_root = match (base_root, path_root(path)) {
            ("/", "//") => "/",
            (_, root) => root,
        };

        if base_root.is_empty() || !same_root(base_root, path_root) {
            return path.to_string();
        }

        let base_segments = lexical_segments(&self.base_dir[base_root.len()..]);
        let path_segments = lexical_segments(&path[path_root.len()..]);

        let common = base_segments
            .iter()
            .zip(path_segments.iter())
            .take_while(|(a, b)| a == b)
            .count();

        let mut relative: Vec<&str> = vec![".."; base_segments.len() - common];
        relative.extend_from_slice(&path_segments[common..]);
        relative.join("/")
    }
}

/// Expand tilde (~) in paths to the user's home directory
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(stripped);
    }
    PathBuf::from(path)
}

/// Discover the base directory module paths are made relative to:
/// 1. Explicit path (with tilde expansion)
/// 2. CHROMASTATS_BASE_DIR environment variable (with tilde expansion)
/// 3. Current working directory
///
/// The result is always absolute.
pub fn discover_base_dir(explicit: Option<&str>) -> Result<PathBuf> {
    let candidate = if let Some(path) = explicit {
        if path.trim().is_empty() {
            return Err(Error::Config("base directory must not be empty".to_string()));
        }
        expand_tilde(path)
    } else if let Ok(env_path) = std::env::var(BASE_DIR_ENV)
        && !env_path.trim().is_empty()
    {
        expand_tilde(&env_path)
    } else {
        std::env::current_dir()?
    };

    Ok(std::path::absolute(&candidate)?)
}
