use crate::Result;
use serde_json::Value;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Read a stats document from disk without imposing any schema on it.
pub fn read_stats_file(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)?;
    let value = serde_json::from_str(&content)?;
    Ok(value)
}

/// Write a stats document, pretty-printed or compact.
///
/// The content lands in a sibling `.tmp` file first and is renamed over
/// `path`, so an interrupted write never leaves a truncated document.
pub fn write_stats_file(path: &Path, document: &Value, pretty: bool) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }

    let mut content = render_stats(document, pretty)?;
    content.push('\n');

    let tmp = temp_sibling(path);
    std::fs::write(&tmp, content)?;
    if let Ok(metadata) = std::fs::metadata(path) {
        std::fs::set_permissions(&tmp, metadata.permissions())?;
    }
    if let Err(err) = std::fs::rename(&tmp, path) {
        let _ = std::fs::remove_file(&tmp);
        return Err(err.into());
    }
    Ok(())
}

fn temp_sibling(path: &Path) -> PathBuf {
    let mut file_name = path.file_name().map(OsString::from).unwrap_or_default();
    file_name.push(".tmp");
    path.with_file_name(file_name)
}

pub fn render_stats(document: &Value, pretty: bool) -> Result<String> {
    let content = if pretty {
        serde_json::to_string_pretty(document)?
    } else {
        serde_json::to_string(document)?
    };
    Ok(content)
}

/// Top-level `modules` array of a stats document, if it has one.
pub fn top_level_modules(document: &Value) -> Option<&Vec<Value>> {
    document.as_object()?.get("modules")?.as_array()
}
