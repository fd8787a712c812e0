use crate::path::{is_absolute_path, to_posix_path};

/// Recover the absolute file path behind a bundler module identifier.
///
/// Identifiers look like `loaderA!loaderB!/abs/file.js?query|hash`. The
/// loader chain (through the last `!`), the hash suffix (from the first `|`)
/// and the query (from the first `?`) are stripped in that order. Returns
/// `None` unless what remains is absolute.
pub fn absolute_path_from_identifier(identifier: &str) -> Option<String> {
    if identifier.is_empty() {
        return None;
    }

    let without_loaders = match identifier.rfind('!') {
        Some(index) => &identifier[index + 1..],
        None => identifier,
    };
    let without_hash = without_loaders.split('|').next().unwrap_or_default();
    let without_query = without_hash.split('?').next().unwrap_or_default();

    if is_absolute_path(&to_posix_path(without_query)) {
        Some(without_query.to_string())
    } else {
        None
    }
}
