use crate::classify::is_concatenated_module_name;
use chromastats_core::{PathResolver, absolute_path_from_identifier};
use serde_json::{Map, Value};

/// Path segment marking third-party dependencies
const NODE_MODULES_SEGMENT: &str = "node_modules/";

/// Fields that may identify the importing module, in order of preference
const IDENTIFIER_FIELDS: [&str; 2] = ["resolvedModuleIdentifier", "moduleIdentifier"];

/// Resolve the importer name of a raw reason entry.
///
/// An ordinary `moduleName` is trusted as-is. When it is missing, or is
/// itself a "+ N modules" placeholder, the importer file is recovered from
/// the module identifiers instead, unless that file lives under
/// `node_modules/`. Falls back to the original `moduleName`, which may be
/// absent.
pub fn reason_module_name(reason: &Map<String, Value>, resolver: &PathResolver) -> Option<String> {
    let module_name = reason.get("moduleName").and_then(Value::as_str);

    if let Some(name) = module_name
        && !is_concatenated_module_name(name)
    {
        return Some(name.to_string());
    }

    let fallback = IDENTIFIER_FIELDS
        .iter()
        .find_map(|field| {
            reason
                .get(*field)
                .and_then(Value::as_str)
                .and_then(absolute_path_from_identifier)
        })
        .and_then(|path| resolver.normalize_module_path(&path));

    match fallback {
        Some(path) if !path.contains(NODE_MODULES_SEGMENT) => Some(path),
        _ => module_name.map(str::to_string),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn resolve(reason: Value) -> Option<String> {
        let resolver = PathResolver::new("/repo/packages/app");
        reason_module_name(reason.as_object().unwrap(), &resolver)
    }

    #[test]
    fn test_plain_module_name_is_trusted() {
        assert_eq!(
            resolve(json!({
                "moduleName": "./src/index.ts",
                "moduleIdentifier": "loader!/repo/packages/app/src/other.ts"
            })),
            Some("./src/index.ts".to_string())
        );
    }

    #[test]
    fn test_concatenated_name_recovers_file() {
        assert_eq!(
            resolve(json!({
                "moduleName": "./src/index.ts + 3 modules",
                "moduleIdentifier": "builtin:swc-loader!/repo/packages/app/src/index.ts"
            })),
            Some("src/index.ts".to_string())
        );
    }

    #[test]
    fn test_resolved_identifier_takes_precedence() {
        assert_eq!(
            resolve(json!({
                "moduleIdentifier": "loader!/repo/packages/app/src/a.ts",
                "resolvedModuleIdentifier": "loader!/repo/packages/app/src/b.ts?raw"
            })),
            Some("src/b.ts".to_string())
        );
    }

    #[test]
    fn test_unusable_resolved_identifier_falls_back_to_module_identifier() {
        assert_eq!(
            resolve(json!({
                "moduleIdentifier": "/repo/packages/app/src/a.ts",
                "resolvedModuleIdentifier": "loader!./relative.ts"
            })),
            Some("src/a.ts".to_string())
        );
    }

    #[test]
    fn test_node_modules_fallback_is_suppressed() {
        assert_eq!(
            resolve(json!({
                "moduleName": "../../node_modules/react/index.js + 1 modules",
                "moduleIdentifier": "/repo/node_modules/react/index.js"
            })),
            Some("../../node_modules/react/index.js + 1 modules".to_string())
        );
    }

    #[test]
    fn test_nothing_resolvable_is_absent() {
        assert_eq!(resolve(json!({})), None);
        assert_eq!(resolve(json!({"moduleIdentifier": "javascript/auto|x"})), None);
        assert_eq!(resolve(json!({"moduleName": 3})), None);
    }
}
