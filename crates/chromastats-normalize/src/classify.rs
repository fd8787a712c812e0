use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

/// Regex for concatenated module names
/// Example: "./src/Button.tsx + 3 modules" or "../a.js + 1 module"
static CONCATENATED_MODULE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s\+\s\d+\smodules?$").unwrap());

/// Check whether a module name denotes a concatenated module group
pub fn is_concatenated_module_name(name: &str) -> bool {
    CONCATENATED_MODULE_REGEX.is_match(name)
}

/// How a visited stats entry participates in the flattening walk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordShape {
    /// Not an object, or an object with nothing module-like in it
    NotAModule,
    /// Named record carrying an `id` field, a `reasons` array or a `modules` array.
    /// It may contain further modules as well.
    ModuleCandidate,
    /// Wrapper whose payload lives in `children` or `modules`
    ContainerOnly,
}

impl RecordShape {
    pub fn is_candidate(self) -> bool {
        matches!(self, RecordShape::ModuleCandidate)
    }
}

/// Classify a raw stats entry once, before walking it
pub fn classify(entry: &Value) -> RecordShape {
    let Some(map) = entry.as_object() else {
        return RecordShape::NotAModule;
    };

    let has_array = |field: &str| map.get(field).is_some_and(Value::is_array);
    let has_name = map.get("name").is_some_and(Value::is_string);

    // An explicit `"id": null` still counts as an id field
    if has_name && (map.contains_key("id") || has_array("reasons") || has_array("modules")) {
        return RecordShape::ModuleCandidate;
    }

    if has_array("children") || has_array("modules") {
        return RecordShape::ContainerOnly;
    }

    RecordShape::NotAModule
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_concatenated_module_names() {
        assert!(is_concatenated_module_name("./a.tsx + 1 modules"));
        assert!(is_concatenated_module_name("./a.tsx + 12 modules"));
        assert!(is_concatenated_module_name("./a.tsx + 1 module"));
        assert!(!is_concatenated_module_name("./a.tsx"));
        assert!(!is_concatenated_module_name("./a.tsx + 1 modules (lazy)"));
        assert!(!is_concatenated_module_name("./a.tsx+1 modules"));
    }

    #[test]
    fn test_classify_candidates() {
        assert_eq!(
            classify(&json!({"name": "./a.js", "id": 1})),
            RecordShape::ModuleCandidate
        );
        assert_eq!(
            classify(&json!({"name": "./a.js", "id": null})),
            RecordShape::ModuleCandidate
        );
        assert_eq!(
            classify(&json!({"name": "./a.js", "reasons": []})),
            RecordShape::ModuleCandidate
        );
        assert_eq!(
            classify(&json!({"name": "./a.js + 1 modules", "modules": [{"name": "./b.js"}]})),
            RecordShape::ModuleCandidate
        );
    }

    #[test]
    fn test_classify_containers() {
        assert_eq!(
            classify(&json!({"children": [{"name": "./a.js", "id": 1}]})),
            RecordShape::ContainerOnly
        );
        assert_eq!(
            classify(&json!({"modules": [{"name": "./a.js", "id": 1}]})),
            RecordShape::ContainerOnly
        );
        // A name alone does not make a module when only children are present
        assert_eq!(
            classify(&json!({"name": "chunk", "children": []})),
            RecordShape::ContainerOnly
        );
    }

    #[test]
    fn test_classify_non_modules() {
        assert_eq!(classify(&json!("./a.js")), RecordShape::NotAModule);
        assert_eq!(classify(&json!(null)), RecordShape::NotAModule);
        assert_eq!(classify(&json!({"name": "./a.js"})), RecordShape::NotAModule);
        assert_eq!(
            classify(&json!({"name": 4, "id": 4})),
            RecordShape::NotAModule
        );
        assert_eq!(
            classify(&json!({"name": "./a.js", "reasons": "nope"})),
            RecordShape::NotAModule
        );
    }
}
