use crate::classify::is_concatenated_module_name;
use crate::module::to_contract_module;
use crate::walk::collect_module_entries;
use chromastats_core::PathResolver;
use chromastats_types::{ModuleId, ModuleKey, ModuleRecord};
use serde::Serialize;
use serde_json::Value;
use std::collections::HashSet;
use std::path::Path;

/// Counts describing one normalization pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NormalizeSummary {
    /// False when the document had no array `modules` and passed through untouched
    pub normalizable: bool,
    pub original_modules: usize,
    pub candidates: usize,
    pub added_modules: usize,
    pub promoted_stubs: usize,
}

/// Rewrites stats documents into the minimal module-graph contract.
#[derive(Debug, Clone)]
pub struct StatsNormalizer {
    resolver: PathResolver,
}

impl StatsNormalizer {
    pub fn new(resolver: PathResolver) -> Self {
        Self { resolver }
    }

    pub fn with_base_dir(base_dir: impl AsRef<Path>) -> Self {
        Self::new(PathResolver::new(base_dir))
    }

    pub fn resolver(&self) -> &PathResolver {
        &self.resolver
    }

    pub fn normalize(&self, document: Value) -> Value {
        self.normalize_with_summary(document).0
    }

    /// Append synthesized top-level modules to `document.modules`.
    ///
    /// Documents that are not objects or lack an array `modules` are returned
    /// unchanged. Existing entries and all other top-level fields are never
    /// modified.
    pub fn normalize_with_summary(&self, document: Value) -> (Value, NormalizeSummary) {
        let mut map = match document {
            Value::Object(map) => map,
            other => {
                tracing::trace!("stats document is not an object, passing through");
                return (other, NormalizeSummary::default());
            }
        };

        let expansion = map
            .get("modules")
            .and_then(Value::as_array)
            .map(|modules| self.expand(modules));

        let Some((additional, summary)) = expansion else {
            tracing::trace!("stats document has no modules array, passing through");
            return (Value::Object(map), NormalizeSummary::default());
        };

        if !additional.is_empty()
            && let Some(Value::Array(modules)) = map.get_mut("modules")
        {
            modules.extend(additional.iter().map(ModuleRecord::to_value));
        }

        tracing::debug!(
            original = summary.original_modules,
            candidates = summary.candidates,
            added = summary.added_modules,
            promoted = summary.promoted_stubs,
            "normalized stats modules"
        );

        (Value::Object(map), summary)
    }

    /// Compute the records to append after the original top-level modules.
    pub fn additional_modules(&self, modules: &[Value]) -> Vec<ModuleRecord> {
        self.expand(modules).0
    }

    fn expand(&self, modules: &[Value]) -> (Vec<ModuleRecord>, NormalizeSummary) {
        let mut visited: HashSet<ModuleKey> = modules.iter().filter_map(ModuleKey::of_raw).collect();
        let candidates = collect_module_entries(modules);

        let mut summary = NormalizeSummary {
            normalizable: true,
            original_modules: modules.len(),
            candidates: candidates.len(),
            ..NormalizeSummary::default()
        };
        let mut additional = Vec::new();

        for entry in candidates {
            let Some(record) = to_contract_module(entry, &self.resolver) else {
                tracing::trace!(entry = ?entry.get("name"), "skipping unnamed module entry");
                continue;
            };

            if !visited.insert(ModuleKey::of_record(&record)) {
                tracing::trace!(name = %record.name, "skipping duplicate module");
                continue;
            }

            let promoted = if is_concatenated_module_name(&record.name) {
                promote_stubs(&record, &mut visited)
            } else {
                Vec::new()
            };

            summary.promoted_stubs += promoted.len();
            additional.push(record);
            additional.extend(promoted);
        }

        summary.added_modules = additional.len();
        (additional, summary)
    }
}

/// Give every stub of a concatenated group its own top-level record.
///
/// Promoted stubs are keyed on their name twice rather than on an id.
fn promote_stubs(group: &ModuleRecord, visited: &mut HashSet<ModuleKey>) -> Vec<ModuleRecord> {
    group
        .modules
        .iter()
        .filter(|stub| visited.insert(ModuleKey::of_stub(&stub.name)))
        .map(|stub| {
            ModuleRecord::new(ModuleId::Text(stub.name.clone()), stub.name.clone())
                .with_reasons(group.reasons.clone())
        })
        .collect()
}

/// Normalize one document against `base_dir`
pub fn with_minimal_contract(document: Value, base_dir: impl AsRef<Path>) -> Value {
    StatsNormalizer::with_base_dir(base_dir).normalize(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chromastats_types::{ModuleStub, Reason};
    use serde_json::json;

    fn normalizer() -> StatsNormalizer {
        StatsNormalizer::with_base_dir("/repo")
    }

    #[test]
    fn test_non_object_passes_through() {
        let (output, summary) = normalizer().normalize_with_summary(json!([1, 2, 3]));
        assert_eq!(output, json!([1, 2, 3]));
        assert!(!summary.normalizable);
    }

    #[test]
    fn test_missing_modules_passes_through() {
        let input = json!({"hash": "abc", "modules": {"not": "an array"}});
        let (output, summary) = normalizer().normalize_with_summary(input.clone());
        assert_eq!(output, input);
        assert!(!summary.normalizable);
    }

    #[test]
    fn test_existing_entries_are_not_duplicated() {
        let input = json!({
            "modules": [
                {"id": "./a.js", "name": "./a.js", "reasons": [{"moduleName": "./entry.js"}]}
            ]
        });

        let (output, summary) = normalizer().normalize_with_summary(input.clone());
        assert_eq!(output, input);
        assert_eq!(summary.candidates, 1);
        assert_eq!(summary.added_modules, 0);
    }

    #[test]
    fn test_nested_children_are_lifted() {
        let input = json!({
            "modules": [
                {"name": "chunk wrapper", "children": [
                    {"id": 4, "name": "./child.js", "reasons": [{"moduleName": "./parent.js"}]}
                ]}
            ]
        });

        let additional = normalizer().additional_modules(input["modules"].as_array().unwrap());
        assert_eq!(
            additional,
            vec![ModuleRecord::new(ModuleId::from(4), "./child.js")
                .with_reasons(vec![Reason::new("./parent.js")])]
        );
    }

    #[test]
    fn test_first_discovered_duplicate_wins() {
        let input = json!({
            "modules": [
                {"children": [
                    {"id": 1, "name": "./dup.js", "reasons": [{"moduleName": "./first.js"}]},
                    {"id": 1, "name": "./dup.js", "reasons": [{"moduleName": "./second.js"}]}
                ]}
            ]
        });

        let additional = normalizer().additional_modules(input["modules"].as_array().unwrap());
        assert_eq!(additional.len(), 1);
        assert_eq!(additional[0].reasons, vec![Reason::new("./first.js")]);
    }

    #[test]
    fn test_concatenated_group_promotes_stubs() {
        let input = json!({
            "modules": [
                {"children": [{
                    "name": "./src/a.js + 1 modules",
                    "id": "group-1",
                    "modules": [{"name": "./src/a.js"}, {"name": "./src/b.js"}],
                    "reasons": [{"moduleName": "./entry.js"}]
                }]}
            ]
        });

        let (output, summary) = normalizer().normalize_with_summary(input);
        let modules = output["modules"].as_array().unwrap();

        // wrapper + group + two promoted stubs
        assert_eq!(modules.len(), 4);
        assert_eq!(summary.promoted_stubs, 2);
        assert_eq!(
            modules[1],
            ModuleRecord::new(ModuleId::from("group-1"), "./src/a.js + 1 modules")
                .with_modules(vec![ModuleStub::new("./src/a.js"), ModuleStub::new("./src/b.js")])
                .with_reasons(vec![Reason::new("./entry.js")])
                .to_value()
        );
        assert_eq!(
            modules[2],
            json!({"id": "./src/a.js", "name": "./src/a.js", "reasons": [{"moduleName": "./entry.js"}]})
        );
        assert_eq!(
            modules[3],
            json!({"id": "./src/b.js", "name": "./src/b.js", "reasons": [{"moduleName": "./entry.js"}]})
        );
    }

    #[test]
    fn test_stub_already_at_top_level_is_not_promoted() {
        let input = json!({
            "modules": [
                {"id": "./src/a.js", "name": "./src/a.js"},
                {"id": 3, "name": "./src/b.js"},
                {"children": [{
                    "name": "./src/a.js + 2 modules",
                    "id": "group-1",
                    "modules": [{"name": "./src/a.js"}, {"name": "./src/b.js"}],
                    "reasons": [{"moduleName": "./entry.js"}]
                }]}
            ]
        });

        let (output, summary) = normalizer().normalize_with_summary(input);
        let modules = output["modules"].as_array().unwrap();

        // `./src/a.js::./src/a.js` exists; `3::./src/b.js` does not block the name::name key
        assert_eq!(summary.promoted_stubs, 1);
        assert_eq!(modules.len(), 5);
        assert_eq!(
            modules[4],
            json!({"id": "./src/b.js", "name": "./src/b.js", "reasons": [{"moduleName": "./entry.js"}]})
        );
    }

    #[test]
    fn test_top_level_group_is_not_expanded_again() {
        let input = json!({
            "modules": [{
                "name": "./a.js + 1 modules",
                "id": 8,
                "modules": [{"name": "./a.js"}]
            }]
        });

        let (output, summary) = normalizer().normalize_with_summary(input.clone());
        assert_eq!(output, input);
        assert_eq!(summary.promoted_stubs, 0);
    }

    #[test]
    fn test_promoted_stub_without_group_reasons() {
        let input = json!({
            "modules": [{"children": [{
                "name": "./a.js + 1 modules",
                "id": 8,
                "modules": [{"name": "./a.js"}]
            }]}]
        });

        let output = normalizer().normalize(input);
        let modules = output["modules"].as_array().unwrap();
        assert_eq!(modules.len(), 3);
        assert_eq!(modules[2], json!({"id": "./a.js", "name": "./a.js"}));
    }
}
