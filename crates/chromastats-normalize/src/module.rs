use crate::reason::reason_module_name;
use chromastats_core::PathResolver;
use chromastats_types::{ModuleId, ModuleRecord, ModuleStub, Reason};
use serde_json::{Map, Value};
use std::collections::HashSet;

/// Normalize a raw module-like record into the contract shape.
///
/// Returns `None` when no usable name can be determined. Because the id
/// falls back to the resolved name, every named record carries identity.
pub fn to_contract_module(
    entry: &Map<String, Value>,
    resolver: &PathResolver,
) -> Option<ModuleRecord> {
    let raw_name = entry.get("name").and_then(Value::as_str);
    let name_for_condition = resolver.normalize_value(entry.get("nameForCondition"));
    let has_bundler_id = !matches!(entry.get("id"), None | Some(Value::Null));

    // Id-less entries (concatenated groups) are better named by the file
    // they were built from than by their "+ N modules" label.
    let name = match name_for_condition {
        Some(path) if !has_bundler_id => path,
        fallback => raw_name.map(str::to_string).or(fallback)?,
    };

    let id = entry
        .get("id")
        .and_then(ModuleId::from_raw)
        .unwrap_or_else(|| ModuleId::Text(name.clone()));

    let reasons = entry
        .get("reasons")
        .and_then(Value::as_array)
        .map(|reasons| {
            unique(
                reasons
                    .iter()
                    .filter_map(Value::as_object)
                    .filter_map(|reason| reason_module_name(reason, resolver)),
            )
        })
        .unwrap_or_default()
        .into_iter()
        .map(Reason::new)
        .collect();

    let modules = entry
        .get("modules")
        .and_then(Value::as_array)
        .map(|nested| {
            unique(
                nested
                    .iter()
                    .filter_map(Value::as_object)
                    .filter_map(|stub| resolver.normalize_value(stub.get("name"))),
            )
        })
        .unwrap_or_default()
        .into_iter()
        .map(ModuleStub::new)
        .collect();

    Some(ModuleRecord {
        id,
        name,
        modules,
        reasons,
    })
}

/// Deduplicate while keeping first-occurrence order
fn unique(values: impl Iterator<Item = String>) -> Vec<String> {
    let mut seen = HashSet::new();
    values.filter(|value| seen.insert(value.clone())).collect()
}
