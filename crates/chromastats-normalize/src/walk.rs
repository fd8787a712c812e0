use crate::classify::{RecordShape, classify};
use serde_json::{Map, Value};

/// Collect every module-like record reachable from `entries`.
///
/// Depth-first in input order. Each object is classified once; candidates
/// are collected, and every object (candidate or not) is then descended into
/// through its `children` array followed by its `modules` array. Stats
/// output is a tree, so there is no cycle guard.
pub fn collect_module_entries(entries: &[Value]) -> Vec<&Map<String, Value>> {
    let mut collected = Vec::new();
    collect_into(entries, &mut collected);
    collected
}

fn collect_into<'a>(entries: &'a [Value], collected: &mut Vec<&'a Map<String, Value>>) {
    for entry in entries {
        let Some(map) = entry.as_object() else {
            continue;
        };

        match classify(entry) {
            RecordShape::NotAModule => continue,
            RecordShape::ModuleCandidate => collected.push(map),
            RecordShape::ContainerOnly => {}
        }

        if let Some(children) = map.get("children").and_then(Value::as_array) {
            collect_into(children, collected);
        }

        if let Some(nested) = map.get("modules").and_then(Value::as_array) {
            collect_into(nested, collected);
        }
    }
}
