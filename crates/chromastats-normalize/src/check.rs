use crate::classify::is_concatenated_module_name;
use chromastats_core::absolute_path_from_identifier;
use chromastats_types::{ModuleKey, top_level_modules};
use serde::Serialize;
use serde_json::Value;
use std::collections::{BTreeMap, HashSet};
use std::fmt;

/// A loader chain, hash or query wrapped around an absolute path.
///
/// Bundler labels such as `css-loader!./x.css` or context modules with
/// `(?!.*node_modules)` in their regex are legitimate importer names and
/// are not decorated.
fn is_decorated_reason(reason: &str) -> bool {
    absolute_path_from_identifier(reason).is_some_and(|path| path != reason)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Violation {
    MissingModules,
    DuplicateKey { key: String, count: usize },
    DecoratedReason { module: String, reason: String },
    DuplicateReason { module: String, reason: String },
    UnpromotedStub { group: String, stub: String },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::MissingModules => write!(f, "document has no modules array"),
            Violation::DuplicateKey { key, count } => {
                write!(f, "key '{}' appears {} times", key, count)
            }
            Violation::DecoratedReason { module, reason } => {
                write!(f, "module '{}' has decorated reason '{}'", module, reason)
            }
            Violation::DuplicateReason { module, reason } => {
                write!(f, "module '{}' lists reason '{}' more than once", module, reason)
            }
            Violation::UnpromotedStub { group, stub } => {
                write!(f, "stub '{}' of '{}' has no top-level entry", stub, group)
            }
        }
    }
}

/// Outcome of checking a document against the minimal contract.
///
/// Unpromoted stubs are only warnings: id-less groups are renamed after the
/// file they were built from, so their stubs are never promoted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContractReport {
    pub modules: usize,
    pub violations: Vec<Violation>,
    pub warnings: Vec<Violation>,
}

impl ContractReport {
    pub fn is_ok(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Verify that top-level keys are unique, reasons are plain and distinct,
/// and every concatenated group's stubs are reachable at the top level.
pub fn check_contract(document: &Value) -> ContractReport {
    let Some(modules) = top_level_modules(document) else {
        return ContractReport {
            modules: 0,
            violations: vec![Violation::MissingModules],
            warnings: Vec::new(),
        };
    };

    let mut violations = Vec::new();
    let mut warnings = Vec::new();

    let mut key_counts: BTreeMap<ModuleKey, usize> = BTreeMap::new();
    for key in modules.iter().filter_map(ModuleKey::of_raw) {
        *key_counts.entry(key).or_insert(0) += 1;
    }
    violations.extend(
        key_counts
            .into_iter()
            .filter(|(_, count)| *count > 1)
            .map(|(key, count)| Violation::DuplicateKey {
                key: key.to_string(),
                count,
            }),
    );

    let top_level_names: HashSet<&str> = modules
        .iter()
        .filter_map(|entry| entry.get("name").and_then(Value::as_str))
        .collect();

    for entry in modules {
        let Some(name) = entry.get("name").and_then(Value::as_str) else {
            continue;
        };

        let mut seen = HashSet::new();
        for reason in reason_names(entry) {
            if is_decorated_reason(reason) {
                violations.push(Violation::DecoratedReason {
                    module: name.to_string(),
                    reason: reason.to_string(),
                });
            }
            if !seen.insert(reason) {
                violations.push(Violation::DuplicateReason {
                    module: name.to_string(),
                    reason: reason.to_string(),
                });
            }
        }

        if !is_concatenated_module_name(name) {
            continue;
        }
        for stub in stub_names(entry) {
            if !top_level_names.contains(stub) {
                warnings.push(Violation::UnpromotedStub {
                    group: name.to_string(),
                    stub: stub.to_string(),
                });
            }
        }
    }

    ContractReport {
        modules: modules.len(),
        violations,
        warnings,
    }
}

fn reason_names(entry: &Value) -> impl Iterator<Item = &str> {
    entry
        .get("reasons")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(|reason| reason.get("moduleName").and_then(Value::as_str))
}

fn stub_names(entry: &Value) -> impl Iterator<Item = &str> {
    entry
        .get("modules")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(|stub| stub.get("name").and_then(Value::as_str))
}
