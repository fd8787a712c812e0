use chromastats_types::{ModuleId, top_level_modules};
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    Exact,
    Partial,
}

impl MatchMode {
    fn matches(self, candidate: &str, query: &str) -> bool {
        match self {
            MatchMode::Exact => candidate == query,
            MatchMode::Partial => candidate.contains(query),
        }
    }
}

/// A top-level module selected by a query
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleMatch {
    /// Position in the top-level `modules` array
    pub index: usize,
    pub id: Option<String>,
    pub name: String,
    pub reasons: Vec<String>,
}

impl ModuleMatch {
    fn from_entry(index: usize, entry: &Value) -> Option<Self> {
        let name = entry.get("name").and_then(Value::as_str)?;
        let id = entry
            .get("id")
            .and_then(ModuleId::from_raw)
            .map(|id| id.to_string());
        let reasons = entry
            .get("reasons")
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .filter_map(|reason| reason.get("moduleName").and_then(Value::as_str))
            .map(str::to_string)
            .collect();

        Some(Self {
            index,
            id,
            name: name.to_string(),
            reasons,
        })
    }
}

fn top_level_matches(document: &Value) -> impl Iterator<Item = ModuleMatch> + '_ {
    top_level_modules(document)
        .into_iter()
        .flatten()
        .enumerate()
        .filter_map(|(index, entry)| ModuleMatch::from_entry(index, entry))
}

/// Top-level modules whose id or name matches `query`
pub fn find_modules(document: &Value, query: &str, mode: MatchMode) -> Vec<ModuleMatch> {
    top_level_matches(document)
        .filter(|module| {
            mode.matches(&module.name, query)
                || module
                    .id
                    .as_deref()
                    .is_some_and(|id| mode.matches(id, query))
        })
        .collect()
}

/// Importer names of every module matching `query`, first occurrence kept
pub fn importers_of(document: &Value, query: &str, mode: MatchMode) -> Vec<String> {
    let mut importers: Vec<String> = Vec::new();
    for module in find_modules(document, query, mode) {
        for reason in module.reasons {
            if !importers.contains(&reason) {
                importers.push(reason);
            }
        }
    }
    importers
}

/// Top-level modules that list `importer` among their reasons
pub fn dependents_of(document: &Value, importer: &str, mode: MatchMode) -> Vec<ModuleMatch> {
    top_level_matches(document)
        .filter(|module| {
            module
                .reasons
                .iter()
                .any(|reason| mode.matches(reason, importer))
        })
        .collect()
}
