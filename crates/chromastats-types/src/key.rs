use crate::module::{ModuleId, ModuleRecord};
use serde_json::Value;
use std::fmt;

/// Composite deduplication key `"<id>::<name>"` for top-level modules.
///
/// The id half uses the JavaScript string form of the id: `null` for a null
/// id and `undefined` when the id is missing or not a scalar.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModuleKey(String);

impl ModuleKey {
    pub fn new(id: &str, name: &str) -> Self {
        ModuleKey(format!("{}::{}", id, name))
    }

    pub fn of_record(record: &ModuleRecord) -> Self {
        Self::new(&record.id.to_string(), &record.name)
    }

    /// Key of a promoted concatenation stub. Keyed on the name twice.
    pub fn of_stub(name: &str) -> Self {
        Self::new(name, name)
    }

    /// Key of a raw stats entry; `None` when it has no non-empty string name.
    pub fn of_raw(entry: &Value) -> Option<Self> {
        let map = entry.as_object()?;
        let name = map.get("name").and_then(Value::as_str)?;
        if name.is_empty() {
            return None;
        }

        let id = match map.get("id") {
            Some(Value::Null) => ModuleId::Null.to_string(),
            Some(value) => match ModuleId::from_raw(value) {
                Some(id) => id.to_string(),
                None => "undefined".to_string(),
            },
            None => "undefined".to_string(),
        };

        Some(Self::new(&id, name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModuleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
