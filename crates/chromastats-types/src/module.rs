use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use std::fmt;

/// Identifier of a module in the minimal stats contract.
///
/// Bundlers assign either string or numeric ids; concatenated groups often
/// carry no id at all, which is represented as `Null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ModuleId {
    Text(String),
    Number(Number),
    Null,
}

impl ModuleId {
    /// Accept a raw bundler id. Only strings and numbers carry identity;
    /// null, booleans and containers yield `None`.
    pub fn from_raw(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(ModuleId::Text(s.clone())),
            Value::Number(n) => Some(ModuleId::Number(n.clone())),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ModuleId::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, ModuleId::Null)
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModuleId::Text(s) => write!(f, "{}", s),
            ModuleId::Number(n) => write!(f, "{}", n),
            ModuleId::Null => write!(f, "null"),
        }
    }
}

impl From<&str> for ModuleId {
    fn from(value: &str) -> Self {
        ModuleId::Text(value.to_string())
    }
}

impl From<String> for ModuleId {
    fn from(value: String) -> Self {
        ModuleId::Text(value)
    }
}

impl From<u64> for ModuleId {
    fn from(value: u64) -> Self {
        ModuleId::Number(Number::from(value))
    }
}

/// Importer of a module, reduced to its display name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reason {
    pub module_name: String,
}

impl Reason {
    pub fn new(module_name: impl Into<String>) -> Self {
        Self {
            module_name: module_name.into(),
        }
    }
}

/// Nested member of a concatenated module group.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModuleStub {
    pub name: String,
}

impl ModuleStub {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Canonical top-level module entry of the minimal stats contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleRecord {
    pub id: ModuleId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub modules: Vec<ModuleStub>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reasons: Vec<Reason>,
}

impl ModuleRecord {
    pub fn new(id: ModuleId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            modules: Vec::new(),
            reasons: Vec::new(),
        }
    }

    pub fn with_reasons(mut self, reasons: Vec<Reason>) -> Self {
        self.reasons = reasons;
        self
    }

    pub fn with_modules(mut self, modules: Vec<ModuleStub>) -> Self {
        self.modules = modules;
        self
    }

    /// Serialize into a JSON value suitable for splicing into a stats document
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}
