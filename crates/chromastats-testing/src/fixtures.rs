//! Fixtures for sample stats documents.
//!
//! Provides utilities to:
//! - Copy the recorded sandbox stats sample into test environments
//! - Build small stats documents rooted at an arbitrary base directory

use anyhow::Result;
use serde_json::{Value, json};
use std::fs;
use std::path::{Path, PathBuf};

/// Base directory the recorded sample was built in
pub const SAMPLE_BASE_DIR: &str = "/workspace/sandboxes/react-18";

/// Sample file manager for test data.
pub struct SampleFiles {
    samples_dir: PathBuf,
}

impl Default for SampleFiles {
    fn default() -> Self {
        Self::new()
    }
}

impl SampleFiles {
    /// Assumes samples are in `crates/chromastats-normalize/tests/samples/`.
    pub fn new() -> Self {
        let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        let samples_dir = manifest_dir
            .parent()
            .map(|crates| crates.join("chromastats-normalize/tests/samples"))
            .unwrap_or_else(|| manifest_dir.join("samples"));

        Self { samples_dir }
    }

    pub fn path(&self, sample_name: &str) -> PathBuf {
        self.samples_dir.join(sample_name)
    }

    /// Copy a sample file to a destination, creating parent directories.
    pub fn copy_to(&self, sample_name: &str, dest: &Path) -> Result<()> {
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(self.path(sample_name), dest)?;
        Ok(())
    }
}

/// Stats document with a single id-less concatenated group, built under `base_dir`.
///
/// Normalizing it against `base_dir` yields an entry named
/// `packages/components/src/HelloWorld.tsx` whose reason is
/// `packages/components/src/HelloWorld.stories.tsx`.
pub fn concatenated_stats(base_dir: &Path) -> Value {
    let changed_source = base_dir.join("packages/components/src/HelloWorld.tsx");
    let story_source = base_dir.join("packages/components/src/HelloWorld.stories.tsx");

    json!({
        "modules": [
            {
                "id": null,
                "name": "../components/src/HelloWorld.stories.tsx + 1 modules",
                "nameForCondition": changed_source.to_string_lossy(),
                "reasons": [
                    {
                        "moduleName": "../components/src/HelloWorld.stories.tsx + 1 modules",
                        "moduleIdentifier": format!("builtin:swc-loader!{}", story_source.to_string_lossy()),
                    }
                ]
            }
        ]
    })
}

/// Fluent builder for ad-hoc stats documents.
#[derive(Default)]
pub struct StatsBuilder {
    modules: Vec<Value>,
    extra: serde_json::Map<String, Value>,
}

impl StatsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Plain module with a bundler id and importer names.
    pub fn module(mut self, id: Value, name: &str, reasons: &[&str]) -> Self {
        self.modules.push(json!({
            "id": id,
            "name": name,
            "reasons": reasons
                .iter()
                .map(|reason| json!({"moduleName": reason}))
                .collect::<Vec<_>>(),
        }));
        self
    }

    /// Concatenated group carrying nested stubs.
    pub fn group(mut self, id: Value, name: &str, stubs: &[&str], reasons: &[&str]) -> Self {
        self.modules.push(json!({
            "id": id,
            "name": name,
            "modules": stubs.iter().map(|stub| json!({"name": stub})).collect::<Vec<_>>(),
            "reasons": reasons
                .iter()
                .map(|reason| json!({"moduleName": reason}))
                .collect::<Vec<_>>(),
        }));
        self
    }

    /// Wrapper entry nesting `children` below a "modules by path" label.
    pub fn wrapper(mut self, label: &str, children: Vec<Value>) -> Self {
        self.modules.push(json!({
            "type": "modules by path",
            "name": label,
            "children": children,
        }));
        self
    }

    pub fn raw(mut self, entry: Value) -> Self {
        self.modules.push(entry);
        self
    }

    pub fn field(mut self, key: &str, value: Value) -> Self {
        self.extra.insert(key.to_string(), value);
        self
    }

    pub fn build(self) -> Value {
        let mut document = self.extra;
        document.insert("modules".to_string(), Value::Array(self.modules));
        Value::Object(document)
    }
}
