//! Custom assertions over stats documents and CLI output.
//!
//! Provides high-level assertions that make tests more readable:
//! - Top-level module counts
//! - Presence of a module under a given key
//! - Importer lists of a module
//! - Contract checks

use anyhow::{Context, Result};
use chromastats_normalize::check_contract;
use chromastats_types::ModuleKey;
use serde_json::Value;

fn modules_of(json: &Value) -> Result<&Vec<Value>> {
    json["modules"]
        .as_array()
        .context("Expected 'modules' array in JSON")
}

/// Assert that a document has the expected number of top-level modules.
pub fn assert_module_count(json: &Value, expected: usize) -> Result<()> {
    let modules = modules_of(json)?;

    if modules.len() != expected {
        anyhow::bail!("Expected {} modules, got {}", expected, modules.len());
    }

    Ok(())
}

/// Assert that a top-level module exists under `id::name`.
pub fn assert_has_module(json: &Value, id: &str, name: &str) -> Result<()> {
    let expected = ModuleKey::new(id, name);
    let modules = modules_of(json)?;

    if !modules
        .iter()
        .filter_map(ModuleKey::of_raw)
        .any(|key| key == expected)
    {
        anyhow::bail!("Expected module {} not found among {} modules", expected, modules.len());
    }

    Ok(())
}

/// Assert that the first top-level module named `name` lists exactly `expected` as importers.
pub fn assert_reasons(json: &Value, name: &str, expected: &[&str]) -> Result<()> {
    let module = modules_of(json)?
        .iter()
        .find(|module| module["name"] == name)
        .with_context(|| format!("Module {} not found", name))?;

    let reasons: Vec<&str> = module["reasons"]
        .as_array()
        .map(|reasons| {
            reasons
                .iter()
                .filter_map(|reason| reason["moduleName"].as_str())
                .collect()
        })
        .unwrap_or_default();

    if reasons != expected {
        anyhow::bail!(
            "Module {} has reasons {:?} but expected {:?}",
            name,
            reasons,
            expected
        );
    }

    Ok(())
}

/// Assert that a document satisfies the minimal contract.
pub fn assert_contract_ok(json: &Value) -> Result<()> {
    let report = check_contract(json);

    if !report.is_ok() {
        let details: Vec<String> = report.violations.iter().map(ToString::to_string).collect();
        anyhow::bail!("Contract violations: {}", details.join("; "));
    }

    Ok(())
}
